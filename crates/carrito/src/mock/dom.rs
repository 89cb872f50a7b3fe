//! Minimal document model and selector engine for the mock storefront.
//!
//! Supports the six locator strategies of the session contract. The CSS
//! engine covers the subset the page objects use: tag, `#id`, `.class`,
//! compounds of those, `[attr='value']`, and the descendant combinator. The
//! XPath engine covers `//tag` and `//tag[@attr='value']`.

use std::collections::BTreeMap;

use super::ClickAction;
use crate::locator::{Locator, LocatorStrategy};

pub(crate) type NodeId = usize;

/// One element in the document tree.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub classes: Vec<String>,
    pub text: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub action: Option<ClickAction>,
    pub detached: bool,
}

/// Declarative node spec used when building documents.
#[derive(Debug, Clone, Default)]
pub(crate) struct El {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    action: Option<ClickAction>,
}

impl El {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attrs.insert(name.into(), value.into());
        self
    }

    /// Add classes, space-separated.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(String::from));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn on_click(mut self, action: ClickAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// A document: a tree of nodes rooted at a synthetic `<body>`.
#[derive(Debug, Clone)]
pub(crate) struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                tag: "body".to_string(),
                attrs: BTreeMap::new(),
                classes: Vec::new(),
                text: String::new(),
                children: Vec::new(),
                parent: None,
                action: None,
                detached: false,
            }],
        }
    }

    pub const fn root(&self) -> NodeId {
        0
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Append a child node and return its id.
    pub fn append(&mut self, parent: NodeId, el: El) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            tag: el.tag,
            attrs: el.attrs,
            classes: el.classes,
            text: el.text,
            children: Vec::new(),
            parent: Some(parent),
            action: el.action,
            detached: false,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Remove a node (and its subtree) from the tree. Handles pointing into
    /// the subtree become stale.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent {
            self.nodes[parent].children.retain(|c| *c != id);
        }
        self.nodes[id].detached = true;
    }

    /// Whether the node is still reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut cur = id;
        loop {
            let node = &self.nodes[cur];
            if node.detached {
                return false;
            }
            match node.parent {
                Some(parent) => cur = parent,
                None => return true,
            }
        }
    }

    /// Closest ancestor (including `id` itself) with the given tag.
    pub fn ancestor_with_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cur = Some(id);
        while let Some(node_id) = cur {
            if self.nodes[node_id].tag == tag {
                return Some(node_id);
            }
            cur = self.nodes[node_id].parent;
        }
        None
    }

    /// Visible text: the node's own text plus descendant text, in document
    /// order, joined with single spaces.
    pub fn text_of(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        self.collect_text(id, &mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, id: NodeId, parts: &mut Vec<String>) {
        let node = &self.nodes[id];
        if !node.text.is_empty() {
            parts.push(node.text.clone());
        }
        for child in &node.children {
            self.collect_text(*child, parts);
        }
    }

    /// Pre-order descendants of `scope`, excluding `scope` itself.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[scope].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id].children.iter().rev().copied());
        }
        out
    }

    /// All elements under `scope` matching `locator`, in document order.
    ///
    /// Unparseable CSS/XPath selectors match nothing.
    pub fn query(&self, scope: NodeId, locator: &Locator) -> Vec<NodeId> {
        match locator.strategy() {
            LocatorStrategy::ByCss => match parse_css(locator.selector()) {
                Some(chain) => self
                    .descendants(scope)
                    .into_iter()
                    .filter(|id| self.css_chain_matches(*id, &chain))
                    .collect(),
                None => Vec::new(),
            },
            LocatorStrategy::ByXPath => match parse_xpath(locator.selector()) {
                Some(step) => self
                    .descendants(scope)
                    .into_iter()
                    .filter(|id| self.xpath_matches(*id, &step))
                    .collect(),
                None => Vec::new(),
            },
            _ => self
                .descendants(scope)
                .into_iter()
                .filter(|id| self.simple_matches(*id, locator))
                .collect(),
        }
    }

    fn simple_matches(&self, id: NodeId, locator: &Locator) -> bool {
        let node = &self.nodes[id];
        let selector = locator.selector();
        match locator.strategy() {
            LocatorStrategy::ById => node.attrs.get("id").is_some_and(|v| v == selector),
            LocatorStrategy::ByName => node.attrs.get("name").is_some_and(|v| v == selector),
            LocatorStrategy::ByClassName => node.classes.iter().any(|c| c == selector),
            LocatorStrategy::ByLinkText => node.tag == "a" && self.text_of(id) == selector,
            LocatorStrategy::ByCss | LocatorStrategy::ByXPath => false,
        }
    }

    fn compound_matches(&self, id: NodeId, compound: &Compound) -> bool {
        let node = &self.nodes[id];
        if let Some(tag) = &compound.tag {
            if &node.tag != tag {
                return false;
            }
        }
        if let Some(want) = &compound.id {
            if node.attrs.get("id") != Some(want) {
                return false;
            }
        }
        for class in &compound.classes {
            if !node.classes.iter().any(|c| c == class) {
                return false;
            }
        }
        for (name, value) in &compound.attrs {
            match (node.attrs.get(name), value) {
                (Some(actual), Some(want)) if actual == want => {}
                (Some(_), None) => {}
                _ => return false,
            }
        }
        true
    }

    fn css_chain_matches(&self, id: NodeId, chain: &[Compound]) -> bool {
        let (last, rest) = match chain.split_last() {
            Some(split) => split,
            None => return false,
        };
        if !self.compound_matches(id, last) {
            return false;
        }
        // Remaining compounds must appear on ancestors, innermost last.
        let mut need = rest.len();
        let mut cur = self.nodes[id].parent;
        while need > 0 {
            match cur {
                Some(ancestor) => {
                    if self.compound_matches(ancestor, &rest[need - 1]) {
                        need -= 1;
                    }
                    cur = self.nodes[ancestor].parent;
                }
                None => break,
            }
        }
        need == 0
    }

    fn xpath_matches(&self, id: NodeId, step: &XPathStep) -> bool {
        let node = &self.nodes[id];
        if step.tag != "*" && node.tag != step.tag {
            return false;
        }
        match &step.attr {
            Some((name, value)) => node.attrs.get(name) == Some(value),
            None => true,
        }
    }
}

/// One compound selector: `tag#id.class[attr='value']`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(c) = chars.peek() {
        if is_ident_char(*c) {
            ident.push(*c);
            let _ = chars.next();
        } else {
            break;
        }
    }
    ident
}

/// Parse a descendant chain of compound selectors. Returns `None` for
/// selectors outside the supported subset.
pub(crate) fn parse_css(selector: &str) -> Option<Vec<Compound>> {
    let mut chain = Vec::new();
    for part in selector.split_whitespace() {
        chain.push(parse_compound(part)?);
    }
    if chain.is_empty() {
        None
    } else {
        Some(chain)
    }
}

fn parse_compound(part: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut chars = part.chars().peekable();

    if chars.peek().is_some_and(|c| c.is_alphabetic()) {
        compound.tag = Some(take_ident(&mut chars));
    }

    let mut saw_any = compound.tag.is_some();
    while let Some(c) = chars.next() {
        match c {
            '#' => {
                let ident = take_ident(&mut chars);
                if ident.is_empty() {
                    return None;
                }
                compound.id = Some(ident);
            }
            '.' => {
                let ident = take_ident(&mut chars);
                if ident.is_empty() {
                    return None;
                }
                compound.classes.push(ident);
            }
            '[' => {
                let mut body = String::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(ch) => body.push(ch),
                        None => return None,
                    }
                }
                let (name, value) = match body.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim_matches(|q| q == '\'' || q == '"');
                        (name.trim(), Some(value.to_string()))
                    }
                    None => (body.trim(), None),
                };
                if name.is_empty() {
                    return None;
                }
                compound.attrs.push((name.to_string(), value));
            }
            _ => return None,
        }
        saw_any = true;
    }

    if saw_any {
        Some(compound)
    } else {
        None
    }
}

/// One supported XPath step: `//tag` or `//tag[@attr='value']`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct XPathStep {
    tag: String,
    attr: Option<(String, String)>,
}

pub(crate) fn parse_xpath(selector: &str) -> Option<XPathStep> {
    let rest = selector.strip_prefix("//")?;
    let (tag, attr) = match rest.split_once('[') {
        Some((tag, cond)) => {
            let cond = cond.strip_suffix(']')?;
            let cond = cond.strip_prefix('@')?;
            let (name, value) = cond.split_once('=')?;
            let value = value.trim_matches(|q| q == '\'' || q == '"');
            (tag, Some((name.to_string(), value.to_string())))
        }
        None => (rest, None),
    };
    if tag.is_empty() || tag.contains('/') {
        return None;
    }
    Some(XPathStep {
        tag: tag.to_string(),
        attr,
    })
}
