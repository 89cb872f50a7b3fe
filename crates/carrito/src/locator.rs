//! Locator abstraction for element selection.
//!
//! A [`Locator`] is an immutable (strategy, selector) pair. It identifies
//! zero, one, or many elements in the live document at query time; nothing is
//! cached, and every query re-resolves against current document state.
//!
//! Each page declares its locators in a [`LocatorRegistry`]: a closed, named
//! set fixed at construction time. Names are unique within a registry and the
//! set is read-only once built.

use serde::{Deserialize, Serialize};

use crate::result::{CarritoError, CarritoResult};

/// Strategy used to resolve a selector against the document.
///
/// This is a closed set; the session contract supports exactly these six.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocatorStrategy {
    /// Match on the `id` attribute
    ById,
    /// Match on the `name` attribute
    ByName,
    /// Match with a CSS selector
    ByCss,
    /// Match with an XPath expression
    ByXPath,
    /// Match anchors by exact visible text
    ByLinkText,
    /// Match on a single class name
    ByClassName,
}

impl LocatorStrategy {
    /// WebDriver-style name of this strategy, used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ById => "id",
            Self::ByName => "name",
            Self::ByCss => "css selector",
            Self::ByXPath => "xpath",
            Self::ByLinkText => "link text",
            Self::ByClassName => "class name",
        }
    }
}

impl std::fmt::Display for LocatorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable (strategy, selector) pair identifying elements in the
/// current document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    strategy: LocatorStrategy,
    selector: String,
}

impl Locator {
    /// Create a locator with an explicit strategy.
    #[must_use]
    pub fn new(strategy: LocatorStrategy, selector: impl Into<String>) -> Self {
        Self {
            strategy,
            selector: selector.into(),
        }
    }

    /// Locate by `id` attribute.
    #[must_use]
    pub fn id(selector: impl Into<String>) -> Self {
        Self::new(LocatorStrategy::ById, selector)
    }

    /// Locate by `name` attribute.
    #[must_use]
    pub fn name(selector: impl Into<String>) -> Self {
        Self::new(LocatorStrategy::ByName, selector)
    }

    /// Locate by CSS selector.
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(LocatorStrategy::ByCss, selector)
    }

    /// Locate by XPath expression.
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::new(LocatorStrategy::ByXPath, selector)
    }

    /// Locate anchors by exact visible text.
    #[must_use]
    pub fn link_text(selector: impl Into<String>) -> Self {
        Self::new(LocatorStrategy::ByLinkText, selector)
    }

    /// Locate by a single class name.
    #[must_use]
    pub fn class_name(selector: impl Into<String>) -> Self {
        Self::new(LocatorStrategy::ByClassName, selector)
    }

    /// Get the strategy.
    #[must_use]
    pub const fn strategy(&self) -> LocatorStrategy {
        self.strategy
    }

    /// Get the selector string.
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}'", self.strategy, self.selector)
    }
}

/// A closed, named set of locators for one page.
///
/// Built once at page-definition time and read-only afterwards. Duplicate
/// names are rejected at build time.
#[derive(Debug, Clone)]
pub struct LocatorRegistry {
    entries: Vec<(String, Locator)>,
}

impl LocatorRegistry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> LocatorRegistryBuilder {
        LocatorRegistryBuilder::default()
    }

    /// Look up a locator by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Locator> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, l)| l)
    }

    /// All registered names, in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Number of registered locators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`LocatorRegistry`].
#[derive(Debug, Clone, Default)]
pub struct LocatorRegistryBuilder {
    entries: Vec<(String, Locator)>,
}

impl LocatorRegistryBuilder {
    /// Add a named locator.
    #[must_use]
    pub fn define(mut self, name: impl Into<String>, locator: Locator) -> Self {
        self.entries.push((name.into(), locator));
        self
    }

    /// Finish building, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`CarritoError::DuplicateLocator`] if two entries share a name.
    pub fn build(self) -> CarritoResult<LocatorRegistry> {
        for (i, (name, _)) in self.entries.iter().enumerate() {
            if self.entries[..i].iter().any(|(n, _)| n == name) {
                return Err(CarritoError::DuplicateLocator { name: name.clone() });
            }
        }
        Ok(LocatorRegistry {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    mod locator_tests {
        use super::*;

        #[test]
        fn test_constructors() {
            assert_eq!(Locator::id("country").strategy(), LocatorStrategy::ById);
            assert_eq!(Locator::name("email").strategy(), LocatorStrategy::ByName);
            assert_eq!(Locator::css(".card").strategy(), LocatorStrategy::ByCss);
            assert_eq!(
                Locator::xpath("//input[@type='submit']").strategy(),
                LocatorStrategy::ByXPath
            );
            assert_eq!(
                Locator::link_text("Shop").strategy(),
                LocatorStrategy::ByLinkText
            );
            assert_eq!(
                Locator::class_name("alert-success").strategy(),
                LocatorStrategy::ByClassName
            );
        }

        #[test]
        fn test_display() {
            let locator = Locator::css(".btn-success");
            assert_eq!(locator.to_string(), "css selector '.btn-success'");

            let locator = Locator::link_text("Shop");
            assert_eq!(locator.to_string(), "link text 'Shop'");
        }

        #[test]
        fn test_equality() {
            assert_eq!(Locator::id("country"), Locator::id("country"));
            assert_ne!(Locator::id("country"), Locator::name("country"));
        }
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn test_build_and_lookup() {
            let registry = LocatorRegistry::builder()
                .define("shop_link", Locator::link_text("Shop"))
                .define("name", Locator::name("name"))
                .build()
                .unwrap();

            assert_eq!(registry.len(), 2);
            assert_eq!(registry.get("shop_link"), Some(&Locator::link_text("Shop")));
            assert!(registry.get("missing").is_none());
        }

        #[test]
        fn test_duplicate_name_rejected() {
            let result = LocatorRegistry::builder()
                .define("submit", Locator::xpath("//input[@type='submit']"))
                .define("submit", Locator::css("input[type='submit']"))
                .build();

            assert!(matches!(
                result,
                Err(CarritoError::DuplicateLocator { name }) if name == "submit"
            ));
        }

        #[test]
        fn test_names_in_declaration_order() {
            let registry = LocatorRegistry::builder()
                .define("a", Locator::id("a"))
                .define("b", Locator::id("b"))
                .define("c", Locator::id("c"))
                .build()
                .unwrap();

            assert_eq!(registry.names(), vec!["a", "b", "c"]);
        }

        #[test]
        fn test_empty_registry() {
            let registry = LocatorRegistry::builder().build().unwrap();
            assert!(registry.is_empty());
        }
    }
}
