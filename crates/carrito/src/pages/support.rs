//! Shared page capabilities.
//!
//! Free functions composed into every page object. Pages pass their session
//! and locators explicitly; nothing here holds state.

use crate::locator::Locator;
use crate::result::{CarritoError, CarritoResult};
use crate::session::{Element, Session};

/// Resolve `locator` and replace the element's current value with `text`.
///
/// # Errors
///
/// Fails with [`CarritoError::ElementNotFound`] when nothing matches, or
/// propagates the element-level failure.
pub async fn type_into(
    session: &dyn Session,
    locator: &Locator,
    text: &str,
) -> CarritoResult<()> {
    let element = session.find_element(locator).await?;
    element.clear().await?;
    element.send_keys(text).await
}

/// Resolve `locator` and click it.
///
/// # Errors
///
/// Fails with [`CarritoError::ElementNotFound`] when nothing matches.
pub async fn click(session: &dyn Session, locator: &Locator) -> CarritoResult<()> {
    session.find_element(locator).await?.click().await
}

/// Set a checkbox (or radio) to the target state, clicking only when the
/// current state differs. Calling twice with the same target is a no-op the
/// second time.
pub async fn set_checked(element: &dyn Element, target: bool) -> CarritoResult<()> {
    if element.is_selected().await? != target {
        element.click().await?;
    }
    Ok(())
}

/// Select the `<option>` of a `<select>` element whose visible text matches
/// `text` exactly (after trimming).
///
/// # Errors
///
/// Fails with [`CarritoError::NoSuchOption`] when no option matches.
pub async fn select_dropdown_by_text(select: &dyn Element, text: &str) -> CarritoResult<()> {
    let options = select.find_elements(&Locator::css("option")).await?;
    for option in &options {
        if option.text().await?.trim() == text.trim() {
            return option.click().await;
        }
    }
    Err(CarritoError::NoSuchOption {
        text: text.to_string(),
    })
}

/// Fetch an element's trimmed visible text.
pub async fn text_of(session: &dyn Session, locator: &Locator) -> CarritoResult<String> {
    let element = session.find_element(locator).await?;
    Ok(element.text().await?.trim().to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockStorefront;

    async fn home_session() -> crate::session::SessionHandle {
        let session = MockStorefront::new().session();
        session.goto("https://storefront.test/").await.unwrap();
        session
    }

    #[tokio::test]
    async fn test_type_into_replaces_value() {
        let session = home_session().await;
        let name = Locator::name("name");

        type_into(session.as_ref(), &name, "first").await.unwrap();
        type_into(session.as_ref(), &name, "second").await.unwrap();

        let element = session.find_element(&name).await.unwrap();
        assert_eq!(
            element.attribute("value").await.unwrap().as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn test_set_checked_is_idempotent() {
        let session = home_session().await;
        let checkbox = session.find_element(&Locator::id("exampleCheck1")).await.unwrap();

        set_checked(checkbox.as_ref(), true).await.unwrap();
        set_checked(checkbox.as_ref(), true).await.unwrap();
        assert!(checkbox.is_selected().await.unwrap());

        set_checked(checkbox.as_ref(), false).await.unwrap();
        assert!(!checkbox.is_selected().await.unwrap());
    }

    #[tokio::test]
    async fn test_dropdown_selects_exact_match() {
        let session = home_session().await;
        let select = session
            .find_element(&Locator::id("exampleFormControlSelect1"))
            .await
            .unwrap();

        select_dropdown_by_text(select.as_ref(), "Female").await.unwrap();

        let options = select.find_elements(&Locator::css("option")).await.unwrap();
        let mut selected = Vec::new();
        for option in &options {
            if option.is_selected().await.unwrap() {
                selected.push(option.text().await.unwrap());
            }
        }
        assert_eq!(selected, vec!["Female"]);
    }

    #[tokio::test]
    async fn test_dropdown_rejects_unknown_text() {
        let session = home_session().await;
        let select = session
            .find_element(&Locator::id("exampleFormControlSelect1"))
            .await
            .unwrap();

        let err = select_dropdown_by_text(select.as_ref(), "Other").await.unwrap_err();
        assert!(matches!(err, CarritoError::NoSuchOption { text } if text == "Other"));
    }
}
