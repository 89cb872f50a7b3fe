//! Entry page: the practice form plus the link into the shop.

use crate::data::FormRecord;
use crate::locator::{Locator, LocatorRegistry};
use crate::pages::support;
use crate::pages::ShoppingPage;
use crate::result::{CarritoError, CarritoResult};
use crate::session::SessionHandle;
use crate::wait::{wait_for_presence, WaitOptions};

/// Employment statuses offered by the form's radio group, paired with the
/// DOM id of the radio that selects each.
const EMPLOYMENT_RADIOS: [(&str, &str); 3] = [
    ("Student", "inlineRadio1"),
    ("Employed", "inlineRadio2"),
    ("Entrepreneur", "inlineRadio3"),
];

/// The application's entry page.
#[derive(Clone)]
pub struct HomePage {
    session: SessionHandle,
    wait: WaitOptions,
}

impl std::fmt::Debug for HomePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomePage")
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

impl HomePage {
    /// Attach to the session's current page as the home page.
    #[must_use]
    pub fn new(session: SessionHandle) -> Self {
        Self {
            session,
            wait: WaitOptions::default(),
        }
    }

    /// Override the wait options used by this page.
    #[must_use]
    pub const fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// All locators this page uses, by name.
    ///
    /// # Errors
    ///
    /// Fails with [`CarritoError::DuplicateLocator`] if two entries collide,
    /// which the registry test pins down.
    pub fn registry() -> CarritoResult<LocatorRegistry> {
        let mut builder = LocatorRegistry::builder()
            .define("shop-link", Self::shop_link())
            .define("name-input", Self::name_input())
            .define("email-input", Self::email_input())
            .define("password-input", Self::password_input())
            .define("ice-cream-checkbox", Self::ice_cream_checkbox())
            .define("gender-select", Self::gender_select())
            .define("dob-input", Self::dob_input())
            .define("submit-button", Self::submit_button())
            .define("success-alert", Self::success_alert());
        for (status, id) in EMPLOYMENT_RADIOS {
            builder = builder.define(
                format!("employment-{}", status.to_lowercase()),
                Locator::id(id),
            );
        }
        builder.build()
    }

    fn shop_link() -> Locator {
        Locator::link_text("Shop")
    }

    fn name_input() -> Locator {
        Locator::name("name")
    }

    fn email_input() -> Locator {
        Locator::name("email")
    }

    fn password_input() -> Locator {
        Locator::id("exampleInputPassword1")
    }

    fn ice_cream_checkbox() -> Locator {
        Locator::id("exampleCheck1")
    }

    fn gender_select() -> Locator {
        Locator::id("exampleFormControlSelect1")
    }

    fn dob_input() -> Locator {
        Locator::name("bday")
    }

    fn submit_button() -> Locator {
        Locator::xpath("//input[@type='submit']")
    }

    fn success_alert() -> Locator {
        Locator::class_name("alert-success")
    }

    /// Follow the shop link. Consumes this page and returns the shop page.
    pub async fn navigate_to_shop(self) -> CarritoResult<ShoppingPage> {
        tracing::info!("navigating to shop");
        support::click(self.session.as_ref(), &Self::shop_link()).await?;
        Ok(ShoppingPage::new(self.session).with_wait_options(self.wait))
    }

    /// Fill the name field.
    pub async fn set_name(&self, name: &str) -> CarritoResult<()> {
        support::type_into(self.session.as_ref(), &Self::name_input(), name).await
    }

    /// Fill the email field.
    pub async fn set_email(&self, email: &str) -> CarritoResult<()> {
        support::type_into(self.session.as_ref(), &Self::email_input(), email).await
    }

    /// Fill the password field.
    pub async fn set_password(&self, password: &str) -> CarritoResult<()> {
        support::type_into(self.session.as_ref(), &Self::password_input(), password).await
    }

    /// Fill the date-of-birth field.
    pub async fn set_date_of_birth(&self, dob: &str) -> CarritoResult<()> {
        support::type_into(self.session.as_ref(), &Self::dob_input(), dob).await
    }

    /// Drive the ice-cream checkbox to the target state. Clicking only
    /// happens when the current state differs, so repeated calls with the
    /// same target are no-ops.
    pub async fn set_likes_ice_cream(&self, likes: bool) -> CarritoResult<()> {
        let checkbox = self.session.find_element(&Self::ice_cream_checkbox()).await?;
        support::set_checked(checkbox.as_ref(), likes).await
    }

    /// Select a gender by its visible option text.
    ///
    /// # Errors
    ///
    /// Fails with [`CarritoError::NoSuchOption`] when the dropdown has no
    /// such option.
    pub async fn select_gender(&self, gender: &str) -> CarritoResult<()> {
        let select = self.session.find_element(&Self::gender_select()).await?;
        support::select_dropdown_by_text(select.as_ref(), gender).await
    }

    /// Select an employment status radio by its domain value.
    ///
    /// # Errors
    ///
    /// Fails with [`CarritoError::InvalidArgument`] before touching the UI
    /// when `status` is outside the domain, and with
    /// [`CarritoError::DisabledControl`] when the radio exists but cannot be
    /// interacted with.
    pub async fn select_employment_status(&self, status: &str) -> CarritoResult<()> {
        let Some((_, id)) = EMPLOYMENT_RADIOS.iter().find(|(s, _)| *s == status) else {
            return Err(CarritoError::InvalidArgument {
                message: format!("unknown employment status '{status}'"),
            });
        };
        let locator = Locator::id(*id);
        let radio = self.session.find_element(&locator).await?;
        if !radio.is_enabled().await? {
            return Err(CarritoError::DisabledControl {
                locator: locator.to_string(),
            });
        }
        radio.click().await
    }

    /// Submit the form.
    pub async fn submit(&self) -> CarritoResult<()> {
        support::click(self.session.as_ref(), &Self::submit_button()).await
    }

    /// Wait for the post-submit alert and return its text.
    pub async fn success_message(&self) -> CarritoResult<String> {
        let alert =
            wait_for_presence(self.session.as_ref(), &Self::success_alert(), &self.wait).await?;
        Ok(alert.text().await?.trim().to_string())
    }

    /// Fill and submit the whole form from one record, in a fixed field
    /// order. Fails at the first failing sub-step; fields already filled are
    /// not rolled back.
    pub async fn fill_form(&self, record: &FormRecord) -> CarritoResult<()> {
        tracing::info!(name = %record.name, "filling practice form");
        self.set_name(&record.name).await?;
        self.set_email(&record.email).await?;
        self.set_password(&record.password).await?;
        self.set_likes_ice_cream(record.likes_ice_cream).await?;
        self.select_gender(&record.gender).await?;
        self.select_employment_status(&record.employment_status).await?;
        self.set_date_of_birth(&record.dob).await?;
        self.submit().await
    }
}
