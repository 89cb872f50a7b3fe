//! Carrito: a page-object end-to-end suite for the storefront demo
//! application.
//!
//! The crate models each screen of the application as a typed page object
//! over an abstract [`Session`] contract. Navigation methods consume the
//! current page and return the destination page, so test scenarios read as
//! the flow they exercise:
//!
//! ```no_run
//! use carrito::config::SuiteConfig;
//! use carrito::harness::Harness;
//! use carrito::mock::MockStorefront;
//!
//! # async fn scenario() -> carrito::CarritoResult<()> {
//! let config = SuiteConfig::from_env()?.with_base_url("https://storefront.test/");
//! let harness = Harness::launch(config, MockStorefront::new().session()).await?;
//!
//! let shop = harness.home().navigate_to_shop().await?;
//! shop.find_and_add_to_cart("Nokia Edge").await?;
//! let checkout = shop.proceed_to_checkout().await?;
//! let purchase = checkout.proceed_to_purchase().await?;
//! purchase.set_delivery_location("ind").await?;
//! purchase.accept_terms().await?;
//! purchase.complete_purchase().await?;
//! assert!(purchase.success_message().await?.contains("Success"));
//! # harness.close().await
//! # }
//! ```
//!
//! The concrete browser driver is an external collaborator behind the
//! [`Session`] and [`Element`] traits; [`mock::MockStorefront`] implements
//! them in-memory so the suite's own tests run hermetically.
//!
//! [`Session`]: session::Session
//! [`Element`]: session::Element

#![warn(missing_docs)]

pub mod config;
pub mod data;
pub mod harness;
pub mod locator;
pub mod mock;
pub mod pages;
pub mod reporter;
pub mod result;
pub mod session;
pub mod tracing_support;
pub mod wait;

pub use config::{Browser, SuiteConfig};
pub use data::{load_records, FormRecord};
pub use harness::Harness;
pub use locator::{Locator, LocatorRegistry, LocatorStrategy};
pub use pages::{CheckoutPage, ConfirmationPage, HomePage, PurchasePage, ShoppingPage};
pub use reporter::FailureReporter;
pub use result::{CarritoError, CarritoResult};
pub use session::{Element, ElementHandle, Session, SessionHandle};
pub use wait::{wait_for_presence, WaitOptions};
