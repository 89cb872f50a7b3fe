//! End-to-end purchase scenarios, home page through order confirmation.

use carrito::config::SuiteConfig;
use carrito::harness::Harness;
use carrito::mock::MockStorefront;
use carrito::pages::ConfirmationPage;
use carrito::result::{CarritoError, CarritoResult};
use carrito::tracing_support::init_test_logging;

async fn launch() -> CarritoResult<(MockStorefront, Harness, tempfile::TempDir)> {
    init_test_logging();
    let tmp = tempfile::tempdir()?;
    let config = SuiteConfig::default()
        .with_base_url("https://storefront.test/")
        .with_artifact_dir(tmp.path());
    let app = MockStorefront::new();
    let harness = Harness::launch(config, app.session()).await?;
    Ok((app, harness, tmp))
}

#[tokio::test]
async fn test_full_purchase_flow_confirms_order() -> CarritoResult<()> {
    let (_app, harness, _tmp) = launch().await?;

    let shop = harness.home().navigate_to_shop().await?;
    assert!(shop.find_and_add_to_cart("Nokia Edge").await?);

    let checkout = shop.proceed_to_checkout().await?;
    assert_eq!(checkout.quantity().await?, "1");
    checkout.set_quantity("2").await?;
    assert_eq!(checkout.quantity().await?, "2");

    let purchase = checkout.proceed_to_purchase().await?;
    purchase.set_delivery_location("ind").await?;
    purchase.accept_terms().await?;
    purchase.complete_purchase().await?;

    let message = purchase.success_message().await?;
    assert!(message.contains("Success"), "unexpected banner: {message}");

    harness.close().await
}

#[tokio::test]
async fn test_accepting_terms_twice_clicks_once() -> CarritoResult<()> {
    let (app, harness, _tmp) = launch().await?;

    let shop = harness.home().navigate_to_shop().await?;
    assert!(shop.find_and_add_to_cart("Samsung Note 8").await?);
    let purchase = shop
        .proceed_to_checkout()
        .await?
        .proceed_to_purchase()
        .await?;

    purchase.accept_terms().await?;
    purchase.accept_terms().await?;

    assert_eq!(app.click_count("checkbox2"), 1);
    Ok(())
}

#[tokio::test]
async fn test_legacy_confirmation_page_still_completes() -> CarritoResult<()> {
    let (_app, harness, _tmp) = launch().await?;

    let shop = harness.home().navigate_to_shop().await?;
    assert!(shop.find_and_add_to_cart("Blackberry").await?);
    let _ = shop
        .proceed_to_checkout()
        .await?
        .proceed_to_purchase()
        .await?;

    let legacy = ConfirmationPage::new(harness.session());
    legacy.set_delivery_location("ind").await?;
    legacy.accept_terms().await?;
    legacy.complete_purchase().await?;
    assert!(legacy.success_message().await?.contains("Success"));
    Ok(())
}

#[tokio::test]
async fn test_failure_is_reported_with_screenshot() -> CarritoResult<()> {
    let (_app, harness, _tmp) = launch().await?;

    // Looking for the purchase banner on the home page fails; the harness
    // then captures the evidence, like the suite's failure hook would.
    let outcome = carrito::PurchasePage::new(harness.session())
        .with_wait_options(carrito::WaitOptions::new().with_timeout(100).with_poll_interval(10))
        .success_message()
        .await;
    assert!(matches!(outcome, Err(CarritoError::Timeout { ms: 100, .. })));

    let shot = harness.report_failure("test_failure_is_reported").await?;
    assert!(shot.exists());
    let name = shot
        .file_name()
        .ok_or_else(|| CarritoError::Data {
            message: "screenshot path has no file name".to_string(),
        })?
        .to_string_lossy()
        .into_owned();
    assert!(name.starts_with("test_failure_is_reported_failed_"));
    assert!(name.ends_with(".png"));

    harness.close().await
}
