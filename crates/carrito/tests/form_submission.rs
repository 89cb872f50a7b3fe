//! Data-driven practice-form scenarios.

use carrito::config::{testdata_path, SuiteConfig};
use carrito::data::load_records;
use carrito::harness::Harness;
use carrito::mock::MockStorefront;
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
async fn test_each_record_submits_successfully() -> CarritoResult<()> {
    let records = load_records(testdata_path("form_submission.json"))?;
    assert!(!records.is_empty());

    for record in &records {
        let (_app, harness, _tmp) = launch().await?;
        let home = harness.home();

        home.fill_form(record).await?;

        let message = home.success_message().await?;
        assert!(
            message.contains("The Form has been submitted successfully"),
            "unexpected banner for {}: {message}",
            record.name
        );
        harness.close().await?;
    }
    Ok(())
}

#[tokio::test]
async fn test_form_fails_on_unknown_gender_option() -> CarritoResult<()> {
    let (_app, harness, _tmp) = launch().await?;
    let mut record = load_records(testdata_path("form_submission.json"))?
        .into_iter()
        .next()
        .ok_or_else(|| CarritoError::Data {
            message: "empty test data".to_string(),
        })?;
    record.gender = "Unspecified".to_string();

    let err = harness.home().fill_form(&record).await.unwrap_err();
    assert!(matches!(err, CarritoError::NoSuchOption { text } if text == "Unspecified"));
    Ok(())
}

#[tokio::test]
async fn test_reset_clears_a_half_filled_form() -> CarritoResult<()> {
    let (_app, harness, _tmp) = launch().await?;
    let home = harness.home();
    home.set_name("john doe").await?;

    harness.reset().await?;

    // A fresh home page sees an empty name field.
    let name = carrito::HomePage::registry()?
        .get("name-input")
        .cloned()
        .ok_or_else(|| CarritoError::Data {
            message: "registry missing name-input".to_string(),
        })?;
    let field = harness.session().find_element(&name).await?;
    assert_eq!(field.attribute("value").await?, None);
    Ok(())
}
