use std::path::Path;

use anyhow::Result;
use siteline::{
    ClockVariant, ContactSubmission, DatastoreVariant, FileFlagStore, FlagStoreVariant,
    MailerVariant, ManualClock, MemoryFlagStore, MockDatastore, MockMailer, SiteConfig,
    Siteline, SubmitError,
};

// ===== Test Helper Functions =====

const NOW: u64 = 1_700_000_000;

fn submission() -> ContactSubmission {
    ContactSubmission {
        first_name: "A".into(),
        last_name: "B".into(),
        email: "a@b.com".into(),
        message: "hi".into(),
    }
}

fn app_with_durable_file(path: &Path, now: u64) -> Siteline {
    Siteline::new(
        DatastoreVariant::Mock(MockDatastore::new()),
        MailerVariant::Mock(MockMailer::default()),
        FlagStoreVariant::File(FileFlagStore::new(path)),
        FlagStoreVariant::Memory(MemoryFlagStore::new()),
        ClockVariant::Manual(ManualClock::at(now)),
        SiteConfig::default(),
    )
}

// ===== Integration Tests =====

#[tokio::test]
async fn test_cooldown_survives_a_restart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let flags = dir.path().join("flags.json");

    // First process instance submits successfully.
    let app = app_with_durable_file(&flags, NOW);
    app.submit_contact(&submission()).await?;
    drop(app);

    // A new instance two minutes later still sees the cooldown because the
    // durable store is the same file.
    let restarted = app_with_durable_file(&flags, NOW + 120);
    let err = restarted.submit_contact(&submission()).await.unwrap_err();
    assert!(matches!(
        err,
        SubmitError::CooldownActive { remaining_secs: 180 }
    ));

    // And once the window has passed, submissions flow again.
    let later = app_with_durable_file(&flags, NOW + 400);
    later.submit_contact(&submission()).await?;
    Ok(())
}

#[tokio::test]
async fn test_submission_row_carries_the_original_field_names() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = app_with_durable_file(&dir.path().join("flags.json"), NOW);

    app.submit_contact(&submission()).await?;

    let DatastoreVariant::Mock(store) = &app.datastore else {
        unreachable!()
    };
    let inserted = store.inserted_rows();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].0, "contact_submissions");
    assert_eq!(inserted[0].1["firstName"], "A");
    assert_eq!(inserted[0].1["lastName"], "B");
    assert_eq!(inserted[0].1["email"], "a@b.com");
    assert_eq!(inserted[0].1["message"], "hi");
    Ok(())
}

#[tokio::test]
async fn test_provider_error_text_reaches_the_caller() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = Siteline::new(
        DatastoreVariant::Mock(MockDatastore::new()),
        MailerVariant::Mock(MockMailer::with_status(500)),
        FlagStoreVariant::File(FileFlagStore::new(dir.path().join("flags.json"))),
        FlagStoreVariant::Memory(MemoryFlagStore::new()),
        ClockVariant::Manual(ManualClock::at(NOW)),
        SiteConfig::default(),
    );

    let err = app.submit_contact(&submission()).await.unwrap_err();
    let text = err.to_string();
    assert!(text.contains("email"), "unexpected error text: {}", text);

    // The underlying provider message is preserved in the source chain.
    let SubmitError::Email(inner) = err else {
        panic!("expected an email failure")
    };
    assert!(inner.to_string().contains("500"));
    Ok(())
}

#[tokio::test]
async fn test_mail_params_match_the_persisted_row() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = app_with_durable_file(&dir.path().join("flags.json"), NOW);

    app.submit_contact(&submission()).await?;

    let MailerVariant::Mock(mailer) = &app.mailer else {
        unreachable!()
    };
    let sends = mailer.sends();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].2["firstName"], "A");
    assert_eq!(sends[0].2["message"], "hi");
    Ok(())
}
