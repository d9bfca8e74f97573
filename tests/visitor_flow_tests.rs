use anyhow::Result;
use serde_json::json;
use siteline::{
    ClockVariant, DatastoreVariant, FlagStore, FlagStoreVariant, MailerVariant, ManualClock,
    MemoryFlagStore, MockDatastore, MockMailer, PageContent, SiteConfig, Siteline,
    VISIT_TRACKED_KEY,
};

// ===== Test Helper Functions =====

const NOW: u64 = 1_700_000_000;

fn app(store: MockDatastore) -> Siteline {
    Siteline::new(
        DatastoreVariant::Mock(store),
        MailerVariant::Mock(MockMailer::default()),
        FlagStoreVariant::Memory(MemoryFlagStore::new()),
        FlagStoreVariant::Memory(MemoryFlagStore::new()),
        ClockVariant::Manual(ManualClock::at(NOW)),
        SiteConfig::default(),
    )
}

fn mock(app: &Siteline) -> &MockDatastore {
    let DatastoreVariant::Mock(inner) = &app.datastore else {
        unreachable!()
    };
    inner
}

// ===== Integration Tests =====

#[tokio::test]
async fn test_happy_path_is_exactly_one_procedure_call() -> Result<()> {
    let app = app(MockDatastore::new());

    app.record_visit(false).await?;

    let store = mock(&app);
    assert_eq!(store.procedure_calls(), vec!["increment_total_visitors"]);
    assert_eq!(store.select_calls(), 0);
    assert_eq!(store.upserted_rows().len(), 0);
    assert_eq!(app.session.get(VISIT_TRACKED_KEY).await?, Some("1".into()));
    Ok(())
}

#[tokio::test]
async fn test_fallback_runs_rpc_then_select_then_upsert() -> Result<()> {
    let store = MockDatastore::new().with_procedure_failure().with_row(
        "site_counters",
        "total_visitors",
        json!({"key": "total_visitors", "value": "7"}),
    );
    let app = app(store);

    app.record_visit(false).await?;

    let store = mock(&app);
    assert_eq!(store.procedure_calls().len(), 1);
    assert_eq!(store.select_calls(), 1);
    let upserted = store.upserted_rows();
    assert_eq!(upserted.len(), 1);
    assert_eq!(upserted[0].0, "site_counters");
    assert_eq!(upserted[0].1["value"], "8");
    Ok(())
}

#[tokio::test]
async fn test_fallback_result_is_visible_to_a_later_select() -> Result<()> {
    // After the fallback upsert, a second forced visit whose RPC also fails
    // reads the new value back and keeps counting from there.
    let store = MockDatastore::new().with_procedure_failure().with_row(
        "site_counters",
        "total_visitors",
        json!({"key": "total_visitors", "value": "7"}),
    );
    let app = app(store);

    app.record_visit(false).await?;
    app.record_visit(true).await?;

    let upserted = mock(&app).upserted_rows();
    assert_eq!(upserted.len(), 2);
    assert_eq!(upserted[1].1["value"], "9");
    Ok(())
}

// ===== Content Resolution =====

#[tokio::test]
async fn test_page_content_resolves_seeded_row() -> Result<()> {
    let store = MockDatastore::new().with_row(
        "page_content",
        "contact",
        json!({"slug": "contact", "heading": "Talk to us", "intro": "Hello"}),
    );
    let app = app(store);

    let content = app.page_content("contact").await?;
    assert_eq!(content.heading, "Talk to us");
    assert_eq!(content.intro, "Hello");
    // Fields absent from the row carry their defaults.
    assert_eq!(content.cta_label, PageContent::default().cta_label);
    Ok(())
}

#[tokio::test]
async fn test_page_content_for_missing_row_is_all_defaults() -> Result<()> {
    let app = app(MockDatastore::new());

    let content = app.page_content("nonexistent").await?;
    assert_eq!(content, PageContent::default());
    Ok(())
}
