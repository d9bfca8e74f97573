//! Typed page content resolved from raw datastore rows.
//!
//! Content rows arrive as loose JSON maps. They are resolved into a fully
//! populated record exactly once, here at the boundary; missing or mistyped
//! fields get a documented default and the row shape never travels further
//! into the system.

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::site::Siteline;
use crate::traits::Datastore;

const DEFAULT_HEADING: &str = "Get in touch";
const DEFAULT_INTRO: &str = "We usually reply within two business days.";
const DEFAULT_BODY: &str = "";
const DEFAULT_CTA_LABEL: &str = "Send message";

/// Content for one page, identified by its slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub heading: String,
    pub intro: String,
    pub body: String,
    pub cta_label: String,
}

impl PageContent {
    /// Resolve a raw row into a complete record. `None` (row absent) yields
    /// all defaults; individually missing or non-string fields fall back
    /// per field.
    pub fn from_row(row: Option<&Value>) -> Self {
        Self {
            heading: field_or(row, "heading", DEFAULT_HEADING),
            intro: field_or(row, "intro", DEFAULT_INTRO),
            body: field_or(row, "body", DEFAULT_BODY),
            cta_label: field_or(row, "cta_label", DEFAULT_CTA_LABEL),
        }
    }
}

impl Default for PageContent {
    fn default() -> Self {
        Self::from_row(None)
    }
}

fn field_or(row: Option<&Value>, field: &str, default: &str) -> String {
    row.and_then(|r| r.get(field))
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

impl Siteline {
    /// Fetch and resolve the content row for one page slug. A missing row
    /// is not an error; it resolves to the defaults.
    pub async fn page_content(&self, slug: &str) -> Result<PageContent> {
        let row = self
            .datastore
            .select_row(&self.config.content_table, "slug", slug)
            .await?;
        debug!("content for {} resolved (row present: {})", slug, row.is_some());
        Ok(PageContent::from_row(row.as_ref()))
    }
}
