use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Which datastore backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum DatastoreType {
    /// PostgREST-style HTTP backend.
    Rest,
    /// Discard writes, answer reads with nothing.
    Noop,
    /// In-memory mock (tests and local demos).
    Mock,
}

/// Which mailer backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum MailerType {
    /// EmailJS-style template-send HTTP API.
    Template,
    Noop,
    Mock,
}

/// Base configuration for the app, parsed from CLI arguments with
/// environment-variable fallbacks.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "siteline", about = "Contact submission and visitor tracking core")]
pub struct SiteConfig {
    /// Address the HTTP ingress binds to.
    #[arg(long, env = "SITELINE_BIND_ADDR", default_value = "127.0.0.1:8080")]
    pub bind_addr: String,

    /// Datastore backend selection.
    #[arg(long, value_enum, env = "SITELINE_DATASTORE", default_value = "noop")]
    pub datastore: DatastoreType,

    /// Base URL of the REST datastore (e.g. https://xyz.supabase.co).
    #[arg(long, env = "SITELINE_DATASTORE_URL", default_value = "")]
    pub datastore_url: String,

    /// API key for the REST datastore.
    #[arg(long, env = "SITELINE_DATASTORE_KEY", default_value = "", hide_env_values = true)]
    pub datastore_key: String,

    /// Table receiving contact submissions.
    #[arg(long, env = "SITELINE_CONTACT_TABLE", default_value = "contact_submissions")]
    pub contact_table: String,

    /// Table holding named key/value counters.
    #[arg(long, env = "SITELINE_COUNTER_TABLE", default_value = "site_counters")]
    pub counter_table: String,

    /// Key of the visitor counter row.
    #[arg(long, env = "SITELINE_COUNTER_KEY", default_value = "total_visitors")]
    pub counter_key: String,

    /// Name of the atomic server-side increment procedure.
    #[arg(long, env = "SITELINE_INCREMENT_PROC", default_value = "increment_total_visitors")]
    pub increment_procedure: String,

    /// Table holding page-content rows, one row per slug.
    #[arg(long, env = "SITELINE_CONTENT_TABLE", default_value = "page_content")]
    pub content_table: String,

    /// Mailer backend selection.
    #[arg(long, value_enum, env = "SITELINE_MAILER", default_value = "noop")]
    pub mailer: MailerType,

    /// Template-send endpoint of the email provider.
    #[arg(
        long,
        env = "SITELINE_EMAIL_ENDPOINT",
        default_value = "https://api.emailjs.com/api/v1.0/email/send"
    )]
    pub email_endpoint: String,

    /// Email provider service id.
    #[arg(long, env = "SITELINE_EMAIL_SERVICE", default_value = "")]
    pub email_service_id: String,

    /// Email provider template id.
    #[arg(long, env = "SITELINE_EMAIL_TEMPLATE", default_value = "")]
    pub email_template_id: String,

    /// Email provider public key (sent as user_id).
    #[arg(long, env = "SITELINE_EMAIL_KEY", default_value = "", hide_env_values = true)]
    pub email_public_key: String,

    /// Minimum interval between two contact submissions, in seconds.
    #[arg(long, env = "SITELINE_COOLDOWN_SECS", default_value_t = 300)]
    pub cooldown_secs: u64,

    /// Path of the durable flag file (cooldown timestamps).
    #[arg(long, env = "SITELINE_STATE_PATH", default_value = "./siteline-state.json")]
    pub state_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        // Mirrors the clap defaults but is built directly, so tests using
        // Default stay unaffected by ambient SITELINE_* variables.
        SiteConfig {
            bind_addr: "127.0.0.1:8080".to_string(),
            datastore: DatastoreType::Noop,
            datastore_url: String::new(),
            datastore_key: String::new(),
            contact_table: "contact_submissions".to_string(),
            counter_table: "site_counters".to_string(),
            counter_key: "total_visitors".to_string(),
            increment_procedure: "increment_total_visitors".to_string(),
            content_table: "page_content".to_string(),
            mailer: MailerType::Noop,
            email_endpoint: "https://api.emailjs.com/api/v1.0/email/send".to_string(),
            email_service_id: String::new(),
            email_template_id: String::new(),
            email_public_key: String::new(),
            cooldown_secs: 300,
            state_path: "./siteline-state.json".to_string(),
        }
    }
}
