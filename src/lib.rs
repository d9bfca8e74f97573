// Library exports for testing and external use

pub mod clock;
pub mod config;
pub mod content;
pub mod datastore;
pub mod error;
pub mod flag_store;
pub mod ingress;
pub mod mailer;
pub mod site;
pub mod telemetry;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use config::{DatastoreType, MailerType, SiteConfig};
pub use content::PageContent;
pub use error::SubmitError;
pub use ingress::HttpIngress;
pub use site::Siteline;
pub use traits::{Clock, Datastore, FlagStore, Mailer};
pub use types::{ContactSubmission, EmailReceipt, COOLDOWN_KEY, VISIT_TRACKED_KEY};

// Re-export variant enums for convenience
pub use clock::{ClockVariant, ManualClock, SystemClock};
pub use datastore::{DatastoreVariant, MockDatastore};
pub use flag_store::{FileFlagStore, FlagStoreVariant, MemoryFlagStore, MockFlagStore};
pub use mailer::{MailerVariant, MockMailer};
