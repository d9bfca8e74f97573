//! Core Siteline struct and initialization - no business logic.

use anyhow::Result;
use tracing::info;

use crate::clock::{ClockVariant, SystemClock};
use crate::config::SiteConfig;
use crate::datastore::DatastoreVariant;
use crate::flag_store::{FileFlagStore, FlagStoreVariant, MemoryFlagStore};
use crate::mailer::MailerVariant;
use crate::traits::{Clock, Datastore, FlagStore, Mailer};

/// Main application orchestrator for the two site flows: contact
/// submission and visitor tracking.
///
/// Every external effect goes through an injected handle (datastore,
/// mailer, two flag stores, clock), so the flows can run against fakes in
/// tests. There is no ambient state.
pub struct Siteline {
    /// Remote table-oriented datastore.
    pub datastore: DatastoreVariant,

    /// Transactional email provider.
    pub mailer: MailerVariant,

    /// Durable flag store; holds the submission cooldown timestamp.
    pub durable: FlagStoreVariant,

    /// Session-scoped flag store; holds the visit-tracked flag.
    pub session: FlagStoreVariant,

    /// Time source for cooldown checks and counter stamps.
    pub clock: ClockVariant,

    /// Global/base configuration.
    pub config: SiteConfig,
}

impl Siteline {
    /// Create a new Siteline from explicit handles.
    pub fn new(
        datastore: DatastoreVariant,
        mailer: MailerVariant,
        durable: FlagStoreVariant,
        session: FlagStoreVariant,
        clock: ClockVariant,
        config: SiteConfig,
    ) -> Self {
        Self {
            datastore,
            mailer,
            durable,
            session,
            clock,
            config,
        }
    }

    /// Initialize Siteline from configuration: configured datastore and
    /// mailer backends, a file-backed durable store, an in-memory session
    /// store, and the system clock.
    pub fn initialize(config: SiteConfig) -> Result<Self> {
        let datastore = DatastoreVariant::new(&config);
        let mailer = MailerVariant::new(&config);
        let durable = FlagStoreVariant::File(FileFlagStore::new(&config.state_path));
        let session = FlagStoreVariant::Memory(MemoryFlagStore::new());
        let clock = ClockVariant::System(SystemClock);

        info!(
            "Siteline initialized: datastore={}, mailer={}, durable={}, session={}, clock={}",
            datastore.name(),
            mailer.name(),
            durable.name(),
            session.name(),
            clock.name(),
        );

        Ok(Self::new(datastore, mailer, durable, session, clock, config))
    }
}
