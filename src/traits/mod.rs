pub mod clock;
pub mod datastore;
pub mod flag_store;
pub mod mailer;

pub use clock::Clock;
pub use datastore::Datastore;
pub use flag_store::FlagStore;
pub use mailer::Mailer;
