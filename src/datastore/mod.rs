pub mod mock;
pub mod noop;
pub mod rest;
pub mod variant;

pub use mock::MockDatastore;
pub use noop::NoopDatastore;
pub use rest::RestDatastore;
pub use variant::DatastoreVariant;
