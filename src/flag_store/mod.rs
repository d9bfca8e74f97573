pub mod file;
pub mod memory;
pub mod mock;
pub mod variant;

pub use file::FileFlagStore;
pub use memory::MemoryFlagStore;
pub use mock::MockFlagStore;
pub use variant::FlagStoreVariant;
