use anyhow::Result;
use async_trait::async_trait;

use super::{file::FileFlagStore, memory::MemoryFlagStore, mock::MockFlagStore};
use crate::traits::FlagStore;

/// Enum representing all flag-store implementations.
pub enum FlagStoreVariant {
    Memory(MemoryFlagStore),
    File(FileFlagStore),
    Mock(MockFlagStore),
}

#[async_trait]
impl FlagStore for FlagStoreVariant {
    fn name(&self) -> &'static str {
        match self {
            FlagStoreVariant::Memory(inner) => inner.name(),
            FlagStoreVariant::File(inner) => inner.name(),
            FlagStoreVariant::Mock(inner) => inner.name(),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            FlagStoreVariant::Memory(inner) => inner.get(key).await,
            FlagStoreVariant::File(inner) => inner.get(key).await,
            FlagStoreVariant::Mock(inner) => inner.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        match self {
            FlagStoreVariant::Memory(inner) => inner.set(key, value).await,
            FlagStoreVariant::File(inner) => inner.set(key, value).await,
            FlagStoreVariant::Mock(inner) => inner.set(key, value).await,
        }
    }
}
