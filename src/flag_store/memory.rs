use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use crate::traits::FlagStore;

/// Session-scoped flag store. Lives as long as the process, which is the
/// rewrite's equivalent of browser session storage.
#[derive(Default)]
pub struct MemoryFlagStore {
    flags: Mutex<HashMap<String, String>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlagStore for MemoryFlagStore {
    fn name(&self) -> &'static str {
        "memory-flag-store"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.flags.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.flags
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
