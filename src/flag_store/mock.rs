use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::traits::FlagStore;

/// Mock flag store for testing. Behaves like the memory store but either
/// operation can be scripted to fail, so flows can be exercised against an
/// unreadable or unwritable local store.
#[derive(Default)]
pub struct MockFlagStore {
    pub fail_get: bool,
    pub fail_set: bool,
    flags: Mutex<HashMap<String, String>>,
}

impl MockFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_get_failure(mut self) -> Self {
        self.fail_get = true;
        self
    }

    pub fn with_set_failure(mut self) -> Self {
        self.fail_set = true;
        self
    }

    /// Seed a flag as if it had been set earlier.
    pub fn with_flag(self, key: &str, value: &str) -> Self {
        self.flags
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }
}

#[async_trait]
impl FlagStore for MockFlagStore {
    fn name(&self) -> &'static str {
        "mock-flag-store"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_get {
            return Err(anyhow!("mock flag read failure"));
        }
        Ok(self.flags.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_set {
            return Err(anyhow!("mock flag write failure"));
        }
        self.flags
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
