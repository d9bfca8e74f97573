use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::traits::FlagStore;

/// Durable flag store backed by a single JSON file.
///
/// The rewrite's equivalent of browser local storage: small, survives
/// restarts, and only ever holds a handful of keys (the submission cooldown
/// timestamp). The whole map is rewritten on every set; reads tolerate a
/// missing file.
pub struct FileFlagStore {
    path: PathBuf,
}

impl FileFlagStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<HashMap<String, String>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .with_context(|| format!("corrupt flag file at {:?}", self.path)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => {
                Err(anyhow::Error::new(e).context(format!("cannot read flag file {:?}", self.path)))
            }
        }
    }
}

#[async_trait]
impl FlagStore for FileFlagStore {
    fn name(&self) -> &'static str {
        "file-flag-store"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut flags = self.load().await.unwrap_or_default();
        flags.insert(key.to_string(), value.to_string());
        let bytes = serde_json::to_vec_pretty(&flags)?;
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                tokio::fs::create_dir_all(dir).await?;
            }
        }
        // Write-then-rename so a crash mid-write cannot leave a corrupt
        // flag file behind.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .with_context(|| format!("cannot write flag file {:?}", tmp))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("cannot replace flag file {:?}", self.path))?;
        debug!("flag {} written to {:?}", key, self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileFlagStore::new(dir.path().join("flags.json"));
        assert_eq!(store.get("contact_last_submit").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_flags_survive_reopen() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("flags.json");

        let store = FileFlagStore::new(&path);
        store.set("contact_last_submit", "1700000000").await?;
        drop(store);

        let reopened = FileFlagStore::new(&path);
        assert_eq!(
            reopened.get("contact_last_submit").await?,
            Some("1700000000".into())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_rewrites_leave_only_the_flag_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("flags.json");
        let store = FileFlagStore::new(&path);

        store.set("a", "1").await?;
        store.set("a", "2").await?;
        assert_eq!(store.get("a").await?, Some("2".into()));

        // The intermediate temp file is gone after each replacement.
        let entries: Vec<_> = std::fs::read_dir(dir.path())?.collect::<std::io::Result<_>>()?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name(), "flags.json");
        Ok(())
    }

    #[tokio::test]
    async fn test_multiple_keys_coexist() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileFlagStore::new(dir.path().join("flags.json"));
        store.set("a", "1").await?;
        store.set("b", "2").await?;
        assert_eq!(store.get("a").await?, Some("1".into()));
        assert_eq!(store.get("b").await?, Some("2".into()));
        Ok(())
    }
}
