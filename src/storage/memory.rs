use crate::storage::KeyValueStore;
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Ephemeral in-process store. Nothing survives the process.
///
/// An optional byte quota makes writes fail the way browser local storage
/// does once it is full.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the total size of all keys and values.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            records: Mutex::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Pre-populates a record, bypassing the quota.
    pub async fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.records.lock().await.insert(key.into(), value.into());
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.records.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut records = self.records.lock().await;
        if let Some(quota) = self.quota_bytes {
            let others: usize = records
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                bail!(
                    "Storage quota exceeded writing '{}': {} bytes needed, {} allowed",
                    key,
                    needed,
                    quota
                );
            }
        }
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn overwrites_in_place() {
        let store = MemoryStore::new();
        store.set("prompts", "[1]").await.unwrap();
        store.set("prompts", "[2]").await.unwrap();
        assert_eq!(store.get("prompts").await.unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.get("categories").await.unwrap(), None);
    }

    #[tokio::test]
    async fn quota_counts_every_record_except_the_one_replaced() {
        let store = MemoryStore::with_quota(20);
        store.set("a", "123456789").await.unwrap(); // 10 bytes
        store.set("a", "12345678").await.unwrap(); // replaces, 9 bytes
        assert!(store.set("b", "1234567890").await.is_err()); // 9 + 11 > 20
        store.set("b", "123456789").await.unwrap(); // 9 + 10 = 19
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("123456789"));
    }
}
