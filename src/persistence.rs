//! Reads and writes the `prompts` and `categories` records.
//!
//! Loading never fails: a missing, unparseable or invalid record makes the
//! whole snapshot fall back to the seed dataset. Writes are best effort; a
//! failed write is logged and the in-memory state stays authoritative.

use crate::models::{Category, Prompt};
use crate::seed::{seed_categories, seed_prompts};
use crate::storage::KeyValueStore;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

pub const PROMPTS_KEY: &str = "prompts";
pub const CATEGORIES_KEY: &str = "categories";

/// Where a loaded snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    Stored,
    Seed,
}

/// Both collections as loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub prompts: Vec<Prompt>,
    pub categories: Vec<Category>,
    pub source: SnapshotSource,
}

impl Snapshot {
    pub fn seed() -> Self {
        Self {
            prompts: seed_prompts(),
            categories: seed_categories(),
            source: SnapshotSource::Seed,
        }
    }
}

/// A stored record that parsed but does not describe a valid collection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("record '{record}' has an entry with an empty id at index {index}")]
    EmptyId { record: &'static str, index: usize },

    #[error("record '{record}' has duplicate id '{id}'")]
    DuplicateId { record: &'static str, id: String },
}

/// Anything stored under a record key.
trait Record {
    fn id(&self) -> &str;
}

impl Record for Prompt {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Serializes collections to JSON records in a [`KeyValueStore`].
#[derive(Clone)]
pub struct PersistenceAdapter {
    store: Arc<dyn KeyValueStore>,
}

impl PersistenceAdapter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Loads both collections, substituting the seed dataset on any failure.
    pub async fn load(&self) -> Snapshot {
        match self.try_load().await {
            Ok(Some((prompts, categories))) => {
                info!(
                    prompts = prompts.len(),
                    categories = categories.len(),
                    "Loaded prompt library from storage"
                );
                Snapshot {
                    prompts,
                    categories,
                    source: SnapshotSource::Stored,
                }
            }
            Ok(None) => {
                info!("No stored prompt library found, using seed dataset");
                Snapshot::seed()
            }
            Err(e) => {
                warn!(error = %format!("{:#}", e), "Failed to load stored prompt library, using seed dataset");
                Snapshot::seed()
            }
        }
    }

    async fn try_load(&self) -> Result<Option<(Vec<Prompt>, Vec<Category>)>> {
        let stored_prompts = self.store.get(PROMPTS_KEY).await?;
        let stored_categories = self.store.get(CATEGORIES_KEY).await?;

        let (Some(raw_prompts), Some(raw_categories)) = (stored_prompts, stored_categories) else {
            return Ok(None);
        };

        let prompts = parse_record(PROMPTS_KEY, &raw_prompts)?;
        let categories = parse_record(CATEGORIES_KEY, &raw_categories)?;
        Ok(Some((prompts, categories)))
    }

    /// Writes the full prompt collection. Returns whether the write is durable.
    pub async fn save_prompts(&self, prompts: &[Prompt]) -> bool {
        self.save(PROMPTS_KEY, prompts).await
    }

    /// Writes the full category collection. Returns whether the write is durable.
    pub async fn save_categories(&self, categories: &[Category]) -> bool {
        self.save(CATEGORIES_KEY, categories).await
    }

    async fn save<T: Serialize>(&self, key: &'static str, items: &[T]) -> bool {
        let result: Result<()> = async {
            let contents = serde_json::to_string(items)
                .with_context(|| format!("Failed to serialize record '{}'", key))?;
            self.store.set(key, &contents).await
        }
        .await;

        match result {
            Ok(()) => true,
            Err(e) => {
                error!(record = key, error = %format!("{:#}", e), "Failed to save record; change is not durable");
                false
            }
        }
    }
}

fn parse_record<T>(record: &'static str, raw: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned + Record,
{
    let items: Vec<T> = serde_json::from_str(raw)
        .with_context(|| format!("Failed to deserialize record '{}'", record))?;
    validate_ids(record, &items)?;
    Ok(items)
}

fn validate_ids<T: Record>(record: &'static str, items: &[T]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for (index, item) in items.iter().enumerate() {
        if item.id().is_empty() {
            return Err(SchemaError::EmptyId { record, index });
        }
        if !seen.insert(item.id()) {
            return Err(SchemaError::DuplicateId {
                record,
                id: item.id().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn adapter_with(store: MemoryStore) -> PersistenceAdapter {
        PersistenceAdapter::new(Arc::new(store))
    }

    #[tokio::test]
    async fn empty_store_loads_seed() {
        let snapshot = adapter_with(MemoryStore::new()).load().await;
        assert_eq!(snapshot, Snapshot::seed());
    }

    #[tokio::test]
    async fn one_missing_record_loads_seed() {
        let store = MemoryStore::new();
        store.insert(CATEGORIES_KEY, r#"[{"id":"9","name":"Misc"}]"#).await;
        let snapshot = adapter_with(store).load().await;
        assert_eq!(snapshot.source, SnapshotSource::Seed);
        assert_eq!(snapshot.categories.len(), 4);
    }

    #[tokio::test]
    async fn stored_records_are_returned_verbatim() {
        let store = MemoryStore::new();
        // Dangling categoryId is not checked.
        store
            .insert(
                PROMPTS_KEY,
                r#"[{"id":"a","heading":"H","description":"D","categoryId":"missing"}]"#,
            )
            .await;
        store.insert(CATEGORIES_KEY, "[]").await;

        let snapshot = adapter_with(store).load().await;
        assert_eq!(snapshot.source, SnapshotSource::Stored);
        assert_eq!(snapshot.prompts.len(), 1);
        assert_eq!(snapshot.prompts[0].category_id, "missing");
        assert!(snapshot.categories.is_empty());
    }

    #[tokio::test]
    async fn malformed_json_loads_seed() {
        let store = MemoryStore::new();
        store.insert(PROMPTS_KEY, "{not json").await;
        store.insert(CATEGORIES_KEY, "[]").await;
        assert_eq!(adapter_with(store).load().await.source, SnapshotSource::Seed);
    }

    #[tokio::test]
    async fn schema_mismatch_loads_seed() {
        let store = MemoryStore::new();
        store.insert(PROMPTS_KEY, r#"[{"id":"a","heading":"H"}]"#).await;
        store.insert(CATEGORIES_KEY, "[]").await;
        assert_eq!(adapter_with(store).load().await.source, SnapshotSource::Seed);

        let store = MemoryStore::new();
        store.insert(PROMPTS_KEY, "[]").await;
        store.insert(CATEGORIES_KEY, r#"{"id":"1","name":"Study"}"#).await;
        assert_eq!(adapter_with(store).load().await.source, SnapshotSource::Seed);
    }

    #[tokio::test]
    async fn duplicate_or_empty_ids_load_seed() {
        let store = MemoryStore::new();
        store.insert(PROMPTS_KEY, "[]").await;
        store
            .insert(
                CATEGORIES_KEY,
                r#"[{"id":"1","name":"A"},{"id":"1","name":"B"}]"#,
            )
            .await;
        assert_eq!(adapter_with(store).load().await.source, SnapshotSource::Seed);

        let store = MemoryStore::new();
        store.insert(PROMPTS_KEY, "[]").await;
        store.insert(CATEGORIES_KEY, r#"[{"id":"","name":"A"}]"#).await;
        assert_eq!(adapter_with(store).load().await.source, SnapshotSource::Seed);
    }

    #[test]
    fn validate_ids_reports_the_offending_entry() {
        let categories = vec![
            Category { id: "1".into(), name: "A".into() },
            Category { id: "1".into(), name: "B".into() },
        ];
        assert_eq!(
            validate_ids(CATEGORIES_KEY, &categories),
            Err(SchemaError::DuplicateId { record: CATEGORIES_KEY, id: "1".into() })
        );
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let adapter = adapter_with(MemoryStore::new());
        let mut prompts = seed_prompts();
        prompts.reverse();
        let categories = seed_categories();

        assert!(adapter.save_prompts(&prompts).await);
        assert!(adapter.save_categories(&categories).await);

        let snapshot = adapter.load().await;
        assert_eq!(snapshot.source, SnapshotSource::Stored);
        assert_eq!(snapshot.prompts, prompts);
        assert_eq!(snapshot.categories, categories);
    }

    #[tokio::test]
    async fn failed_write_is_reported_not_raised() {
        let adapter = adapter_with(MemoryStore::with_quota(16));
        assert!(!adapter.save_prompts(&seed_prompts()).await);
        assert!(adapter.save_categories(&[]).await);
    }
}
