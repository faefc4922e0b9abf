//! A local library of reusable AI prompts organized by category.
//!
//! The [`PromptStore`] owns prompts and categories, [`query`] derives
//! filtered views, [`resolver`] maps new category names to ids, and the
//! [`PersistenceAdapter`] keeps both collections in a [`KeyValueStore`].

pub mod clipboard;
pub mod form;
pub mod models;
pub mod persistence;
pub mod query;
pub mod render;
pub mod resolver;
pub mod seed;
pub mod storage;
pub mod store;

pub use form::{CategorySelection, PromptForm, ValidationError};
pub use models::{Category, Prompt, PromptDraft};
pub use persistence::{PersistenceAdapter, Snapshot, SnapshotSource};
pub use query::{filter_prompts, CategoryFilter, PromptQuery};
pub use storage::{FileSystemStore, KeyValueStore, MemoryStore};
pub use store::PromptStore;

use anyhow::bail;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Storage backend selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Filesystem,
    Memory,
}

impl FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "filesystem" => Ok(Self::Filesystem),
            "memory" => Ok(Self::Memory),
            other => bail!("Unsupported storage type: {} (expected filesystem or memory)", other),
        }
    }
}

impl StorageKind {
    /// Whether changes outlive the process.
    pub fn is_durable(self) -> bool {
        matches!(self, Self::Filesystem)
    }
}

/// Builds the backend and loads the library from it.
pub async fn open_store(kind: StorageKind, data_dir: impl AsRef<Path>) -> PromptStore {
    let backend: Arc<dyn KeyValueStore> = match kind {
        StorageKind::Filesystem => {
            tracing::info!(path = %data_dir.as_ref().display(), "Using filesystem storage");
            Arc::new(FileSystemStore::new(data_dir))
        }
        StorageKind::Memory => {
            tracing::info!("Using in-memory storage; changes are lost on exit");
            Arc::new(MemoryStore::new())
        }
    };
    PromptStore::open(PersistenceAdapter::new(backend)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_storage_kinds() {
        assert_eq!("filesystem".parse::<StorageKind>().unwrap(), StorageKind::Filesystem);
        assert_eq!("memory".parse::<StorageKind>().unwrap(), StorageKind::Memory);
        assert!("sqlite".parse::<StorageKind>().is_err());
    }

    #[test]
    fn only_filesystem_storage_is_durable() {
        assert!(StorageKind::Filesystem.is_durable());
        assert!(!StorageKind::Memory.is_durable());
    }
}
