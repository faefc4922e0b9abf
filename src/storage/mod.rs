use anyhow::Result;
use async_trait::async_trait;

pub mod filesystem;
pub mod memory;

pub use filesystem::FileSystemStore;
pub use memory::MemoryStore;

/// Trait defining a durable key-value store of named textual records.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static { // Ensure Send + Sync for Arc<dyn T>
    /// Reads the record stored under `key`, or `None` if it was never written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous record.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
