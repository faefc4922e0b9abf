use crate::storage::KeyValueStore;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, error};

/// Stores each record as `<data_dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    data_dir: PathBuf,
}

impl FileSystemStore {
    /// Creates a new FileSystemStore instance.
    /// Ensures the data directory exists.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let path_buf = data_dir.as_ref().to_path_buf();
        // Failures surface again on the first write.
        if let Err(e) = std::fs::create_dir_all(&path_buf) {
            error!(path = %path_buf.display(), error = %e, "Failed to create data directory during initialization");
        }
        Self { data_dir: path_buf }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            bail!("Invalid record key '{}'", key);
        }
        Ok(self.data_dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileSystemStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.record_path(key)?;

        match fs::File::open(&path).await {
            Ok(mut file) => {
                let mut contents = String::new();
                file.read_to_string(&mut contents)
                    .await
                    .with_context(|| format!("Failed to read record file: {}", path.display()))?;
                debug!(key, bytes = contents.len(), "Read record");
                Ok(Some(contents))
            }
            Err(ref e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to open record file: {}", path.display())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.record_path(key)?;

        // Ensure directory exists before writing
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir)
                .await
                .with_context(|| format!("Failed to create data directory '{}'", self.data_dir.display()))?;
        }

        // Write to a sibling file and rename so a crash never leaves a torn record.
        let tmp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)
            .await
            .with_context(|| format!("Failed to create/open record file for writing: {}", tmp_path.display()))?;
        file.write_all(value.as_bytes())
            .await
            .with_context(|| format!("Failed to write to record file: {}", tmp_path.display()))?;
        file.sync_all()
            .await
            .with_context(|| format!("Failed to flush record file: {}", tmp_path.display()))?;
        drop(file);

        fs::rename(&tmp_path, &path)
            .await
            .with_context(|| format!("Failed to move record into place: {}", path.display()))?;
        debug!(key, bytes = value.len(), "Wrote record");
        Ok(())
    }
}
