use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use time::OffsetDateTime;

#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Persists one uploaded file, returning the stored name.
    async fn save(&self, original_name: &str, body: Bytes) -> anyhow::Result<String>;
}

/// Writes uploads into a fixed directory under `<unix-millis>-<original name>`.
/// Nothing references the file afterwards; the directory is unindexed.
pub struct DiskStorage {
    dir: PathBuf,
}

impl DiskStorage {
    pub async fn new(dir: PathBuf) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create upload directory {}", dir.display()))?;
        Ok(Self { dir })
    }
}

#[async_trait]
impl UploadStore for DiskStorage {
    async fn save(&self, original_name: &str, body: Bytes) -> anyhow::Result<String> {
        let name = upload_name(original_name, OffsetDateTime::now_utc());
        let path = self.dir.join(&name);
        tokio::fs::write(&path, &body)
            .await
            .with_context(|| format!("write upload {}", path.display()))?;
        Ok(name)
    }
}

/// Timestamp prefix keeps names collision-resistant; any path components the
/// client sent are stripped.
fn upload_name(original: &str, now: OffsetDateTime) -> String {
    let base = Path::new(original)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("archivo");
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    format!("{millis}-{base}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    #[test]
    fn upload_name_prefixes_timestamp_millis() {
        let at = datetime!(2024-01-02 03:04:05 UTC);
        let name = upload_name("foto.png", at);
        assert_eq!(name, format!("{}-foto.png", 1_704_164_645_000i64));
    }

    #[test]
    fn upload_name_strips_client_paths() {
        let at = datetime!(2024-01-02 03:04:05 UTC);
        let name = upload_name("../../etc/passwd", at);
        assert!(name.ends_with("-passwd"));
        assert!(!name.contains('/'));
    }

    #[test]
    fn upload_name_falls_back_when_empty() {
        let at = datetime!(2024-01-02 03:04:05 UTC);
        assert!(upload_name("", at).ends_with("-archivo"));
    }

    #[tokio::test]
    async fn disk_storage_writes_bytes_under_generated_name() {
        let dir = std::env::temp_dir().join(format!("racketstore-{}", Uuid::new_v4()));
        let storage = DiskStorage::new(dir.clone()).await.expect("create dir");
        let name = storage
            .save("grip.txt", Bytes::from_static(b"overgrip"))
            .await
            .expect("save");
        let written = tokio::fs::read(dir.join(&name)).await.expect("read back");
        assert_eq!(written, b"overgrip");
        tokio::fs::remove_dir_all(dir).await.ok();
    }
}
