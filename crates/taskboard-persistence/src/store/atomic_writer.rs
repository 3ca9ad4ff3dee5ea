use std::path::Path;
use taskboard_core::{TaskboardError, TaskboardResult};
use tokio::fs;

/// Writes whole files via a sibling temp file and a rename, so readers never
/// observe a half-written board.
pub struct AtomicWriter;

impl AtomicWriter {
    pub async fn write_atomic(path: &Path, data: &[u8]) -> TaskboardResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        // Same directory keeps the rename on one filesystem
        let temp_file = tempfile::NamedTempFile::new_in(parent)?;
        fs::write(temp_file.path(), data).await?;
        temp_file
            .persist(path)
            .map_err(|e| TaskboardError::Io(e.error))?;

        tracing::debug!("Atomically wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    pub async fn read_all(path: &Path) -> TaskboardResult<Vec<u8>> {
        let data = fs::read(path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("board.json");

        AtomicWriter::write_atomic(&file_path, b"first").await.unwrap();
        AtomicWriter::write_atomic(&file_path, b"second").await.unwrap();

        let read_data = AtomicWriter::read_all(&file_path).await.unwrap();
        assert_eq!(read_data, b"second");
    }

    #[tokio::test]
    async fn test_creates_missing_parent() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested/boards/board.json");

        AtomicWriter::write_atomic(&file_path, b"{}").await.unwrap();

        assert!(file_path.exists());
        let leftovers: Vec<_> = std::fs::read_dir(file_path.parent().unwrap())
            .unwrap()
            .collect();
        assert_eq!(leftovers.len(), 1);
    }
}
