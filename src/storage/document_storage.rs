use std::{
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, warn};

use crate::{errors::Result, fs::operations::{overwrite_locked, read_locked}};

use super::entities::Document;

/// Name of the data file inside the application directory.
pub const DATA_FILE_NAME: &str = "time_tracker_data.json";

/// Interface for abstracting storage of the document.
pub trait DocumentStorage {
    /// Reads the stored document. Anything that prevents reading it (no file yet, garbage inside,
    /// permissions) results in an empty document rather than an error.
    fn load(&self) -> impl Future<Output = Document>;

    /// Replaces whatever is stored with `document`.
    fn save(&self, document: &Document) -> impl Future<Output = Result<()>>;
}

impl<T: Deref> DocumentStorage for T
where
    T::Target: DocumentStorage,
{
    fn load(&self) -> impl Future<Output = Document> {
        self.deref().load()
    }

    fn save(&self, document: &Document) -> impl Future<Output = Result<()>> {
        self.deref().save(document)
    }
}

/// The main realization of [DocumentStorage]. Keeps the document as pretty printed JSON.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Storage backed by [DATA_FILE_NAME] inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DATA_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStorage for JsonFileStorage {
    async fn load(&self) -> Document {
        let contents = match read_locked(&self.path).await {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No data file at {:?}, starting empty", self.path);
                return Document::new();
            }
            Err(e) => {
                warn!("Failed to read {:?}, starting empty: {e}", self.path);
                return Document::new();
            }
        };

        match serde_json::from_str::<Document>(&contents) {
            Ok(document) => {
                debug!("Loaded {} items from {:?}", document.len(), self.path);
                document
            }
            Err(e) => {
                // Same as a missing file. The broken content is dropped on the next save.
                warn!("Data file {:?} is malformed, starting empty: {e}", self.path);
                Document::new()
            }
        }
    }

    async fn save(&self, document: &Document) -> Result<()> {
        let buffer = serialize_document(document)?;
        overwrite_locked(&self.path, &buffer).await?;
        debug!("Saved {} items into {:?}", document.len(), self.path);
        Ok(())
    }
}

/// Serializes with 4 space indentation, leaving non-ASCII characters as they are.
pub fn serialize_document(document: &Document) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    document.serialize(&mut serializer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use anyhow::Result;
    use tempfile::tempdir;

    use crate::{
        storage::entities::{Document, ItemEntity},
        utils::logging::TEST_LOGGING,
    };

    use super::{serialize_document, DocumentStorage, JsonFileStorage, DATA_FILE_NAME};

    fn sample_document() -> Document {
        let mut run = ItemEntity::default();
        run.insert_record("2024-01-02 10:00:00".into());
        run.insert_record("2024-01-01 09:00:00".into());
        [
            ("Run".to_string(), run),
            ("读书".to_string(), ItemEntity::default()),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let storage = JsonFileStorage::in_dir(dir.path());
        assert_eq!(storage.path(), dir.path().join(DATA_FILE_NAME));
        assert!(storage.load().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_load_malformed_file_is_empty() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let storage = JsonFileStorage::in_dir(dir.path());
        for contents in ["", "{not json", "[1, 2]", r#"{"Run": {"records": []}}"#] {
            fs::write(storage.path(), contents)?;
            assert!(storage.load().await.is_empty(), "{contents:?} should load as empty");
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_load_directory_is_empty() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        // The path exists but can't be read as a file.
        let storage = JsonFileStorage::new(dir.path().to_path_buf());
        assert!(storage.load().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load() -> Result<()> {
        let dir = tempdir()?;
        let storage = JsonFileStorage::in_dir(dir.path());
        let document = sample_document();

        storage.save(&document).await?;

        assert_eq!(storage.load().await, document);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_format() -> Result<()> {
        let dir = tempdir()?;
        let storage = JsonFileStorage::in_dir(dir.path());
        storage.save(&sample_document()).await?;

        let expected = r#"{
    "Run": {
        "last_recorded": "2024-01-02 10:00:00",
        "records": [
            "2024-01-01 09:00:00",
            "2024-01-02 10:00:00"
        ]
    },
    "读书": {
        "last_recorded": "未记录",
        "records": []
    }
}"#;
        assert_eq!(fs::read_to_string(storage.path())?, expected);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_load_is_byte_stable() -> Result<()> {
        let dir = tempdir()?;
        let storage = JsonFileStorage::in_dir(dir.path());
        storage.save(&sample_document()).await?;
        let first = fs::read(storage.path())?;

        storage.save(&storage.load().await).await?;
        let second = fs::read(storage.path())?;
        storage.save(&storage.load().await).await?;
        let third = fs::read(storage.path())?;

        assert_eq!(first, second);
        assert_eq!(second, third);
        Ok(())
    }

    #[tokio::test]
    async fn test_save_shrinking_document_leaves_no_tail() -> Result<()> {
        let dir = tempdir()?;
        let storage = JsonFileStorage::in_dir(dir.path());
        storage.save(&sample_document()).await?;
        storage.save(&Document::new()).await?;

        assert_eq!(fs::read_to_string(storage.path())?, "{}");
        assert!(storage.load().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_into_missing_directory_fails() -> Result<()> {
        let dir = tempdir()?;
        let storage = JsonFileStorage::in_dir(&dir.path().join("missing"));
        assert!(storage.save(&sample_document()).await.is_err());
        Ok(())
    }

    #[test]
    fn test_serialize_empty_document() -> Result<()> {
        assert_eq!(serialize_document(&Document::new())?, b"{}");
        Ok(())
    }
}
