use async_trait::async_trait;
use fs4::fs_std::FileExt;
use leafy_core::backend::{LinkBackend, ReadBackend};
use leafy_core::error::{Result, StorageError};
use leafy_core::{LinkCode, LinkRecord};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

type Document = BTreeMap<String, String>;

/// Backend persisting every link in one JSON document.
///
/// The document maps codes to destinations, e.g.
/// `{"abc1234": "https://example.com"}`. It is loaded as a whole on
/// [`JsonFileBackend::open`] and rewritten as a whole on every creation.
///
/// Reads are served from an in-memory snapshot. Writes are serialised by a
/// single-writer lock covering the whole read-modify-write cycle; the new
/// document goes to a temporary file that is synced and renamed over the
/// original, and the snapshot is only updated after the rename succeeded.
///
/// The snapshot is only trustworthy while nobody else writes the document, so
/// `open` takes an exclusive advisory lock on a sibling `<name>.lock` file and
/// holds it until the last clone of the backend is dropped. A second `open`
/// of the same document, from this process or another one, fails with
/// [`StorageError::Unavailable`].
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    snapshot: RwLock<Document>,
    writer: Mutex<()>,
    _lock: std::fs::File,
}

impl JsonFileBackend {
    /// Opens the document at `path`, creating an empty one if it is missing.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = parent_dir(&path) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| map_io_error("failed to create data directory", parent, e))?;
        }
        let lock = lock_document(&path)?;

        let document = match fs::read(&path).await {
            Ok(bytes) => parse_document(&path, &bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "link document not found, creating an empty one");
                let document = Document::new();
                write_document(&path, &document).await?;
                document
            }
            Err(e) => return Err(map_io_error("failed to read link document", &path, e)),
        };

        debug!(path = %path.display(), links = document.len(), "loaded link document");

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                snapshot: RwLock::new(document),
                writer: Mutex::new(()),
                _lock: lock,
            }),
        })
    }

    /// Returns the path of the backing document.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Returns the number of stored links.
    pub async fn len(&self) -> usize {
        self.inner.snapshot.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.snapshot.read().await.is_empty()
    }
}

impl Inner {
    async fn insert_if_absent(&self, record: LinkRecord) -> Result<bool> {
        let _writer = self.writer.lock().await;

        let mut next = {
            let snapshot = self.snapshot.read().await;
            if snapshot.contains_key(record.code.as_str()) {
                return Ok(false);
            }
            snapshot.clone()
        };

        let code = record.code.as_str().to_owned();
        next.insert(code.clone(), record.destination.clone());
        write_document(&self.path, &next).await?;

        self.snapshot
            .write()
            .await
            .insert(code, record.destination);
        Ok(true)
    }
}

#[async_trait]
impl ReadBackend for JsonFileBackend {
    async fn get(&self, code: &LinkCode) -> Result<Option<String>> {
        Ok(self.inner.snapshot.read().await.get(code.as_str()).cloned())
    }
}

#[async_trait]
impl LinkBackend for JsonFileBackend {
    async fn set_if_absent(&self, record: &LinkRecord) -> Result<bool> {
        let inner = Arc::clone(&self.inner);
        let record = record.clone();

        // Runs on its own task: dropping this future does not abort a write.
        tokio::spawn(async move { inner.insert_if_absent(record).await })
            .await
            .map_err(|e| StorageError::Operation(format!("link document writer failed: {e}")))?
    }
}

fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

/// Takes the exclusive lock guarding `path` for as long as the returned file
/// stays open.
fn lock_document(path: &Path) -> Result<std::fs::File> {
    let lock_path = sibling_path(path, ".lock");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)
        .map_err(|e| map_io_error("failed to open lock file", &lock_path, e))?;

    match file.try_lock_exclusive() {
        Ok(true) => Ok(file),
        Ok(false) => {
            warn!(path = %path.display(), "link document is locked by another owner");
            Err(StorageError::Unavailable(format!(
                "link document '{}' is already opened by another backend",
                path.display()
            )))
        }
        Err(e) => Err(map_io_error("failed to lock link document", &lock_path, e)),
    }
}

fn parse_document(path: &Path, bytes: &[u8]) -> Result<Document> {
    serde_json::from_slice(bytes).map_err(|e| {
        StorageError::InvalidData(format!(
            "link document '{}' is malformed: {e}",
            path.display()
        ))
    })
}

async fn write_document(path: &Path, document: &Document) -> Result<()> {
    let json = serde_json::to_vec_pretty(document)
        .map_err(|e| StorageError::Operation(format!("failed to serialize link document: {e}")))?;

    let temp_path = sibling_path(path, ".tmp");

    let result = async {
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, path).await?;
        sync_dir(parent_dir(path).unwrap_or(Path::new("."))).await
    }
    .await;

    if let Err(e) = result {
        warn!(path = %path.display(), error = %e, "failed to persist link document");
        let _ = fs::remove_file(&temp_path).await;
        return Err(map_io_error("failed to write link document", path, e));
    }

    Ok(())
}

/// Makes the rename itself durable.
#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

fn map_io_error(operation: &str, path: &Path, err: std::io::Error) -> StorageError {
    let message = format!("{operation} '{}': {err}", path.display());
    match err.kind() {
        ErrorKind::TimedOut => StorageError::Timeout(message),
        ErrorKind::InvalidData => StorageError::InvalidData(message),
        _ => StorageError::Unavailable(message),
    }
}
