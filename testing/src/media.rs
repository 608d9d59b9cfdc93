//! In-memory image host recording uploads and deletes.

use async_trait::async_trait;
use dev_curator_core::media::{ImageUpload, MediaError, MediaStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

/// Image host that hands out predictable URIs and remembers every call.
#[derive(Default)]
pub struct InMemoryMediaStore {
    uploads: Mutex<Vec<String>>,
    deletes: Mutex<Vec<String>>,
    sequence: AtomicUsize,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
}

impl InMemoryMediaStore {
    /// Create an empty media store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent uploads fail (or succeed again).
    pub fn fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent deletes fail (or succeed again).
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// URIs issued so far, in upload order.
    pub async fn uploaded(&self) -> Vec<String> {
        self.uploads.lock().await.clone()
    }

    /// URIs whose deletion was requested, in call order.
    pub async fn deleted(&self) -> Vec<String> {
        self.deletes.lock().await.clone()
    }
}

#[async_trait]
impl MediaStore for InMemoryMediaStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, MediaError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(MediaError::Upload("injected upload failure".to_owned()));
        }
        let n = self.sequence.fetch_add(1, Ordering::SeqCst);
        let uri = format!("https://media.invalid/dev-curator/img-{n}-{}", image.filename);
        self.uploads.lock().await.push(uri.clone());
        Ok(uri)
    }

    async fn delete(&self, uri: &str) -> Result<(), MediaError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(MediaError::Delete("injected delete failure".to_owned()));
        }
        self.deletes.lock().await.push(uri.to_owned());
        Ok(())
    }
}
