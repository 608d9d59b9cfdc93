//! External image-host seam.
//!
//! Event images live on a third-party host; this crate only knows the
//! contract: upload bytes, get back a stable URI; delete by URI, best-effort.
//! The HTTP client lives in `dev-curator-media`.

use async_trait::async_trait;
use thiserror::Error;

/// An image file received from the creation form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Raw file bytes.
    pub bytes: Vec<u8>,
    /// Client-supplied file name, used for the hosted asset name.
    pub filename: String,
    /// Client-supplied content type; must be `image/*`.
    pub content_type: String,
}

/// Errors surfaced by the image host.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The upload did not complete; nothing was hosted.
    #[error("image upload failed: {0}")]
    Upload(String),

    /// The hosted asset could not be deleted. Callers treat this as
    /// best-effort and log it.
    #[error("image delete failed: {0}")]
    Delete(String),
}

/// An external host for event images.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Upload an image, returning the stable URI of the hosted asset.
    ///
    /// # Errors
    ///
    /// [`MediaError::Upload`] — event creation aborts on this.
    async fn upload(&self, image: ImageUpload) -> Result<String, MediaError>;

    /// Delete the asset behind `uri`. Implementations ignore URIs they did
    /// not issue.
    ///
    /// # Errors
    ///
    /// [`MediaError::Delete`] — event deletion logs this and proceeds.
    async fn delete(&self, uri: &str) -> Result<(), MediaError>;
}
