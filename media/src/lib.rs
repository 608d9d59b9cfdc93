//! HTTP client for the external image host.
//!
//! Event images are uploaded to a Cloudinary-style host: a multipart POST to
//! `{base_url}/upload` with the asset and a folder name, answered with the
//! stable `secure_url` of the hosted asset. Deletion addresses the asset by
//! id — the last two URI path segments, folder plus filename without its
//! extension — via `DELETE {base_url}/assets/{asset_id}`.
//!
//! Deletes are best-effort by contract: the service layer logs a failure and
//! carries on with the event deletion. URIs not issued by this host (for
//! example seeded fixture images) are skipped silently.

use async_trait::async_trait;
use dev_curator_core::media::{ImageUpload, MediaError, MediaStore};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Image host connection settings.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    /// Base URL of the host's API, without a trailing slash.
    pub base_url: String,
    /// Bearer token for the host's API.
    pub api_key: String,
    /// Folder the assets are uploaded into.
    pub folder: String,
}

impl MediaConfig {
    /// Settings for `base_url` and `api_key` with the default folder.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            folder: "dev-curator".to_owned(),
        }
    }
}

/// Successful upload response body.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    /// Stable URI of the hosted asset.
    secure_url: String,
}

/// HTTP implementation of [`MediaStore`].
#[derive(Clone)]
pub struct HttpMediaStore {
    client: Client,
    config: MediaConfig,
}

impl HttpMediaStore {
    /// Create a client for the configured host.
    #[must_use]
    pub fn new(config: MediaConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, MediaError> {
        let part = Part::bytes(image.bytes)
            .file_name(image.filename)
            .mime_str(&image.content_type)
            .map_err(|err| MediaError::Upload(format!("invalid content type: {err}")))?;
        let form = Form::new()
            .text("folder", self.config.folder.clone())
            .part("file", part);

        let response = self
            .client
            .post(format!("{}/upload", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|err| MediaError::Upload(err.to_string()))?;

        match response.status() {
            StatusCode::OK | StatusCode::CREATED => {
                let body: UploadResponse = response
                    .json()
                    .await
                    .map_err(|err| MediaError::Upload(format!("malformed response: {err}")))?;
                debug!(uri = %body.secure_url, "image uploaded");
                Ok(body.secure_url)
            }
            status => Err(MediaError::Upload(format!(
                "image host answered {status}"
            ))),
        }
    }

    async fn delete(&self, uri: &str) -> Result<(), MediaError> {
        // Only assets this host issued; anything else is not ours to delete.
        if !uri.starts_with(&self.config.base_url) {
            return Ok(());
        }
        let asset_id = asset_id_from_uri(uri)
            .ok_or_else(|| MediaError::Delete(format!("cannot derive asset id from '{uri}'")))?;

        let response = self
            .client
            .delete(format!("{}/assets/{asset_id}", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|err| MediaError::Delete(err.to_string()))?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => {
                debug!(uri = %uri, "hosted image deleted");
                Ok(())
            }
            status => Err(MediaError::Delete(format!(
                "image host answered {status}"
            ))),
        }
    }
}

/// Derive the host's asset id from an asset URI: the last two path segments,
/// with the filename's extension stripped.
///
/// `https://host/dev-curator/banner.png` → `dev-curator/banner`.
fn asset_id_from_uri(uri: &str) -> Option<String> {
    let without_query = uri.split(['?', '#']).next().unwrap_or(uri);
    // Drop the scheme and authority; the id lives in the path.
    let path = without_query
        .split_once("://")
        .map_or(without_query, |(_, rest)| rest)
        .split_once('/')
        .map(|(_, path)| path)?;
    let mut segments = path.rsplit('/');
    let filename = segments.next().filter(|s| !s.is_empty())?;
    let folder = segments.next().filter(|s| !s.is_empty())?;
    let stem = filename.split_once('.').map_or(filename, |(stem, _)| stem);
    if stem.is_empty() {
        return None;
    }
    Some(format!("{folder}/{stem}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_id_is_folder_plus_stem() {
        assert_eq!(
            asset_id_from_uri("https://media.example.com/dev-curator/banner.png"),
            Some("dev-curator/banner".to_owned())
        );
        assert_eq!(
            asset_id_from_uri("https://media.example.com/v1/dev-curator/abc123.webp?sig=x"),
            Some("dev-curator/abc123".to_owned())
        );
    }

    #[test]
    fn asset_id_requires_folder_and_filename() {
        assert_eq!(asset_id_from_uri("https://media.example.com/banner.png"), None);
        assert_eq!(asset_id_from_uri("banner.png"), None);
        assert_eq!(asset_id_from_uri("https://media.example.com/folder/"), None);
        assert_eq!(asset_id_from_uri("https://media.example.com/folder/.png"), None);
    }

    #[test]
    fn filename_without_extension_is_kept_whole() {
        assert_eq!(
            asset_id_from_uri("https://media.example.com/dev-curator/banner"),
            Some("dev-curator/banner".to_owned())
        );
    }
}
