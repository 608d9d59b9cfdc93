//! Draft validation: required fields, non-empty collections, image limits.

use crate::error::DomainError;
use crate::media::ImageUpload;
use crate::types::EventDraft;

/// Largest accepted image upload, in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Check that every required field of a draft is present and non-blank and
/// that tags and agenda each carry at least one element.
///
/// # Errors
///
/// [`DomainError::Validation`] naming the first offending field.
pub fn event_draft(draft: &EventDraft) -> Result<(), DomainError> {
    required("title", &draft.title)?;
    required("description", &draft.description)?;
    required("overview", &draft.overview)?;
    required("venue", &draft.venue)?;
    required("location", &draft.location)?;
    required("date", &draft.date)?;
    required("time", &draft.time)?;
    required("audience", &draft.audience)?;
    required("organizer", &draft.organizer)?;
    non_empty("tags", &draft.tags)?;
    non_empty("agenda", &draft.agenda)?;
    Ok(())
}

/// Check an image upload: an `image/*` content type and a non-empty body of
/// at most [`MAX_IMAGE_BYTES`].
///
/// # Errors
///
/// [`DomainError::Validation`] on the `image` field.
pub fn image(upload: &ImageUpload) -> Result<(), DomainError> {
    if upload.bytes.is_empty() {
        return Err(DomainError::validation("image", "is required"));
    }
    if !upload.content_type.starts_with("image/") {
        return Err(DomainError::validation("image", "must be an image file"));
    }
    if upload.bytes.len() > MAX_IMAGE_BYTES {
        return Err(DomainError::validation("image", "must be 5MB or smaller"));
    }
    Ok(())
}

fn required(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "is required"));
    }
    Ok(())
}

fn non_empty(field: &'static str, items: &[String]) -> Result<(), DomainError> {
    if items.is_empty() || items.iter().all(|item| item.trim().is_empty()) {
        return Err(DomainError::validation(
            field,
            "must contain at least one item",
        ));
    }
    Ok(())
}
