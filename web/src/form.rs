//! Parsing of the multipart event-creation form.
//!
//! Fields: title, description, overview, venue, location, date, time, mode,
//! audience, organizer, tags (JSON-encoded string array), agenda
//! (JSON-encoded string array), image (binary, `image/*`, at most 5 MiB).
//!
//! Only structural problems are rejected here — a malformed multipart
//! stream, non-JSON tags, an unknown mode, a missing image. Field-level
//! requirements (blank title, empty tags, image size) stay with
//! `dev_curator_core::validate`, which the service runs before persisting.

use crate::error::AppError;
use axum::extract::Multipart;
use dev_curator_core::{EventDraft, EventMode, ImageUpload};
use std::collections::HashMap;

/// Drain a multipart stream into a draft and its image upload.
///
/// # Errors
///
/// `400 BAD_REQUEST` for a malformed stream, `422 VALIDATION_ERROR` for
/// undecodable fields.
pub async fn parse_event_form(
    mut multipart: Multipart,
) -> Result<(EventDraft, ImageUpload), AppError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut tags: Vec<String> = Vec::new();
    let mut agenda: Vec<String> = Vec::new();
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };
        match name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or("upload").to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                image = Some(ImageUpload {
                    bytes: bytes.to_vec(),
                    filename,
                    content_type,
                });
            }
            "tags" => {
                let text = field.text().await.map_err(bad_multipart)?;
                tags = parse_string_array("tags", &text)?;
            }
            "agenda" => {
                let text = field.text().await.map_err(bad_multipart)?;
                agenda = parse_string_array("agenda", &text)?;
            }
            _ => {
                let text = field.text().await.map_err(bad_multipart)?;
                fields.insert(name, text);
            }
        }
    }

    let mode: EventMode = fields
        .remove("mode")
        .ok_or_else(|| AppError::validation("mode is required"))?
        .parse()?;
    let image = image.ok_or_else(|| AppError::validation("image is required"))?;

    let mut take = |key: &str| fields.remove(key).unwrap_or_default();
    let draft = EventDraft {
        title: take("title"),
        description: take("description"),
        overview: take("overview"),
        venue: take("venue"),
        location: take("location"),
        date: take("date"),
        time: take("time"),
        mode,
        audience: take("audience"),
        organizer: take("organizer"),
        tags,
        agenda,
    };
    Ok((draft, image))
}

fn parse_string_array(field: &str, text: &str) -> Result<Vec<String>, AppError> {
    serde_json::from_str(text)
        .map_err(|_| AppError::validation(format!("{field} must be a JSON array of strings")))
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> AppError {
    AppError::bad_request(format!("malformed multipart form: {err}"))
}
