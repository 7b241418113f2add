use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::StorageError;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif", "bmp", "svg"];
const DEFAULT_EXTENSION: &str = "jpg";

/// Where an accepted upload will be written.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadTarget {
    pub path: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
}

/// Checks an image upload and names it `<millis>-<random>.<ext>`.
///
/// The extension comes from `file_name` and falls back to `jpg`.
pub fn plan_upload(
    bytes: &[u8],
    file_name: Option<&str>,
    max_bytes: usize,
    now: DateTime<Utc>,
) -> Result<UploadTarget, StorageError> {
    if bytes.is_empty() {
        return Err(StorageError::InvalidUpload("No image provided".to_string()));
    }
    if bytes.len() > max_bytes {
        return Err(StorageError::InvalidUpload(format!(
            "Image is {} bytes, limit is {}",
            bytes.len(),
            max_bytes
        )));
    }

    let ext = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.trim().to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    if !IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(StorageError::InvalidUpload("Only image files are allowed".to_string()));
    }

    let suffix = Uuid::new_v4().simple().to_string();
    Ok(UploadTarget {
        path: format!("{}-{}.{}", now.timestamp_millis(), &suffix[..7], ext),
        content_type: format!("image/{}", ext),
    })
}
