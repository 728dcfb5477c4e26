//! Base64 image payloads
//!
//! Avatars and recipe images arrive inline as data URLs
//! (`data:image/png;base64,...`). The payload is validated up front so a
//! malformed image is a 400 at the edge; the stored value is the data URL
//! itself, file storage is out of scope.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::ImageError;

const SUPPORTED_FORMATS: &[&str] = &["png", "jpeg", "jpg", "gif", "webp"];

/// A validated inline image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    data_url: String,
    format: String,
}

impl ImagePayload {
    /// Parses and validates a `data:image/<fmt>;base64,<data>` string.
    pub fn parse(raw: &str) -> Result<Self, ImageError> {
        if raw.is_empty() {
            return Err(ImageError::Empty);
        }

        let rest = raw.strip_prefix("data:image/").ok_or(ImageError::NotADataUrl)?;
        let (format, encoded) = rest.split_once(";base64,").ok_or(ImageError::NotADataUrl)?;

        if !SUPPORTED_FORMATS.contains(&format) {
            return Err(ImageError::UnsupportedFormat(format.to_string()));
        }
        if encoded.is_empty() {
            return Err(ImageError::Empty);
        }

        STANDARD
            .decode(encoded)
            .map_err(|_| ImageError::InvalidBase64)?;

        Ok(Self {
            data_url: raw.to_string(),
            format: format.to_string(),
        })
    }

    /// The original data URL, suitable for storage and echoing back to clients.
    pub fn as_data_url(&self) -> &str {
        &self.data_url
    }

    /// The image format named by the data URL ("png", "jpeg", ...).
    pub fn format(&self) -> &str {
        &self.format
    }
}

impl From<ImagePayload> for String {
    fn from(payload: ImagePayload) -> Self {
        payload.data_url
    }
}
