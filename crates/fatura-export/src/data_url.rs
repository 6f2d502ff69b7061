//! # File → Data URL
//!
//! Image pickers hand over a path; the report needs an inline
//! `data:<mime>;base64,<payload>` string so the rasterizer can draw the
//! picture without any cross-origin fetch.
//!
//! ## MIME Detection
//! ```text
//! magic bytes (image::guess_format) ──► file extension ──► application/octet-stream
//! ```

use std::path::Path;

use fatura_core::DataUrl;
use image::ImageFormat;
use tracing::debug;

use crate::error::ReadError;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Reads a file and encodes it as a data URL.
///
/// Read failures are returned as-is; nothing is retried.
pub async fn file_to_data_url(path: impl AsRef<Path>) -> Result<DataUrl, ReadError> {
    let path = path.as_ref();

    let bytes = tokio::fs::read(path).await.map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.is_empty() {
        return Err(ReadError::Empty(path.to_path_buf()));
    }

    let mime = detect_mime(path, &bytes);
    debug!(path = %path.display(), mime, size = bytes.len(), "Encoded file as data URL");

    Ok(DataUrl::from_bytes(mime, &bytes))
}

fn detect_mime(path: &Path, bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .ok()
        .or_else(|| ImageFormat::from_path(path).ok())
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}
