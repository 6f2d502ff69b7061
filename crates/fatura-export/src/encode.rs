//! # PNG Encoding
//!
//! Bitmaps are always written as lossless PNG. The two delivery paths only
//! differ in how hard the encoder works:
//!
//! | Profile    | Compression | Used for                       |
//! |------------|-------------|--------------------------------|
//! | `Download` | Best        | Files kept on disk             |
//! | `Share`    | Default     | Share sheet, latency matters   |
//!
//! Encoding runs on the blocking pool so a large scale-2 capture does not
//! stall the runtime.

use std::io::Cursor;

use fatura_core::DataUrl;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::RgbImage;
use tracing::debug;

use crate::error::{ExportError, ExportResult};

/// MIME type of every exported artefact.
pub const PNG_MIME: &str = "image/png";

/// How much effort the PNG encoder spends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngProfile {
    Download,
    Share,
}

impl PngProfile {
    fn compression(self) -> CompressionType {
        match self {
            PngProfile::Download => CompressionType::Best,
            PngProfile::Share => CompressionType::Default,
        }
    }
}

/// An encoded artefact ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    pub fn png(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: PNG_MIME,
            bytes,
        }
    }

    /// The file as a `data:` URL, for hosts that download by link.
    pub fn to_data_url(&self) -> DataUrl {
        DataUrl::from_bytes(self.mime, &self.bytes)
    }
}

/// Encodes an opaque bitmap as PNG on the blocking pool.
pub async fn encode_png(image: RgbImage, profile: PngProfile) -> ExportResult<Vec<u8>> {
    let (width, height) = image.dimensions();

    let bytes = tokio::task::spawn_blocking(move || encode_png_blocking(&image, profile))
        .await
        .map_err(|e| ExportError::Encode(format!("encoder task failed: {}", e)))??;

    debug!(width, height, size = bytes.len(), ?profile, "Encoded PNG");
    Ok(bytes)
}

fn encode_png_blocking(image: &RgbImage, profile: PngProfile) -> ExportResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        Cursor::new(&mut buffer),
        profile.compression(),
        FilterType::Adaptive,
    );
    image.write_with_encoder(encoder)?;
    Ok(buffer)
}
