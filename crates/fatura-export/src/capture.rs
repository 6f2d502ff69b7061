//! # Capture
//!
//! The rendering layer owns the pixels; this module describes what the
//! pipeline needs from it.
//!
//! ## Capture Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  present(snapshot) ──► paint commit ──► rasterize(region, options)     │
//! │        │                                        │                       │
//! │        │                                        ▼                       │
//! │        │                              RgbaImage (scale 2)               │
//! │        │                                        │                       │
//! │        ▼                                        ▼                       │
//! │   SurfaceVisibility ── drop ──► hide()   flatten onto white            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `present` must resolve only after the surface has been painted with the
//! snapshot; a fixed delay is not good enough.

use fatura_core::ReportSnapshot;
use image::{Rgb, RgbImage, RgbaImage};

/// Settings handed to the rasterizer on every capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOptions {
    /// Device pixel multiplier.
    pub scale: u32,
    /// Allow cross-origin images in the surface.
    pub use_cors: bool,
    /// Rasterizer diagnostics.
    pub logging: bool,
    /// Painted behind transparent regions.
    pub background: Rgb<u8>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2,
            use_cors: true,
            logging: false,
            background: Rgb([0xff, 0xff, 0xff]),
        }
    }
}

/// The off-screen report region.
#[allow(async_fn_in_trait)]
pub trait ReportSurface {
    /// Identifier of the region handed to the rasterizer.
    fn region(&self) -> &str;

    /// Draws the snapshot and makes the region visible.
    ///
    /// Resolves once the paint has been committed.
    async fn present(&self, snapshot: &ReportSnapshot);

    /// Takes the region off screen again.
    fn hide(&self);
}

/// Turns a visible region into a bitmap.
#[allow(async_fn_in_trait)]
pub trait Rasterizer {
    /// Returns `None` when the region could not be captured.
    async fn rasterize(&self, region: &str, options: &CaptureOptions) -> Option<RgbaImage>;
}

/// Keeps the surface visible for as long as it lives.
pub(crate) struct SurfaceVisibility<'a, S: ReportSurface> {
    surface: &'a S,
}

impl<'a, S: ReportSurface> SurfaceVisibility<'a, S> {
    pub(crate) async fn present(surface: &'a S, snapshot: &ReportSnapshot) -> Self {
        // Guard first: hide() must run even if the present future is dropped.
        let guard = Self { surface };
        surface.present(snapshot).await;
        guard
    }
}

impl<S: ReportSurface> Drop for SurfaceVisibility<'_, S> {
    fn drop(&mut self) {
        self.surface.hide();
    }
}

/// Composites the bitmap over an opaque background.
pub fn flatten(image: &RgbaImage, background: Rgb<u8>) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let blend = |fg: u8, bg: u8| -> u8 {
            let a = u16::from(a);
            ((u16::from(fg) * a + u16::from(bg) * (255 - a) + 127) / 255) as u8
        };
        Rgb([
            blend(r, background[0]),
            blend(g, background[1]),
            blend(b, background[2]),
        ])
    })
}
