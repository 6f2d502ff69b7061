//! # Export Pipeline
//!
//! Orchestrates one export run from a [`ReportSnapshot`] to a delivered PNG.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Export Run                                    │
//! │                                                                         │
//! │  has_content? ──no──► Err(NothingToExport)                              │
//! │       │yes                                                              │
//! │  busy flag free? ──no──► Ok(Busy)                                       │
//! │       │yes                                                              │
//! │  present ──► rasterize ──► flatten ──► encode PNG                       │
//! │                                            │                            │
//! │              ┌─────────────────────────────┴──────────┐                 │
//! │              ▼                                        ▼                 │
//! │          download                          can_share? ──no──┐           │
//! │              │                                 │yes         │           │
//! │              ▼                               share ──err──► save again  │
//! │           Saved                                │ok          (2nd capture)│
//! │                                                ▼            │           │
//! │                                             Shared    SavedAfterShare-  │
//! │                                                       Fallback          │
//! │                                                                         │
//! │  The surface is hidden and the busy flag released on every exit.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fatura_core::clock::Clock;
use fatura_core::naming::{artifact_file_name, share_caption, share_title, Locale};
use fatura_core::ReportSnapshot;
use tracing::{debug, info, instrument, warn};

use crate::capture::{flatten, CaptureOptions, Rasterizer, ReportSurface, SurfaceVisibility};
use crate::deliver::{Downloader, SharePayload, Sharer};
use crate::encode::{encode_png, ExportFile, PngProfile};
use crate::error::{ExportError, ExportResult, ShareError};

// =============================================================================
// Outcome
// =============================================================================

/// How an export run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The PNG was downloaded.
    Saved { file_name: String },
    /// The share sheet accepted the PNG.
    Shared { file_name: String },
    /// Sharing was not possible; the PNG was downloaded instead.
    SavedAfterShareFallback { file_name: String, reason: ShareError },
    /// Another export is still running; nothing happened.
    Busy,
}

impl ExportOutcome {
    pub fn file_name(&self) -> Option<&str> {
        match self {
            ExportOutcome::Saved { file_name }
            | ExportOutcome::Shared { file_name }
            | ExportOutcome::SavedAfterShareFallback { file_name, .. } => Some(file_name),
            ExportOutcome::Busy => None,
        }
    }
}

// =============================================================================
// Busy Flag
// =============================================================================

/// Holds the busy flag; dropping it releases the flag.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Export orchestration over the four host capabilities.
///
/// At most one run is in flight per pipeline.
pub struct ExportPipeline<S, R, D, H> {
    surface: S,
    rasterizer: R,
    downloader: D,
    sharer: H,
    clock: Arc<dyn Clock>,
    locale: Locale,
    options: CaptureOptions,
    busy: AtomicBool,
}

impl<S, R, D, H> ExportPipeline<S, R, D, H>
where
    S: ReportSurface,
    R: Rasterizer,
    D: Downloader,
    H: Sharer,
{
    pub fn new(
        surface: S,
        rasterizer: R,
        downloader: D,
        sharer: H,
        clock: Arc<dyn Clock>,
        locale: Locale,
    ) -> Self {
        Self {
            surface,
            rasterizer,
            downloader,
            sharer,
            clock,
            locale,
            options: CaptureOptions::default(),
            busy: AtomicBool::new(false),
        }
    }

    pub fn with_capture_options(mut self, options: CaptureOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    pub fn sharer(&self) -> &H {
        &self.sharer
    }

    /// Captures the report and downloads it as a PNG.
    #[instrument(skip_all, fields(items = snapshot.items.len()))]
    pub async fn export_as_image(&self, snapshot: &ReportSnapshot) -> ExportResult<ExportOutcome> {
        if !snapshot.has_content() {
            return Err(ExportError::NothingToExport);
        }
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            debug!("Export already running");
            return Ok(ExportOutcome::Busy);
        };

        let file_name = self.save(snapshot).await?;
        Ok(ExportOutcome::Saved { file_name })
    }

    /// Captures the report and offers it to the share sheet.
    ///
    /// Whenever sharing is impossible or fails, the report is saved instead
    /// through the full save path, which captures the surface a second time.
    #[instrument(skip_all, fields(items = snapshot.items.len()))]
    pub async fn export_and_share(&self, snapshot: &ReportSnapshot) -> ExportResult<ExportOutcome> {
        if !snapshot.has_content() {
            return Err(ExportError::NothingToExport);
        }
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            debug!("Export already running");
            return Ok(ExportOutcome::Busy);
        };

        let file = self.render(snapshot, PngProfile::Share).await?;

        let reason = if self.sharer.can_share(&file) {
            let labels = self.locale.labels();
            let payload = SharePayload {
                title: share_title(labels, &snapshot.office_name),
                text: share_caption(
                    labels,
                    &snapshot.office_name,
                    &snapshot.customer_name,
                    &snapshot.merchant.shop_number,
                ),
                file,
            };

            match self.sharer.share(&payload).await {
                Ok(()) => {
                    info!(file_name = %payload.file.name, "Shared report image");
                    return Ok(ExportOutcome::Shared {
                        file_name: payload.file.name,
                    });
                }
                Err(e) => {
                    warn!(error = %e, "Share failed, saving instead");
                    e
                }
            }
        } else {
            info!("Sharing not supported, saving instead");
            ShareError::Unsupported
        };

        let file_name = self.save(snapshot).await?;
        Ok(ExportOutcome::SavedAfterShareFallback { file_name, reason })
    }

    async fn save(&self, snapshot: &ReportSnapshot) -> ExportResult<String> {
        let file = self.render(snapshot, PngProfile::Download).await?;
        self.downloader.download(&file).await?;
        Ok(file.name)
    }

    /// present → rasterize → flatten → encode.
    async fn render(&self, snapshot: &ReportSnapshot, profile: PngProfile) -> ExportResult<ExportFile> {
        let image = {
            let _visible = SurfaceVisibility::present(&self.surface, snapshot).await;
            self.rasterizer
                .rasterize(self.surface.region(), &self.options)
                .await
                .ok_or(ExportError::Capture)?
        };
        debug!(width = image.width(), height = image.height(), "Captured report");

        let bytes = encode_png(flatten(&image, self.options.background), profile).await?;
        Ok(ExportFile::png(self.file_name(snapshot), bytes))
    }

    fn file_name(&self, snapshot: &ReportSnapshot) -> String {
        let label = snapshot.export_label(self.locale.labels().default_file_label);
        artifact_file_name(&label, self.clock.today())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
