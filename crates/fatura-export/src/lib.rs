//! # fatura-export: Report Export Pipeline
//!
//! Turns the current report into a PNG and hands it to the user.
//!
//! ## Pipeline Stages
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Export Pipeline                                  │
//! │                                                                         │
//! │  ReportSnapshot                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐                │
//! │  │ ReportSurface │──►│  Rasterizer  │──►│ flatten +    │                │
//! │  │ present/hide  │   │  scale 2     │   │ encode PNG   │                │
//! │  └──────────────┘   └──────────────┘   └──────┬───────┘                │
//! │                                                │                        │
//! │                              ┌─────────────────┴─────────────┐          │
//! │                              ▼                               ▼          │
//! │                       ┌────────────┐                  ┌────────────┐    │
//! │                       │ Downloader │◄──── fallback ───│   Sharer   │    │
//! │                       └────────────┘                  └────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host (a WebView, a headless renderer, a test) implements the four
//! capability traits; [`ExportPipeline`] sequences them and owns the busy
//! flag and the teardown.
//!
//! ## Modules
//!
//! - [`capture`] - Surface and rasterizer traits, capture options
//! - [`encode`] - PNG encoding, export files
//! - [`deliver`] - Download and share capabilities
//! - [`pipeline`] - The orchestration itself
//! - [`data_url`] - Picked files to inline data URLs
//! - [`error`] - Export error types

pub mod capture;
pub mod data_url;
pub mod deliver;
pub mod encode;
pub mod error;
pub mod pipeline;

pub use capture::{CaptureOptions, Rasterizer, ReportSurface};
pub use data_url::file_to_data_url;
pub use deliver::{DirectoryDownloader, Downloader, NoShare, SharePayload, Sharer};
pub use encode::{ExportFile, PngProfile, PNG_MIME};
pub use error::{DeliveryError, ExportError, ExportResult, ReadError, ShareError};
pub use pipeline::{ExportOutcome, ExportPipeline};
