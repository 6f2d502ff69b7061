//! # fatura-session: Session Layer for Fatura
//!
//! What the UI host links against: configuration, the live report of one
//! session, and the command functions the frontend invokes.
//!
//! ## Module Organization
//! ```text
//! fatura_session/
//! ├── lib.rs          ◄─── You are here (tracing setup, re-exports)
//! ├── config.rs       ◄─── fatura.toml + FATURA_* overrides
//! ├── state.rs        ◄─── SessionState (Arc<Mutex<ReportState>>)
//! ├── commands.rs     ◄─── get_report, dispatch, attach_*, export_*
//! └── error.rs        ◄─── ApiError returned by every command
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()              RUST_LOG, default info,fatura=debug     │
//! │  2. FaturaConfig::load_or_default(None)                                 │
//! │  3. SessionState::new(&config, &SystemClock)                            │
//! │  4. ExportPipeline::new(surface, rasterizer,                            │
//! │         DirectoryDownloader::new(config.resolved_download_dir()?),      │
//! │         sharer, Arc::new(SystemClock), config.locale)                   │
//! │  5. Route frontend calls to commands::*                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use tracing::debug;
use tracing_subscriber::EnvFilter;

pub use commands::{ExportResponse, ExportStatus, ReportView};
pub use config::{ConfigError, FaturaConfig};
pub use error::{ApiError, ErrorCode};
pub use state::SessionState;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=fatura_export=trace` - Trace the export pipeline only
/// - Default: INFO, DEBUG for the fatura crates
///
/// Calling it again once a subscriber is installed does nothing.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fatura=debug"));

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        debug!("Tracing subscriber already installed");
    }
}
