//! # fatura-core: Pure Report Logic for Fatura
//!
//! This crate is the **heart** of Fatura. It contains the invoice form
//! state and all of its arithmetic as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fatura Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (WebView)                           │   │
//! │  │   Customer/Shop form ──► Add item form ──► Save / Share buttons │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    fatura-session                               │   │
//! │  │    dispatch, attach_*_image, export_as_image, export_and_share │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fatura-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  money   │  │  ledger  │  │  report  │  │  validation  │   │   │
//! │  │   │  Money   │  │ LineItem │  │ Reducer  │  │  naming      │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO RENDERING • NO NETWORK • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    fatura-export                                │   │
//! │  │        snapshot ──► capture ──► PNG ──► download / share        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`types`] - Line items, drafts, merchant info, data URLs
//! - [`ledger`] - Ordered item list with derived grand total
//! - [`report`] - Report state, tagged reducer, snapshots
//! - [`naming`] - Date labels, file names, share captions
//! - [`validation`] - Form rules
//! - [`clock`] - Injected calendar
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fatura_core::ledger::SequentialIds;
//! use fatura_core::naming::Locale;
//! use fatura_core::report::{ReportAction, ReportHeader, ReportState};
//! use fatura_core::Money;
//!
//! let started = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//! let header = ReportHeader::new("Al Noor", "$", started, Locale::English);
//! let mut state = ReportState::new(header, Box::new(SequentialIds::new()));
//!
//! state.apply(ReportAction::SetItemName("A".into())).unwrap();
//! state.apply(ReportAction::SetItemPrice(Money::from_cents(1000))).unwrap();
//! state.apply(ReportAction::SetItemPacking(5)).unwrap();
//! state.apply(ReportAction::SetItemCartons(2)).unwrap();
//! state.apply(ReportAction::AddItem).unwrap();
//!
//! assert_eq!(state.snapshot().grand_total.cents(), 10000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod error;
pub mod ledger;
pub mod money;
pub mod naming;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ItemField, ValidationError};
pub use money::Money;
pub use report::{ReportAction, ReportHeader, ReportSnapshot, ReportState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Office name used when none is configured.
pub const DEFAULT_OFFICE_NAME: &str = "Fatura";

/// Currency symbol used when none is configured.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
