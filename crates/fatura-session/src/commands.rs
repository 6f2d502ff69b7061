//! # Session Commands
//!
//! The functions the UI host invokes. Each one takes the session state it
//! needs and returns `Result<T, ApiError>`, so the frontend always gets
//! either a fresh view or a `{ code, message }` error.
//!
//! ## Report Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐   dispatch    ┌──────────┐   export_as_image  ┌────────┐ │
//! │  │  Empty   │──────────────►│ Editing  │───────────────────►│  PNG   │ │
//! │  │  Report  │  Set*/AddItem │          │  export_and_share  │ saved/ │ │
//! │  └──────────┘               └──────────┘                    │ shared │ │
//! │                               │      ▲                      └────────┘ │
//! │                attach_*_image │      │ RemoveItem                      │
//! │                               └──────┘                                 │
//! │                                                                         │
//! │  Exports never change the report; the user can keep editing and        │
//! │  export again.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use fatura_core::{ItemDraft, ReportAction, ReportSnapshot, ReportState};
use fatura_export::{
    file_to_data_url, Downloader, ExportOutcome, ExportPipeline, Rasterizer, ReportSurface, Sharer,
};
use serde::Serialize;
use tracing::{debug, info};
use ts_rs::TS;

use crate::error::ApiError;
use crate::state::SessionState;

// =============================================================================
// Responses
// =============================================================================

/// Everything the form needs to redraw itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub report: ReportSnapshot,
    pub draft: ItemDraft,
    /// Whether the Save/Share buttons would do anything.
    pub can_export: bool,
}

impl From<&ReportState> for ReportView {
    fn from(state: &ReportState) -> Self {
        ReportView {
            report: state.snapshot(),
            draft: state.draft().clone(),
            can_export: state.has_content(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ExportStatus {
    Saved,
    Shared,
    SavedAfterShareFallback,
    Busy,
}

/// Result of an export command.
///
/// `notice` carries the message to show when sharing fell back to saving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub status: ExportStatus,
    pub file_name: Option<String>,
    pub notice: Option<String>,
}

impl From<ExportOutcome> for ExportResponse {
    fn from(outcome: ExportOutcome) -> Self {
        match outcome {
            ExportOutcome::Saved { file_name } => ExportResponse {
                status: ExportStatus::Saved,
                file_name: Some(file_name),
                notice: None,
            },
            ExportOutcome::Shared { file_name } => ExportResponse {
                status: ExportStatus::Shared,
                file_name: Some(file_name),
                notice: None,
            },
            ExportOutcome::SavedAfterShareFallback { file_name, reason } => ExportResponse {
                status: ExportStatus::SavedAfterShareFallback,
                file_name: Some(file_name),
                notice: Some(reason.to_string()),
            },
            ExportOutcome::Busy => ExportResponse {
                status: ExportStatus::Busy,
                file_name: None,
                notice: None,
            },
        }
    }
}

// =============================================================================
// Editing
// =============================================================================

/// Gets the current report and draft.
pub fn get_report(session: &SessionState) -> ReportView {
    debug!("get_report command");
    session.with_state(|state| ReportView::from(state))
}

/// Applies one form edit.
///
/// ## Behavior
/// - `AddItem` with an incomplete draft fails with `VALIDATION_ERROR`;
///   the draft is kept so the user can fix it
/// - `RemoveItem` with an unknown id is a no-op
pub fn dispatch(session: &SessionState, action: ReportAction) -> Result<ReportView, ApiError> {
    debug!(action = action_kind(&action), "dispatch command");

    session.with_state_mut(|state| -> Result<ReportView, ApiError> {
        state.apply(action)?;
        Ok(ReportView::from(&*state))
    })
}

/// Reads the shop's business card photo and attaches it to the report.
pub async fn attach_merchant_card(
    session: &SessionState,
    path: impl AsRef<Path>,
) -> Result<ReportView, ApiError> {
    debug!(path = %path.as_ref().display(), "attach_merchant_card command");

    // Read before locking: the lock is never held across an await.
    let preview = file_to_data_url(path).await?;
    dispatch(session, ReportAction::SetMerchantCardImage(Some(preview)))
}

/// Reads an item photo into the draft.
pub async fn attach_item_image(
    session: &SessionState,
    path: impl AsRef<Path>,
) -> Result<ReportView, ApiError> {
    debug!(path = %path.as_ref().display(), "attach_item_image command");

    let preview = file_to_data_url(path).await?;
    dispatch(session, ReportAction::SetItemImage(Some(preview)))
}

// =============================================================================
// Export
// =============================================================================

/// Saves the report as a PNG.
pub async fn export_as_image<S, R, D, H>(
    session: &SessionState,
    pipeline: &ExportPipeline<S, R, D, H>,
) -> Result<ExportResponse, ApiError>
where
    S: ReportSurface,
    R: Rasterizer,
    D: Downloader,
    H: Sharer,
{
    debug!("export_as_image command");

    let snapshot = session.with_state(|state| state.snapshot());
    let outcome = pipeline.export_as_image(&snapshot).await?;

    info!(?outcome, "Export finished");
    Ok(outcome.into())
}

/// Shares the report as a PNG, saving it when sharing is not possible.
pub async fn export_and_share<S, R, D, H>(
    session: &SessionState,
    pipeline: &ExportPipeline<S, R, D, H>,
) -> Result<ExportResponse, ApiError>
where
    S: ReportSurface,
    R: Rasterizer,
    D: Downloader,
    H: Sharer,
{
    debug!("export_and_share command");

    let snapshot = session.with_state(|state| state.snapshot());
    let outcome = pipeline.export_and_share(&snapshot).await?;

    info!(?outcome, "Export finished");
    Ok(outcome.into())
}

/// Short name for logs; payloads such as data URLs stay out of them.
fn action_kind(action: &ReportAction) -> &'static str {
    match action {
        ReportAction::SetCustomerName(_) => "setCustomerName",
        ReportAction::SetShopNumber(_) => "setShopNumber",
        ReportAction::SetMerchantCardImage(_) => "setMerchantCardImage",
        ReportAction::SetItemName(_) => "setItemName",
        ReportAction::SetItemPrice(_) => "setItemPrice",
        ReportAction::SetItemPriceText(_) => "setItemPriceText",
        ReportAction::SetItemPacking(_) => "setItemPacking",
        ReportAction::SetItemCartons(_) => "setItemCartons",
        ReportAction::SetItemImage(_) => "setItemImage",
        ReportAction::AddItem => "addItem",
        ReportAction::RemoveItem(_) => "removeItem",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
