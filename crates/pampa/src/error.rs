//! Error type for page assembly.

use thiserror::Error;

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, PampaError>;

/// Errors surfaced while assembling a dashboard page.
///
/// Only loading and structural problems end up here. A page with no
/// matching rows, a quarter with no predecessor or a zero denominator
/// produces `N/A` widgets, not an error: one broken KPI must never
/// blank the whole page.
#[derive(Debug, Error)]
pub enum PampaError {
    /// Workbook loading failed; fatal for the session
    #[error(transparent)]
    Data(#[from] pampa_data::DataError),

    /// A computation referenced a column the table does not have
    #[error(transparent)]
    Analytics(#[from] pampa_analytics::AnalyticsError),
}
