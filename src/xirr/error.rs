//! Error types for the XIRR solver

use thiserror::Error;

/// Errors surfaced by the Result-shaped solver entry points.
///
/// The core `xirr` function never returns these; it signals failure with a
/// NaN rate instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XirrError {
    /// No cash flows were supplied, so there is no anchor date.
    #[error("cash flow schedule is empty: at least one cash flow is required")]
    EmptySchedule,

    /// Newton-Raphson did not settle within the iteration cap.
    #[error("XIRR did not converge after {iterations} iterations")]
    NonConvergence { iterations: u32 },

    /// Solver configuration is unusable.
    #[error("invalid solver config: {reason}")]
    InvalidConfig { reason: String },
}

impl XirrError {
    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        XirrError::InvalidConfig {
            reason: reason.into(),
        }
    }
}
