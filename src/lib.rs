//! Ledger XIRR - annualized rate of return for personal-finance cash flows
//!
//! This library provides:
//! - Dated cash flows and a non-empty schedule type
//! - XIRR via Newton-Raphson (Actual/365, anchored on the first flow)
//! - XNPV and its closed-form derivative
//! - Ledger loading from CSV/JSON and per-investment rate reports

pub mod cashflow;
pub mod xirr;
pub mod portfolio;

// Re-export commonly used types
pub use cashflow::{CashFlow, CashFlowSchedule, LedgerEntry, LedgerError};
pub use xirr::{xirr, xirr_with_config, try_xirr, xnpv, SolverConfig, XirrError, XirrOutcome};
pub use portfolio::{PortfolioReport, PortfolioRunner, RateSummary, format_rate};
