//! XIRR solver: annualized internal rate of return over dated cash flows

mod config;
mod error;
mod solver;

pub use config::{
    SolverConfig, DAYS_PER_YEAR, DEFAULT_GUESS, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
pub use error::XirrError;
pub use solver::{
    try_xirr, xirr, xirr_from_slice, xirr_with_config, xnpv, xnpv_derivative, XirrOutcome,
};
