//! Extended Internal Rate of Return (XIRR) over dated cash flows
//!
//! Solves `sum(amount_i * (1 + r)^(-d_i / 365)) = 0` for the annual rate `r`,
//! where `d_i` is the signed day offset of flow `i` from the first flow in the
//! schedule. Newton-Raphson with the closed-form derivative; the rate is never
//! clamped and there is no bracketing fallback, so a failed solve surfaces as
//! NaN after the iteration cap.

use super::config::{SolverConfig, DAYS_PER_YEAR};
use super::XirrError;
use crate::cashflow::{CashFlow, CashFlowSchedule};
use serde::Serialize;

/// Result of a solve, with the number of Newton steps taken
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct XirrOutcome {
    /// Annualized rate, or NaN when not converged
    pub rate: f64,
    pub iterations: u32,
    pub converged: bool,
}

impl XirrOutcome {
    /// `Some(rate)` when converged
    pub fn rate(&self) -> Option<f64> {
        if self.converged {
            Some(self.rate)
        } else {
            None
        }
    }
}

/// Net present value at `rate`, discounted to the schedule's anchor date
pub fn xnpv(schedule: &CashFlowSchedule, rate: f64) -> f64 {
    npv_and_derivative(schedule, rate).0
}

/// d(xnpv)/d(rate) in closed form
pub fn xnpv_derivative(schedule: &CashFlowSchedule, rate: f64) -> f64 {
    npv_and_derivative(schedule, rate).1
}

/// Single pass over the flows returning (f(r), f'(r)).
///
/// Bases at or below zero produce NaN for fractional exponents; that is left
/// to propagate.
fn npv_and_derivative(schedule: &CashFlowSchedule, rate: f64) -> (f64, f64) {
    let base = 1.0 + rate;
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (cf, days) in schedule.iter().zip(schedule.day_offsets()) {
        let years = days as f64 / DAYS_PER_YEAR;
        npv += cf.amount * base.powf(-years);
        dnpv += -cf.amount * years * base.powf(-years - 1.0);
    }

    (npv, dnpv)
}

/// Annualized XIRR with the default tolerance and iteration cap.
///
/// `guess` defaults to 10%. Returns `f64::NAN` when the iteration does not
/// converge; callers should treat that as "rate undefined".
pub fn xirr(schedule: &CashFlowSchedule, guess: Option<f64>) -> f64 {
    let mut config = SolverConfig::default();
    if let Some(guess) = guess {
        config.guess = guess;
    }
    xirr_with_config(schedule, &config).rate
}

/// XIRR for a plain slice, failing fast on empty input
pub fn xirr_from_slice(flows: &[CashFlow], guess: Option<f64>) -> Result<f64, XirrError> {
    let schedule = CashFlowSchedule::new(flows.to_vec())?;
    Ok(xirr(&schedule, guess))
}

/// Newton-Raphson iteration with explicit config.
///
/// Stops as soon as `|r_{n+1} - r_n| < tolerance` and returns `r_{n+1}`.
/// After `max_iterations` steps without that, returns NaN with
/// `converged == false`. The config is used as given; see [`try_xirr`] for a
/// validating entry point.
pub fn xirr_with_config(schedule: &CashFlowSchedule, config: &SolverConfig) -> XirrOutcome {
    let mut rate = config.guess;

    for iteration in 1..=config.max_iterations {
        let (npv, dnpv) = npv_and_derivative(schedule, rate);
        let next = rate - npv / dnpv;

        // NaN never compares less, so a poisoned rate runs to the cap
        if (next - rate).abs() < config.tolerance {
            return XirrOutcome {
                rate: next,
                iterations: iteration,
                converged: true,
            };
        }

        rate = next;
    }

    log::trace!(
        "XIRR did not converge in {} iterations over {} flows (last rate {})",
        config.max_iterations,
        schedule.len(),
        rate
    );

    XirrOutcome {
        rate: f64::NAN,
        iterations: config.max_iterations,
        converged: false,
    }
}

/// Result-shaped XIRR: validates the config and maps the NaN sentinel to
/// [`XirrError::NonConvergence`]
pub fn try_xirr(schedule: &CashFlowSchedule, config: &SolverConfig) -> Result<f64, XirrError> {
    config.validate()?;
    let outcome = xirr_with_config(schedule, config);
    outcome.rate().ok_or(XirrError::NonConvergence {
        iterations: outcome.iterations,
    })
}
