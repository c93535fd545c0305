//! Per-investment and overall XIRR over a ledger
//!
//! Groups ledger rows by investment label and solves one XIRR per group plus
//! one across every row, the way a tracker shows a rate next to each holding
//! and a headline figure for the whole portfolio.

use crate::cashflow::{CashFlow, CashFlowSchedule, LedgerEntry};
use crate::xirr::{xirr_with_config, SolverConfig, XirrError};
use serde::Serialize;
use std::collections::HashMap;

/// Group label for rows without an investment
pub const UNASSIGNED_LABEL: &str = "unassigned";

/// Label used for the whole-ledger summary
pub const OVERALL_LABEL: &str = "overall";

/// Totals and rate for one group of flows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateSummary {
    pub label: String,
    pub flow_count: usize,
    /// Sum of outflows, as a positive number
    pub total_invested: f64,
    /// Sum of inflows
    pub total_returned: f64,
    pub net: f64,
    /// None when the solver did not converge
    pub rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    pub overall: RateSummary,
    pub investments: Vec<RateSummary>,
}

/// Render a rate for display: `"12.34%"` or `"N/A"`
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.2}%", r * 100.0),
        None => "N/A".to_string(),
    }
}

/// Solves XIRR for a ledger with one shared solver config
///
/// # Example
/// ```ignore
/// let entries = load_ledger("ledger.csv")?;
/// let report = PortfolioRunner::default().run(&entries)?;
/// println!("{}", format_rate(report.overall.rate));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PortfolioRunner {
    config: SolverConfig,
    sort_chronologically: bool,
}

impl PortfolioRunner {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            sort_chronologically: false,
        }
    }

    /// Sort each group by date before solving, anchoring on the earliest flow.
    /// Off by default: the first row of each group is the anchor.
    #[must_use]
    pub fn with_chronological_anchor(mut self, enabled: bool) -> Self {
        self.sort_chronologically = enabled;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve one group of flows
    pub fn summarize(&self, label: &str, flows: Vec<CashFlow>) -> Result<RateSummary, XirrError> {
        let mut schedule = CashFlowSchedule::new(flows)?;
        if self.sort_chronologically {
            schedule = schedule.sorted_by_date();
        }

        let total_invested: f64 = schedule
            .iter()
            .filter(|cf| cf.is_outflow())
            .map(|cf| -cf.amount)
            .sum();
        let total_returned: f64 = schedule
            .iter()
            .filter(|cf| cf.is_inflow())
            .map(|cf| cf.amount)
            .sum();

        let outcome = xirr_with_config(&schedule, &self.config);
        if !outcome.converged {
            log::debug!(
                "No XIRR for '{}' ({} flows, sign change: {})",
                label,
                schedule.len(),
                schedule.has_sign_change()
            );
        }

        Ok(RateSummary {
            label: label.to_string(),
            flow_count: schedule.len(),
            total_invested,
            total_returned,
            net: total_returned - total_invested,
            rate: outcome.rate(),
        })
    }

    /// Overall rate over all rows in ledger order, plus one rate per investment
    /// in order of first appearance
    pub fn run(&self, entries: &[LedgerEntry]) -> Result<PortfolioReport, XirrError> {
        let all_flows: Vec<CashFlow> = entries.iter().map(|e| e.flow).collect();
        let overall = self.summarize(OVERALL_LABEL, all_flows)?;

        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, Vec<CashFlow>)> = Vec::new();

        for entry in entries {
            let label = entry.investment.as_deref().unwrap_or(UNASSIGNED_LABEL);
            let slot = *index.entry(label).or_insert_with(|| {
                groups.push((label, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(entry.flow);
        }

        let investments = groups
            .into_iter()
            .map(|(label, flows)| self.summarize(label, flows))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PortfolioReport { overall, investments })
    }
}
