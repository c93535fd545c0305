//! Dated cash flow and the non-empty schedule the solver consumes

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::xirr::XirrError;

/// A single dated amount.
///
/// Positive = money returned to the investor (redemption, maturity),
/// negative = money put in (contribution, purchase).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: f64,
}

impl CashFlow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }

    pub fn is_inflow(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }
}

/// Ordered, non-empty sequence of cash flows.
///
/// The first element is the anchor (day offset 0) regardless of whether it is
/// the earliest date. Use [`CashFlowSchedule::sorted_by_date`] to anchor on the
/// chronological minimum instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowSchedule {
    flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Wrap a vector of flows, rejecting an empty one
    pub fn new(flows: Vec<CashFlow>) -> Result<Self, XirrError> {
        if flows.is_empty() {
            return Err(XirrError::EmptySchedule);
        }
        Ok(Self { flows })
    }

    /// First flow in input order
    pub fn anchor(&self) -> &CashFlow {
        &self.flows[0]
    }

    pub fn anchor_date(&self) -> NaiveDate {
        self.anchor().date
    }

    /// Signed whole-day offsets from the anchor date, in input order
    pub fn day_offsets(&self) -> impl Iterator<Item = i64> + '_ {
        let anchor = self.anchor_date();
        self.flows
            .iter()
            .map(move |cf| cf.date.signed_duration_since(anchor).num_days())
    }

    /// True when there is at least one strictly positive and one strictly negative amount
    pub fn has_sign_change(&self) -> bool {
        self.flows.iter().any(CashFlow::is_inflow) && self.flows.iter().any(CashFlow::is_outflow)
    }

    /// Copy of the schedule in chronological order (stable for equal dates)
    pub fn sorted_by_date(&self) -> Self {
        let mut flows = self.flows.clone();
        flows.sort_by_key(|cf| cf.date);
        Self { flows }
    }

    pub fn as_slice(&self) -> &[CashFlow] {
        &self.flows
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Never true: construction rejects empty input
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CashFlow> {
        self.flows.iter()
    }

    pub fn into_inner(self) -> Vec<CashFlow> {
        self.flows
    }
}

impl TryFrom<Vec<CashFlow>> for CashFlowSchedule {
    type Error = XirrError;

    fn try_from(flows: Vec<CashFlow>) -> Result<Self, Self::Error> {
        Self::new(flows)
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_empty_schedule_rejected() {
        assert_eq!(CashFlowSchedule::new(vec![]), Err(XirrError::EmptySchedule));
        assert!(CashFlowSchedule::try_from(Vec::<CashFlow>::new()).is_err());
    }

    #[test]
    fn test_anchor_is_first_not_earliest() {
        let schedule = CashFlowSchedule::new(vec![
            CashFlow::new(d(2023, 6, 1), 500.0),
            CashFlow::new(d(2023, 1, 1), -400.0),
        ])
        .unwrap();

        assert_eq!(schedule.anchor_date(), d(2023, 6, 1));
        let offsets: Vec<i64> = schedule.day_offsets().collect();
        assert_eq!(offsets, vec![0, -151]);
    }

    #[test]
    fn test_sorted_by_date_moves_anchor() {
        let schedule = CashFlowSchedule::new(vec![
            CashFlow::new(d(2023, 6, 1), 500.0),
            CashFlow::new(d(2023, 1, 1), -400.0),
        ])
        .unwrap();

        let sorted = schedule.sorted_by_date();
        assert_eq!(sorted.anchor_date(), d(2023, 1, 1));
        // Original untouched
        assert_eq!(schedule.anchor_date(), d(2023, 6, 1));
    }

    #[test]
    fn test_sign_change() {
        let one_signed = CashFlowSchedule::new(vec![
            CashFlow::new(d(2023, 1, 1), -100.0),
            CashFlow::new(d(2023, 2, 1), 0.0),
        ])
        .unwrap();
        assert!(!one_signed.has_sign_change());

        let mixed = CashFlowSchedule::new(vec![
            CashFlow::new(d(2023, 1, 1), -100.0),
            CashFlow::new(d(2023, 2, 1), 1.0),
        ])
        .unwrap();
        assert!(mixed.has_sign_change());
    }

    #[test]
    fn test_cashflow_serde_uses_iso_dates() {
        let cf = CashFlow::new(d(2024, 2, 29), -250.5);
        let json = serde_json::to_string(&cf).unwrap();
        assert_eq!(json, r#"{"date":"2024-02-29","amount":-250.5}"#);
    }
}
