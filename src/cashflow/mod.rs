//! Cash flow data structures and ledger loading

mod data;
pub mod loader;

pub use data::{CashFlow, CashFlowSchedule};
pub use loader::{
    load_ledger, load_ledger_from_json_str, load_ledger_from_reader, LedgerEntry, LedgerError,
};
