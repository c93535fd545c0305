//! End-to-end: ledger file -> schedule -> XIRR report

use approx::assert_abs_diff_eq;
use ledger_xirr::cashflow::{load_ledger, load_ledger_from_reader};
use ledger_xirr::{xirr, CashFlowSchedule, PortfolioRunner, SolverConfig};
use std::io::Write;
use tempfile::NamedTempFile;

/// Ledger file with the given extension, removed when dropped
fn ledger_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp ledger");
    file.write_all(contents.as_bytes()).expect("Failed to write temp ledger");
    file
}

const MONTHLY_SIP: &str = "date,amount,investment
2023-01-05,-5000,Equity Fund
2023-02-05,-5000,Equity Fund
2023-03-05,-5000,Equity Fund
2023-04-05,-5000,Equity Fund
2023-01-10,-20000,Fixed Deposit
2024-01-10,21400,Fixed Deposit
2024-01-05,22100,Equity Fund
";

#[test]
fn test_csv_ledger_report() {
    let file = ledger_file(".csv", MONTHLY_SIP);
    let entries = load_ledger(file.path()).expect("Failed to load ledger");

    assert_eq!(entries.len(), 7);

    let report = PortfolioRunner::default().run(&entries).unwrap();
    assert_eq!(report.investments.len(), 2);

    // 20000 -> 21400 over exactly 365 days
    let fd = &report.investments[1];
    assert_eq!(fd.label, "Fixed Deposit");
    assert_abs_diff_eq!(fd.rate.unwrap(), 0.07, epsilon = 1e-6);

    // 20000 in over four months, 22100 back: well above 10% annualized
    let equity = report.investments[0].rate.unwrap();
    assert!(equity > 0.10 && equity < 0.20, "unexpected equity XIRR {}", equity);

    assert!(report.overall.rate.is_some());
}

#[test]
fn test_json_ledger_matches_csv() {
    let csv = "date,amount\n2022-05-01,-1000\n2023-05-01,1080\n";
    let csv_entries = load_ledger_from_reader(csv.as_bytes()).unwrap();

    let file = ledger_file(
        ".json",
        r#"[{"date":"2022-05-01","amount":-1000},{"date":"2023-05-01","amount":1080}]"#,
    );
    let json_entries = load_ledger(file.path()).expect("Failed to load JSON ledger");

    assert_eq!(csv_entries, json_entries);

    let schedule = CashFlowSchedule::new(json_entries.iter().map(|e| e.flow).collect()).unwrap();
    assert_abs_diff_eq!(xirr(&schedule, None), 0.08, epsilon = 1e-6);
}

#[test]
fn test_one_signed_ledger_reports_no_rate() {
    let csv = "date,amount\n2022-01-01,-100\n2022-06-01,-100\n";
    let entries = load_ledger_from_reader(csv.as_bytes()).unwrap();
    let report = PortfolioRunner::new(SolverConfig::default()).run(&entries).unwrap();
    assert_eq!(report.overall.rate, None);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_ledger("/nonexistent/ledger.csv").unwrap_err();
    assert!(matches!(err, ledger_xirr::LedgerError::Io(_)));
}
