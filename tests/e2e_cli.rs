
use assert_cmd::prelude::*;
use cli_helpers::*;
use predicates::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;
use tempfile::TempDir;

fn setup_temp_home() -> TempDir {
    TempDir::new().expect("failed to create temp home")
}

fn decimal(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        other => Decimal::from_str(&other.to_string()).expect("decimal number"),
    }
}

// 2020-01-01T00:00:00Z and 2020-06-01T00:00:00Z
const JAN_1_2020: i64 = 1_577_836_800;
const JUN_1_2020: i64 = 1_590_969_600;

#[test]
fn windows_on_empty_db_are_all_zero() {
    let home = setup_temp_home();
    let report = windows_json(&home).unwrap();

    let map = report.as_object().expect("object");
    assert_eq!(map.len(), 9);
    for label in ["24h", "5d", "1mo", "3mo", "6mo", "ytd", "1y", "5y", "all"] {
        assert_eq!(map[label], "0.00", "window {}", label);
    }
}

#[test]
fn buy_and_sell_track_resulting_total() {
    let home = setup_temp_home();

    let first = buy(&home, "100", "2020-01-01").unwrap();
    assert_eq!(decimal(&first["resulting_total"]), dec!(100));
    assert_eq!(first["kind"], "buy");

    let second = sell(&home, "40", "2020-02-01").unwrap();
    assert_eq!(decimal(&second["resulting_total"]), dec!(60));

    let listed = run_cmd_json(&home, &["transactions", "list"]).unwrap();
    let txs = listed.as_array().expect("array");
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0]["effective_date"], "2020-01-01");
    assert_eq!(txs[1]["kind"], "sell");

    assert!(db_path(&home).exists());
}

#[test]
fn old_ledger_anchors_every_window_on_earliest_transaction() {
    let home = setup_temp_home();
    buy(&home, "100", "2020-01-01").unwrap();
    buy(&home, "50", "2020-06-01").unwrap();

    let report = windows_json(&home).unwrap();
    for (label, value) in report.as_object().unwrap() {
        assert_eq!(value, "50.00", "window {}", label);
    }
}

#[test]
fn twr_includes_flow_on_end_date() {
    let home = setup_temp_home();
    buy(&home, "100", "2019-12-31").unwrap();
    add_aum(&home, "100", JAN_1_2020).unwrap();
    buy(&home, "20", "2020-06-01").unwrap();
    add_aum(&home, "150", JUN_1_2020).unwrap();

    let twr = twr_json(&home).unwrap();
    let values = twr["values"].as_array().unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(twr["labels"].as_array().unwrap().len(), 1);
    assert_eq!(decimal(&values[0]), dec!(20));
    assert_eq!(decimal(&twr["latest"]), dec!(20));
}

#[test]
fn twr_with_single_snapshot_is_empty() {
    let home = setup_temp_home();
    add_aum(&home, "100", JAN_1_2020).unwrap();

    let twr = twr_json(&home).unwrap();
    assert!(twr["values"].as_array().unwrap().is_empty());
    assert!(twr["latest"].is_null());
}

#[test]
fn invalid_amount_is_rejected() {
    let home = setup_temp_home();
    let mut cmd = base_cmd(&home);
    cmd.args(["buy", "-5", "2025-01-01"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid amount"));
}

#[test]
fn invalid_date_is_rejected() {
    let home = setup_temp_home();
    let mut cmd = base_cmd(&home);
    cmd.args(["sell", "5", "01/01/2025"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid date"));
    assert!(!db_path(&home).exists(), "rejected input should not create db");
}

#[test]
fn public_dashboard_hides_transactions() {
    let home = setup_temp_home();
    buy(&home, "100", "2020-01-01").unwrap();

    let public = run_cmd_json(&home, &["dashboard", "--public"]).unwrap();
    assert!(public.get("transactions").is_none());
    assert_eq!(decimal(&public["total"]), dec!(100));
    assert_eq!(public["history"].as_array().unwrap().len(), 1);

    let full = run_cmd_json(&home, &["dashboard"]).unwrap();
    assert_eq!(full["transactions"].as_array().unwrap().len(), 1);
}

#[test]
fn dashboard_text_has_no_ansi_when_disabled() {
    let home = setup_temp_home();
    buy(&home, "100", "2020-01-01").unwrap();

    let mut cmd = base_cmd(&home);
    cmd.arg("dashboard");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total: 100 pts"))
        .stdout(predicate::str::contains("all: 0.00%"))
        .stdout(predicate::str::contains("\u{001b}[").not());
}

#[test]
fn db_flag_overrides_default_location() {
    let home = setup_temp_home();
    let custom = home.path().join("custom").join("fund.db");
    let custom_str = custom.to_str().unwrap();

    run_cmd(&home, &["--db", custom_str, "buy", "10", "2024-01-01"]).unwrap();

    assert!(custom.exists());
    assert!(!db_path(&home).exists());
}
