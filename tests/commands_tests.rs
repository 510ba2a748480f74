// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use ledgerly::cli;
use ledgerly::commands::{exporter, summary, transactions};
use ledgerly::config::Config;
use ledgerly::context::AppContext;
use ledgerly::forms::Submitted;
use ledgerly::http::Method;
use ledgerly::http::mock::MockTransport;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tempfile::tempdir;

fn ctx_with(mock: &MockTransport) -> AppContext {
    AppContext::with_parts(
        Config::default(),
        Connection::open_in_memory().unwrap(),
        Box::new(mock.clone()),
    )
    .unwrap()
}

fn seed(mock: &MockTransport) {
    mock.on(
        Method::Get,
        "finance/accounts/",
        200,
        json!([
            {"id": 1, "name": "Checking", "type": "DEBIT", "balance": "1000.00", "is_active": true},
            {"id": 2, "name": "Visa", "type": "CREDIT", "balance": "200.00", "is_active": true}
        ]),
    );
    mock.on(
        Method::Get,
        "finance/categories/",
        200,
        json!([
            {"id": 10, "name": "Groceries", "type": "OUT", "color": "#87986A"},
            {"id": 11, "name": "Salary", "type": "IN", "color": "#97A97C"}
        ]),
    );
}

fn leaf(args: &[&str]) -> clap::ArgMatches {
    let mut m = cli::build_cli().get_matches_from(args);
    loop {
        match m.remove_subcommand() {
            Some((_, sub)) => m = sub,
            None => return m,
        }
    }
}

#[test]
fn tx_add_creates_missing_category_inline() {
    let mock = MockTransport::new();
    seed(&mock);
    mock.on(
        Method::Post,
        "finance/categories/",
        201,
        json!({"id": 42, "name": "Pets", "type": "OUT", "color": "#87986A"}),
    );
    mock.on(
        Method::Post,
        "finance/transactions/",
        201,
        json!({
            "id": 99, "amount": "30.00", "type": "OUT", "date": "2025-03-12",
            "account": 1, "category": 42, "payment_method": "CARD"
        }),
    );
    let mut ctx = ctx_with(&mock);
    let sub = leaf(&[
        "ledgerly", "tx", "add", "--type", "out", "--amount", "30", "--account", "checking",
        "--category", "Pets", "--method", "card", "--create-missing",
    ]);

    let out = transactions::add(&mut ctx, &sub).unwrap();
    assert!(matches!(out, Submitted::Transaction(ref t) if t.id == 99));
    assert_eq!(mock.count(Method::Post, "finance/categories/"), 1);
    let body = mock.last_body(Method::Post, "finance/transactions/").unwrap();
    assert_eq!(body["category"], 42);
    assert_eq!(body["account"], 1);
    assert_eq!(body["payment_method"], "CARD");
}

#[test]
fn tx_add_refuses_category_of_the_other_type() {
    let mock = MockTransport::new();
    seed(&mock);
    let mut ctx = ctx_with(&mock);
    let sub = leaf(&[
        "ledgerly", "tx", "add", "--type", "OUT", "--amount", "30", "--account", "1",
        "--category", "Salary",
    ]);

    assert!(transactions::add(&mut ctx, &sub).is_err());
    assert_eq!(mock.count(Method::Post, "finance/transactions/"), 0);
    assert_eq!(mock.count(Method::Post, "finance/categories/"), 0);
}

#[test]
fn transfer_without_destination_sends_nothing() {
    let mock = MockTransport::new();
    seed(&mock);
    let mut ctx = ctx_with(&mock);
    let sub = leaf(&["ledgerly", "tx", "transfer", "--from", "Checking", "--amount", "10"]);

    assert!(transactions::transfer(&mut ctx, &sub).is_err());
    assert_eq!(mock.count(Method::Post, "finance/transactions/transfer/"), 0);
}

fn seed_transactions(mock: &MockTransport) {
    mock.on(
        Method::Get,
        "finance/transactions/",
        200,
        json!([
            {"id": 2, "amount": "12.5", "type": "OUT", "date": "2025-03-05", "account": 1,
             "category": 10, "category_name": "Groceries", "payment_method": "CARD", "description": "Market"},
            {"id": 1, "amount": "2000", "type": "IN", "date": "2025-03-01", "account": 1,
             "category": 11, "category_name": "Salary", "payment_method": "TRANSFER"}
        ]),
    );
}

#[test]
fn list_rows_are_newest_first_and_limited() {
    let mock = MockTransport::new();
    seed(&mock);
    seed_transactions(&mock);
    let mut ctx = ctx_with(&mock);

    let rows = transactions::query_rows(&mut ctx, None, Some(1)).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 2);
    assert_eq!(rows[0].amount, "12.50");
    assert_eq!(rows[0].account, "Checking");
}

#[test]
fn export_csv_writes_oldest_first() {
    let mock = MockTransport::new();
    seed(&mock);
    seed_transactions(&mock);
    let mut ctx = ctx_with(&mock);
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.csv");
    let out_str = out.to_str().unwrap();
    let sub = leaf(&["ledgerly", "export", "transactions", "--out", out_str, "--month", "2025-03"]);

    let n = exporter::export_transactions(&mut ctx, &sub).unwrap();
    assert_eq!(n, 2);
    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "id,date,type,amount,account,category,method,description");
    assert_eq!(lines[1], "1,2025-03-01,IN,2000.00,Checking,Salary,TRANSFER,");
    assert_eq!(lines[2], "2,2025-03-05,OUT,12.50,Checking,Groceries,CARD,Market");

    let req = mock
        .requests()
        .into_iter()
        .find(|r| r.path == "finance/transactions/")
        .unwrap();
    assert!(req.query.contains(&("month".to_string(), "3".to_string())));
}

#[test]
fn export_json_is_an_array() {
    let mock = MockTransport::new();
    seed(&mock);
    seed_transactions(&mock);
    let mut ctx = ctx_with(&mock);
    let dir = tempdir().unwrap();
    let out = dir.path().join("tx.json");
    let sub = leaf(&[
        "ledgerly", "export", "transactions", "--format", "json", "--out",
        out.to_str().unwrap(),
    ]);

    exporter::export_transactions(&mut ctx, &sub).unwrap();
    let v: Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v.as_array().unwrap().len(), 2);
    assert_eq!(v[0]["type"], "IN");
}

#[test]
fn export_rejects_unknown_format() {
    let mock = MockTransport::new();
    let mut ctx = ctx_with(&mock);
    let sub = leaf(&[
        "ledgerly", "export", "transactions", "--format", "xml", "--out", "ignored.xml",
    ]);
    assert!(exporter::export_transactions(&mut ctx, &sub).is_err());
    assert!(mock.requests().is_empty());
}

#[test]
fn dashboard_merges_summary_balances() {
    let mock = MockTransport::new();
    seed(&mock);
    mock.on(
        Method::Get,
        "finance/transactions/summary/",
        200,
        json!({
            "balance": "750.00", "total_income": "2000", "total_expense": "1250",
            "expenses_by_category": [{"category__name": "Groceries", "category__color": "#87986A", "total": "1250"}],
            "accounts": [{"id": 1, "calculated_balance": "950.00"}]
        }),
    );
    mock.on(
        Method::Get,
        "finance/debts/",
        200,
        json!([{"id": 1, "name": "Ana", "type": "OWED_TO_ME", "total_amount": "50", "remaining_amount": "20"}]),
    );
    mock.on(
        Method::Get,
        "finance/savings/",
        200,
        json!([{"id": 1, "name": "Trip", "target_amount": "1000", "current_amount": "300"}]),
    );
    let mut ctx = ctx_with(&mock);

    let d = summary::dashboard(&mut ctx, None).unwrap();
    // Checking from summary (950), Visa falls back to stored 200
    assert_eq!(d.totals.bank, "950.00".parse::<Decimal>().unwrap());
    assert_eq!(d.totals.credit, "200.00".parse::<Decimal>().unwrap());
    assert_eq!(d.totals.net_worth, "750".parse::<Decimal>().unwrap());
    assert_eq!(d.debts.owed_to_me, "20".parse::<Decimal>().unwrap());
    assert_eq!(d.saved, "300".parse::<Decimal>().unwrap());
    assert_eq!(
        d.summary.expenses_by_category[0].category_name.as_deref(),
        Some("Groceries")
    );
    assert_eq!(mock.count(Method::Get, "finance/transactions/summary/"), 1);
}
