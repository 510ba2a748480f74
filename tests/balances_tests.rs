// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerly::balances::{
    BalanceTotals, debt_totals, enrich_accounts, goal_progress, plan_debt_payment, total_saved,
};
use ledgerly::models::{
    Account, AccountBalance, AccountType, Debt, DebtType, RecurringExpense, SavingsGoal, Summary,
};
use ledgerly::recurring::{DueStatus, classify};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn account(id: i64, kind: AccountType, balance: &str) -> Account {
    Account {
        id,
        name: format!("acct-{id}"),
        r#type: kind,
        balance: dec(balance),
        color: "#0ea5e9".into(),
        is_active: true,
        calculated_balance: None,
    }
}

fn summary_with(entries: &[(i64, &str)]) -> Summary {
    Summary {
        accounts: entries
            .iter()
            .map(|(id, bal)| AccountBalance {
                id: *id,
                calculated_balance: Some(dec(bal)),
            })
            .collect(),
        ..Default::default()
    }
}

#[test]
fn net_worth_adds_assets_and_subtracts_credit() {
    let accounts = vec![
        account(1, AccountType::Cash, "100"),
        account(2, AccountType::Debit, "1000"),
        account(3, AccountType::Savings, "500"),
        account(4, AccountType::Credit, "300"),
    ];
    let enriched = enrich_accounts(&accounts, None);
    let t = BalanceTotals::from_accounts(&enriched);
    assert_eq!(t.cash, dec("100"));
    assert_eq!(t.bank, dec("1000"));
    assert_eq!(t.savings, dec("500"));
    assert_eq!(t.credit, dec("300"));
    assert_eq!(t.net_worth, dec("1300"));
}

#[test]
fn summary_balance_wins_and_missing_entries_fall_back() {
    let accounts = vec![
        account(1, AccountType::Debit, "1000"),
        account(2, AccountType::Cash, "50"),
    ];
    let summary = summary_with(&[(1, "875.40")]);
    let enriched = enrich_accounts(&accounts, Some(&summary));

    assert_eq!(enriched[0].display_balance, dec("875.40"));
    assert_eq!(enriched[0].account.calculated_balance, Some(dec("875.40")));
    assert_eq!(enriched[1].display_balance, dec("50"));

    let t = BalanceTotals::from_accounts(&enriched);
    assert_eq!(t.net_worth, dec("925.40"));
}

#[test]
fn null_summary_entry_falls_back_for_that_account_only() {
    let summary: Summary = serde_json::from_value(serde_json::json!({
        "accounts": [
            {"id": 1, "calculated_balance": null},
            {"id": 2, "calculated_balance": "5"}
        ]
    }))
    .unwrap();
    assert_eq!(summary.calculated_balance_for(1), None);
    assert_eq!(summary.calculated_balance_for(2), Some(dec("5")));

    let accounts = vec![
        account(1, AccountType::Debit, "1000"),
        account(2, AccountType::Cash, "50"),
    ];
    let enriched = enrich_accounts(&accounts, Some(&summary));
    assert_eq!(enriched[0].display_balance, dec("1000"));
    assert_eq!(enriched[1].display_balance, dec("5"));
}

#[test]
fn credit_only_gives_negative_net_worth() {
    let enriched = enrich_accounts(&[account(1, AccountType::Credit, "250")], None);
    assert_eq!(BalanceTotals::from_accounts(&enriched).net_worth, dec("-250"));
}

#[test]
fn no_accounts_means_zero_everywhere() {
    let t = BalanceTotals::from_accounts(&[]);
    assert_eq!(t, BalanceTotals::default());
}

fn debt(kind: DebtType, remaining: &str, settled: bool) -> Debt {
    Debt {
        id: 1,
        name: "d".into(),
        description: None,
        r#type: kind,
        total_amount: dec("100"),
        remaining_amount: dec(remaining),
        due_date: None,
        is_settled: settled,
    }
}

#[test]
fn debt_totals_skip_settled_debts() {
    let debts = vec![
        debt(DebtType::OwedToMe, "40", false),
        debt(DebtType::IOwe, "70", false),
        debt(DebtType::IOwe, "0", true),
        debt(DebtType::OwedToMe, "25", true),
    ];
    let t = debt_totals(&debts);
    assert_eq!(t.owed_to_me, dec("40"));
    assert_eq!(t.i_owe, dec("70"));
}

#[test]
fn debt_payment_plan_bounds() {
    let d = debt(DebtType::IOwe, "100", false);
    let plan = plan_debt_payment(&d, dec("100")).unwrap();
    assert!(plan.settles);
    assert_eq!(plan.remaining_after, Decimal::ZERO);

    let partial = plan_debt_payment(&d, dec("30")).unwrap();
    assert!(!partial.settles);
    assert_eq!(partial.remaining_after, dec("70"));

    assert!(plan_debt_payment(&d, dec("150")).is_err());
    assert!(plan_debt_payment(&d, Decimal::ZERO).is_err());
    assert!(plan_debt_payment(&debt(DebtType::IOwe, "0", true), dec("1")).is_err());
}

fn goal(current: &str, target: &str) -> SavingsGoal {
    SavingsGoal {
        id: 1,
        name: "g".into(),
        target_amount: dec(target),
        current_amount: dec(current),
        target_date: None,
        color: String::new(),
        is_completed: false,
    }
}

#[test]
fn goal_progress_is_clamped() {
    assert_eq!(goal_progress(&goal("250", "1000")), dec("25"));
    assert_eq!(goal_progress(&goal("1500", "1000")), Decimal::ONE_HUNDRED);
    assert_eq!(goal_progress(&goal("10", "0")), Decimal::ZERO);
    assert_eq!(
        total_saved(&[goal("250", "1000"), goal("100", "300")]),
        dec("350")
    );
}

fn expense(due_day: u32, last_paid: Option<NaiveDate>) -> RecurringExpense {
    RecurringExpense {
        id: 1,
        name: "Internet".into(),
        amount: dec("45"),
        category: None,
        account: None,
        due_day,
        is_active: true,
        last_paid_date: last_paid,
    }
}

#[test]
fn recurring_status_by_day_of_month() {
    let on_12th = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();
    assert_eq!(classify(&expense(15, None), on_12th), DueStatus::DueSoon);
    assert_eq!(classify(&expense(17, None), on_12th), DueStatus::DueSoon);
    assert_eq!(classify(&expense(18, None), on_12th), DueStatus::Pending);

    let on_20th = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
    assert_eq!(classify(&expense(5, None), on_20th), DueStatus::PastDue);

    let paid = NaiveDate::from_ymd_opt(2025, 3, 3);
    assert_eq!(classify(&expense(5, paid), on_20th), DueStatus::Paid);
    let paid_last_month = NaiveDate::from_ymd_opt(2025, 2, 3);
    assert_eq!(
        classify(&expense(5, paid_last_month), on_20th),
        DueStatus::PastDue
    );
}
