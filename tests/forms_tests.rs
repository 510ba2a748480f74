// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use ledgerly::api::FinanceApi;
use ledgerly::cache::QueryCache;
use ledgerly::error::ApiError;
use ledgerly::forms::pickers::EXPENSE_COLOR;
use ledgerly::forms::{
    AccountForm, AddFundsForm, CategoryPicker, DebtPaymentForm, LoginForm, RecurringForm,
    RegisterForm, Submitted, TransactionForm, TxKind,
};
use ledgerly::http::mock::MockTransport;
use ledgerly::http::{ApiClient, Method};
use ledgerly::models::{Account, AccountType, Category, Debt, DebtType, SavingsGoal, TxType};
use rust_decimal::Decimal;
use serde_json::json;

fn api_with(mock: &MockTransport) -> FinanceApi {
    FinanceApi::new(
        ApiClient::new(Box::new(mock.clone()), None),
        QueryCache::default(),
    )
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
}

fn account(id: i64, name: &str, active: bool) -> Account {
    Account {
        id,
        name: name.into(),
        r#type: AccountType::Debit,
        balance: Decimal::new(100000, 2),
        color: "#0ea5e9".into(),
        is_active: active,
        calculated_balance: None,
    }
}

fn category(id: i64, name: &str, kind: TxType) -> Category {
    Category {
        id,
        name: name.into(),
        r#type: kind,
        color: "#87986A".into(),
        icon: None,
    }
}

fn form() -> TransactionForm {
    TransactionForm::new(
        today(),
        vec![
            account(1, "Checking", true),
            account(2, "Wallet", true),
            account(3, "Old card", false),
        ],
        vec![
            category(10, "Groceries", TxType::Out),
            category(11, "Salary", TxType::In),
        ],
    )
}

#[test]
fn expense_rejects_an_income_category() {
    let mut f = form();
    f.amount = "20".into();
    f.account.select(1).unwrap();
    let err = f.category.select(11).unwrap_err();
    assert!(matches!(err, ApiError::Form(_)));
    assert!(f.category.selected().is_none());
    assert!(!f.can_submit());
    assert!(matches!(f.validate(), Err(ApiError::Form(m)) if m.contains("Category")));
}

#[test]
fn switching_type_drops_the_category() {
    let mut f = form();
    f.category.select(10).unwrap();
    f.set_kind(TxKind::In);
    assert_eq!(f.kind(), TxKind::In);
    assert_eq!(f.category.kind(), TxType::In);
    assert!(f.category.selected().is_none());
    let names: Vec<_> = f.category.options().iter().map(|c| c.name.clone()).collect();
    assert_eq!(names, vec!["Salary"]);
}

#[test]
fn transfer_without_destination_never_reaches_the_backend() {
    let mock = MockTransport::new();
    let mut api = api_with(&mock);
    let mut f = form();
    f.set_kind(TxKind::Transfer);
    f.amount = "50".into();
    f.account.select(1).unwrap();

    assert!(!f.can_submit());
    let err = f.submit(&mut api).unwrap_err();
    assert!(matches!(err, ApiError::Form(m) if m.contains("Destination")));
    assert!(mock.requests().is_empty());
}

#[test]
fn transfer_to_the_same_account_is_rejected() {
    let mut f = form();
    f.set_kind(TxKind::Transfer);
    f.amount = "50".into();
    f.account.select(1).unwrap();
    f.to_account.select(1).unwrap();
    assert!(f.validate().is_err());
}

#[test]
fn archived_accounts_are_not_offered() {
    let mut f = form();
    assert_eq!(f.account.options().len(), 2);
    assert!(f.account.select(3).is_err());
}

#[test]
fn transfer_posts_both_accounts_and_resets() {
    let mock = MockTransport::new();
    mock.on(
        Method::Post,
        "finance/transactions/transfer/",
        201,
        json!({"detail": "ok"}),
    );
    let mut api = api_with(&mock);
    let mut f = form();
    f.set_kind(TxKind::Transfer);
    f.amount = "75.25".into();
    f.account.select(1).unwrap();
    f.to_account.select(2).unwrap();

    let out = f.submit(&mut api).unwrap();
    assert!(matches!(out, Submitted::Transfer(_)));
    let body = mock
        .last_body(Method::Post, "finance/transactions/transfer/")
        .unwrap();
    assert_eq!(body["from_account"], 1);
    assert_eq!(body["to_account"], 2);
    assert_eq!(body["amount"], "75.25");
    assert_eq!(body["date"], "2025-03-12");
    assert!(f.amount.is_empty());
    assert!(f.account.selected_id().is_none());
}

#[test]
fn pending_submission_disables_submit() {
    let mock = MockTransport::new();
    let mut api = api_with(&mock);
    let mut f = form();
    f.amount = "9.99".into();
    f.account.select(2).unwrap();
    f.category.select(10).unwrap();
    assert!(f.can_submit());

    f.in_flight().begin().unwrap();
    assert!(f.is_pending());
    assert!(!f.can_submit());
    assert!(f.submit(&mut api).is_err());
    assert!(mock.requests().is_empty());

    f.in_flight().end();
    assert!(f.can_submit());
}

#[test]
fn expense_submit_sends_wire_payload() {
    let mock = MockTransport::new();
    mock.on(
        Method::Post,
        "finance/transactions/",
        201,
        json!({
            "id": 7, "amount": "12.50", "type": "OUT", "date": "2025-03-12",
            "account": 2, "category": 10, "payment_method": "CARD", "description": "Lunch"
        }),
    );
    let mut api = api_with(&mock);
    let mut f = form();
    f.amount = "12.50".into();
    f.description = " Lunch ".into();
    f.payment_method = ledgerly::models::PaymentMethod::Card;
    f.account.select(2).unwrap();
    f.category.select(10).unwrap();

    match f.submit(&mut api).unwrap() {
        Submitted::Transaction(tx) => assert_eq!(tx.id, 7),
        other => panic!("unexpected {other:?}"),
    }
    let body = mock.last_body(Method::Post, "finance/transactions/").unwrap();
    assert_eq!(body["type"], "OUT");
    assert_eq!(body["amount"], "12.50");
    assert_eq!(body["payment_method"], "CARD");
    assert_eq!(body["description"], "Lunch");
    assert_eq!(body["account"], 2);
    assert_eq!(body["category"], 10);
}

#[test]
fn quick_create_category_selects_the_new_record() {
    let mock = MockTransport::new();
    mock.on(
        Method::Post,
        "finance/categories/",
        201,
        json!({"id": 42, "name": "Pets", "type": "OUT", "color": EXPENSE_COLOR}),
    );
    let mut api = api_with(&mock);
    let mut picker = CategoryPicker::new(TxType::Out, vec![category(10, "Groceries", TxType::Out)]);

    picker.search = "groceries".into();
    assert!(!picker.can_quick_create());
    picker.search = "Pets".into();
    assert!(picker.can_quick_create());

    let created = picker.quick_create(&mut api).unwrap();
    assert_eq!(created.id, 42);
    assert_eq!(picker.selected().map(|c| c.id), Some(42));
    let body = mock.last_body(Method::Post, "finance/categories/").unwrap();
    assert_eq!(body, json!({"name": "Pets", "type": "OUT", "color": EXPENSE_COLOR}));
}

#[test]
fn quick_create_account_opens_with_zero_balance() {
    let mock = MockTransport::new();
    mock.on(
        Method::Post,
        "finance/accounts/",
        201,
        json!({"id": 9, "name": "Travel", "type": "DEBIT", "balance": "0", "color": "#0ea5e9", "is_active": true}),
    );
    let mut api = api_with(&mock);
    let mut f = form();
    f.account.search = "Travel".into();
    f.account.quick_create(&mut api).unwrap();
    assert_eq!(f.account.selected_id(), Some(9));
    let body = mock.last_body(Method::Post, "finance/accounts/").unwrap();
    assert_eq!(body["type"], "DEBIT");
    assert_eq!(body["balance"], "0");
}

fn debt(remaining: i64) -> Debt {
    Debt {
        id: 3,
        name: "Loan".into(),
        description: None,
        r#type: DebtType::IOwe,
        total_amount: Decimal::new(100, 0),
        remaining_amount: Decimal::new(remaining, 0),
        due_date: None,
        is_settled: false,
    }
}

#[test]
fn overpaying_a_debt_is_rejected_locally() {
    let mock = MockTransport::new();
    let mut api = api_with(&mock);
    let mut f = DebtPaymentForm::new(debt(100));
    f.amount = "150".into();
    assert!(!f.can_submit());
    assert!(f.submit(&mut api).is_err());
    assert!(mock.requests().is_empty());
}

#[test]
fn paying_the_full_remainder_settles() {
    let mock = MockTransport::new();
    mock.on(
        Method::Put,
        "finance/debts/3/",
        200,
        json!({
            "id": 3, "name": "Loan", "type": "I_OWE", "total_amount": "100",
            "remaining_amount": "0", "is_settled": true
        }),
    );
    let mut api = api_with(&mock);
    let mut f = DebtPaymentForm::new(debt(100));
    f.amount = "100".into();

    let plan = f.preview().unwrap();
    assert!(plan.settles);
    assert_eq!(plan.remaining_after, Decimal::ZERO);

    let updated = f.submit(&mut api).unwrap();
    assert!(updated.is_settled);
    assert!(f.debt().is_settled);
    assert_eq!(
        mock.last_body(Method::Put, "finance/debts/3/"),
        Some(json!({"remaining_amount": "0", "is_settled": true}))
    );
    assert_eq!(mock.count(Method::Post, "finance/debts/3/pay/"), 0);
    let mut again = DebtPaymentForm::new(updated);
    again.amount = "1".into();
    assert!(matches!(again.preview(), Err(ApiError::Form(m)) if m.contains("settled")));
}

#[test]
fn add_funds_is_capped_by_available_balance() {
    let goal = SavingsGoal {
        id: 4,
        name: "Trip".into(),
        target_amount: Decimal::new(1000, 0),
        current_amount: Decimal::new(200, 0),
        target_date: None,
        color: "#97A97C".into(),
        is_completed: false,
    };
    let mock = MockTransport::new();
    mock.on(
        Method::Post,
        "finance/savings/4/add_funds/",
        200,
        json!({"id": 4, "name": "Trip", "target_amount": "1000", "current_amount": "250"}),
    );
    let mut api = api_with(&mock);
    let mut f = AddFundsForm::new(&goal, Decimal::new(60, 0));

    f.amount = "61".into();
    assert!(!f.can_submit());

    f.amount = "50".into();
    f.account = Some(2);
    let updated = f.submit(&mut api).unwrap();
    assert_eq!(updated.current_amount, Decimal::new(250, 0));
    assert_eq!(f.available(), Decimal::new(10, 0));
    assert_eq!(
        mock.last_body(Method::Post, "finance/savings/4/add_funds/"),
        Some(json!({"amount": "50", "account_id": 2}))
    );
}

#[test]
fn recurring_due_day_must_be_a_calendar_day() {
    let mut f = RecurringForm::new(vec![account(1, "Checking", true)], vec![]);
    f.name = "Rent".into();
    f.amount = "900".into();
    f.due_day = "32".into();
    assert!(f.validate().is_err());
    f.due_day = "0".into();
    assert!(f.validate().is_err());
    f.due_day = "31".into();
    let payload = f.validate().unwrap();
    assert_eq!(payload.due_day, 31);
    assert_eq!(payload.category, None);
}

#[test]
fn account_form_checks_balance_and_color() {
    let mut f = AccountForm::new();
    f.name = "Savings".into();
    assert_eq!(f.validate().unwrap().balance, Decimal::ZERO);
    f.balance = "-5".into();
    assert!(f.validate().is_err());
    f.balance = "5".into();
    f.color = "blue".into();
    assert!(f.validate().is_err());
}

#[test]
fn failed_login_reports_and_clears_password() {
    let mock = MockTransport::new();
    mock.on(Method::Post, "auth/login/", 401, json!({"detail": "No active account"}));
    let mut api = api_with(&mock);
    let mut f = LoginForm::new();
    f.username = "ana".into();
    f.password = "wrong".into();

    assert!(f.submit(&mut api).is_err());
    assert_eq!(
        f.error.as_deref(),
        Some("Invalid credentials or connection problem.")
    );
    assert!(f.password.is_empty());
    assert_eq!(f.username, "ana");
    assert!(api.tokens().is_none());
}

#[test]
fn register_needs_an_email_address() {
    let mut f = RegisterForm::new();
    f.username = "ana".into();
    f.password = "pw".into();
    f.email = "ana.example.com".into();
    assert!(!f.can_submit());
    f.email = "ana@example.com".into();
    assert!(f.can_submit());
}

#[test]
fn partial_payment_writes_the_new_remainder() {
    let mock = MockTransport::new();
    mock.on(
        Method::Put,
        "finance/debts/3/",
        200,
        json!({
            "id": 3, "name": "Loan", "type": "I_OWE", "total_amount": "100",
            "remaining_amount": "60", "is_settled": false
        }),
    );
    let mut api = api_with(&mock);
    let mut f = DebtPaymentForm::new(debt(100));
    f.amount = "40".into();

    let updated = f.submit(&mut api).unwrap();
    assert_eq!(updated.remaining_amount, Decimal::new(60, 0));
    assert!(f.amount.is_empty());
    assert_eq!(
        mock.last_body(Method::Put, "finance/debts/3/"),
        Some(json!({"remaining_amount": "60", "is_settled": false}))
    );
}
