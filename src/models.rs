// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let up = s.trim().to_uppercase().replace('-', "_");
                match up.as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(format!("Invalid {} '{}'", stringify!($name), s)),
                }
            }
        }
    };
}

wire_enum!(AccountType {
    Cash => "CASH",
    Debit => "DEBIT",
    Credit => "CREDIT",
    Savings => "SAVINGS",
});

wire_enum!(TxType {
    In => "IN",
    Out => "OUT",
});

wire_enum!(PaymentMethod {
    Cash => "CASH",
    Card => "CARD",
    Transfer => "TRANSFER",
});

wire_enum!(DebtType {
    OwedToMe => "OWED_TO_ME",
    IOwe => "I_OWE",
});

impl AccountType {
    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Cash => "Cash",
            AccountType::Debit => "Debit/Bank",
            AccountType::Credit => "Credit",
            AccountType::Savings => "Savings/Investment",
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub r#type: AccountType,
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub color: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_balance: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub r#type: TxType,
    #[serde(default)]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub r#type: TxType,
    pub date: NaiveDate,
    #[serde(default)]
    pub account: Option<i64>,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_color: Option<String>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub r#type: DebtType,
    pub total_amount: Decimal,
    pub remaining_amount: Decimal,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_settled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub account: Option<i64>,
    pub due_day: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub last_paid_date: Option<NaiveDate>,
}

/// Backend-computed running balance for one account. `None` when the
/// backend sent null; callers fall back to the stored balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub id: i64,
    #[serde(default)]
    pub calculated_balance: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryExpense {
    #[serde(rename = "category__name", default)]
    pub category_name: Option<String>,
    #[serde(rename = "category__color", default)]
    pub category_color: Option<String>,
    pub total: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    pub balance: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub expenses_by_category: Vec<CategoryExpense>,
    pub accounts: Vec<AccountBalance>,
    pub upcoming_recurring: Option<Decimal>,
}

impl Summary {
    pub fn calculated_balance_for(&self, account_id: i64) -> Option<Decimal> {
        self.accounts
            .iter()
            .find(|a| a.id == account_id)
            .and_then(|a| a.calculated_balance)
    }
}

// Write payloads. Amounts serialize as decimal strings.

#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub r#type: TxType,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    pub r#type: TxType,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub account: i64,
    pub category: i64,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferRequest {
    pub from_account: i64,
    pub to_account: i64,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl TransactionFilter {
    pub fn month(month: u32, year: i32) -> Self {
        Self {
            month: Some(month),
            year: Some(year),
        }
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(m) = self.month {
            out.push(("month".to_string(), m.to_string()));
        }
        if let Some(y) = self.year {
            out.push(("year".to_string(), y.to_string()));
        }
        out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSavingsGoal {
    pub name: String,
    pub target_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddFunds {
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewDebt {
    pub name: String,
    pub r#type: DebtType,
    pub total_amount: Decimal,
    pub remaining_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DebtUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_settled: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub name: String,
    pub r#type: AccountType,
    pub balance: Decimal,
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<AccountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewRecurringExpense {
    pub name: String,
    pub amount: Decimal,
    pub due_day: u32,
    pub category: Option<i64>,
    pub account: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PayRecurring {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}
