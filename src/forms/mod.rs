// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Input forms. Each one owns its raw input strings, validates them into a
//! backend payload, refuses to submit while invalid or while a previous
//! submission is still in flight, and clears itself once the backend
//! accepts the write. The returned record is the caller's signal to close.

pub mod account;
pub mod auth;
pub mod debt;
pub mod pickers;
pub mod recurring;
pub mod savings;
pub mod transaction;

pub use account::AccountForm;
pub use auth::{LoginForm, RegisterForm};
pub use debt::{DebtForm, DebtPaymentForm};
pub use pickers::{AccountPicker, CategoryPicker};
pub use recurring::RecurringForm;
pub use savings::{AddFundsForm, SavingsGoalForm};
pub use transaction::{Submitted, TransactionForm, TxKind};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{ApiError, Result};

/// Tracks whether a submission is outstanding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InFlight(bool);

impl InFlight {
    pub fn is_pending(&self) -> bool {
        self.0
    }

    pub fn begin(&mut self) -> Result<()> {
        if self.0 {
            return Err(ApiError::form("A submission is already in progress"));
        }
        self.0 = true;
        Ok(())
    }

    pub fn end(&mut self) {
        self.0 = false;
    }

    /// Runs `f` with the flag raised, lowering it whatever the outcome.
    pub fn run<T>(&mut self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        self.begin()?;
        let out = f();
        self.end();
        out
    }
}

pub(crate) fn required<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ApiError::form(format!("{} is required", field)));
    }
    Ok(v)
}

pub(crate) fn positive_amount(value: &str, field: &str) -> Result<Decimal> {
    let raw = required(value, field)?;
    let amount: Decimal = raw
        .parse()
        .map_err(|_| ApiError::form(format!("{} '{}' is not a number", field, raw)))?;
    if amount <= Decimal::ZERO {
        return Err(ApiError::form(format!("{} must be greater than zero", field)));
    }
    Ok(amount)
}

pub(crate) fn required_date(value: &str) -> Result<NaiveDate> {
    let raw = required(value, "Date")?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ApiError::form(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))
}

pub(crate) fn optional_text(value: &str) -> Option<String> {
    let v = value.trim();
    (!v.is_empty()).then(|| v.to_string())
}
