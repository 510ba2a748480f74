// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::pickers::{AccountPicker, CategoryPicker};
use super::{InFlight, positive_amount, required};
use crate::api::FinanceApi;
use crate::error::{ApiError, Result};
use crate::models::{Account, Category, NewRecurringExpense, RecurringExpense, TxType};

#[derive(Debug, Clone)]
pub struct RecurringForm {
    pub name: String,
    pub amount: String,
    pub due_day: String,
    pub category: CategoryPicker,
    pub account: AccountPicker,
    in_flight: InFlight,
}

impl RecurringForm {
    pub fn new(accounts: Vec<Account>, categories: Vec<Category>) -> Self {
        Self {
            name: String::new(),
            amount: String::new(),
            due_day: "1".to_string(),
            category: CategoryPicker::new(TxType::Out, categories),
            account: AccountPicker::new(accounts),
            in_flight: InFlight::default(),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight.is_pending() && self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<NewRecurringExpense> {
        let name = required(&self.name, "Name")?;
        let amount = positive_amount(&self.amount, "Amount")?;
        let raw_day = required(&self.due_day, "Due day")?;
        let due_day: u32 = raw_day
            .parse()
            .map_err(|_| ApiError::form(format!("Due day '{}' is not a number", raw_day)))?;
        if !(1..=31).contains(&due_day) {
            return Err(ApiError::form("Due day must be between 1 and 31"));
        }
        Ok(NewRecurringExpense {
            name: name.to_string(),
            amount,
            due_day,
            category: self.category.selected().map(|c| c.id),
            account: self.account.selected_id(),
        })
    }

    pub fn submit(&mut self, api: &mut FinanceApi) -> Result<RecurringExpense> {
        let payload = self.validate()?;
        let expense = self.in_flight.run(|| api.create_recurring(&payload))?;
        self.name.clear();
        self.amount.clear();
        self.due_day = "1".to_string();
        self.category.clear();
        self.account.clear();
        Ok(expense)
    }
}
