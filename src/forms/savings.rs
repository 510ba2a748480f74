// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use super::{InFlight, optional_text, positive_amount, required, required_date};
use crate::api::FinanceApi;
use crate::error::{ApiError, Result};
use crate::models::{NewSavingsGoal, SavingsGoal};
use crate::utils::is_hex_color;

#[derive(Debug, Clone, Default)]
pub struct SavingsGoalForm {
    pub name: String,
    pub target: String,
    pub target_date: String,
    pub color: String,
    in_flight: InFlight,
}

impl SavingsGoalForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight.is_pending() && self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<NewSavingsGoal> {
        let name = required(&self.name, "Name")?;
        let target_amount = positive_amount(&self.target, "Target")?;
        let target_date = match optional_text(&self.target_date) {
            Some(raw) => Some(required_date(&raw)?),
            None => None,
        };
        let color = optional_text(&self.color);
        if let Some(c) = &color {
            if !is_hex_color(c) {
                return Err(ApiError::form(format!("Color '{}' must look like #RRGGBB", c)));
            }
        }
        Ok(NewSavingsGoal {
            name: name.to_string(),
            target_amount,
            target_date,
            color,
        })
    }

    pub fn submit(&mut self, api: &mut FinanceApi) -> Result<SavingsGoal> {
        let payload = self.validate()?;
        let goal = self.in_flight.run(|| api.create_savings_goal(&payload))?;
        *self = Self::default();
        Ok(goal)
    }
}

/// Moves money into a goal. The amount cannot exceed the balance still
/// available (summary balance); the backend books the matching expense.
#[derive(Debug, Clone)]
pub struct AddFundsForm {
    goal_id: i64,
    available: Decimal,
    pub amount: String,
    pub account: Option<i64>,
    in_flight: InFlight,
}

impl AddFundsForm {
    pub fn new(goal: &SavingsGoal, available: Decimal) -> Self {
        Self {
            goal_id: goal.id,
            available,
            amount: String::new(),
            account: None,
            in_flight: InFlight::default(),
        }
    }

    pub fn available(&self) -> Decimal {
        self.available
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight.is_pending() && self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<Decimal> {
        let amount = positive_amount(&self.amount, "Amount")?;
        if amount > self.available {
            return Err(ApiError::form(format!(
                "Amount {} exceeds available balance {}",
                amount, self.available
            )));
        }
        Ok(amount)
    }

    pub fn submit(&mut self, api: &mut FinanceApi) -> Result<SavingsGoal> {
        let amount = self.validate()?;
        let (id, account) = (self.goal_id, self.account);
        let goal = self.in_flight.run(|| api.add_funds(id, amount, account))?;
        self.available -= amount;
        self.amount.clear();
        Ok(goal)
    }
}
