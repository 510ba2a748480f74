// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{InFlight, optional_text, positive_amount, required};
use crate::api::FinanceApi;
use crate::balances::{DebtPaymentPlan, plan_debt_payment};
use crate::error::Result;
use crate::models::{Debt, DebtType, NewDebt};

#[derive(Debug, Clone)]
pub struct DebtForm {
    pub name: String,
    pub kind: DebtType,
    pub amount: String,
    pub description: String,
    in_flight: InFlight,
}

impl Default for DebtForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: DebtType::IOwe,
            amount: String::new(),
            description: String::new(),
            in_flight: InFlight::default(),
        }
    }
}

impl DebtForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight.is_pending() && self.validate().is_ok()
    }

    /// A new debt starts with nothing paid: remaining equals total.
    pub fn validate(&self) -> Result<NewDebt> {
        let name = required(&self.name, "Name")?;
        let amount = positive_amount(&self.amount, "Amount")?;
        Ok(NewDebt {
            name: name.to_string(),
            r#type: self.kind,
            total_amount: amount,
            remaining_amount: amount,
            description: optional_text(&self.description),
            due_date: None,
        })
    }

    pub fn submit(&mut self, api: &mut FinanceApi) -> Result<Debt> {
        let payload = self.validate()?;
        let debt = self.in_flight.run(|| api.create_debt(&payload))?;
        *self = Self::default();
        Ok(debt)
    }
}

/// Records a payment against one debt. The amount is checked here against
/// the remaining balance, then sent to the backend as a relative payment.
#[derive(Debug, Clone)]
pub struct DebtPaymentForm {
    debt: Debt,
    pub amount: String,
    in_flight: InFlight,
}

impl DebtPaymentForm {
    pub fn new(debt: Debt) -> Self {
        Self {
            debt,
            amount: String::new(),
            in_flight: InFlight::default(),
        }
    }

    pub fn debt(&self) -> &Debt {
        &self.debt
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight.is_pending() && self.preview().is_ok()
    }

    pub fn preview(&self) -> Result<DebtPaymentPlan> {
        let amount = positive_amount(&self.amount, "Payment")?;
        plan_debt_payment(&self.debt, amount)
    }

    pub fn submit(&mut self, api: &mut FinanceApi) -> Result<Debt> {
        let plan = self.preview()?;
        let id = self.debt.id;
        let updated = self.in_flight.run(|| api.pay_debt(id, &plan))?;
        self.debt = updated.clone();
        self.amount.clear();
        Ok(updated)
    }
}
