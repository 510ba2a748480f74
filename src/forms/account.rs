// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use super::pickers::ACCOUNT_COLOR;
use super::{InFlight, required};
use crate::api::FinanceApi;
use crate::error::{ApiError, Result};
use crate::models::{Account, AccountType, NewAccount};
use crate::utils::is_hex_color;

#[derive(Debug, Clone)]
pub struct AccountForm {
    pub name: String,
    pub kind: AccountType,
    pub balance: String,
    pub color: String,
    in_flight: InFlight,
}

impl Default for AccountForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: AccountType::Debit,
            balance: String::new(),
            color: ACCOUNT_COLOR.to_string(),
            in_flight: InFlight::default(),
        }
    }
}

impl AccountForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight.is_pending() && self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<NewAccount> {
        let name = required(&self.name, "Name")?;
        let balance = match self.balance.trim() {
            "" => Decimal::ZERO,
            raw => raw
                .parse::<Decimal>()
                .map_err(|_| ApiError::form(format!("Balance '{}' is not a number", raw)))?,
        };
        if balance < Decimal::ZERO {
            return Err(ApiError::form("Opening balance cannot be negative"));
        }
        if !is_hex_color(&self.color) {
            return Err(ApiError::form(format!(
                "Color '{}' must look like #RRGGBB",
                self.color
            )));
        }
        Ok(NewAccount {
            name: name.to_string(),
            r#type: self.kind,
            balance,
            color: self.color.clone(),
        })
    }

    pub fn submit(&mut self, api: &mut FinanceApi) -> Result<Account> {
        let payload = self.validate()?;
        let account = self.in_flight.run(|| api.create_account(&payload))?;
        *self = Self::default();
        Ok(account)
    }
}
