// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Search-and-select fields with inline creation. When the search text
//! matches nothing exactly, the picker can create the record and selects
//! the new id straight away.

use rust_decimal::Decimal;
use tracing::info;

use crate::api::FinanceApi;
use crate::error::{ApiError, Result};
use crate::models::{Account, AccountType, Category, NewAccount, NewCategory, TxType};

pub const INCOME_COLOR: &str = "#97A97C";
pub const EXPENSE_COLOR: &str = "#87986A";
pub const ACCOUNT_COLOR: &str = "#0ea5e9";

fn matches_search(name: &str, search: &str) -> bool {
    name.to_lowercase().contains(&search.trim().to_lowercase())
}

#[derive(Debug, Clone)]
pub struct CategoryPicker {
    kind: TxType,
    pub search: String,
    selected: Option<i64>,
    categories: Vec<Category>,
}

impl CategoryPicker {
    pub fn new(kind: TxType, categories: Vec<Category>) -> Self {
        Self {
            kind,
            search: String::new(),
            selected: None,
            categories,
        }
    }

    pub fn kind(&self) -> TxType {
        self.kind
    }

    /// Switching type drops the selection; categories never cross types.
    pub fn set_kind(&mut self, kind: TxType) {
        self.kind = kind;
        self.selected = None;
        self.search.clear();
    }

    pub fn options(&self) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.r#type == self.kind && matches_search(&c.name, &self.search))
            .collect()
    }

    pub fn exact_match(&self) -> Option<&Category> {
        let needle = self.search.trim();
        self.options()
            .into_iter()
            .find(|c| c.name.eq_ignore_ascii_case(needle))
    }

    pub fn can_quick_create(&self) -> bool {
        !self.search.trim().is_empty() && self.exact_match().is_none()
    }

    pub fn select(&mut self, id: i64) -> Result<()> {
        match self.categories.iter().find(|c| c.id == id) {
            Some(c) if c.r#type == self.kind => {
                self.selected = Some(id);
                self.search.clear();
                Ok(())
            }
            Some(c) => Err(ApiError::form(format!(
                "Category '{}' is {} but the transaction is {}",
                c.name, c.r#type, self.kind
            ))),
            None => Err(ApiError::form(format!("Unknown category id {}", id))),
        }
    }

    pub fn selected(&self) -> Option<&Category> {
        self.selected
            .and_then(|id| self.categories.iter().find(|c| c.id == id))
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.search.clear();
    }

    pub fn quick_create(&mut self, api: &mut FinanceApi) -> Result<Category> {
        if !self.can_quick_create() {
            return Err(ApiError::form("Type a new category name to create it"));
        }
        let color = match self.kind {
            TxType::In => INCOME_COLOR,
            TxType::Out => EXPENSE_COLOR,
        };
        let created = api.create_category(&NewCategory {
            name: self.search.trim().to_string(),
            r#type: self.kind,
            color: color.to_string(),
        })?;
        info!(id = created.id, name = %created.name, "category created inline");
        self.categories.push(created.clone());
        self.selected = Some(created.id);
        self.search.clear();
        Ok(created)
    }
}

#[derive(Debug, Clone)]
pub struct AccountPicker {
    pub search: String,
    selected: Option<i64>,
    accounts: Vec<Account>,
}

impl AccountPicker {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            search: String::new(),
            selected: None,
            accounts,
        }
    }

    pub fn options(&self) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|a| a.is_active && matches_search(&a.name, &self.search))
            .collect()
    }

    pub fn exact_match(&self) -> Option<&Account> {
        let needle = self.search.trim();
        self.options()
            .into_iter()
            .find(|a| a.name.eq_ignore_ascii_case(needle))
    }

    pub fn can_quick_create(&self) -> bool {
        !self.search.trim().is_empty() && self.exact_match().is_none()
    }

    pub fn select(&mut self, id: i64) -> Result<()> {
        match self.accounts.iter().find(|a| a.id == id) {
            Some(a) if a.is_active => {
                self.selected = Some(id);
                self.search.clear();
                Ok(())
            }
            Some(a) => Err(ApiError::form(format!("Account '{}' is archived", a.name))),
            None => Err(ApiError::form(format!("Unknown account id {}", id))),
        }
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.search.clear();
    }

    pub fn quick_create(&mut self, api: &mut FinanceApi) -> Result<Account> {
        if !self.can_quick_create() {
            return Err(ApiError::form("Type a new account name to create it"));
        }
        let created = api.create_account(&NewAccount {
            name: self.search.trim().to_string(),
            r#type: AccountType::Debit,
            balance: Decimal::ZERO,
            color: ACCOUNT_COLOR.to_string(),
        })?;
        info!(id = created.id, name = %created.name, "account created inline");
        self.accounts.push(created.clone());
        self.selected = Some(created.id);
        self.search.clear();
        Ok(created)
    }
}
