// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use serde_json::Value;

use super::pickers::{AccountPicker, CategoryPicker};
use super::{InFlight, optional_text, positive_amount, required_date};
use crate::api::FinanceApi;
use crate::error::{ApiError, Result};
use crate::models::{
    Account, Category, NewTransaction, PaymentMethod, Transaction, TransferRequest, TxType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxKind {
    In,
    Out,
    Transfer,
}

impl TxKind {
    fn category_type(&self) -> Option<TxType> {
        match self {
            TxKind::In => Some(TxType::In),
            TxKind::Out => Some(TxType::Out),
            TxKind::Transfer => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum TxPayload {
    Entry(NewTransaction),
    Transfer(TransferRequest),
}

#[derive(Debug, Clone)]
pub enum Submitted {
    Transaction(Transaction),
    Transfer(Value),
}

/// Income / expense / transfer entry. IN and OUT need an account and a
/// category of the same type; TRANSFER needs a source and a destination.
#[derive(Debug, Clone)]
pub struct TransactionForm {
    kind: TxKind,
    today: NaiveDate,
    pub amount: String,
    pub date: String,
    pub description: String,
    pub payment_method: PaymentMethod,
    pub account: AccountPicker,
    pub to_account: AccountPicker,
    pub category: CategoryPicker,
    in_flight: InFlight,
}

impl TransactionForm {
    pub fn new(today: NaiveDate, accounts: Vec<Account>, categories: Vec<Category>) -> Self {
        Self {
            kind: TxKind::Out,
            today,
            amount: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            description: String::new(),
            payment_method: PaymentMethod::Cash,
            account: AccountPicker::new(accounts.clone()),
            to_account: AccountPicker::new(accounts),
            category: CategoryPicker::new(TxType::Out, categories),
            in_flight: InFlight::default(),
        }
    }

    pub fn load(api: &mut FinanceApi, today: NaiveDate) -> Result<Self> {
        let accounts = api.accounts()?;
        let categories = api.categories()?;
        Ok(Self::new(today, accounts, categories))
    }

    pub fn kind(&self) -> TxKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: TxKind) {
        self.kind = kind;
        if let Some(t) = kind.category_type() {
            self.category.set_kind(t);
        } else {
            self.category.clear();
        }
    }

    pub fn in_flight(&mut self) -> &mut InFlight {
        &mut self.in_flight
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_pending()
    }

    /// Mirrors the submit button: enabled only when every field the active
    /// type requires is filled and nothing is in flight.
    pub fn can_submit(&self) -> bool {
        !self.is_pending() && self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<TxPayload> {
        let amount = positive_amount(&self.amount, "Amount")?;
        let date = required_date(&self.date)?;
        let account = self
            .account
            .selected_id()
            .ok_or_else(|| ApiError::form("Account is required"))?;
        let description = optional_text(&self.description);

        match self.kind.category_type() {
            None => {
                let to_account = self
                    .to_account
                    .selected_id()
                    .ok_or_else(|| ApiError::form("Destination account is required"))?;
                if to_account == account {
                    return Err(ApiError::form(
                        "Source and destination accounts must differ",
                    ));
                }
                Ok(TxPayload::Transfer(TransferRequest {
                    from_account: account,
                    to_account,
                    amount,
                    date,
                    description,
                }))
            }
            Some(tx_type) => {
                let category = self
                    .category
                    .selected()
                    .ok_or_else(|| ApiError::form("Category is required"))?;
                if category.r#type != tx_type {
                    return Err(ApiError::form(format!(
                        "Category '{}' is {} but the transaction is {}",
                        category.name, category.r#type, tx_type
                    )));
                }
                Ok(TxPayload::Entry(NewTransaction {
                    r#type: tx_type,
                    amount,
                    date,
                    account,
                    category: category.id,
                    payment_method: self.payment_method,
                    description,
                }))
            }
        }
    }

    pub fn submit(&mut self, api: &mut FinanceApi) -> Result<Submitted> {
        if self.is_pending() {
            return Err(ApiError::form("A submission is already in progress"));
        }
        let payload = self.validate()?;
        let out = self.in_flight.run(|| match &payload {
            TxPayload::Entry(tx) => api.create_transaction(tx).map(Submitted::Transaction),
            TxPayload::Transfer(t) => api.create_transfer(t).map(Submitted::Transfer),
        })?;
        self.reset();
        Ok(out)
    }

    pub fn reset(&mut self) {
        self.amount.clear();
        self.description.clear();
        self.date = self.today.format("%Y-%m-%d").to_string();
        self.payment_method = PaymentMethod::Cash;
        self.account.clear();
        self.to_account.clear();
        self.category.clear();
    }
}
