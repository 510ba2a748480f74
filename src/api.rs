// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Typed fetch/mutate calls per backend resource.
//!
//! Reads go through the [`QueryCache`]; writes return the server's canonical
//! record and invalidate whatever [`Mutation::invalidates`] lists. No call
//! here does cross-resource bookkeeping; the backend owns that.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::balances::DebtPaymentPlan;
use crate::cache::{Mutation, QueryCache, QueryKey, Resource};
use crate::error::Result;
use crate::http::{ApiClient, Method};
use crate::models::*;
use crate::state::AuthTokens;

pub struct FinanceApi {
    client: ApiClient,
    cache: QueryCache,
}

impl FinanceApi {
    pub fn new(client: ApiClient, cache: QueryCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn tokens(&self) -> Option<&AuthTokens> {
        self.client.tokens()
    }

    fn query<T: DeserializeOwned>(
        &mut self,
        resource: Resource,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<T> {
        let key = QueryKey::with_params(resource, params.clone());
        if let Some(v) = self.cache.get(&key) {
            return Ok(serde_json::from_value(v.clone())?);
        }
        let v = self.client.get(path, params)?;
        let out = serde_json::from_value(v.clone())?;
        self.cache.put(key, v);
        Ok(out)
    }

    fn mutate<B: Serialize, T: DeserializeOwned>(
        &mut self,
        mutation: Mutation,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let body = body.map(serde_json::to_value).transpose()?;
        let v = self.client.request(method, path, Vec::new(), body)?;
        self.cache.apply(mutation);
        info!(?mutation, path, "mutation applied");
        Ok(serde_json::from_value(v)?)
    }

    // Auth

    pub fn login(&mut self, username: &str, password: &str) -> Result<AuthTokens> {
        let creds = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let tokens: AuthTokens =
            self.mutate(Mutation::Login, Method::Post, "auth/login/", Some(&creds))?;
        self.client.set_tokens(tokens.clone());
        Ok(tokens)
    }

    pub fn register(&mut self, username: &str, email: &str, password: &str) -> Result<Value> {
        let reg = Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let body = serde_json::to_value(&reg)?;
        self.client.post("auth/register/", body)
    }

    pub fn logout(&mut self) {
        self.client.clear_tokens();
        self.cache.apply(Mutation::Logout);
    }

    // Categories

    pub fn categories(&mut self) -> Result<Vec<Category>> {
        self.query(Resource::Categories, "finance/categories/", Vec::new())
    }

    pub fn create_category(&mut self, category: &NewCategory) -> Result<Category> {
        self.mutate(
            Mutation::CreateCategory,
            Method::Post,
            "finance/categories/",
            Some(category),
        )
    }

    // Transactions

    pub fn transactions(&mut self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        self.query(
            Resource::Transactions,
            "finance/transactions/",
            filter.to_params(),
        )
    }

    pub fn create_transaction(&mut self, tx: &NewTransaction) -> Result<Transaction> {
        self.mutate(
            Mutation::CreateTransaction,
            Method::Post,
            "finance/transactions/",
            Some(tx),
        )
    }

    pub fn delete_transaction(&mut self, id: i64) -> Result<()> {
        let _: Value = self.mutate::<(), _>(
            Mutation::DeleteTransaction,
            Method::Delete,
            &format!("finance/transactions/{id}/"),
            None,
        )?;
        Ok(())
    }

    pub fn create_transfer(&mut self, transfer: &TransferRequest) -> Result<Value> {
        self.mutate(
            Mutation::CreateTransfer,
            Method::Post,
            "finance/transactions/transfer/",
            Some(transfer),
        )
    }

    pub fn summary(&mut self, month: Option<u32>, year: Option<i32>) -> Result<Summary> {
        let params = TransactionFilter { month, year }.to_params();
        self.query(Resource::Summary, "finance/transactions/summary/", params)
    }

    // Savings goals

    pub fn savings_goals(&mut self) -> Result<Vec<SavingsGoal>> {
        self.query(Resource::Savings, "finance/savings/", Vec::new())
    }

    pub fn create_savings_goal(&mut self, goal: &NewSavingsGoal) -> Result<SavingsGoal> {
        self.mutate(
            Mutation::CreateSavingsGoal,
            Method::Post,
            "finance/savings/",
            Some(goal),
        )
    }

    pub fn add_funds(
        &mut self,
        id: i64,
        amount: Decimal,
        account_id: Option<i64>,
    ) -> Result<SavingsGoal> {
        self.mutate(
            Mutation::AddFunds,
            Method::Post,
            &format!("finance/savings/{id}/add_funds/"),
            Some(&AddFunds { amount, account_id }),
        )
    }

    // Debts

    pub fn debts(&mut self) -> Result<Vec<Debt>> {
        self.query(Resource::Debts, "finance/debts/", Vec::new())
    }

    pub fn create_debt(&mut self, debt: &NewDebt) -> Result<Debt> {
        self.mutate(Mutation::CreateDebt, Method::Post, "finance/debts/", Some(debt))
    }

    pub fn update_debt(&mut self, id: i64, update: &DebtUpdate) -> Result<Debt> {
        self.mutate(
            Mutation::UpdateDebt,
            Method::Put,
            &format!("finance/debts/{id}/"),
            Some(update),
        )
    }

    /// Writes the planned outcome of a payment: the new `remaining_amount`
    /// and whether the debt is now settled. The write is absolute, so a
    /// concurrent payment from another client is overwritten.
    pub fn pay_debt(&mut self, id: i64, plan: &DebtPaymentPlan) -> Result<Debt> {
        let update = DebtUpdate {
            remaining_amount: Some(plan.remaining_after),
            is_settled: Some(plan.settles),
            ..DebtUpdate::default()
        };
        self.mutate(
            Mutation::PayDebt,
            Method::Put,
            &format!("finance/debts/{id}/"),
            Some(&update),
        )
    }

    pub fn delete_debt(&mut self, id: i64) -> Result<()> {
        let _: Value = self.mutate::<(), _>(
            Mutation::DeleteDebt,
            Method::Delete,
            &format!("finance/debts/{id}/"),
            None,
        )?;
        Ok(())
    }

    // Accounts

    pub fn accounts(&mut self) -> Result<Vec<Account>> {
        self.query(Resource::Accounts, "finance/accounts/", Vec::new())
    }

    pub fn create_account(&mut self, account: &NewAccount) -> Result<Account> {
        self.mutate(
            Mutation::CreateAccount,
            Method::Post,
            "finance/accounts/",
            Some(account),
        )
    }

    pub fn update_account(&mut self, id: i64, update: &AccountUpdate) -> Result<Account> {
        self.mutate(
            Mutation::UpdateAccount,
            Method::Put,
            &format!("finance/accounts/{id}/"),
            Some(update),
        )
    }

    // Recurring expenses

    pub fn recurring_expenses(&mut self) -> Result<Vec<RecurringExpense>> {
        self.query(Resource::Recurring, "finance/recurring/", Vec::new())
    }

    pub fn create_recurring(&mut self, expense: &NewRecurringExpense) -> Result<RecurringExpense> {
        self.mutate(
            Mutation::CreateRecurring,
            Method::Post,
            "finance/recurring/",
            Some(expense),
        )
    }

    pub fn delete_recurring(&mut self, id: i64) -> Result<()> {
        let _: Value = self.mutate::<(), _>(
            Mutation::DeleteRecurring,
            Method::Delete,
            &format!("finance/recurring/{id}/"),
            None,
        )?;
        Ok(())
    }

    pub fn pay_recurring(
        &mut self,
        id: i64,
        date: Option<NaiveDate>,
        account_id: Option<i64>,
    ) -> Result<RecurringExpense> {
        self.mutate(
            Mutation::PayRecurring,
            Method::Post,
            &format!("finance/recurring/{id}/pay/"),
            Some(&PayRecurring { date, account_id }),
        )
    }
}
