// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived balances: merges stored account balances with the backend's
//! running balances and rolls them up by account type.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::models::{Account, AccountType, Debt, DebtType, SavingsGoal, Summary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedAccount {
    #[serde(flatten)]
    pub account: Account,
    pub display_balance: Decimal,
}

/// Display balance is the summary's running balance when the summary has an
/// entry for the account, otherwise the stored balance.
pub fn enrich_accounts(accounts: &[Account], summary: Option<&Summary>) -> Vec<EnrichedAccount> {
    accounts
        .iter()
        .map(|acc| {
            let display_balance = summary
                .and_then(|s| s.calculated_balance_for(acc.id))
                .unwrap_or(acc.balance);
            let mut account = acc.clone();
            account.calculated_balance = Some(display_balance);
            EnrichedAccount {
                account,
                display_balance,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BalanceTotals {
    pub cash: Decimal,
    pub bank: Decimal,
    pub credit: Decimal,
    pub savings: Decimal,
    pub net_worth: Decimal,
}

impl BalanceTotals {
    pub fn from_accounts(accounts: &[EnrichedAccount]) -> Self {
        let sum = |t: AccountType| -> Decimal {
            accounts
                .iter()
                .filter(|a| a.account.r#type == t)
                .map(|a| a.display_balance)
                .sum()
        };
        let cash = sum(AccountType::Cash);
        let bank = sum(AccountType::Debit);
        let credit = sum(AccountType::Credit);
        let savings = sum(AccountType::Savings);
        Self {
            cash,
            bank,
            credit,
            savings,
            net_worth: cash + bank + savings - credit,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DebtTotals {
    pub owed_to_me: Decimal,
    pub i_owe: Decimal,
}

/// Outstanding amounts of unsettled debts, per direction.
pub fn debt_totals(debts: &[Debt]) -> DebtTotals {
    let mut out = DebtTotals::default();
    for d in debts.iter().filter(|d| !d.is_settled) {
        match d.r#type {
            DebtType::OwedToMe => out.owed_to_me += d.remaining_amount,
            DebtType::IOwe => out.i_owe += d.remaining_amount,
        }
    }
    out
}

pub fn total_saved(goals: &[SavingsGoal]) -> Decimal {
    goals.iter().map(|g| g.current_amount).sum()
}

/// Percent of target reached, clamped to 0..=100.
pub fn goal_progress(goal: &SavingsGoal) -> Decimal {
    if goal.target_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let pct = goal.current_amount / goal.target_amount * Decimal::ONE_HUNDRED;
    pct.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DebtPaymentPlan {
    pub payment: Decimal,
    pub remaining_after: Decimal,
    pub settles: bool,
}

/// Checks a payment against what is still owed and previews the result.
pub fn plan_debt_payment(debt: &Debt, payment: Decimal) -> Result<DebtPaymentPlan> {
    if debt.is_settled {
        return Err(ApiError::form(format!("'{}' is already settled", debt.name)));
    }
    if payment <= Decimal::ZERO {
        return Err(ApiError::form("Payment must be greater than zero"));
    }
    if payment > debt.remaining_amount {
        return Err(ApiError::form(format!(
            "Payment {} exceeds remaining {}",
            payment, debt.remaining_amount
        )));
    }
    let remaining_after = debt.remaining_amount - payment;
    Ok(DebtPaymentPlan {
        payment,
        remaining_after,
        settles: remaining_after <= Decimal::ZERO,
    })
}
