// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::RecurringExpense;

/// Days ahead of the due day that count as "due soon".
pub const DUE_SOON_DAYS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    Paid,
    PastDue,
    DueSoon,
    Pending,
}

impl DueStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DueStatus::Paid => "Paid",
            DueStatus::PastDue => "Past due",
            DueStatus::DueSoon => "Due soon",
            DueStatus::Pending => "Pending",
        }
    }
}

pub fn is_paid_this_month(expense: &RecurringExpense, today: NaiveDate) -> bool {
    expense
        .last_paid_date
        .is_some_and(|d| d.month() == today.month() && d.year() == today.year())
}

pub fn classify(expense: &RecurringExpense, today: NaiveDate) -> DueStatus {
    if is_paid_this_month(expense, today) {
        return DueStatus::Paid;
    }
    let day = today.day();
    if expense.due_day < day {
        DueStatus::PastDue
    } else if expense.due_day - day <= DUE_SOON_DAYS {
        DueStatus::DueSoon
    } else {
        DueStatus::Pending
    }
}
