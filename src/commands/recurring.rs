// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::commands::{flags, today};
use crate::context::AppContext;
use crate::forms::RecurringForm;
use crate::models::RecurringExpense;
use crate::recurring::{DueStatus, classify};
use crate::utils::{id_for_account, id_for_category, maybe_print_json, parse_date, pretty_table};

#[derive(Serialize)]
struct RecurringRow<'a> {
    #[serde(flatten)]
    expense: &'a RecurringExpense,
    status: DueStatus,
}

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let (json_flag, jsonl_flag) = flags(sub);
            let today = today();
            let expenses = ctx.api.recurring_expenses()?;
            let data: Vec<RecurringRow> = expenses
                .iter()
                .map(|e| RecurringRow {
                    expense: e,
                    status: classify(e, today),
                })
                .collect();
            if maybe_print_json(json_flag, jsonl_flag, &data)? {
                return Ok(());
            }
            let rows = data
                .iter()
                .map(|r| {
                    vec![
                        r.expense.id.to_string(),
                        r.expense.name.clone(),
                        ctx.money(&r.expense.amount),
                        r.expense.due_day.to_string(),
                        r.status.label().to_string(),
                        r.expense
                            .last_paid_date
                            .map(|d| d.to_string())
                            .unwrap_or_default(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    ctx.theme(),
                    &["Id", "Name", "Amount", "Due day", "Status", "Last paid"],
                    rows,
                )
            );
        }
        Some(("add", sub)) => {
            let accounts = ctx.api.accounts()?;
            let categories = ctx.api.categories()?;
            let mut form = RecurringForm::new(accounts.clone(), categories.clone());
            form.name = sub.get_one::<String>("name").cloned().unwrap_or_default();
            form.amount = sub.get_one::<String>("amount").cloned().unwrap_or_default();
            if let Some(d) = sub.get_one::<String>("due-day") {
                form.due_day = d.clone();
            }
            if let Some(key) = sub.get_one::<String>("category") {
                form.category.select(id_for_category(&categories, key)?)?;
            }
            if let Some(key) = sub.get_one::<String>("account") {
                form.account.select(id_for_account(&accounts, key)?)?;
            }
            let expense = form.submit(&mut ctx.api)?;
            println!(
                "Added recurring '{}' ({} on day {})",
                expense.name,
                ctx.money(&expense.amount),
                expense.due_day
            );
        }
        Some(("pay", sub)) => {
            let id = *sub.get_one::<i64>("id").ok_or_else(|| anyhow!("id is required"))?;
            let expense = ctx
                .api
                .recurring_expenses()?
                .into_iter()
                .find(|e| e.id == id)
                .ok_or_else(|| anyhow!("Recurring expense {} not found", id))?;
            let date = sub
                .get_one::<String>("date")
                .map(|d| parse_date(d))
                .transpose()?;
            let account = match sub.get_one::<String>("account") {
                Some(key) => Some(id_for_account(&ctx.api.accounts()?, key)?),
                None => expense.account,
            };
            let paid = ctx.api.pay_recurring(id, date, account)?;
            println!(
                "Paid '{}' ({})",
                paid.name,
                paid.last_paid_date
                    .or(date)
                    .unwrap_or_else(today)
            );
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").ok_or_else(|| anyhow!("id is required"))?;
            ctx.api.delete_recurring(id)?;
            println!("Deleted recurring expense {}", id);
        }
        _ => {}
    }
    Ok(())
}
