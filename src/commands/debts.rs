// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::balances::debt_totals;
use crate::commands::flags;
use crate::context::AppContext;
use crate::forms::{DebtForm, DebtPaymentForm};
use crate::models::DebtType;
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let (json_flag, jsonl_flag) = flags(sub);
            let kind = sub
                .get_one::<String>("type")
                .map(|t| t.parse::<DebtType>())
                .transpose()
                .map_err(|e| anyhow!(e))?;
            let mut debts = ctx.api.debts()?;
            if let Some(k) = kind {
                debts.retain(|d| d.r#type == k);
            }
            if maybe_print_json(json_flag, jsonl_flag, &debts)? {
                return Ok(());
            }
            let rows = debts
                .iter()
                .map(|d| {
                    vec![
                        d.id.to_string(),
                        d.name.clone(),
                        d.r#type.to_string(),
                        ctx.money(&d.remaining_amount),
                        ctx.money(&d.total_amount),
                        if d.is_settled { "settled" } else { "open" }.to_string(),
                        d.description.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    ctx.theme(),
                    &["Id", "Name", "Type", "Remaining", "Total", "Status", "Note"],
                    rows,
                )
            );
            let totals = debt_totals(&debts);
            println!(
                "Owed to me: {}  I owe: {}",
                ctx.money(&totals.owed_to_me),
                ctx.money(&totals.i_owe)
            );
        }
        Some(("add", sub)) => {
            let mut form = DebtForm::new();
            form.name = sub.get_one::<String>("name").cloned().unwrap_or_default();
            if let Some(t) = sub.get_one::<String>("type") {
                form.kind = t.parse::<DebtType>().map_err(|e| anyhow!(e))?;
            }
            form.amount = sub.get_one::<String>("amount").cloned().unwrap_or_default();
            form.description = sub.get_one::<String>("description").cloned().unwrap_or_default();
            let debt = form.submit(&mut ctx.api)?;
            println!(
                "Added debt '{}' ({}, {})",
                debt.name,
                debt.r#type,
                ctx.money(&debt.total_amount)
            );
        }
        Some(("pay", sub)) => {
            let id = *sub.get_one::<i64>("id").ok_or_else(|| anyhow!("id is required"))?;
            let debt = ctx
                .api
                .debts()?
                .into_iter()
                .find(|d| d.id == id)
                .ok_or_else(|| anyhow!("Debt {} not found", id))?;
            let mut form = DebtPaymentForm::new(debt);
            form.amount = sub.get_one::<String>("amount").cloned().unwrap_or_default();
            let plan = form.preview()?;
            let debt = form.submit(&mut ctx.api)?;
            if debt.is_settled || plan.settles {
                println!("'{}' is settled", debt.name);
            } else {
                println!(
                    "'{}' has {} remaining",
                    debt.name,
                    ctx.money(&debt.remaining_amount)
                );
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").ok_or_else(|| anyhow!("id is required"))?;
            ctx.api.delete_debt(id)?;
            println!("Deleted debt {}", id);
        }
        _ => {}
    }
    Ok(())
}
