// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::balances::{goal_progress, total_saved};
use crate::commands::flags;
use crate::context::AppContext;
use crate::forms::{AddFundsForm, SavingsGoalForm};
use crate::utils::{id_for_account, maybe_print_json, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let (json_flag, jsonl_flag) = flags(sub);
            let goals = ctx.api.savings_goals()?;
            if maybe_print_json(json_flag, jsonl_flag, &goals)? {
                return Ok(());
            }
            let rows = goals
                .iter()
                .map(|g| {
                    vec![
                        g.id.to_string(),
                        g.name.clone(),
                        ctx.money(&g.current_amount),
                        ctx.money(&g.target_amount),
                        format!("{:.0}%", goal_progress(g)),
                        g.target_date.map(|d| d.to_string()).unwrap_or_default(),
                        if g.is_completed { "done" } else { "" }.to_string(),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(
                    ctx.theme(),
                    &["Id", "Goal", "Saved", "Target", "Progress", "By", "Status"],
                    rows,
                )
            );
            println!("Total saved: {}", ctx.money(&total_saved(&goals)));
        }
        Some(("add", sub)) => {
            let mut form = SavingsGoalForm::new();
            form.name = sub.get_one::<String>("name").cloned().unwrap_or_default();
            form.target = sub.get_one::<String>("target").cloned().unwrap_or_default();
            form.target_date = sub.get_one::<String>("date").cloned().unwrap_or_default();
            form.color = sub.get_one::<String>("color").cloned().unwrap_or_default();
            let goal = form.submit(&mut ctx.api)?;
            println!(
                "Added goal '{}' (target {})",
                goal.name,
                ctx.money(&goal.target_amount)
            );
        }
        Some(("fund", sub)) => {
            let id = *sub.get_one::<i64>("id").ok_or_else(|| anyhow!("id is required"))?;
            let goal = ctx
                .api
                .savings_goals()?
                .into_iter()
                .find(|g| g.id == id)
                .ok_or_else(|| anyhow!("Savings goal {} not found", id))?;
            let available = ctx.api.summary(None, None)?.balance;
            let mut form = AddFundsForm::new(&goal, available);
            form.amount = sub.get_one::<String>("amount").cloned().unwrap_or_default();
            if let Some(key) = sub.get_one::<String>("account") {
                form.account = Some(id_for_account(&ctx.api.accounts()?, key)?);
            }
            let goal = form.submit(&mut ctx.api)?;
            println!(
                "'{}' now at {} of {} ({:.0}%)",
                goal.name,
                ctx.money(&goal.current_amount),
                ctx.money(&goal.target_amount),
                goal_progress(&goal)
            );
        }
        _ => {}
    }
    Ok(())
}
