// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use serde::Serialize;
use tracing::warn;

use crate::balances::{BalanceTotals, EnrichedAccount, enrich_accounts};
use crate::commands::flags;
use crate::context::AppContext;
use crate::forms::AccountForm;
use crate::models::{AccountType, AccountUpdate};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("edit", sub)) => edit(ctx, sub)?,
        Some(("archive", sub)) => set_active(ctx, sub, false)?,
        Some(("restore", sub)) => set_active(ctx, sub, true)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
pub struct AccountsView {
    pub accounts: Vec<EnrichedAccount>,
    pub totals: BalanceTotals,
}

/// Accounts merged with the summary's running balances.
pub fn load_view(ctx: &mut AppContext) -> Result<AccountsView> {
    let accounts = ctx.api.accounts()?;
    let summary = match ctx.api.summary(None, None) {
        Ok(s) => Some(s),
        Err(e) => {
            warn!(error = %e, "summary unavailable, showing stored balances");
            None
        }
    };
    let accounts = enrich_accounts(&accounts, summary.as_ref());
    let totals = BalanceTotals::from_accounts(&accounts);
    Ok(AccountsView { accounts, totals })
}

fn list(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = flags(sub);
    let view = load_view(ctx)?;
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = view
        .accounts
        .iter()
        .map(|a| {
            vec![
                a.account.id.to_string(),
                a.account.name.clone(),
                a.account.r#type.label().to_string(),
                ctx.money(&a.display_balance),
                if a.account.is_active { "yes" } else { "archived" }.to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(ctx.theme(), &["Id", "Name", "Type", "Balance", "Active"], rows)
    );
    let t = &view.totals;
    println!(
        "{}",
        pretty_table(
            ctx.theme(),
            &["Net worth", "Bank", "Cash", "Savings", "Credit"],
            vec![vec![
                ctx.money(&t.net_worth),
                ctx.money(&t.bank),
                ctx.money(&t.cash),
                ctx.money(&t.savings),
                ctx.money(&t.credit),
            ]],
        )
    );
    Ok(())
}

fn add(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let mut form = AccountForm::new();
    form.name = sub.get_one::<String>("name").cloned().unwrap_or_default();
    if let Some(t) = sub.get_one::<String>("type") {
        form.kind = t.parse::<AccountType>().map_err(|e| anyhow!(e))?;
    }
    if let Some(b) = sub.get_one::<String>("balance") {
        form.balance = b.clone();
    }
    if let Some(c) = sub.get_one::<String>("color") {
        form.color = c.clone();
    }
    let account = form.submit(&mut ctx.api)?;
    println!(
        "Added account '{}' ({}, {})",
        account.name,
        account.r#type.label(),
        ctx.money(&account.balance)
    );
    Ok(())
}

fn edit(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").ok_or_else(|| anyhow!("id is required"))?;
    let r#type = sub
        .get_one::<String>("type")
        .map(|t| t.parse::<AccountType>())
        .transpose()
        .map_err(|e| anyhow!(e))?;
    if let Some(c) = sub.get_one::<String>("color") {
        if !crate::utils::is_hex_color(c) {
            return Err(anyhow!("Color '{}' must look like #RRGGBB", c));
        }
    }
    let update = AccountUpdate {
        name: sub.get_one::<String>("name").cloned(),
        r#type,
        color: sub.get_one::<String>("color").cloned(),
        is_active: None,
    };
    let account = ctx.api.update_account(id, &update)?;
    println!("Updated account '{}'", account.name);
    Ok(())
}

fn set_active(ctx: &mut AppContext, sub: &clap::ArgMatches, active: bool) -> Result<()> {
    let id = *sub.get_one::<i64>("id").ok_or_else(|| anyhow!("id is required"))?;
    let update = AccountUpdate {
        is_active: Some(active),
        ..Default::default()
    };
    let account = ctx.api.update_account(id, &update)?;
    let verb = if active { "Restored" } else { "Archived" };
    println!("{} account '{}'", verb, account.name);
    Ok(())
}
