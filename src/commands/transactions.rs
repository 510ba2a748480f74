// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::commands::{flags, today};
use crate::context::AppContext;
use crate::forms::{Submitted, TransactionForm, TxKind};
use crate::models::{PaymentMethod, TransactionFilter, TxType};
use crate::utils::{id_for_account, id_for_category, maybe_print_json, parse_month, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            add(ctx, sub)?;
        }
        Some(("transfer", sub)) => {
            transfer(ctx, sub)?;
        }
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").ok_or_else(|| anyhow!("id is required"))?;
            ctx.api.delete_transaction(id)?;
            println!("Deleted transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

pub fn add(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<Submitted> {
    let tx_type: TxType = sub
        .get_one::<String>("type")
        .ok_or_else(|| anyhow!("type is required"))?
        .parse()
        .map_err(|e: String| anyhow!(e))?;
    let create_missing = sub.get_flag("create-missing");
    let mut form = TransactionForm::load(&mut ctx.api, today())?;
    form.set_kind(match tx_type {
        TxType::In => TxKind::In,
        TxType::Out => TxKind::Out,
    });
    form.amount = sub.get_one::<String>("amount").cloned().unwrap_or_default();
    if let Some(d) = sub.get_one::<String>("date") {
        form.date = d.clone();
    }
    form.description = sub.get_one::<String>("description").cloned().unwrap_or_default();
    if let Some(m) = sub.get_one::<String>("method") {
        form.payment_method = m.parse::<PaymentMethod>().map_err(|e| anyhow!(e))?;
    }

    let account_key = sub
        .get_one::<String>("account")
        .ok_or_else(|| anyhow!("account is required"))?;
    let accounts = ctx.api.accounts()?;
    match id_for_account(&accounts, account_key) {
        Ok(id) => form.account.select(id)?,
        Err(_) if create_missing => {
            form.account.search = account_key.clone();
            let created = form.account.quick_create(&mut ctx.api)?;
            println!("Created account '{}'", created.name);
        }
        Err(e) => return Err(e),
    }

    let category_key = sub
        .get_one::<String>("category")
        .ok_or_else(|| anyhow!("category is required"))?;
    form.category.search = category_key.clone();
    if let Some(id) = form.category.exact_match().map(|c| c.id) {
        form.category.select(id)?;
    } else if create_missing && category_key.parse::<i64>().is_err() {
        let created = form.category.quick_create(&mut ctx.api)?;
        println!("Created category '{}' ({})", created.name, created.r#type);
    } else {
        let categories = ctx.api.categories()?;
        form.category.select(id_for_category(&categories, category_key)?)?;
    }

    let amount = form.amount.clone();
    let out = form.submit(&mut ctx.api)?;
    if let Submitted::Transaction(tx) = &out {
        println!(
            "Recorded {} {} on {} (id {})",
            tx.r#type, amount, tx.date, tx.id
        );
    }
    Ok(out)
}

pub fn transfer(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<Submitted> {
    let mut form = TransactionForm::load(&mut ctx.api, today())?;
    form.set_kind(TxKind::Transfer);
    form.amount = sub.get_one::<String>("amount").cloned().unwrap_or_default();
    if let Some(d) = sub.get_one::<String>("date") {
        form.date = d.clone();
    }
    form.description = sub.get_one::<String>("description").cloned().unwrap_or_default();

    let accounts = ctx.api.accounts()?;
    if let Some(from) = sub.get_one::<String>("from") {
        form.account.select(id_for_account(&accounts, from)?)?;
    }
    if let Some(to) = sub.get_one::<String>("to") {
        form.to_account.select(id_for_account(&accounts, to)?)?;
    }
    let out = form.submit(&mut ctx.api)?;
    println!("Transfer recorded");
    Ok(out)
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub r#type: String,
    pub amount: String,
    pub account: String,
    pub category: String,
    pub method: String,
    pub description: String,
}

pub fn query_rows(
    ctx: &mut AppContext,
    month: Option<&String>,
    limit: Option<usize>,
) -> Result<Vec<TransactionRow>> {
    let filter = match month {
        Some(m) => {
            let (month, year) = parse_month(m)?;
            TransactionFilter::month(month, year)
        }
        None => TransactionFilter::default(),
    };
    let mut txs = ctx.api.transactions(&filter)?;
    let accounts = ctx.api.accounts()?;
    txs.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = limit {
        txs.truncate(limit);
    }
    let rows = txs
        .into_iter()
        .map(|t| {
            let account = t
                .account
                .and_then(|id| accounts.iter().find(|a| a.id == id))
                .map(|a| a.name.clone())
                .unwrap_or_default();
            TransactionRow {
                id: t.id,
                date: t.date.to_string(),
                r#type: t.r#type.to_string(),
                amount: format!("{:.2}", t.amount),
                account,
                category: t.category_name.unwrap_or_else(|| "(uncategorized)".into()),
                method: t.payment_method.to_string(),
                description: t.description.unwrap_or_default(),
            }
        })
        .collect();
    Ok(rows)
}

fn list(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = flags(sub);
    let data = query_rows(
        ctx,
        sub.get_one::<String>("month"),
        sub.get_one::<usize>("limit").copied(),
    )?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date,
                    r.r#type,
                    r.amount,
                    r.account,
                    r.category,
                    r.method,
                    r.description,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                ctx.theme(),
                &["Id", "Date", "Type", "Amount", "Account", "Category", "Method", "Description"],
                rows,
            )
        );
    }
    Ok(())
}
