// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::balances::{BalanceTotals, DebtTotals, debt_totals, total_saved};
use crate::commands::{accounts, flags};
use crate::context::AppContext;
use crate::models::Summary;
use crate::utils::{maybe_print_json, parse_month, pretty_table};

#[derive(Serialize)]
pub struct Dashboard {
    pub summary: Summary,
    pub totals: BalanceTotals,
    pub debts: DebtTotals,
    pub saved: Decimal,
}

pub fn dashboard(ctx: &mut AppContext, month: Option<&String>) -> Result<Dashboard> {
    let (month, year) = match month {
        Some(m) => {
            let (m, y) = parse_month(m)?;
            (Some(m), Some(y))
        }
        None => (None, None),
    };
    let summary = ctx.api.summary(month, year)?;
    let totals = accounts::load_view(ctx)?.totals;
    let debts = debt_totals(&ctx.api.debts()?);
    let saved = total_saved(&ctx.api.savings_goals()?);
    Ok(Dashboard {
        summary,
        totals,
        debts,
        saved,
    })
}

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = flags(m);
    let d = dashboard(ctx, m.get_one::<String>("month"))?;
    if maybe_print_json(json_flag, jsonl_flag, &d)? {
        return Ok(());
    }

    let s = &d.summary;
    println!(
        "{}",
        pretty_table(
            ctx.theme(),
            &["Balance", "Income", "Expenses", "Upcoming recurring"],
            vec![vec![
                ctx.money(&s.balance),
                ctx.money(&s.total_income),
                ctx.money(&s.total_expense),
                s.upcoming_recurring
                    .map(|u| ctx.money(&u))
                    .unwrap_or_else(|| "-".into()),
            ]],
        )
    );
    let t = &d.totals;
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
    if !s.expenses_by_category.is_empty() {
        let rows = s
            .expenses_by_category
            .iter()
            .map(|c| {
                vec![
                    c.category_name
                        .clone()
                        .unwrap_or_else(|| "(uncategorized)".into()),
                    ctx.money(&c.total),
                ]
            })
            .collect();
        println!("{}", pretty_table(ctx.theme(), &["Category", "Spent"], rows));
    }
    println!(
        "{}",
        pretty_table(
            ctx.theme(),
            &["Owed to me", "I owe", "Saved in goals"],
            vec![vec![
                ctx.money(&d.debts.owed_to_me),
                ctx.money(&d.debts.i_owe),
                ctx.money(&d.saved),
            ]],
        )
    );
    Ok(())
}
