// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow, bail};

use crate::commands::transactions::query_rows;
use crate::context::AppContext;

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let n = export_transactions(ctx, sub)?;
            let out = sub.get_one::<String>("out").map(String::as_str).unwrap_or("");
            println!("Exported {} transactions to {}", n, out);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Writes the (optionally month-filtered) transactions to `--out` and
/// returns how many rows were written.
pub fn export_transactions(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<usize> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|f| f.to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = sub
        .get_one::<String>("out")
        .ok_or_else(|| anyhow!("--out is required"))?;
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let mut rows = query_rows(ctx, sub.get_one::<String>("month"), None)?;
    rows.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
    }
    Ok(rows.len())
}
