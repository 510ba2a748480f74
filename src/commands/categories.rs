// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::commands::flags;
use crate::context::AppContext;
use crate::forms::CategoryPicker;
use crate::forms::pickers::{EXPENSE_COLOR, INCOME_COLOR};
use crate::models::{NewCategory, TxType};
use crate::utils::{is_hex_color, maybe_print_json, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").cloned().unwrap_or_default();
            let kind: TxType = sub
                .get_one::<String>("type")
                .ok_or_else(|| anyhow!("type is required"))?
                .parse()
                .map_err(|e: String| anyhow!(e))?;
            let color = match sub.get_one::<String>("color") {
                Some(c) if !is_hex_color(c) => {
                    return Err(anyhow!("Color '{}' must look like #RRGGBB", c));
                }
                Some(c) => c.clone(),
                None if kind == TxType::In => INCOME_COLOR.to_string(),
                None => EXPENSE_COLOR.to_string(),
            };
            let existing = ctx.api.categories()?;
            let mut picker = CategoryPicker::new(kind, existing);
            picker.search = name.clone();
            if let Some(c) = picker.exact_match() {
                return Err(anyhow!("Category '{}' ({}) already exists", c.name, c.r#type));
            }
            if name.trim().is_empty() {
                return Err(anyhow!("Name is required"));
            }
            let created = ctx.api.create_category(&NewCategory {
                name: name.trim().to_string(),
                r#type: kind,
                color,
            })?;
            println!("Added category '{}' ({})", created.name, created.r#type);
        }
        Some(("list", sub)) => {
            let (json_flag, jsonl_flag) = flags(sub);
            let kind = sub
                .get_one::<String>("type")
                .map(|t| t.parse::<TxType>())
                .transpose()
                .map_err(|e| anyhow!(e))?;
            let mut cats = ctx.api.categories()?;
            if let Some(k) = kind {
                cats.retain(|c| c.r#type == k);
            }
            cats.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            if !maybe_print_json(json_flag, jsonl_flag, &cats)? {
                let data = cats
                    .into_iter()
                    .map(|c| vec![c.id.to_string(), c.name, c.r#type.to_string(), c.color])
                    .collect();
                println!(
                    "{}",
                    pretty_table(ctx.theme(), &["Id", "Category", "Type", "Color"], data)
                );
            }
        }
        _ => {}
    }
    Ok(())
}
