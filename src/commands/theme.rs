// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};

use crate::context::AppContext;
use crate::state::Theme;

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let theme: Theme = sub
                .get_one::<String>("theme")
                .ok_or_else(|| anyhow!("theme is required"))?
                .parse()
                .map_err(|e: String| anyhow!(e))?;
            ctx.set_theme(theme)?;
            println!("Theme set to {}", theme);
        }
        _ => println!("{}", ctx.theme()),
    }
    Ok(())
}
