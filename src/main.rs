// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ledgerly::config::Config;
use ledgerly::context::AppContext;
use ledgerly::error::ApiError;
use ledgerly::{cli, commands};

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();

    // RUST_LOG wins over --verbose
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if matches.get_flag("verbose") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ApiError>() {
                Some(api) => eprintln!("error: {}", api.user_message()),
                None => eprintln!("error: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(url) = matches.get_one::<String>("api-url") {
        config.api_url = url.clone();
    }
    let mut ctx = AppContext::open(config)?;
    let outcome = dispatch(&mut ctx, matches);
    // A refresh may have rotated or cleared the tokens mid-command
    ctx.save()?;
    outcome
}

fn dispatch(ctx: &mut AppContext, matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("login", sub)) => commands::auth::login(ctx, sub)?,
        Some(("register", sub)) => commands::auth::register(ctx, sub)?,
        Some(("logout", _)) => commands::auth::logout(ctx)?,
        Some(("status", _)) => commands::auth::status(ctx)?,
        Some(("account", sub)) => commands::accounts::handle(ctx, sub)?,
        Some(("category", sub)) => commands::categories::handle(ctx, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(ctx, sub)?,
        Some(("summary", sub)) => commands::summary::handle(ctx, sub)?,
        Some(("savings", sub)) => commands::savings::handle(ctx, sub)?,
        Some(("debt", sub)) => commands::debts::handle(ctx, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(ctx, sub)?,
        Some(("theme", sub)) => commands::theme::handle(ctx, sub)?,
        Some(("export", sub)) => commands::exporter::handle(ctx, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
