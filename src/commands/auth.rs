// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::context::AppContext;
use crate::forms::{LoginForm, RegisterForm};

pub fn login(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let mut form = LoginForm::new();
    form.username = sub.get_one::<String>("username").cloned().unwrap_or_default();
    form.password = sub.get_one::<String>("password").cloned().unwrap_or_default();
    let username = form.username.clone();
    form.submit(&mut ctx.api)?;
    ctx.save()?;
    println!("Signed in as '{}'", username);
    Ok(())
}

pub fn register(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let mut form = RegisterForm::new();
    form.username = sub.get_one::<String>("username").cloned().unwrap_or_default();
    form.email = sub.get_one::<String>("email").cloned().unwrap_or_default();
    form.password = sub.get_one::<String>("password").cloned().unwrap_or_default();
    let username = form.username.clone();
    form.submit(&mut ctx.api)?;
    println!("Registered '{}'. Run `ledgerly login` to sign in.", username);
    Ok(())
}

pub fn logout(ctx: &mut AppContext) -> Result<()> {
    ctx.logout()?;
    println!("Signed out");
    Ok(())
}

pub fn status(ctx: &AppContext) -> Result<()> {
    let session = if ctx.api.tokens().is_some() {
        "signed in"
    } else {
        "signed out"
    };
    println!("Backend: {}", ctx.config.api_url);
    println!("Session: {}", session);
    println!("Theme:   {}", ctx.theme());
    Ok(())
}
