// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Application context handed to every command: config, the local store,
//! persisted state and the finance API. State is loaded once on open and
//! written back by [`AppContext::save`].

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

use crate::api::FinanceApi;
use crate::cache::QueryCache;
use crate::config::Config;
use crate::db;
use crate::http::{ApiClient, ReqwestTransport, Transport};
use crate::state::{AppState, Theme};

pub struct AppContext {
    pub config: Config,
    pub conn: Connection,
    pub state: AppState,
    pub api: FinanceApi,
}

impl AppContext {
    pub fn open(config: Config) -> Result<Self> {
        let conn = db::open_or_init()?;
        let transport = ReqwestTransport::new(&config.api_url, config.timeout())
            .context("Build HTTP client")?;
        Self::with_parts(config, conn, Box::new(transport))
    }

    /// Assembles a context over any store and transport.
    pub fn with_parts(
        config: Config,
        conn: Connection,
        transport: Box<dyn Transport>,
    ) -> Result<Self> {
        db::init_schema(&conn)?;
        let state = AppState::load(&conn).context("Load saved state")?;
        debug!(theme = %state.theme, signed_in = state.is_authenticated(), "state loaded");
        let client = ApiClient::new(transport, state.tokens.clone());
        let api = FinanceApi::new(client, QueryCache::new(config.cache_ttl()));
        Ok(Self {
            config,
            conn,
            state,
            api,
        })
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.state.theme = theme;
        self.save()
    }

    pub fn logout(&mut self) -> Result<()> {
        self.api.logout();
        self.save()
    }

    /// Pulls the live tokens (which a refresh may have rotated) out of the
    /// API client and persists the whole state.
    pub fn save(&mut self) -> Result<()> {
        self.state.tokens = self.api.tokens().cloned();
        self.state.save(&self.conn).context("Save state")?;
        Ok(())
    }

    pub fn money(&self, d: &rust_decimal::Decimal) -> String {
        crate::utils::fmt_money(d, &self.config.currency_symbol)
    }
}
