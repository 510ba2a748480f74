// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Small persisted client state: UI theme and session tokens.

use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL, UTF8_FULL_CONDENSED};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::db::{delete_setting, get_setting, set_setting};
use crate::error::Result;

pub const THEME_KEY: &str = "ui.theme";
pub const ACCESS_KEY: &str = "auth.access";
pub const REFRESH_KEY: &str = "auth.refresh";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Ocean,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Ocean => "ocean",
        }
    }

    /// Table preset used when rendering in this theme.
    pub fn table_preset(&self) -> &'static str {
        match self {
            Theme::Light => UTF8_FULL,
            Theme::Dark => UTF8_FULL_CONDENSED,
            Theme::Ocean => ASCII_MARKDOWN,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "ocean" => Ok(Theme::Ocean),
            other => Err(format!("Unknown theme '{}' (use light|dark|ocean)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub theme: Theme,
    pub tokens: Option<AuthTokens>,
}

impl AppState {
    pub fn load(conn: &Connection) -> Result<Self> {
        let theme = match get_setting(conn, THEME_KEY)? {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("{}; falling back to light", e);
                Theme::Light
            }),
            None => Theme::Light,
        };
        let tokens = match (get_setting(conn, ACCESS_KEY)?, get_setting(conn, REFRESH_KEY)?) {
            (Some(access), Some(refresh)) => Some(AuthTokens { access, refresh }),
            (Some(access), None) => Some(AuthTokens {
                access,
                refresh: String::new(),
            }),
            _ => None,
        };
        Ok(Self { theme, tokens })
    }

    pub fn save(&self, conn: &Connection) -> Result<()> {
        set_setting(conn, THEME_KEY, self.theme.as_str())?;
        match &self.tokens {
            Some(t) => {
                set_setting(conn, ACCESS_KEY, &t.access)?;
                set_setting(conn, REFRESH_KEY, &t.refresh)?;
            }
            None => {
                delete_setting(conn, ACCESS_KEY)?;
                delete_setting(conn, REFRESH_KEY)?;
            }
        }
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }
}
