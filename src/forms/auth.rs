// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing::warn;

use super::{InFlight, required};
use crate::api::FinanceApi;
use crate::error::{ApiError, Result};
use crate::state::AuthTokens;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
    in_flight: InFlight,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight.is_pending()
            && !self.username.trim().is_empty()
            && !self.password.is_empty()
    }

    pub fn submit(&mut self, api: &mut FinanceApi) -> Result<AuthTokens> {
        self.error = None;
        let username = required(&self.username, "Username")?.to_string();
        if self.password.is_empty() {
            return Err(ApiError::form("Password is required"));
        }
        let password = self.password.clone();
        match self.in_flight.run(|| api.login(&username, &password)) {
            Ok(tokens) => {
                *self = Self::default();
                Ok(tokens)
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                self.error = Some(e.user_message());
                self.password.clear();
                Err(e)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    in_flight: InFlight,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        required(&self.username, "Username")?;
        let email = required(&self.email, "Email")?;
        if !email.contains('@') {
            return Err(ApiError::form(format!("'{}' is not an email address", email)));
        }
        if self.password.is_empty() {
            return Err(ApiError::form("Password is required"));
        }
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight.is_pending() && self.validate().is_ok()
    }

    pub fn submit(&mut self, api: &mut FinanceApi) -> Result<()> {
        self.error = None;
        self.validate()?;
        let (u, e, p) = (
            self.username.trim().to_string(),
            self.email.trim().to_string(),
            self.password.clone(),
        );
        match self.in_flight.run(|| api.register(&u, &e, &p)) {
            Ok(_) => {
                *self = Self::default();
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }
}
