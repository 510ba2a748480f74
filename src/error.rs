// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error taxonomy for backend calls and client-side validation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("not authenticated (bad credentials or expired session)")]
    Unauthorized,

    #[error("validation failed: {0}")]
    Validation(serde_json::Value),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Form(String),

    #[error("local store error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl ApiError {
    pub fn form(msg: impl Into<String>) -> Self {
        ApiError::Form(msg.into())
    }

    /// Message shown to the user. Network and auth failures collapse to a
    /// generic line; validation payloads are echoed as JSON.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) | ApiError::Unauthorized => {
                "Invalid credentials or connection problem.".to_string()
            }
            ApiError::Validation(payload) => format!(
                "Could not save: {}",
                serde_json::to_string(payload).unwrap_or_else(|_| payload.to_string())
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
