// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Authenticated JSON client for the finance backend.
//!
//! [`ApiClient`] attaches the bearer token, maps HTTP statuses onto
//! [`ApiError`] and, when a request comes back 401, refreshes the access
//! token once and replays the request once. Nothing retries beyond that.

pub mod mock;

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::error::{ApiError, Result};
use crate::state::AuthTokens;

pub const REFRESH_PATH: &str = "auth/refresh/";

const UA: &str = concat!("ledgerly/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Moves one request over the wire. Only connection-level failures are
/// errors here; every HTTP status comes back as a response.
pub trait Transport {
    fn send(&self, req: &HttpRequest) -> Result<HttpResponse>;
}

pub struct ReqwestTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(UA)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let mut base_url = base_url.to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Ok(Self { base_url, client })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, req: &HttpRequest) -> Result<HttpResponse> {
        let url = format!("{}{}", self.base_url, req.path.trim_start_matches('/'));
        let mut builder = match req.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(token) = &req.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &req.body {
            builder = builder.json(body);
        }
        let resp = builder
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

pub struct ApiClient {
    transport: Box<dyn Transport>,
    tokens: Option<AuthTokens>,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport>, tokens: Option<AuthTokens>) -> Self {
        Self { transport, tokens }
    }

    pub fn tokens(&self) -> Option<&AuthTokens> {
        self.tokens.as_ref()
    }

    pub fn set_tokens(&mut self, tokens: AuthTokens) {
        self.tokens = Some(tokens);
    }

    pub fn clear_tokens(&mut self) {
        self.tokens = None;
    }

    pub fn get(&mut self, path: &str, query: Vec<(String, String)>) -> Result<Value> {
        self.request(Method::Get, path, query, None)
    }

    pub fn post(&mut self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::Post, path, Vec::new(), Some(body))
    }

    pub fn put(&mut self, path: &str, body: Value) -> Result<Value> {
        self.request(Method::Put, path, Vec::new(), Some(body))
    }

    pub fn delete(&mut self, path: &str) -> Result<Value> {
        self.request(Method::Delete, path, Vec::new(), None)
    }

    pub fn request(
        &mut self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Value> {
        let mut req = HttpRequest {
            method,
            path: path.to_string(),
            query,
            body,
            bearer: self.tokens.as_ref().map(|t| t.access.clone()),
        };
        debug!(method = method.as_str(), path, "sending request");
        let mut resp = self.transport.send(&req)?;

        if resp.status == 401 && !is_auth_path(path) && self.has_refresh_token() {
            self.refresh()?;
            req.bearer = self.tokens.as_ref().map(|t| t.access.clone());
            debug!(method = method.as_str(), path, "replaying after refresh");
            resp = self.transport.send(&req)?;
        }
        categorize(path, resp)
    }

    fn has_refresh_token(&self) -> bool {
        self.tokens.as_ref().is_some_and(|t| !t.refresh.is_empty())
    }

    fn refresh(&mut self) -> Result<()> {
        let Some(refresh) = self.tokens.as_ref().map(|t| t.refresh.clone()) else {
            return Err(ApiError::Unauthorized);
        };
        let req = HttpRequest {
            method: Method::Post,
            path: REFRESH_PATH.to_string(),
            query: Vec::new(),
            body: Some(json!({ "refresh": refresh })),
            bearer: None,
        };
        let outcome = self
            .transport
            .send(&req)
            .and_then(|resp| categorize(REFRESH_PATH, resp))
            .and_then(|v| serde_json::from_value::<RefreshResponse>(v).map_err(ApiError::from));
        match outcome {
            Ok(r) => {
                info!("access token refreshed");
                self.tokens = Some(AuthTokens {
                    access: r.access,
                    refresh: r.refresh.unwrap_or(refresh),
                });
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed, clearing session");
                self.tokens = None;
                match e {
                    ApiError::Network(_) => Err(e),
                    _ => Err(ApiError::Unauthorized),
                }
            }
        }
    }
}

fn is_auth_path(path: &str) -> bool {
    path.trim_start_matches('/').starts_with("auth/")
}

/// Maps a raw response onto the error taxonomy.
pub fn categorize(path: &str, resp: HttpResponse) -> Result<Value> {
    match resp.status {
        200..=299 => {
            if resp.body.trim().is_empty() {
                Ok(Value::Null)
            } else {
                Ok(serde_json::from_str(&resp.body)?)
            }
        }
        400 | 422 => {
            let payload = serde_json::from_str(&resp.body)
                .unwrap_or_else(|_| Value::String(resp.body.clone()));
            Err(ApiError::Validation(payload))
        }
        401 | 403 => Err(ApiError::Unauthorized),
        404 => Err(ApiError::NotFound(path.to_string())),
        status => Err(ApiError::Server {
            status,
            body: resp.body,
        }),
    }
}
