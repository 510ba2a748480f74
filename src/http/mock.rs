// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Scripted in-memory transport.
//!
//! Routes are matched on method + path (and optionally the bearer token).
//! Each route replays its queued replies in order and keeps repeating the
//! last one. Unmatched requests get a 404. Clones share state, so a test can
//! keep a handle after moving one into an [`ApiClient`](super::ApiClient).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;

use super::{HttpRequest, HttpResponse, Method, Transport};
use crate::error::{ApiError, Result};

#[derive(Debug, Clone)]
enum Reply {
    Respond(HttpResponse),
    Unreachable,
}

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    bearer: Option<String>,
    replies: VecDeque<Reply>,
}

#[derive(Debug, Default)]
struct MockState {
    routes: Vec<Route>,
    log: Vec<HttpRequest>,
}

#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Rc<RefCell<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON reply for `method path`.
    pub fn on(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        let text = if body.is_null() {
            String::new()
        } else {
            body.to_string()
        };
        self.push(method, path, None, Reply::Respond(HttpResponse { status, body: text }));
        self
    }

    /// Queue a reply that only matches when the request carries `token`.
    pub fn on_with_token(
        &self,
        method: Method,
        path: &str,
        token: &str,
        status: u16,
        body: Value,
    ) -> &Self {
        self.push(
            method,
            path,
            Some(token.to_string()),
            Reply::Respond(HttpResponse {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    /// Make `method path` fail at the connection level.
    pub fn unreachable(&self, method: Method, path: &str) -> &Self {
        self.push(method, path, None, Reply::Unreachable);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.borrow().log.clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.inner
            .borrow()
            .log
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last_body(&self, method: Method, path: &str) -> Option<Value> {
        self.inner
            .borrow()
            .log
            .iter()
            .rev()
            .find(|r| r.method == method && r.path == path)
            .and_then(|r| r.body.clone())
    }

    fn push(&self, method: Method, path: &str, bearer: Option<String>, reply: Reply) {
        let mut state = self.inner.borrow_mut();
        if let Some(route) = state
            .routes
            .iter_mut()
            .find(|r| r.method == method && r.path == path && r.bearer == bearer)
        {
            route.replies.push_back(reply);
            return;
        }
        state.routes.push(Route {
            method,
            path: path.to_string(),
            bearer,
            replies: VecDeque::from([reply]),
        });
    }
}

impl Transport for MockTransport {
    fn send(&self, req: &HttpRequest) -> Result<HttpResponse> {
        let mut state = self.inner.borrow_mut();
        state.log.push(req.clone());

        let pick = |r: &Route| r.method == req.method && r.path == req.path;
        let idx = state
            .routes
            .iter()
            .position(|r| pick(r) && r.bearer.is_some() && r.bearer == req.bearer)
            .or_else(|| {
                state
                    .routes
                    .iter()
                    .position(|r| pick(r) && r.bearer.is_none())
            });
        let Some(idx) = idx else {
            return Ok(HttpResponse {
                status: 404,
                body: String::new(),
            });
        };

        let route = &mut state.routes[idx];
        let reply = if route.replies.len() > 1 {
            route.replies.pop_front()
        } else {
            route.replies.front().cloned()
        };
        match reply {
            Some(Reply::Respond(resp)) => Ok(resp),
            Some(Reply::Unreachable) => Err(ApiError::Network(format!(
                "connection refused: {} {}",
                req.method.as_str(),
                req.path
            ))),
            None => Ok(HttpResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}
