// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-through cache for backend queries.
//!
//! Entries are keyed by resource plus request parameters. Every mutation
//! maps to the set of resources it makes stale in [`Mutation::invalidates`];
//! invalidation drops every parameterization of those resources.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Categories,
    Transactions,
    Summary,
    Savings,
    Debts,
    Accounts,
    Recurring,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Categories,
        Resource::Transactions,
        Resource::Summary,
        Resource::Savings,
        Resource::Debts,
        Resource::Accounts,
        Resource::Recurring,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub resource: Resource,
    pub params: Vec<(String, String)>,
}

impl QueryKey {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    pub fn with_params(resource: Resource, params: Vec<(String, String)>) -> Self {
        Self { resource, params }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateCategory,
    CreateTransaction,
    DeleteTransaction,
    CreateTransfer,
    CreateSavingsGoal,
    AddFunds,
    CreateDebt,
    UpdateDebt,
    PayDebt,
    DeleteDebt,
    CreateAccount,
    UpdateAccount,
    CreateRecurring,
    DeleteRecurring,
    PayRecurring,
    Login,
    Logout,
}

impl Mutation {
    pub fn invalidates(&self) -> &'static [Resource] {
        use Resource::*;
        match self {
            Mutation::CreateCategory => &[Categories],
            Mutation::CreateTransaction | Mutation::DeleteTransaction => {
                &[Transactions, Summary]
            }
            Mutation::CreateTransfer => &[Transactions, Summary, Accounts],
            Mutation::CreateSavingsGoal => &[Savings],
            // add_funds books an expense against the chosen account
            Mutation::AddFunds => &[Savings, Summary, Transactions],
            Mutation::CreateDebt
            | Mutation::UpdateDebt
            | Mutation::PayDebt
            | Mutation::DeleteDebt => &[Debts],
            Mutation::CreateAccount | Mutation::UpdateAccount => &[Accounts, Summary],
            Mutation::CreateRecurring | Mutation::DeleteRecurring => &[Recurring, Summary],
            Mutation::PayRecurring => &[Recurring, Summary, Transactions, Accounts],
            Mutation::Login | Mutation::Logout => &Resource::ALL,
        }
    }
}

struct Entry {
    value: Value,
    fetched_at: Instant,
}

pub struct QueryCache {
    ttl: Duration,
    entries: HashMap<QueryKey, Entry>,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &QueryKey) -> Option<&Value> {
        self.entries
            .get(key)
            .filter(|e| e.fetched_at.elapsed() < self.ttl)
            .map(|e| &e.value)
    }

    pub fn put(&mut self, key: QueryKey, value: Value) {
        self.entries.insert(
            key,
            Entry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&mut self, resource: Resource) {
        self.entries.retain(|k, _| k.resource != resource);
    }

    pub fn apply(&mut self, mutation: Mutation) {
        let stale = mutation.invalidates();
        debug!(?mutation, ?stale, "invalidating cached queries");
        for r in stale {
            self.invalidate(*r);
        }
    }

    pub fn is_cached(&self, key: &QueryKey) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invalidation_drops_every_parameterization() {
        let mut cache = QueryCache::default();
        let march = QueryKey::with_params(
            Resource::Summary,
            vec![("month".into(), "3".into()), ("year".into(), "2025".into())],
        );
        cache.put(QueryKey::new(Resource::Summary), json!({}));
        cache.put(march.clone(), json!({}));
        cache.put(QueryKey::new(Resource::Debts), json!([]));

        cache.apply(Mutation::CreateTransaction);
        assert!(!cache.is_cached(&march));
        assert!(!cache.is_cached(&QueryKey::new(Resource::Summary)));
        assert!(cache.is_cached(&QueryKey::new(Resource::Debts)));
    }

    #[test]
    fn expired_entries_are_misses() {
        let mut cache = QueryCache::new(Duration::ZERO);
        cache.put(QueryKey::new(Resource::Accounts), json!([]));
        assert!(cache.get(&QueryKey::new(Resource::Accounts)).is_none());
    }
}
