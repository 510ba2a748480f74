// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod auth;
pub mod categories;
pub mod debts;
pub mod exporter;
pub mod recurring;
pub mod savings;
pub mod summary;
pub mod theme;
pub mod transactions;

use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn flags(m: &clap::ArgMatches) -> (bool, bool) {
    let json = m.try_get_one::<bool>("json").ok().flatten().copied().unwrap_or(false);
    let jsonl = m.try_get_one::<bool>("jsonl").ok().flatten().copied().unwrap_or(false);
    (json, jsonl)
}
