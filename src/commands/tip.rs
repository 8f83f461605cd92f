// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor::{self, AdvisorConfig};
use crate::commands::reports::totals_for;
use crate::engine;
use crate::state::AppState;
use crate::utils::month_arg;
use anyhow::Result;

pub fn handle(state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(m)?;
    let in_month = engine::filter_by_month(&state.transactions, month);
    let totals = totals_for(state, month);
    let prompt = advisor::build_prompt(
        month,
        &in_month,
        &state.subscriptions,
        &state.profile,
        &totals,
    );
    let cfg = AdvisorConfig::from_env();
    println!("{}", advisor::tip(&cfg, &prompt));
    Ok(())
}
