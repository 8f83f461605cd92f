// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::engine;
use crate::state::AppState;
use crate::utils::{
    fmt_money, fmt_percent, maybe_print_json, parse_decimal, pretty_table, required, today,
};
use anyhow::{Result, bail};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &mut Connection, state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = required(sub, "name")?;
            let target = parse_decimal(required(sub, "target")?)?;
            let id = state.add_goal(name, target)?.id.clone();
            db::save_state(conn, state)?;
            println!("Added goal '{}' target {} id={}", name, target, id);
        }
        Some(("list", sub)) => list(state, sub)?,
        Some(("deposit", sub)) => transfer(conn, state, sub, false)?,
        Some(("withdraw", sub)) => transfer(conn, state, sub, true)?,
        _ => {}
    }
    Ok(())
}

fn transfer(
    conn: &mut Connection,
    state: &mut AppState,
    sub: &clap::ArgMatches,
    withdraw: bool,
) -> Result<()> {
    let goal = required(sub, "goal")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    if amount <= Decimal::ZERO {
        bail!("Amount must be positive, got {}", amount);
    }
    let signed = if withdraw { -amount } else { amount };
    let done = state.contribute(goal, signed, today())?;
    db::save_state(conn, state)?;
    let ccy = state.profile.currency.code();
    println!(
        "{} {} ({} of {}, {})",
        done.transaction.description,
        fmt_money(&done.transaction.amount, ccy),
        fmt_money(&done.goal.current_amount, ccy),
        fmt_money(&done.goal.target_amount, ccy),
        fmt_percent(&engine::goal_progress(&done.goal)),
    );
    Ok(())
}

#[derive(Serialize)]
pub struct GoalRow {
    pub id: String,
    pub name: String,
    pub current: String,
    pub target: String,
    pub progress: String,
    pub color: String,
}

pub fn rows(state: &AppState) -> Vec<GoalRow> {
    state
        .goals
        .iter()
        .map(|g| GoalRow {
            id: g.id.clone(),
            name: g.name.clone(),
            current: format!("{:.2}", g.current_amount),
            target: format!("{:.2}", g.target_amount),
            progress: fmt_percent(&engine::goal_progress(g)),
            color: g.color.clone(),
        })
        .collect()
}

fn list(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let data = rows(state);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let table: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.current.clone(),
                    r.target.clone(),
                    r.progress.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Goal", "Saved", "Target", "Progress", "ID"], table)
        );
    }
    Ok(())
}
