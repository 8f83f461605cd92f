// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::engine::{self, monthly_equivalent};
use crate::models::Frequency;
use crate::state::AppState;
use crate::utils::{
    fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, required, today,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, state, sub)?,
        Some(("list", sub)) => list(state, sub)?,
        Some(("toggle", sub)) => {
            let id = required(sub, "id")?;
            let active = state.toggle_subscription(id)?;
            db::save_state(conn, state)?;
            println!(
                "Subscription {} is now {}",
                id,
                if active { "active" } else { "paused" }
            );
        }
        Some(("rm", sub)) => {
            let removed = state.delete_subscription(required(sub, "id")?)?;
            db::save_state(conn, state)?;
            println!("Deleted subscription '{}'", removed.name);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &mut Connection, state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let name = required(sub, "name")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let frequency: Frequency = required(sub, "frequency")?.parse()?;
    let last_paid = match sub.get_one::<String>("last-paid") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let id = state
        .add_subscription(name, amount, frequency, last_paid)?
        .id
        .clone();
    db::save_state(conn, state)?;
    println!("Added {} subscription '{}' id={}", frequency, name, id);
    Ok(())
}

#[derive(Serialize)]
pub struct SubscriptionRow {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub frequency: String,
    pub monthly: String,
    pub last_payment_date: String,
    pub active: bool,
}

pub fn rows(state: &AppState) -> Vec<SubscriptionRow> {
    state
        .subscriptions
        .iter()
        .map(|s| SubscriptionRow {
            id: s.id.clone(),
            name: s.name.clone(),
            amount: format!("{:.2}", s.amount),
            frequency: s.frequency.to_string(),
            monthly: format!("{:.2}", monthly_equivalent(s)),
            last_payment_date: s.last_payment_date.to_string(),
            active: s.is_active,
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
                    r.amount.clone(),
                    r.frequency.clone(),
                    r.monthly.clone(),
                    r.last_payment_date.clone(),
                    if r.active { "yes" } else { "no" }.to_string(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Name", "Amount", "Frequency", "Monthly", "Last paid", "Active", "ID"],
                table,
            )
        );
        println!(
            "{} active, {} per month",
            engine::active_subscriptions(&state.subscriptions),
            fmt_money(
                &engine::subscription_cost(&state.subscriptions),
                state.profile.currency.code()
            )
        );
    }
    Ok(())
}
