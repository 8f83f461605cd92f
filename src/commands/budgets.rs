// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::engine::{self, Utilization};
use crate::models::{Category, MonthKey};
use crate::state::AppState;
use crate::utils::{
    fmt_percent, maybe_print_json, month_arg, parse_decimal, pretty_table, required,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, state, sub)?,
        Some(("list", sub)) => list(state, sub)?,
        Some(("report", sub)) => report(state, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &mut Connection, state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let category: Category = required(sub, "category")?.parse()?;
    let limit = parse_decimal(required(sub, "limit")?)?;
    state.set_budget(category, limit)?;
    db::save_state(conn, state)?;
    println!("Budget set for {} = {}", category, limit);
    Ok(())
}

fn list(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<Vec<String>> = state
        .budgets
        .iter()
        .map(|b| vec![b.category.to_string(), format!("{:.2}", b.limit)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &state.budgets)? {
        println!("{}", pretty_table(&["Category", "Limit"], data));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct BudgetRow {
    pub category: Category,
    pub limit: String,
    pub spent: String,
    pub ratio: String,
    pub overspent: bool,
}

impl From<Utilization> for BudgetRow {
    fn from(u: Utilization) -> Self {
        Self {
            category: u.category,
            limit: format!("{:.2}", u.limit),
            spent: format!("{:.2}", u.spent),
            ratio: fmt_percent(&u.ratio),
            overspent: u.overspent(),
        }
    }
}

pub fn utilization_for(state: &AppState, month: MonthKey) -> Vec<Utilization> {
    let in_month = engine::filter_by_month(&state.transactions, month);
    state
        .budgets
        .iter()
        .map(|b| engine::budget_utilization(b, &in_month))
        .collect()
}

fn report(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let data: Vec<BudgetRow> = utilization_for(state, month)
        .into_iter()
        .map(BudgetRow::from)
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.category.to_string(),
                    r.limit.clone(),
                    r.spent.clone(),
                    r.ratio.clone(),
                    if r.overspent { "over" } else { "" }.to_string(),
                ]
            })
            .collect();
        println!("Budgets for {}", month);
        println!(
            "{}",
            pretty_table(&["Category", "Limit", "Spent", "Used", ""], rows)
        );
    }
    Ok(())
}
