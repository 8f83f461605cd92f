// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::engine;
use crate::models::{Category, TxKind};
use crate::state::AppState;
use crate::utils::{
    fmt_money, maybe_print_json, month_arg, parse_date, parse_decimal, pretty_table, required,
    today,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, state, sub)?,
        Some(("list", sub)) => list(state, sub)?,
        Some(("rm", sub)) => remove(conn, state, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &mut Connection, state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TxKind = required(sub, "type")?.parse()?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    let category: Category = required(sub, "category")?.parse()?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.as_str())
        .unwrap_or("");

    let tx = state
        .add_transaction(kind, amount, date, category, description)?
        .clone();
    db::save_state(conn, state)?;
    println!(
        "Recorded {} {} on {} ({}) id={}",
        kind,
        fmt_money(&tx.amount, state.profile.currency.code()),
        tx.date,
        tx.category,
        tx.id
    );
    Ok(())
}

fn remove(conn: &mut Connection, state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let removed = state.delete_transaction(id)?;
    db::save_state(conn, state)?;
    println!("Deleted transaction {} ({})", removed.id, removed.description);
    Ok(())
}

fn list(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(state, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    format!("{} {}", r.icon, r.category),
                    r.description.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Amount", "Category", "Description", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub icon: String,
    pub description: String,
}

/// Month-filtered, searched, newest-first rows for the transaction feed.
pub fn query_rows(state: &AppState, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = month_arg(sub)?;
    let in_month = engine::filter_by_month(&state.transactions, month);
    let term = sub
        .get_one::<String>("search")
        .map(|s| s.as_str())
        .unwrap_or("");
    let matched = engine::search(&in_month, term);

    let mut data = Vec::new();
    for (_, items) in engine::group_by_date(&matched) {
        for t in items {
            data.push(TransactionRow {
                id: t.id.clone(),
                date: t.date.to_string(),
                kind: t.kind.to_string(),
                amount: format!("{:.2}", t.amount),
                category: t.category.label().to_string(),
                icon: t.category.meta().icon.to_string(),
                description: t.description.clone(),
            });
        }
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
