// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{self, Totals};
use crate::models::MonthKey;
use crate::state::AppState;
use crate::utils::{fmt_money, maybe_print_json, month_arg, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

pub fn handle(state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(state, sub)?,
        Some(("categories", sub)) => categories(state, sub)?,
        Some(("trend", sub)) => trend(state, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn totals_for(state: &AppState, month: MonthKey) -> Totals {
    let in_month = engine::filter_by_month(&state.transactions, month);
    engine::compute_totals(
        &in_month,
        &state.subscriptions,
        state.profile.starting_balance,
    )
}

#[derive(Serialize)]
struct Summary {
    month: String,
    currency: String,
    #[serde(flatten)]
    totals: Totals,
    active_subscriptions: usize,
}

fn summary(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let totals = totals_for(state, month);
    let ccy = state.profile.currency.code();
    let out = Summary {
        month: month.to_string(),
        currency: ccy.to_string(),
        totals,
        active_subscriptions: engine::active_subscriptions(&state.subscriptions),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        let rows = vec![
            vec!["Income".to_string(), fmt_money(&totals.income, ccy)],
            vec!["Expense".to_string(), fmt_money(&totals.expense, ccy)],
            vec![
                format!("Subscriptions ({} active)", out.active_subscriptions),
                fmt_money(&totals.subscription_cost, ccy),
            ],
            vec!["Balance".to_string(), fmt_money(&totals.balance, ccy)],
        ];
        println!("Summary for {}", month);
        println!("{}", pretty_table(&["", "Amount"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub icon: String,
    pub spent: Decimal,
}

/// Largest spend first.
pub fn category_rows(state: &AppState, month: MonthKey) -> Vec<CategoryRow> {
    let in_month = engine::filter_by_month(&state.transactions, month);
    let mut items: Vec<_> = engine::category_breakdown(&in_month).into_iter().collect();
    items.sort_by(|a, b| b.1.cmp(&a.1));
    items
        .into_iter()
        .map(|(c, spent)| CategoryRow {
            category: c.label().to_string(),
            icon: c.meta().icon.to_string(),
            spent,
        })
        .collect()
}

fn categories(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let data = category_rows(state, month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    format!("{} {}", r.icon, r.category),
                    format!("{:.2}", r.spent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct TrendPoint {
    day: u32,
    amount: Decimal,
}

fn trend(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_arg(sub)?;
    let data: Vec<TrendPoint> = engine::daily_trend(&state.transactions, month)
        .into_iter()
        .map(|(day, amount)| TrendPoint { day, amount })
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let peak = data
            .iter()
            .map(|p| p.amount)
            .max()
            .unwrap_or(Decimal::ZERO);
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|p| {
                vec![
                    p.day.to_string(),
                    format!("{:.2}", p.amount),
                    bar(p.amount, peak, 30),
                ]
            })
            .collect();
        println!("Daily spending for {}", month);
        println!("{}", pretty_table(&["Day", "Spent", ""], rows));
    }
    Ok(())
}

fn bar(value: Decimal, peak: Decimal, width: u32) -> String {
    if peak <= Decimal::ZERO {
        return String::new();
    }
    let cells = (value / peak * Decimal::from(width)).round();
    let n = cells.to_usize().unwrap_or(0);
    "█".repeat(n)
}
