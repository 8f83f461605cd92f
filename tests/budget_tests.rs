// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::models::{Category, MonthKey, TxKind};
use fintrack::state::AppState;
use fintrack::{cli, commands::budgets, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> AppState {
    let mut state = AppState::default();
    state.set_budget(Category::Food, "50.00".parse().unwrap()).unwrap();
    state.set_budget(Category::Bill, "0".parse().unwrap()).unwrap();
    for (day, amt) in [(10, "30"), (20, "35")] {
        state
            .add_transaction(
                TxKind::Expense,
                amt.parse().unwrap(),
                NaiveDate::from_ymd_opt(2025, 8, day).unwrap(),
                Category::Food,
                "Dining",
            )
            .unwrap();
    }
    // outside the month
    state
        .add_transaction(
            TxKind::Expense,
            "500".parse().unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            Category::Food,
            "",
        )
        .unwrap();
    state
}

#[test]
fn utilization_for_month() {
    let state = setup();
    let month: MonthKey = "2025-08".parse().unwrap();
    let util = budgets::utilization_for(&state, month);
    let food = util.iter().find(|u| u.category == Category::Food).unwrap();
    assert_eq!(format!("{:.2}", food.spent), "65.00");
    assert_eq!(food.ratio, Decimal::ONE);
    assert!(food.overspent());

    let bill = util.iter().find(|u| u.category == Category::Bill).unwrap();
    assert_eq!(bill.ratio, Decimal::ZERO);
}

#[test]
fn set_via_cli_replaces_existing_limit() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let mut state = setup();

    let matches = cli::build_cli().get_matches_from([
        "fintrack", "budget", "set", "--category", "food", "--limit", "120",
    ]);
    let Some(("budget", budget_m)) = matches.subcommand() else {
        panic!("no budget subcommand");
    };
    budgets::handle(&mut conn, &mut state, budget_m).unwrap();

    let loaded = db::load_state(&conn).unwrap();
    let food: Vec<_> = loaded
        .budgets
        .iter()
        .filter(|b| b.category == Category::Food)
        .collect();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].limit, "120".parse::<Decimal>().unwrap());
}

#[test]
fn set_via_cli_rejects_unknown_category() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let mut state = AppState::default();
    state.set_budget(Category::Other, "500".parse().unwrap()).unwrap();

    let matches = cli::build_cli().get_matches_from([
        "fintrack", "budget", "set", "--category", "Fod", "--limit", "10",
    ]);
    let Some(("budget", budget_m)) = matches.subcommand() else {
        panic!("no budget subcommand");
    };
    assert!(budgets::handle(&mut conn, &mut state, budget_m).is_err());

    assert_eq!(state.budgets.len(), 1);
    assert_eq!(state.budgets[0].limit, "500".parse::<Decimal>().unwrap());
    assert!(db::load_state(&conn).unwrap().budgets.is_empty());
}
