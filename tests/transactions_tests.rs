// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::models::{Category, TxKind};
use fintrack::state::AppState;
use fintrack::{cli, commands::transactions, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> AppState {
    let mut state = AppState::default();
    for i in 1..=3 {
        state
            .add_transaction(
                TxKind::Expense,
                "10".parse().unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, i).unwrap(),
                Category::Food,
                &format!("Groceries {}", i),
            )
            .unwrap();
    }
    state
        .add_transaction(
            TxKind::Income,
            "900".parse().unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            Category::Salary,
            "Payroll",
        )
        .unwrap();
    state
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["fintrack", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    list_m.clone()
}

#[test]
fn list_limit_respected() {
    let state = setup();
    let rows = transactions::query_rows(&state, &list_matches(&["--month", "2025-01", "--limit", "2"]))
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-01-03");
}

#[test]
fn list_filters_by_month_and_search() {
    let state = setup();
    let rows = transactions::query_rows(&state, &list_matches(&["--month", "2025-02"])).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, "income");

    let rows = transactions::query_rows(
        &state,
        &list_matches(&["--month", "2025-01", "--search", "groceries 2"]),
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Groceries 2");
    assert_eq!(rows[0].amount, "10.00");
}

#[test]
fn add_and_remove_persist() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let mut state = AppState::default();

    let matches = cli::build_cli().get_matches_from([
        "fintrack", "tx", "add", "--type", "expense", "--amount", "42.10", "--category",
        "Transport", "--date", "2025-03-09", "--desc", "Taxi",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&mut conn, &mut state, tx_m).unwrap();

    let loaded = db::load_state(&conn).unwrap();
    assert_eq!(loaded.transactions.len(), 1);
    let t = &loaded.transactions[0];
    assert_eq!(t.category, Category::Transport);
    assert_eq!(t.amount, "42.10".parse::<Decimal>().unwrap());
    assert_eq!(t.description, "Taxi");

    let id = t.id.clone();
    let matches = cli::build_cli().get_matches_from(["fintrack", "tx", "rm", id.as_str()]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&mut conn, &mut state, tx_m).unwrap();
    assert!(db::load_state(&conn).unwrap().transactions.is_empty());
}

#[test]
fn add_rejects_bad_type() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let mut state = AppState::default();
    let matches = cli::build_cli().get_matches_from([
        "fintrack", "tx", "add", "--type", "transfer", "--amount", "1", "-c", "Food",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    assert!(transactions::handle(&mut conn, &mut state, tx_m).is_err());
    assert!(state.transactions.is_empty());
}

#[test]
fn add_rejects_unknown_category() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let mut state = AppState::default();
    let matches = cli::build_cli().get_matches_from([
        "fintrack", "tx", "add", "--type", "expense", "--amount", "5", "-c", "Fodo",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let err = transactions::handle(&mut conn, &mut state, tx_m).unwrap_err();
    assert!(err.to_string().contains("unknown category"));
    assert!(state.transactions.is_empty());
    assert!(db::load_state(&conn).unwrap().transactions.is_empty());
}

#[test]
fn add_accepts_localized_category() {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let mut state = AppState::default();
    let matches = cli::build_cli().get_matches_from([
        "fintrack", "tx", "add", "--type", "expense", "--amount", "5", "-c", "Ulaşım",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    transactions::handle(&mut conn, &mut state, tx_m).unwrap();
    assert_eq!(state.transactions[0].category, Category::Transport);
}

#[test]
fn add_requires_category() {
    let res = cli::build_cli().try_get_matches_from([
        "fintrack", "tx", "add", "--type", "expense", "--amount", "5",
    ]);
    assert!(res.is_err());
}
