// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::engine;
use fintrack::error::FinError;
use fintrack::models::{Category, GOAL_COLORS, MonthKey, TxKind};
use fintrack::state::AppState;
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

fn state_with_goal() -> (AppState, String) {
    let mut state = AppState::default();
    let id = state.add_goal("House", d("10000")).unwrap().id.clone();
    (state, id)
}

#[test]
fn deposit_moves_money_and_records_expense() {
    let (state, id) = state_with_goal();
    let goal = state.find_goal(&id).unwrap();
    let c = engine::contribute(goal, d("500"), today()).unwrap();
    assert_eq!(c.goal.current_amount, d("500"));
    assert_eq!(c.transaction.kind, TxKind::Expense);
    assert_eq!(c.transaction.amount, d("500"));
    assert_eq!(c.transaction.category, Category::Other);
    assert_eq!(c.transaction.date, today());
    assert!(c.transaction.description.contains("House"));
    // input goal untouched
    assert_eq!(goal.current_amount, Decimal::ZERO);
}

#[test]
fn withdrawal_records_income() {
    let (state, id) = state_with_goal();
    let goal = state.find_goal(&id).unwrap();
    let c = engine::contribute(goal, d("-500"), today()).unwrap();
    assert_eq!(c.goal.current_amount, d("-500"));
    assert_eq!(c.transaction.kind, TxKind::Income);
    assert_eq!(c.transaction.amount, d("500"));
}

#[test]
fn zero_contribution_is_rejected() {
    let (state, id) = state_with_goal();
    let goal = state.find_goal(&id).unwrap();
    assert!(matches!(
        engine::contribute(goal, Decimal::ZERO, today()),
        Err(FinError::ZeroContribution)
    ));
}

#[test]
fn state_applies_both_halves_together() {
    let (mut state, id) = state_with_goal();
    state.set_starting_balance(d("2000"));
    state.contribute(&id, d("750"), today()).unwrap();
    state.contribute("house", d("-250"), today()).unwrap();

    let goal = state.find_goal(&id).unwrap();
    assert_eq!(goal.current_amount, d("500"));
    assert_eq!(state.transactions.len(), 2);

    let june = MonthKey::of(today());
    let in_month = engine::filter_by_month(&state.transactions, june);
    let totals = engine::compute_totals(&in_month, &[], state.profile.starting_balance);
    assert_eq!(totals.balance + goal.current_amount, d("2000"));
}

#[test]
fn failed_contribution_leaves_state_alone() {
    let (mut state, id) = state_with_goal();
    let before = state.clone();
    assert!(state.contribute(&id, Decimal::ZERO, today()).is_err());
    assert!(state.contribute("missing", d("10"), today()).is_err());
    assert_eq!(state, before);
}

#[test]
fn goal_colors_cycle() {
    let mut state = AppState::default();
    for i in 0..6 {
        state.add_goal(&format!("g{}", i), d("1")).unwrap();
    }
    assert_eq!(state.goals[0].color, GOAL_COLORS[0]);
    assert_eq!(state.goals[4].color, GOAL_COLORS[4]);
    assert_eq!(state.goals[5].color, GOAL_COLORS[0]);
    assert!(state.add_goal("bad", Decimal::ZERO).is_err());
    assert!(state.add_goal("  ", d("5")).is_err());
}
