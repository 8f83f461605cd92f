// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::error::FinError;
use fintrack::models::{Category, Frequency, TxKind};
use fintrack::state::AppState;
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn transactions_get_unique_ids_and_can_be_deleted() {
    let mut state = AppState::default();
    let a = state
        .add_transaction(TxKind::Expense, d("5"), date("2024-01-01"), Category::Food, "tea")
        .unwrap()
        .id
        .clone();
    let b = state
        .add_transaction(TxKind::Expense, d("5"), date("2024-01-01"), Category::Food, "tea")
        .unwrap()
        .id
        .clone();
    assert_ne!(a, b);

    let removed = state.delete_transaction(&a).unwrap();
    assert_eq!(removed.id, a);
    assert_eq!(state.transactions.len(), 1);
    assert!(matches!(
        state.delete_transaction(&a),
        Err(FinError::NotFound { .. })
    ));
}

#[test]
fn negative_amounts_are_rejected() {
    let mut state = AppState::default();
    let r = state.add_transaction(TxKind::Income, d("-1"), date("2024-01-01"), Category::Gift, "");
    assert!(matches!(r, Err(FinError::Validation(_))));
    assert!(state.transactions.is_empty());
}

#[test]
fn budget_is_replaced_by_category() {
    let mut state = AppState::default();
    state.set_budget(Category::Food, d("100")).unwrap();
    state.set_budget(Category::Transport, d("50")).unwrap();
    state.set_budget(Category::Food, d("250")).unwrap();
    assert_eq!(state.budgets.len(), 2);
    let food = state
        .budgets
        .iter()
        .find(|b| b.category == Category::Food)
        .unwrap();
    assert_eq!(food.limit, d("250"));
    assert!(state.set_budget(Category::Salary, d("1")).is_err());
}

#[test]
fn subscriptions_toggle_and_delete() {
    let mut state = AppState::default();
    let id = state
        .add_subscription("Music", d("9.99"), Frequency::Monthly, date("2024-02-01"))
        .unwrap()
        .id
        .clone();
    assert!(state.subscriptions[0].is_active);
    assert!(!state.toggle_subscription(&id).unwrap());
    assert!(state.toggle_subscription(&id).unwrap());
    state.delete_subscription(&id).unwrap();
    assert!(state.subscriptions.is_empty());
    assert!(state.toggle_subscription(&id).is_err());
}

#[test]
fn malformed_import_leaves_state_untouched() {
    let mut state = AppState::default();
    state.set_budget(Category::Food, d("100")).unwrap();
    let before = state.clone();
    let err = state.import_json("{ not json").unwrap_err();
    assert!(matches!(err, FinError::InvalidFormat(_)));
    assert!(state.import_json(r#"{"transactions": 5}"#).is_err());
    assert_eq!(state, before);
}

#[test]
fn import_replaces_only_present_collections() {
    let mut state = AppState::default();
    state
        .add_transaction(TxKind::Expense, d("5"), date("2024-01-01"), Category::Food, "keep")
        .unwrap();
    state.set_budget(Category::Food, d("100")).unwrap();

    state
        .import_json(r#"{"budgets": [{"category": "Bill", "limit": 80}]}"#)
        .unwrap();
    assert_eq!(state.transactions.len(), 1);
    assert_eq!(state.budgets.len(), 1);
    assert_eq!(state.budgets[0].category, Category::Bill);
    assert_eq!(state.budgets[0].limit, d("80"));
}

#[test]
fn import_accepts_legacy_labels_and_numeric_amounts() {
    let blob = r#"{
        "profile": {"currency": "EUR", "startingBalance": 250.5},
        "transactions": [
            {"id": "a", "type": "EXPENSE", "amount": 12.5, "date": "2024-03-02", "category": "Yemek", "description": "Lunch"},
            {"id": "b", "type": "INCOME", "amount": 3000, "date": "2024-03-01", "category": "Maaş", "description": ""},
            {"id": "c", "type": "EXPENSE", "amount": 4, "date": "2024-03-03", "category": "Diğer", "description": ""},
            {"id": "d", "type": "EXPENSE", "amount": 1, "date": "2024-03-03", "category": "Crypto", "description": ""}
        ],
        "subscriptions": [
            {"id": "s", "name": "Cloud", "amount": 120, "frequency": "YEARLY", "lastPaymentDate": "2024-01-01", "isActive": true}
        ],
        "budgets": [
            {"category": "Yemek", "limit": 100},
            {"category": "Yemek", "limit": 150}
        ],
        "goals": [
            {"id": "g", "name": "Car", "targetAmount": 5000, "currentAmount": 100, "color": "bg-rose-500"}
        ]
    }"#;
    let mut state = AppState::default();
    state.import_json(blob).unwrap();
    assert_eq!(state.profile.starting_balance, d("250.5"));
    assert_eq!(state.transactions[0].category, Category::Food);
    assert_eq!(state.transactions[1].category, Category::Salary);
    assert_eq!(state.transactions[2].category, Category::Other);
    assert_eq!(state.transactions[3].category, Category::Other);
    assert_eq!(state.subscriptions[0].frequency, Frequency::Yearly);
    assert_eq!(state.budgets.len(), 1);
    assert_eq!(state.budgets[0].limit, d("150"));
    assert_eq!(state.goals[0].current_amount, d("100"));
}

#[test]
fn import_rejects_duplicate_ids_and_negative_amounts() {
    let mut state = AppState::default();
    state
        .add_transaction(TxKind::Expense, d("5"), date("2024-01-01"), Category::Food, "keep")
        .unwrap();
    let before = state.clone();

    let dup = r#"{"transactions": [
        {"id": "x", "type": "EXPENSE", "amount": 5, "date": "2024-03-01", "category": "Food"},
        {"id": "x", "type": "EXPENSE", "amount": 6, "date": "2024-03-02", "category": "Food"}
    ]}"#;
    let err = state.import_json(dup).unwrap_err();
    assert!(matches!(err, FinError::InvalidFormat(_)));
    assert_eq!(state, before);

    let negative = r#"{"transactions": [
        {"id": "x", "type": "EXPENSE", "amount": 5, "date": "2024-03-01", "category": "Food"},
        {"id": "y", "type": "EXPENSE", "amount": -7, "date": "2024-03-02", "category": "Food"}
    ]}"#;
    let err = state.import_json(negative).unwrap_err();
    assert!(matches!(err, FinError::InvalidFormat(_)));
    assert_eq!(state, before);

    let dup_goals = r#"{"goals": [
        {"id": "g", "name": "Car", "targetAmount": 10, "currentAmount": 0, "color": "bg-rose-500"},
        {"id": "g", "name": "Bike", "targetAmount": 10, "currentAmount": 0, "color": "bg-rose-500"}
    ]}"#;
    assert!(state.import_json(dup_goals).is_err());
    assert_eq!(state, before);
}
