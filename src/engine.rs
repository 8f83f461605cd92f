// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived aggregates over the raw collections.
//!
//! Everything here is a pure function of its inputs. Nothing is cached or
//! stored; callers recompute whenever the active month or a collection
//! changes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{FinError, FinResult};
use crate::models::{
    Budget, Category, Frequency, MonthKey, SavingsGoal, Subscription, Transaction, TxKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub subscription_cost: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Utilization {
    pub category: Category,
    pub spent: Decimal,
    pub limit: Decimal,
    /// `spent / limit`, capped at 1.
    pub ratio: Decimal,
}

impl Utilization {
    pub fn overspent(&self) -> bool {
        self.spent > self.limit
    }
}

pub fn filter_by_month(transactions: &[Transaction], month: MonthKey) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| month.contains(t.date))
        .cloned()
        .collect()
}

fn sum_kind(transactions: &[Transaction], kind: TxKind) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Monthly-equivalent cost of one subscription.
pub fn monthly_equivalent(sub: &Subscription) -> Decimal {
    match sub.frequency {
        Frequency::Monthly => sub.amount,
        Frequency::Yearly => sub.amount / Decimal::from(12),
    }
}

pub fn subscription_cost(subscriptions: &[Subscription]) -> Decimal {
    subscriptions
        .iter()
        .filter(|s| s.is_active)
        .map(monthly_equivalent)
        .sum()
}

pub fn active_subscriptions(subscriptions: &[Subscription]) -> usize {
    subscriptions.iter().filter(|s| s.is_active).count()
}

/// Subscriptions are subtracted as a projected outflow even when the user
/// also logs the actual payment as an expense.
pub fn compute_totals(
    month_transactions: &[Transaction],
    subscriptions: &[Subscription],
    starting_balance: Decimal,
) -> Totals {
    let income = sum_kind(month_transactions, TxKind::Income);
    let expense = sum_kind(month_transactions, TxKind::Expense);
    let subscription_cost = subscription_cost(subscriptions);
    Totals {
        income,
        expense,
        subscription_cost,
        balance: starting_balance + income - expense - subscription_cost,
    }
}

pub fn category_breakdown(transactions: &[Transaction]) -> BTreeMap<Category, Decimal> {
    let mut agg: BTreeMap<Category, Decimal> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.kind == TxKind::Expense) {
        *agg.entry(t.category).or_insert(Decimal::ZERO) += t.amount;
    }
    agg.retain(|_, v| !v.is_zero());
    agg
}

/// One entry per calendar day of `month`, zero-filled.
pub fn daily_trend(transactions: &[Transaction], month: MonthKey) -> Vec<(u32, Decimal)> {
    let days = month.days_in_month();
    let mut series: Vec<(u32, Decimal)> = (1..=days).map(|d| (d, Decimal::ZERO)).collect();
    for t in transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense && month.contains(t.date))
    {
        let idx = chrono::Datelike::day(&t.date) as usize - 1;
        if let Some(slot) = series.get_mut(idx) {
            slot.1 += t.amount;
        }
    }
    series
}

pub fn budget_utilization(budget: &Budget, month_transactions: &[Transaction]) -> Utilization {
    let spent: Decimal = month_transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense && t.category == budget.category)
        .map(|t| t.amount)
        .sum();
    let ratio = if budget.limit <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        (spent / budget.limit).min(Decimal::ONE)
    };
    Utilization {
        category: budget.category,
        spent,
        limit: budget.limit,
        ratio,
    }
}

/// Uncapped, so an overfunded goal reports more than 1.
pub fn goal_progress(goal: &SavingsGoal) -> Decimal {
    if goal.target_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    goal.current_amount / goal.target_amount
}

/// Case-insensitive match against description or category label.
pub fn search(transactions: &[Transaction], term: &str) -> Vec<Transaction> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return transactions.to_vec();
    }
    transactions
        .iter()
        .filter(|t| {
            t.description.to_lowercase().contains(&needle)
                || t.category.label().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Newest date first; transactions within a date keep input order.
pub fn group_by_date(transactions: &[Transaction]) -> Vec<(NaiveDate, Vec<Transaction>)> {
    let mut groups: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
    for t in transactions {
        groups.entry(t.date).or_default().push(t.clone());
    }
    groups.into_iter().rev().collect()
}

/// Both halves of a goal transfer. Apply them together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub goal: SavingsGoal,
    pub transaction: Transaction,
}

/// Positive amounts deposit into the goal (an expense against the balance),
/// negative amounts withdraw from it (an income).
pub fn contribute(
    goal: &SavingsGoal,
    signed_amount: Decimal,
    today: NaiveDate,
) -> FinResult<Contribution> {
    if signed_amount.is_zero() {
        return Err(FinError::ZeroContribution);
    }
    let (kind, description) = if signed_amount > Decimal::ZERO {
        (TxKind::Expense, format!("Transfer to {} goal", goal.name))
    } else {
        (TxKind::Income, format!("Withdrawal from {} goal", goal.name))
    };
    let mut updated = goal.clone();
    updated.current_amount += signed_amount;
    Ok(Contribution {
        goal: updated,
        transaction: Transaction {
            id: Uuid::new_v4().to_string(),
            kind,
            amount: signed_amount.abs(),
            date: today,
            category: Category::Other,
            description,
        },
    })
}
