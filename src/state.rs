// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{self, Contribution};
use crate::error::{FinError, FinResult};
use crate::models::{
    Budget, Category, Currency, Frequency, GOAL_COLORS, Profile, SavingsGoal, Subscription,
    Transaction, TxKind,
};

/// The five top-level collections. Owned by the caller and handed to the
/// engine by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    pub profile: Profile,
    pub transactions: Vec<Transaction>,
    pub subscriptions: Vec<Subscription>,
    pub budgets: Vec<Budget>,
    pub goals: Vec<SavingsGoal>,
}

/// Backup blob. Collections missing from an imported blob are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriptions: Option<Vec<Subscription>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budgets: Option<Vec<Budget>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<SavingsGoal>>,
}

impl Snapshot {
    /// Parses and validates; only a blob that passes both is returned.
    pub fn parse(text: &str) -> FinResult<Self> {
        let snap: Snapshot =
            serde_json::from_str(text).map_err(|e| FinError::InvalidFormat(e.to_string()))?;
        snap.validate()?;
        Ok(snap)
    }

    /// IDs are unique within each collection and transaction amounts are
    /// non-negative.
    pub fn validate(&self) -> FinResult<()> {
        if let Some(txs) = &self.transactions {
            unique_ids("transaction", txs.iter().map(|t| t.id.as_str()))?;
            if let Some(t) = txs.iter().find(|t| t.amount < Decimal::ZERO) {
                return Err(FinError::InvalidFormat(format!(
                    "transaction {} has negative amount {}",
                    t.id, t.amount
                )));
            }
        }
        if let Some(subs) = &self.subscriptions {
            unique_ids("subscription", subs.iter().map(|s| s.id.as_str()))?;
        }
        if let Some(goals) = &self.goals {
            unique_ids("goal", goals.iter().map(|g| g.id.as_str()))?;
        }
        Ok(())
    }
}

fn unique_ids<'a>(entity: &str, ids: impl Iterator<Item = &'a str>) -> FinResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(FinError::InvalidFormat(format!("duplicate {} id '{}'", entity, id)));
        }
    }
    Ok(())
}

fn require_non_negative(what: &str, amount: Decimal) -> FinResult<()> {
    if amount.is_sign_negative() {
        return Err(FinError::Validation(format!("{} must not be negative", what)));
    }
    Ok(())
}

fn require_name(what: &str, name: &str) -> FinResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FinError::Validation(format!("{} is required", what)));
    }
    Ok(name.to_string())
}

impl AppState {
    pub fn add_transaction(
        &mut self,
        kind: TxKind,
        amount: Decimal,
        date: NaiveDate,
        category: Category,
        description: &str,
    ) -> FinResult<&Transaction> {
        require_non_negative("amount", amount)?;
        self.transactions.push(Transaction {
            id: Uuid::new_v4().to_string(),
            kind,
            amount,
            date,
            category,
            description: description.trim().to_string(),
        });
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    pub fn delete_transaction(&mut self, id: &str) -> FinResult<Transaction> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| FinError::NotFound {
                entity: "Transaction",
                id: id.to_string(),
            })?;
        Ok(self.transactions.remove(pos))
    }

    pub fn add_subscription(
        &mut self,
        name: &str,
        amount: Decimal,
        frequency: Frequency,
        last_payment_date: NaiveDate,
    ) -> FinResult<&Subscription> {
        let name = require_name("subscription name", name)?;
        require_non_negative("amount", amount)?;
        self.subscriptions.push(Subscription {
            id: Uuid::new_v4().to_string(),
            name,
            amount,
            frequency,
            last_payment_date,
            is_active: true,
        });
        Ok(&self.subscriptions[self.subscriptions.len() - 1])
    }

    /// Flips `is_active` and returns the new value.
    pub fn toggle_subscription(&mut self, id: &str) -> FinResult<bool> {
        let sub = self
            .subscriptions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| FinError::NotFound {
                entity: "Subscription",
                id: id.to_string(),
            })?;
        sub.is_active = !sub.is_active;
        Ok(sub.is_active)
    }

    pub fn delete_subscription(&mut self, id: &str) -> FinResult<Subscription> {
        let pos = self
            .subscriptions
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| FinError::NotFound {
                entity: "Subscription",
                id: id.to_string(),
            })?;
        Ok(self.subscriptions.remove(pos))
    }

    /// Replaces any existing limit for the category.
    pub fn set_budget(&mut self, category: Category, limit: Decimal) -> FinResult<()> {
        if !category.budgetable() {
            return Err(FinError::Validation(format!(
                "category '{}' cannot have a budget",
                category
            )));
        }
        require_non_negative("limit", limit)?;
        self.budgets.retain(|b| b.category != category);
        self.budgets.push(Budget { category, limit });
        Ok(())
    }

    pub fn add_goal(&mut self, name: &str, target_amount: Decimal) -> FinResult<&SavingsGoal> {
        let name = require_name("goal name", name)?;
        if target_amount <= Decimal::ZERO {
            return Err(FinError::Validation(
                "target amount must be positive".to_string(),
            ));
        }
        let color = GOAL_COLORS[self.goals.len() % GOAL_COLORS.len()].to_string();
        self.goals.push(SavingsGoal {
            id: Uuid::new_v4().to_string(),
            name,
            target_amount,
            current_amount: Decimal::ZERO,
            color,
        });
        Ok(&self.goals[self.goals.len() - 1])
    }

    pub fn find_goal(&self, id_or_name: &str) -> FinResult<&SavingsGoal> {
        let key = id_or_name.trim();
        self.goals
            .iter()
            .find(|g| g.id == key)
            .or_else(|| self.goals.iter().find(|g| g.name.eq_ignore_ascii_case(key)))
            .ok_or_else(|| FinError::NotFound {
                entity: "Goal",
                id: key.to_string(),
            })
    }

    /// Moves money into (positive) or out of (negative) a goal. The goal
    /// update and its synthetic transaction are applied together.
    pub fn contribute(
        &mut self,
        goal_id: &str,
        signed_amount: Decimal,
        today: NaiveDate,
    ) -> FinResult<Contribution> {
        let goal = self.find_goal(goal_id)?;
        let contribution = engine::contribute(goal, signed_amount, today)?;
        let id = contribution.goal.id.clone();
        if let Some(slot) = self.goals.iter_mut().find(|g| g.id == id) {
            *slot = contribution.goal.clone();
        }
        self.transactions.push(contribution.transaction.clone());
        Ok(contribution)
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.profile.currency = currency;
    }

    pub fn set_starting_balance(&mut self, balance: Decimal) {
        self.profile.starting_balance = balance;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            profile: Some(self.profile.clone()),
            transactions: Some(self.transactions.clone()),
            subscriptions: Some(self.subscriptions.clone()),
            budgets: Some(self.budgets.clone()),
            goals: Some(self.goals.clone()),
        }
    }

    /// Replaces each collection present in the snapshot wholesale.
    pub fn apply_snapshot(&mut self, snap: Snapshot) {
        if let Some(p) = snap.profile {
            self.profile = p;
        }
        if let Some(t) = snap.transactions {
            self.transactions = t;
        }
        if let Some(s) = snap.subscriptions {
            self.subscriptions = s;
        }
        if let Some(b) = snap.budgets {
            // later entries win, matching set_budget
            let mut deduped: Vec<Budget> = Vec::with_capacity(b.len());
            for budget in b {
                deduped.retain(|x| x.category != budget.category);
                deduped.push(budget);
            }
            self.budgets = deduped;
        }
        if let Some(g) = snap.goals {
            self.goals = g;
        }
    }

    /// Parses and validates first; on a bad blob the state is left untouched.
    pub fn import_json(&mut self, text: &str) -> FinResult<()> {
        let snap = Snapshot::parse(text)?;
        self.apply_snapshot(snap);
        Ok(())
    }

    pub fn export_json(&self) -> FinResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| FinError::InvalidFormat(e.to_string()))
    }
}
