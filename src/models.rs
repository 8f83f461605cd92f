// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TxKind {
    Income,
    Expense,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxKind::Income => f.write_str("income"),
            TxKind::Expense => f.write_str("expense"),
        }
    }
}

impl FromStr for TxKind {
    type Err = FinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TxKind::Income),
            "expense" | "out" => Ok(TxKind::Expense),
            other => Err(FinError::Validation(format!(
                "unknown transaction type '{}' (use income|expense)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Monthly,
    Yearly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Monthly => f.write_str("monthly"),
            Frequency::Yearly => f.write_str("yearly"),
        }
    }
}

impl FromStr for Frequency {
    type Err = FinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Frequency::Monthly),
            "yearly" | "annual" => Ok(Frequency::Yearly),
            other => Err(FinError::Validation(format!(
                "unknown frequency '{}' (use monthly|yearly)",
                other
            ))),
        }
    }
}

/// Fixed set of transaction categories.
///
/// Labels written by older backups in the localized form are accepted as
/// aliases. Anything else deserializes as [`Category::Other`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    #[serde(alias = "Yemek")]
    Food,
    #[serde(alias = "Ulaşım")]
    Transport,
    #[serde(alias = "Alışveriş")]
    Shopping,
    #[serde(alias = "Eğlence")]
    Entertainment,
    #[serde(alias = "Sağlık")]
    Health,
    #[serde(alias = "Fatura")]
    Bill,
    #[serde(alias = "Maaş")]
    Salary,
    Freelance,
    #[serde(alias = "Hediye/Diğer")]
    Gift,
    /// Also the fallback for unrecognized labels, including `Diğer`.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMeta {
    pub color: &'static str,
    pub icon: &'static str,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::Health,
        Category::Bill,
        Category::Other,
        Category::Salary,
        Category::Freelance,
        Category::Gift,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Bill => "Bill",
            Category::Other => "Other",
            Category::Salary => "Salary",
            Category::Freelance => "Freelance",
            Category::Gift => "Gift",
        }
    }

    pub fn meta(&self) -> CategoryMeta {
        let (color, icon) = match self {
            Category::Food => ("bg-orange-500", "🍴"),
            Category::Transport => ("bg-blue-500", "🚗"),
            Category::Shopping => ("bg-pink-500", "🛍️"),
            Category::Entertainment => ("bg-purple-500", "🎬"),
            Category::Health => ("bg-red-500", "🏥"),
            Category::Bill => ("bg-yellow-500", "⚡"),
            Category::Other => ("bg-slate-500", "📦"),
            Category::Salary => ("bg-emerald-500", "💰"),
            Category::Freelance => ("bg-teal-500", "💻"),
            Category::Gift => ("bg-cyan-500", "🎁"),
        };
        CategoryMeta { color, icon }
    }

    /// Salary cannot carry a spending limit.
    pub fn budgetable(&self) -> bool {
        !matches!(self, Category::Salary)
    }

    /// Lenient lookup for stored data: unknown labels map to `Other`.
    pub fn from_label(s: &str) -> Category {
        s.parse().unwrap_or(Category::Other)
    }
}

/// Localized label of `Other`; serde reaches it through the catch-all.
const OTHER_ALIAS: &str = "Diğer";

/// Strict parse for user input: canonical labels (any case) and their
/// localized aliases only.
impl FromStr for Category {
    type Err = FinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(needle))
            .or_else(|| (needle == OTHER_ALIAS).then_some(Category::Other))
            .or_else(|| {
                // `#[serde(other)]` swallows unknown names, so only a named variant counts.
                serde_json::from_value::<Category>(serde_json::Value::String(needle.to_string()))
                    .ok()
                    .filter(|c| *c != Category::Other)
            })
            .ok_or_else(|| {
                let known: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
                FinError::Validation(format!(
                    "unknown category '{}' (use {})",
                    needle,
                    known.join("|")
                ))
            })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Category,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub frequency: Frequency,
    pub last_payment_date: NaiveDate,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub category: Category,
    pub limit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub color: String,
}

pub const GOAL_COLORS: [&str; 5] = [
    "bg-indigo-500",
    "bg-emerald-500",
    "bg-amber-500",
    "bg-rose-500",
    "bg-cyan-500",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    TL,
    USD,
    EUR,
    GBP,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::TL, Currency::USD, Currency::EUR, Currency::GBP];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::TL => "TL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = FinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let up = s.trim().to_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == up)
            .ok_or_else(|| {
                FinError::Validation(format!("unsupported currency '{}' (use TL|USD|EUR|GBP)", s))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub currency: Currency,
    pub starting_balance: Decimal,
}

/// A calendar month, e.g. `2024-03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Result<Self, FinError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(FinError::InvalidMonth(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .and_then(|next| u32::try_from(next.signed_duration_since(first).num_days()).ok())
            .unwrap_or(31)
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = FinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || FinError::InvalidMonth(s.to_string());
        let (y, m) = s.split_once('-').ok_or_else(bad)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(bad());
        }
        let year: i32 = y.parse().map_err(|_| bad())?;
        let month: u32 = m.parse().map_err(|_| bad())?;
        MonthKey::new(year, month).map_err(|_| bad())
    }
}
