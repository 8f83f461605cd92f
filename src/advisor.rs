// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Short spending tip from a hosted text-generation model.
//!
//! The tip is advisory only. Every failure path ends in a fixed fallback
//! string, so callers never see an error from here.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

use crate::engine::{self, Totals};
use crate::models::{MonthKey, Profile, Subscription, Transaction, TxKind};

pub const FALLBACK_UNAVAILABLE: &str = "No analysis is available right now.";
pub const FALLBACK_BUSY: &str = "Your financial assistant is busy at the moment.";

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone, Default)]
pub struct AdvisorConfig {
    pub api_key: Option<String>,
    pub model: String,
}

impl AdvisorConfig {
    /// `GEMINI_API_KEY` (or `API_KEY`) and `FINTRACK_TIP_MODEL`.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        let model = std::env::var("FINTRACK_TIP_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self { api_key, model }
    }
}

pub fn build_prompt(
    month: MonthKey,
    month_transactions: &[Transaction],
    subscriptions: &[Subscription],
    profile: &Profile,
    totals: &Totals,
) -> String {
    let ccy = profile.currency.code();
    let expenses: Vec<serde_json::Value> = month_transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense)
        .map(|t| json!({ "c": t.category.label(), "a": t.amount }))
        .collect();
    let details = serde_json::Value::Array(expenses).to_string();
    format!(
        "Analyse the user's financial summary for {month} and give a very short, \
actionable tip in 2-3 sentences.\n\
Data:\n\
- Starting balance: {start} {ccy}\n\
- Total income: {income} {ccy}\n\
- Total expense: {expense} {ccy}\n\
- Active subscriptions: {subs}\n\
- Expense details: {details}\n\
Use a plain, friendly and motivating tone. Warn if spending exceeds income, \
and point out room for saving if there is any.",
        start = profile.starting_balance,
        income = totals.income,
        expense = totals.expense,
        subs = engine::active_subscriptions(subscriptions),
    )
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Concatenated text of the first candidate, if any.
pub fn extract_text(body: &str) -> Result<Option<String>> {
    let resp: GenerateResponse =
        serde_json::from_str(body).context("Unexpected response from text service")?;
    let text = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    Ok(text)
}

fn request_tip(cfg: &AdvisorConfig, api_key: &str, prompt: &str) -> Result<Option<String>> {
    let client = crate::utils::http_client()?;
    let url = format!("{}/{}:generateContent", ENDPOINT, cfg.model);
    let body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": { "temperature": 0.7, "maxOutputTokens": 200 }
    });
    let resp = client
        .post(url)
        .query(&[("key", api_key)])
        .json(&body)
        .send()?
        .error_for_status()?;
    let text = resp.text()?;
    extract_text(&text)
}

/// Never fails: a missing key, transport error or empty answer yields a
/// fallback string.
pub fn tip(cfg: &AdvisorConfig, prompt: &str) -> String {
    let Some(key) = cfg.api_key.as_deref() else {
        tracing::info!("no API key configured; using fallback tip");
        return FALLBACK_UNAVAILABLE.to_string();
    };
    match request_tip(cfg, key, prompt) {
        Ok(Some(text)) => text,
        Ok(None) => FALLBACK_UNAVAILABLE.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "tip request failed");
            FALLBACK_BUSY.to_string()
        }
    }
}
