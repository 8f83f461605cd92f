// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

use crate::state::AppState;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.fintrack", "FinTrack", "fintrack"));

pub const DB_ENV: &str = "FINTRACK_DB";

pub const KEY_PROFILE: &str = "fin_profile";
pub const KEY_TRANSACTIONS: &str = "fin_transactions";
pub const KEY_SUBSCRIPTIONS: &str = "fin_subscriptions";
pub const KEY_BUDGETS: &str = "fin_budgets";
pub const KEY_GOALS: &str = "fin_goals";

pub fn db_path() -> Result<PathBuf> {
    if let Ok(p) = std::env::var(DB_ENV) {
        let p = p.trim();
        if !p.is_empty() {
            return Ok(PathBuf::from(p));
        }
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("fintrack.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS collections(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

pub fn get_raw(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM collections WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn put_raw(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO collections(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// Missing or unparsable entries fall back to `T::default()`.
fn load_or_default<T: DeserializeOwned + Default>(conn: &Connection, key: &str) -> Result<T> {
    let Some(raw) = get_raw(conn, key)? else {
        return Ok(T::default());
    };
    match serde_json::from_str::<T>(&raw) {
        Ok(v) => Ok(v),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored collection is malformed; using default");
            Ok(T::default())
        }
    }
}

fn store<T: Serialize>(conn: &Connection, key: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string(value).with_context(|| format!("Serialize {}", key))?;
    put_raw(conn, key, &text)
}

pub fn load_state(conn: &Connection) -> Result<AppState> {
    let state = AppState {
        profile: load_or_default(conn, KEY_PROFILE)?,
        transactions: load_or_default(conn, KEY_TRANSACTIONS)?,
        subscriptions: load_or_default(conn, KEY_SUBSCRIPTIONS)?,
        budgets: load_or_default(conn, KEY_BUDGETS)?,
        goals: load_or_default(conn, KEY_GOALS)?,
    };
    tracing::debug!(
        transactions = state.transactions.len(),
        subscriptions = state.subscriptions.len(),
        budgets = state.budgets.len(),
        goals = state.goals.len(),
        "state loaded"
    );
    Ok(state)
}

/// Writes all five collections in one SQLite transaction.
pub fn save_state(conn: &mut Connection, state: &AppState) -> Result<()> {
    let tx = conn.transaction()?;
    store(&tx, KEY_PROFILE, &state.profile)?;
    store(&tx, KEY_TRANSACTIONS, &state.transactions)?;
    store(&tx, KEY_SUBSCRIPTIONS, &state.subscriptions)?;
    store(&tx, KEY_BUDGETS, &state.budgets)?;
    store(&tx, KEY_GOALS, &state.goals)?;
    tx.commit()?;
    tracing::debug!("state saved");
    Ok(())
}
