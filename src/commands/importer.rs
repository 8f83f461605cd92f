// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::state::AppState;
use crate::utils::required;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => import_backup(conn, state, sub),
        _ => Ok(()),
    }
}

/// Collections present in the file replace the current ones; a malformed
/// file changes nothing.
fn import_backup(conn: &mut Connection, state: &mut AppState, sub: &clap::ArgMatches) -> Result<()> {
    let path = required(sub, "path")?;
    let text = std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
    if let Err(e) = state.import_json(&text) {
        tracing::warn!(path, error = %e, "import rejected");
        return Err(e).with_context(|| format!("Import {}", path));
    }
    db::save_state(conn, state)?;
    tracing::info!(path, "backup imported");
    println!("Imported data from {}", path);
    Ok(())
}
