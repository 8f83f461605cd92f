// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::state::AppState;
use crate::utils::required;
use anyhow::{Context, Result, bail};
use serde_json::json;

pub fn handle(state: &AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("backup", sub)) => export_backup(state, sub),
        Some(("transactions", sub)) => export_transactions(state, sub),
        _ => Ok(()),
    }
}

fn export_backup(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let out = required(sub, "out")?;
    let text = state.export_json()?;
    std::fs::write(out, text).with_context(|| format!("Write backup to {}", out))?;
    tracing::info!(path = out, transactions = state.transactions.len(), "backup written");
    println!("Exported backup to {}", out);
    Ok(())
}

fn export_transactions(state: &AppState, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;

    let mut items = state.transactions.clone();
    items.sort_by(|a, b| a.date.cmp(&b.date));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "type", "amount", "category", "description"])?;
            for t in &items {
                wtr.write_record([
                    t.id.clone(),
                    t.date.to_string(),
                    t.kind.to_string(),
                    t.amount.to_string(),
                    t.category.label().to_string(),
                    t.description.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let rows: Vec<serde_json::Value> = items
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id, "date": t.date, "type": t.kind.to_string(),
                        "amount": t.amount.to_string(), "category": t.category.label(),
                        "description": t.description
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
