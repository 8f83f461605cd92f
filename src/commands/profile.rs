// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::models::Currency;
use crate::state::AppState;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table, required};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, state: &mut AppState, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &state.profile)? {
                let rows = vec![
                    vec!["Currency".to_string(), state.profile.currency.to_string()],
                    vec![
                        "Starting balance".to_string(),
                        fmt_money(
                            &state.profile.starting_balance,
                            state.profile.currency.code(),
                        ),
                    ],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("currency", sub)) => {
            let ccy: Currency = required(sub, "currency")?.parse()?;
            state.set_currency(ccy);
            db::save_state(conn, state)?;
            println!("Currency set to {}", ccy);
        }
        Some(("balance", sub)) => {
            let amount = parse_decimal(required(sub, "amount")?)?;
            state.set_starting_balance(amount);
            db::save_state(conn, state)?;
            println!("Starting balance set to {}", amount);
        }
        _ => {}
    }
    Ok(())
}
