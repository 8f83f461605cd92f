// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fintrack::{cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;
    let mut state = db::load_state(&conn)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            db::save_state(&mut conn, &state)?;
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("profile", sub)) => commands::profile::handle(&mut conn, &mut state, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut conn, &mut state, sub)?,
        Some(("sub", sub)) => commands::subscriptions::handle(&mut conn, &mut state, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&mut conn, &mut state, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut conn, &mut state, sub)?,
        Some(("report", sub)) => commands::reports::handle(&state, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&state, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut conn, &mut state, sub)?,
        Some(("tip", sub)) => commands::tip::handle(&state, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
