// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .short('m')
        .help("Month as YYYY-MM (default: current month)")
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .about("Track income, expenses, subscriptions, budgets, and savings goals")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("profile")
                .about("Currency and starting balance")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("currency").arg(
                        Arg::new("currency")
                            .required(true)
                            .help("TL|USD|EUR|GBP"),
                    ),
                )
                .subcommand(
                    Command::new("balance").arg(
                        Arg::new("amount")
                            .required(true)
                            .allow_hyphen_values(true),
                    ),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Income and expense transactions")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .short('t')
                                .required(true)
                                .help("income|expense"),
                        )
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .short('c')
                                .required(true),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .short('d')
                                .help("YYYY-MM-DD (default: today)"),
                        )
                        .arg(Arg::new("description").long("desc").default_value("")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(month_arg())
                        .arg(Arg::new("search").long("search").short('s'))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("sub")
                .about("Recurring subscriptions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("frequency")
                                .long("frequency")
                                .short('f')
                                .default_value("monthly")
                                .help("monthly|yearly"),
                        )
                        .arg(
                            Arg::new("last-paid")
                                .long("last-paid")
                                .help("YYYY-MM-DD (default: today)"),
                        ),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("toggle").arg(Arg::new("id").required(true)))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly spending limits per category")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").short('c').required(true))
                        .arg(Arg::new("limit").long("limit").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(json_flags(Command::new("report").arg(month_arg()))),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true)),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("deposit")
                        .arg(Arg::new("goal").required(true).help("Goal id or name"))
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(
                    Command::new("withdraw")
                        .arg(Arg::new("goal").required(true).help("Goal id or name"))
                        .arg(Arg::new("amount").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly aggregates")
                .subcommand(json_flags(Command::new("summary").arg(month_arg())))
                .subcommand(json_flags(Command::new("categories").arg(month_arg())))
                .subcommand(json_flags(Command::new("trend").arg(month_arg()))),
        )
        .subcommand(
            Command::new("export")
                .about("Write data to a file")
                .subcommand(
                    Command::new("backup")
                        .about("Full JSON backup of all collections")
                        .arg(Arg::new("out").long("out").short('o').required(true)),
                )
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").short('o').required(true)),
                ),
        )
        .subcommand(
            Command::new("import").about("Restore from a file").subcommand(
                Command::new("backup")
                    .arg(Arg::new("path").required(true).help("Backup JSON file")),
            ),
        )
        .subcommand(
            Command::new("tip")
                .about("Ask the assistant for a short tip about a month")
                .arg(month_arg()),
        )
}
