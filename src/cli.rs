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
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn period_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("period")
            .long("period")
            .value_name("1m|3m|6m|1y|all")
            .help("Relative period ending today (default: all)"),
    )
    .arg(
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .requires("to")
            .conflicts_with("period")
            .help("Custom range start"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .requires("from")
            .conflicts_with("period")
            .help("Custom range end"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

fn apply_args(cmd: Command) -> Command {
    cmd.arg(id_arg())
        .arg(
            Arg::new("op")
                .long("op")
                .required(true)
                .value_name("add|subtract")
                .help("Add to or subtract from the amount"),
        )
        .arg(
            Arg::new("amount")
                .long("amount")
                .required(true)
                .help("Positive decimal delta"),
        )
}

fn profile_cmd() -> Command {
    Command::new("profile")
        .about("Manage the signed-in user")
        .subcommand(
            Command::new("signup")
                .about("Create a profile and sign in")
                .arg(Arg::new("user").required(true).help("User id"))
                .arg(Arg::new("email").required(true).help("Email address"))
                .arg(
                    Arg::new("name")
                        .long("name")
                        .help("Display name (defaults to the user id)"),
                ),
        )
        .subcommand(
            Command::new("signin")
                .about("Sign in as an existing user")
                .arg(Arg::new("user").required(true).help("User id")),
        )
        .subcommand(Command::new("signout").about("Sign out the current user"))
        .subcommand(Command::new("show").about("Show the signed-in profile"))
}

fn config_cmd() -> Command {
    Command::new("config")
        .about("Read or change preferences")
        .subcommand(
            Command::new("theme")
                .about("Show or set the UI theme preference")
                .arg(Arg::new("value").value_name("system|light|dark")),
        )
        .subcommand(
            Command::new("currency")
                .about("Show or set the default currency")
                .arg(Arg::new("code").value_name("USD|UZS|EUR|RUB")),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and inspect transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .help("Category title (free text; known titles get icons)"),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .default_value("income")
                        .value_name("income|expense"),
                )
                .arg(
                    Arg::new("currency")
                        .long("currency")
                        .help("Defaults to the configured default currency"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .help("Defaults to today"),
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Defaults to the category title"),
                )
                .arg(Arg::new("comment").long("comment")),
        )
        .subcommand(json_flags(period_args(
            Command::new("list")
                .about("List transactions, newest first")
                .arg(Arg::new("kind").long("kind").value_name("income|expense"))
                .arg(Arg::new("currency").long("currency"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        )))
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("scan")
                .about("Record an expense from a decoded QR payload")
                .arg(Arg::new("payload").help("KEY=VALUE lines (AMOUNT, COMMENT)"))
                .arg(
                    Arg::new("file")
                        .long("file")
                        .conflicts_with("payload")
                        .help("Read the payload from a file"),
                ),
        )
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Manage balance buckets")
        .subcommand(
            Command::new("add")
                .about("Create a balance bucket")
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .help("Account kind (Депозит, Счет, Наличка)"),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("currency").long("currency"))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .default_value("income")
                        .value_name("income|expense"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list").about("List balance buckets"),
        ))
        .subcommand(apply_args(
            Command::new("apply").about("Add to or subtract from a bucket"),
        ))
        .subcommand(json_flags(
            Command::new("history")
                .about("Show a bucket's adjustment ledger")
                .arg(id_arg()),
        ))
        .subcommand(Command::new("rm").about("Delete a bucket").arg(id_arg()))
}

fn credit_cmd() -> Command {
    Command::new("credit")
        .about("Track credits and loans")
        .subcommand(
            Command::new("add")
                .about("Record a credit or loan")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("total")
                        .long("total")
                        .required(true)
                        .help("Total amount owed"),
                )
                .arg(
                    Arg::new("paid")
                        .long("paid")
                        .help("Already paid amount (default 0)"),
                )
                .arg(Arg::new("currency").long("currency"))
                .arg(Arg::new("comment").long("comment"))
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .default_value("credit")
                        .value_name("credit|loan"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list").about("List credits and loans").arg(
                Arg::new("filter")
                    .long("filter")
                    .default_value("all")
                    .value_name("all|credits|loans|completed"),
            ),
        ))
        .subcommand(apply_args(
            Command::new("apply").about("Adjust the paid amount"),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a credit or loan")
                .arg(id_arg()),
        )
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Track savings goals")
        .subcommand(
            Command::new("add")
                .about("Create a savings goal")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(
                    Arg::new("target")
                        .long("target")
                        .required(true)
                        .help("Target amount"),
                )
                .arg(
                    Arg::new("current")
                        .long("current")
                        .help("Already saved amount (default 0)"),
                )
                .arg(Arg::new("currency").long("currency"))
                .arg(Arg::new("comment").long("comment")),
        )
        .subcommand(json_flags(Command::new("list").about("List savings goals")))
        .subcommand(apply_args(
            Command::new("apply").about("Adjust the saved amount"),
        ))
        .subcommand(Command::new("rm").about("Delete a goal").arg(id_arg()))
}

fn plan_cmd() -> Command {
    Command::new("plan")
        .about("Planned recurring expenses with monthly reminders")
        .subcommand(
            Command::new("add")
                .about("Create a planned expense and schedule its reminder")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .value_name("YYYY-MM-DD")
                        .help("Reminder date; repeats monthly on its day"),
                )
                .arg(Arg::new("currency").long("currency"))
                .arg(Arg::new("comment").long("comment")),
        )
        .subcommand(json_flags(
            Command::new("list").about("List planned expenses"),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete a planned expense and its reminder")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("due")
                .about("List reminders firing on a day of month")
                .arg(
                    Arg::new("day")
                        .long("day")
                        .value_parser(value_parser!(u32))
                        .help("Day of month (defaults to today)"),
                ),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Aggregated views")
        .subcommand(json_flags(period_args(
            Command::new("totals").about("Per-currency income/expense/net and budget totals"),
        )))
        .subcommand(json_flags(period_args(
            Command::new("categories")
                .about("Category breakdown for one entry kind")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .value_name("income|expense"),
                )
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .default_value("count")
                        .value_name("count|sum"),
                ),
        )))
        .subcommand(json_flags(
            Command::new("progress").about("Goal and credit completion"),
        ))
}

fn export_cmd() -> Command {
    Command::new("export").about("Export records").subcommand(
        Command::new("transactions")
            .about("Export the signed-in user's transactions")
            .arg(
                Arg::new("format")
                    .long("format")
                    .default_value("csv")
                    .value_name("csv|json"),
            )
            .arg(Arg::new("out").long("out").required(true).help("Output path")),
    )
}

fn categories_cmd() -> Command {
    Command::new("categories")
        .about("Show the category catalog for a taxonomy")
        .arg(
            Arg::new("taxonomy")
                .default_value("expense")
                .value_name("income|expense|goal|credit|account"),
        )
}

pub fn build_cli() -> Command {
    Command::new("moneta")
        .about("Multi-currency personal income/expense, savings, and debt tracker")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(categories_cmd())
        .subcommand(profile_cmd())
        .subcommand(config_cmd())
        .subcommand(tx_cmd())
        .subcommand(budget_cmd())
        .subcommand(credit_cmd())
        .subcommand(goal_cmd())
        .subcommand(plan_cmd())
        .subcommand(report_cmd())
        .subcommand(export_cmd())
}
