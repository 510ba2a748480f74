// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
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
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn required(name: &'static str) -> Arg {
    Arg::new(name).long(name).required(true)
}

fn optional(name: &'static str) -> Arg {
    Arg::new(name).long(name)
}

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

pub fn build_cli() -> Command {
    Command::new("ledgerly")
        .version(crate_version!())
        .about("Personal finance client: accounts, transactions, savings, debts, recurring expenses")
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .help("Backend base URL (overrides config and LEDGERLY_API_URL)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging to stderr"),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and store the session")
                .arg(required("username"))
                .arg(required("password")),
        )
        .subcommand(
            Command::new("register")
                .about("Create a backend user")
                .arg(required("username"))
                .arg(required("email"))
                .arg(required("password")),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(Command::new("status").about("Show session, theme and backend URL"))
        .subcommand(
            Command::new("account")
                .about("Accounts and wallets")
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(required("name"))
                        .arg(
                            optional("type")
                                .default_value("DEBIT")
                                .help("CASH | DEBIT | CREDIT | SAVINGS"),
                        )
                        .arg(optional("balance").help("Opening balance (default 0)"))
                        .arg(optional("color").default_value("#0ea5e9")),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(optional("name"))
                        .arg(optional("type"))
                        .arg(optional("color")),
                )
                .subcommand(Command::new("archive").arg(id_arg()))
                .subcommand(Command::new("restore").arg(id_arg())),
        )
        .subcommand(
            Command::new("category")
                .about("Income and expense categories")
                .subcommand(json_args(
                    Command::new("list").arg(optional("type").help("IN | OUT")),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(required("name"))
                        .arg(required("type").help("IN | OUT"))
                        .arg(optional("color")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions and transfers")
                .subcommand(json_args(
                    Command::new("list")
                        .arg(optional("month").help("YYYY-MM"))
                        .arg(optional("limit").value_parser(value_parser!(usize))),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(required("type").help("IN | OUT"))
                        .arg(required("amount"))
                        .arg(required("account").help("Account name or id"))
                        .arg(required("category").help("Category name or id"))
                        .arg(optional("date").help("YYYY-MM-DD (default today)"))
                        .arg(optional("description"))
                        .arg(
                            optional("method")
                                .default_value("CASH")
                                .help("CASH | CARD | TRANSFER"),
                        )
                        .arg(
                            Arg::new("create-missing")
                                .long("create-missing")
                                .action(ArgAction::SetTrue)
                                .help("Create the category or account if no exact match exists"),
                        ),
                )
                .subcommand(
                    Command::new("transfer")
                        .arg(required("from"))
                        .arg(optional("to"))
                        .arg(required("amount"))
                        .arg(optional("date"))
                        .arg(optional("description")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(json_args(
            Command::new("summary")
                .about("Balance, income and expenses, account roll-ups")
                .arg(optional("month").help("YYYY-MM")),
        ))
        .subcommand(
            Command::new("savings")
                .about("Savings goals")
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(required("name"))
                        .arg(required("target"))
                        .arg(optional("date").help("Target date YYYY-MM-DD"))
                        .arg(optional("color")),
                )
                .subcommand(
                    Command::new("fund")
                        .arg(id_arg())
                        .arg(required("amount"))
                        .arg(optional("account").help("Account to draw from")),
                ),
        )
        .subcommand(
            Command::new("debt")
                .about("Money owed to you and by you")
                .subcommand(json_args(
                    Command::new("list").arg(optional("type").help("OWED_TO_ME | I_OWE")),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(required("name"))
                        .arg(optional("type").default_value("I_OWE"))
                        .arg(required("amount"))
                        .arg(optional("description")),
                )
                .subcommand(
                    Command::new("pay")
                        .arg(id_arg())
                        .arg(required("amount")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("recurring")
                .about("Fixed monthly expenses")
                .subcommand(json_args(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(required("name"))
                        .arg(required("amount"))
                        .arg(
                            optional("due-day")
                                .default_value("1")
                                .help("Day of month, 1-31"),
                        )
                        .arg(optional("category"))
                        .arg(optional("account")),
                )
                .subcommand(
                    Command::new("pay")
                        .arg(id_arg())
                        .arg(optional("date"))
                        .arg(optional("account")),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("theme")
                .about("Table theme")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set").arg(
                        Arg::new("theme")
                            .required(true)
                            .value_parser(["light", "dark", "ocean"]),
                    ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data fetched from the backend")
                .subcommand(
                    Command::new("transactions")
                        .arg(optional("format").default_value("csv").help("csv | json"))
                        .arg(required("out"))
                        .arg(optional("month").help("YYYY-MM")),
                ),
        )
}
