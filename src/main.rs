use std::path::PathBuf;

use anyhow::Result;
use clap::{value_parser, Arg, Command};

use satbox::commands;
use satbox::config::Config;

fn db_arg() -> Arg {
    Arg::new("db")
        .long("db")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Source channel database (defaults to $SATBOX_DB or the config file)")
}

fn out_arg(help: &'static str) -> Arg {
    Arg::new("out")
        .long("out")
        .short('o')
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn resolver_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("mapping-csv")
            .long("mapping-csv")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .help("CSV of frequency-range provider rules"),
    )
    .arg(
        Arg::new("satellites-xml")
            .long("satellites-xml")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .help("Satellites XML with per-transponder providers"),
    )
    .arg(
        Arg::new("channel-lookup")
            .long("channel-lookup")
            .value_name("FILE")
            .value_parser(value_parser!(PathBuf))
            .help("JSON channel-name to provider lookup"),
    )
}

fn favorites_edit_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(db_arg())
        .arg(
            Arg::new("sat")
                .long("sat")
                .value_name("NAME")
                .required(true)
                .help("Satellite name (substring, e.g. 'hotbird')"),
        )
        .arg(
            Arg::new("group")
                .long("group")
                .value_name("GROUP")
                .required(true)
                .help("Managed group label (Cinema, Sport, News, France, Italie, Nilesat)"),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .value_name("TEXT")
                .help("Only channels whose name contains TEXT (case-insensitive)"),
        )
        .arg(out_arg("Output database (default: database_new.db next to the source)"))
}

fn main() -> Result<()> {
    satbox::init_logging();
    let config = Config::load()?;

    let matches = Command::new("satbox")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect, enrich and edit set-top-box channel databases")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("analyze")
                .about("Summarize satellites, favorite groups and providers")
                .arg(db_arg()),
        )
        .subcommand(
            resolver_args(
                Command::new("enrich")
                    .about("Write a copy of the database with provider labels")
                    .arg(db_arg())
                    .arg(out_arg(
                        "Output database (default: database_enriched.db next to the source)",
                    )),
            ),
        )
        .subcommand(
            resolver_args(
                Command::new("export")
                    .about("Export the channel list as CSV")
                    .arg(db_arg())
                    .arg(out_arg("Output CSV (default: channels.csv next to the source)")),
            ),
        )
        .subcommand(
            Command::new("favorites")
                .about("Edit favorite group memberships")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(favorites_edit_command(
                    "add",
                    "Add matching channels to a group",
                ))
                .subcommand(favorites_edit_command(
                    "remove",
                    "Remove matching channels from a group",
                )),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("analyze", sub)) => commands::analyze::execute(sub, &config),
        Some(("enrich", sub)) => commands::enrich::execute(sub, &config),
        Some(("export", sub)) => commands::export::execute(sub, &config),
        Some(("favorites", sub)) => commands::favorites::execute(sub, &config),
        _ => unreachable!("subcommand_required"),
    }
}
