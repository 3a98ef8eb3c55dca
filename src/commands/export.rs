use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;

use crate::commands::{build_resolver, open_database, sibling_path};
use crate::config::Config;
use crate::export::export_channels_csv;

pub fn execute(matches: &ArgMatches, config: &Config) -> Result<()> {
    let db = open_database(matches, config)?;
    let resolver = build_resolver(matches, config)?;

    let target = matches
        .get_one::<PathBuf>("out")
        .cloned()
        .unwrap_or_else(|| sibling_path(db.path(), "channels.csv"));

    let written = export_channels_csv(&db, &resolver, &target)?;
    println!("Wrote {} channel rows to {}", written, target.display());
    Ok(())
}
