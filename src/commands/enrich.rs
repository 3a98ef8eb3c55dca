use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;

use crate::commands::{build_resolver, open_database, sibling_path};
use crate::config::Config;
use crate::enrich::enrich_database;

pub fn execute(matches: &ArgMatches, config: &Config) -> Result<()> {
    let db = open_database(matches, config)?;
    let resolver = build_resolver(matches, config)?;

    let target = matches
        .get_one::<PathBuf>("out")
        .cloned()
        .unwrap_or_else(|| sibling_path(db.path(), "database_enriched.db"));

    let report = enrich_database(&db, &resolver, &target)?;
    println!("Enriched {} channels into {}", report.total, target.display());
    println!("  from network names: {}", report.from_network);
    println!("  resolved:           {}", report.from_resolver);
    println!("  unknown:            {}", report.unknown);
    if !report.top_providers.is_empty() {
        println!("  top providers:");
        for (provider, count) in &report.top_providers {
            println!("    {:>5}  {}", count, provider);
        }
    }
    Ok(())
}
