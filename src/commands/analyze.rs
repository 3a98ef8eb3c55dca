use anyhow::Result;
use clap::ArgMatches;

use crate::commands::open_database;
use crate::config::Config;
use crate::favorites::is_managed_group;

const HISTOGRAM_LIMIT: i64 = 20;

pub fn execute(matches: &ArgMatches, config: &Config) -> Result<()> {
    let db = open_database(matches, config)?;

    println!("Satellites");
    for sat in db.satellite_summaries()? {
        println!(
            "  [{}] {} (angle {}): {} channels",
            sat.id, sat.name, sat.angle, sat.channel_count
        );
    }

    println!("\nFavorite groups");
    for group in db.group_summaries()? {
        let marker = if is_managed_group(group.id) { "*" } else { " " };
        println!(
            "  [{}]{} {}: {} channels",
            group.id, marker, group.label, group.channel_count
        );
    }

    let histogram = db.provider_histogram(HISTOGRAM_LIMIT)?;
    if histogram.is_empty() {
        println!("\nNo provider data (run `satbox enrich` first)");
    } else {
        println!("\nTop providers");
        for (provider, count) in histogram {
            println!("  {:>5}  {}", count, provider);
        }
    }
    Ok(())
}
