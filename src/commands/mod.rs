//! Command handlers, one module per subcommand. Shared plumbing for
//! opening the database and assembling the provider resolver lives here.

pub mod analyze;
pub mod enrich;
pub mod export;
pub mod favorites;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::ArgMatches;

use crate::config::Config;
use crate::database::Database;
use crate::provider::{mapping, ProviderResolver};

/// Open the source database named by `--db`, `SATBOX_DB` or the config
/// file, in that order.
pub fn open_database(matches: &ArgMatches, config: &Config) -> Result<Database> {
    let cli = matches.get_one::<PathBuf>("db").map(PathBuf::as_path);
    let path = config.resolve_db_path(cli)?;
    Ok(Database::open(&path)?)
}

/// Build the resolver from whichever side files are available. A path
/// given on the command line must exist; a path that only comes from the
/// config file is skipped with a warning when missing. With no side
/// files at all the resolver still works from its built-in tables.
pub fn build_resolver(matches: &ArgMatches, config: &Config) -> Result<ProviderResolver> {
    let mut resolver = ProviderResolver::new();

    if let Some(path) = side_file(matches, "mapping-csv", &config.mapping_csv)? {
        resolver = resolver.with_range_rules(mapping::load_range_rules(&path)?);
    }
    if let Some(path) = side_file(matches, "satellites-xml", &config.satellites_xml)? {
        resolver = resolver.with_position_table(mapping::load_position_table(&path)?);
    }
    if let Some(path) = side_file(matches, "channel-lookup", &config.channel_lookup_json)? {
        resolver = resolver.with_name_lookup(mapping::load_channel_lookup(&path)?);
    }
    Ok(resolver)
}

fn side_file(
    matches: &ArgMatches,
    arg: &str,
    from_config: &Option<PathBuf>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = matches.try_get_one::<PathBuf>(arg).ok().flatten() {
        if !path.exists() {
            anyhow::bail!("--{} {}: file not found", arg, path.display());
        }
        return Ok(Some(path.clone()));
    }
    if let Some(path) = from_config {
        if path.exists() {
            return Ok(Some(path.clone()));
        }
        log::warn!("Configured side file {} not found, skipping", path.display());
    }
    Ok(None)
}

/// Default output path: a suffixed sibling of the source database.
pub fn sibling_path(source: &Path, file_name: &str) -> PathBuf {
    source
        .parent()
        .map(|dir| dir.join(file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}
