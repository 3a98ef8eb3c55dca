use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::ArgMatches;

use crate::commands::{open_database, sibling_path};
use crate::config::Config;
use crate::database::Database;
use crate::favorites::{
    group_id_for_label, BulkAction, FavoritesSession, DEFAULT_SAT_IDS, MANAGED_GROUPS,
};

pub fn execute(matches: &ArgMatches, config: &Config) -> Result<()> {
    let (action, sub) = match matches.subcommand() {
        Some(("add", sub)) => (BulkAction::Add, sub),
        Some(("remove", sub)) => (BulkAction::Remove, sub),
        _ => bail!("expected `favorites add` or `favorites remove`"),
    };

    let mut session = FavoritesSession::new(open_database(sub, config)?);

    let sat_name = sub.get_one::<String>("sat").map(String::as_str).unwrap_or("");
    let sat_id = resolve_satellite(session.database(), sat_name)?;

    let group_label = sub
        .get_one::<String>("group")
        .map(String::as_str)
        .unwrap_or("");
    let Some(group_id) = group_id_for_label(group_label) else {
        let known: Vec<&str> = MANAGED_GROUPS.iter().map(|(_, l)| *l).collect();
        bail!(
            "unknown group {:?} (one of: {})",
            group_label,
            known.join(", ")
        );
    };

    let filter = sub.get_one::<String>("filter").map(String::as_str).unwrap_or("");
    let target = sub
        .get_one::<PathBuf>("out")
        .cloned()
        .unwrap_or_else(|| sibling_path(session.database().path(), "database_new.db"));
    let ids: Vec<i64> = session
        .load_channels(sat_id)?
        .iter()
        .map(|c| c.id)
        .collect();
    let ids: Vec<i64> = if filter.is_empty() {
        ids
    } else {
        session.filter(sat_id, filter).iter().map(|c| c.id).collect()
    };
    if ids.is_empty() {
        bail!("no channels match {:?} on satellite {}", filter, sat_name);
    }

    let changed = session.bulk_apply(sat_id, &ids, group_id, action)?;
    session.export_database(&target)?;

    let verb = match action {
        BulkAction::Add => "added to",
        BulkAction::Remove => "removed from",
    };
    println!(
        "{} of {} channels {} {}; wrote {}",
        changed,
        ids.len(),
        verb,
        group_label,
        target.display()
    );
    Ok(())
}

/// Satellite name lookup in the database, with the stock ids as fallback
/// for databases whose names were localized or truncated.
fn resolve_satellite(db: &Database, name: &str) -> Result<i64> {
    if let Some(sat) = db.satellite_by_name(name)? {
        return Ok(sat.id);
    }
    if let Some((_, id)) = DEFAULT_SAT_IDS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
    {
        return Ok(*id);
    }
    bail!("no satellite matching {:?} in the database", name)
}
