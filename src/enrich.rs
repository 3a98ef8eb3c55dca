//! Batch provider enrichment: copy the source database and stamp a
//! `provider` label onto every channel of the copy.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::database::Database;
use crate::error::AppError;
use crate::provider::{ProviderResolver, UNKNOWN_PROVIDER};

#[derive(Debug, Clone, Serialize)]
pub struct EnrichReport {
    /// Channels with a usable name that were processed.
    pub total: usize,
    /// Provider taken from the transponder network-name table.
    pub from_network: usize,
    /// Provider found by the resolver.
    pub from_resolver: usize,
    /// Fell back to the sentinel label.
    pub unknown: usize,
    /// Most frequent provider labels written, descending.
    pub top_providers: Vec<(String, usize)>,
    pub finished_at: DateTime<Utc>,
}

const TOP_PROVIDERS: usize = 5;

/// Enrich every channel with a provider label, writing to a copy of the
/// database at `target`. The source is never modified; unresolvable
/// channels get the [`UNKNOWN_PROVIDER`] sentinel and are tallied, not
/// reported individually.
pub fn enrich_database(
    db: &Database,
    resolver: &ProviderResolver,
    target: &Path,
) -> Result<EnrichReport, AppError> {
    if target == db.path() {
        return Err(AppError::WouldClobberSource(target.to_path_buf()));
    }
    log::info!("Copying {} to {}", db.path().display(), target.display());
    std::fs::copy(db.path(), target)?;

    let rows = db.channel_rows()?;

    let mut report = EnrichReport {
        total: 0,
        from_network: 0,
        from_resolver: 0,
        unknown: 0,
        top_providers: Vec::new(),
        finished_at: Utc::now(),
    };
    let mut updates: Vec<(String, i64)> = Vec::new();
    let mut tally: HashMap<String, usize> = HashMap::new();
    for row in &rows {
        if !row.has_usable_name() {
            continue;
        }
        report.total += 1;
        let provider = if let Some(network) = &row.network_name {
            report.from_network += 1;
            network.clone()
        } else if let Some(provider) =
            resolver.resolve_channel(&row.name, &row.satellite, row.angle, row.frequency)
        {
            report.from_resolver += 1;
            provider.to_string()
        } else {
            report.unknown += 1;
            UNKNOWN_PROVIDER.to_string()
        };
        *tally.entry(provider.clone()).or_default() += 1;
        updates.push((provider, row.id));
    }
    let mut top: Vec<(String, usize)> = tally.into_iter().collect();
    top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top.truncate(TOP_PROVIDERS);
    report.top_providers = top;

    let mut conn = Connection::open(target)?;
    if !Database::column_exists(&conn, "program_table", "provider")? {
        log::info!("Adding provider column to program_table");
        conn.execute(
            "ALTER TABLE program_table ADD COLUMN provider VARCHAR(64) DEFAULT ''",
            [],
        )?;
    }

    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare("UPDATE program_table SET provider = ? WHERE id = ?")?;
        for (provider, id) in &updates {
            stmt.execute(params![provider, id])?;
        }
    }
    tx.commit()?;
    report.finished_at = Utc::now();

    log::info!(
        "Enriched {} channels ({} from network names, {} resolved, {} unknown)",
        report.total,
        report.from_network,
        report.from_resolver,
        report.unknown
    );
    Ok(report)
}
