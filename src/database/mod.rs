pub mod models;


use anyhow::Result;
use rusqlite::{params, Connection};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::AppError;

pub use models::*;

/// Tables the tool depends on. `tp_network_name_table` is optional —
/// older firmware exports ship without it.
const REQUIRED_TABLES: [&str; 5] = [
    "program_table",
    "satellite_transponder_table",
    "satellite_table",
    "fav_name_table",
    "fav_prog_table",
];

/// Read-mostly handle on an existing set-top-box channel database.
///
/// The production schema is created by the receiver firmware, never by this
/// tool; `open` verifies the expected tables are present and fails before
/// any mutation otherwise.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self, AppError> {
        if !db_path.exists() {
            return Err(AppError::MissingInput(db_path.to_path_buf()));
        }
        let conn = Connection::open(db_path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: db_path.to_path_buf(),
        };
        db.verify_schema()?;
        log::info!("Opened channel database {}", db_path.display());
        Ok(db)
    }

    /// Path of the source database file, used by export to copy it.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn verify_schema(&self) -> Result<(), AppError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let missing: Vec<&str> = REQUIRED_TABLES
            .iter()
            .filter(|t| !tables.iter().any(|have| have == *t))
            .copied()
            .collect();
        if !missing.is_empty() {
            return Err(AppError::SchemaMismatch(format!(
                "missing table(s): {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Reference data
    // =========================================================================

    pub fn satellites(&self) -> Result<Vec<Satellite>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name, angle FROM satellite_table ORDER BY id")?;
        let sats = stmt
            .query_map([], |row| {
                Ok(Satellite {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    angle: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sats)
    }

    /// Case-insensitive substring match over satellite names.
    pub fn satellite_by_name(&self, needle: &str) -> Result<Option<Satellite>> {
        let needle = needle.to_lowercase();
        let sat = self
            .satellites()?
            .into_iter()
            .find(|s| s.name.to_lowercase().contains(&needle));
        Ok(sat)
    }

    pub fn favorite_groups(&self) -> Result<Vec<FavoriteGroup>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, fav_name FROM fav_name_table ORDER BY id")?;
        let groups = stmt
            .query_map([], |row| {
                Ok(FavoriteGroup {
                    id: row.get(0)?,
                    label: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(groups)
    }

    // =========================================================================
    // Channel queries
    // =========================================================================

    /// All channels carried by the satellite's transponders, name-sorted,
    /// each with its current favorite-group membership set.
    pub fn channels_for_satellite(&self, sat_id: i64) -> Result<Vec<Channel>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT p.id, p.name
             FROM program_table p
             JOIN satellite_transponder_table tp ON p.tp_id = tp.id
             WHERE tp.sat_id = ?
             ORDER BY p.name, p.id",
        )?;
        let rows = stmt
            .query_map(params![sat_id], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut fav_stmt =
            conn.prepare("SELECT fav_group_id FROM fav_prog_table WHERE prog_id = ?")?;
        let mut channels = Vec::with_capacity(rows.len());
        for (id, name) in rows {
            let favorites = fav_stmt
                .query_map(params![id], |row| row.get::<_, i64>(0))?
                .collect::<Result<BTreeSet<_>, _>>()?;
            channels.push(Channel { id, name, favorites });
        }
        Ok(channels)
    }

    /// Fully joined channel rows for enrichment and report export.
    pub fn channel_rows(&self) -> Result<Vec<ChannelRow>> {
        let conn = self.conn.lock().unwrap();
        let has_network = Self::table_exists(&conn, "tp_network_name_table")?;
        let sql = if has_network {
            "SELECT p.id, p.name, s.name, s.angle, tp.freq, tp.pol, tp.sym_rate, n.name
             FROM program_table p
             LEFT JOIN satellite_transponder_table tp ON p.tp_id = tp.id
             LEFT JOIN satellite_table s ON tp.sat_id = s.id
             LEFT JOIN tp_network_name_table n ON p.network_name_id = n.id
             ORDER BY s.name, p.name, p.id"
        } else {
            "SELECT p.id, p.name, s.name, s.angle, tp.freq, tp.pol, tp.sym_rate, NULL
             FROM program_table p
             LEFT JOIN satellite_transponder_table tp ON p.tp_id = tp.id
             LEFT JOIN satellite_table s ON tp.sat_id = s.id
             ORDER BY s.name, p.name, p.id"
        };
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ChannelRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    satellite: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    angle: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
                    frequency: row.get::<_, Option<u32>>(4)?.unwrap_or(0),
                    polarization: Polarization::from_db(
                        row.get::<_, Option<i64>>(5)?.unwrap_or(-1),
                    ),
                    symbol_rate: row.get(6)?,
                    network_name: row
                        .get::<_, Option<String>>(7)?
                        .filter(|n| !n.trim().is_empty()),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // =========================================================================
    // Summaries
    // =========================================================================

    pub fn group_summaries(&self) -> Result<Vec<GroupSummary>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT g.id, g.fav_name, COUNT(fp.prog_id)
             FROM fav_name_table g
             LEFT JOIN fav_prog_table fp ON fp.fav_group_id = g.id
             GROUP BY g.id
             ORDER BY g.id",
        )?;
        let summaries = stmt
            .query_map([], |row| {
                Ok(GroupSummary {
                    id: row.get(0)?,
                    label: row.get(1)?,
                    channel_count: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(summaries)
    }

    pub fn satellite_summaries(&self) -> Result<Vec<SatelliteSummary>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT s.id, s.name, s.angle, COUNT(p.id)
             FROM satellite_table s
             LEFT JOIN satellite_transponder_table tp ON tp.sat_id = s.id
             LEFT JOIN program_table p ON p.tp_id = tp.id
             GROUP BY s.id
             ORDER BY s.id",
        )?;
        let summaries = stmt
            .query_map([], |row| {
                Ok(SatelliteSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    angle: row.get(2)?,
                    channel_count: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(summaries)
    }

    /// `(provider, channel count)` histogram, most frequent first. Empty
    /// when the database was never enriched.
    pub fn provider_histogram(&self, limit: i64) -> Result<Vec<(String, i64)>> {
        let conn = self.conn.lock().unwrap();
        if !Self::column_exists(&conn, "program_table", "provider")? {
            return Ok(Vec::new());
        }
        let mut stmt = conn.prepare(
            "SELECT provider, COUNT(*) AS cnt
             FROM program_table
             WHERE provider != ''
             GROUP BY provider
             ORDER BY cnt DESC
             LIMIT ?",
        )?;
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    // =========================================================================
    // Schema helpers (also used against export copies)
    // =========================================================================

    pub(crate) fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            params![table],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub(crate) fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns.iter().any(|c| c == column))
    }
}
