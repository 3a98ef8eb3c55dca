//! In-memory favorites editing session over a channel database.
//!
//! The session caches channel lists per satellite, mutates memberships in
//! memory only, and reconciles against the database exclusively at export
//! time — into a *new* file, never the source.

use rusqlite::{params, Connection};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use crate::database::{Channel, Database};
use crate::error::AppError;

/// The favorite groups this tool manages, with the labels written into
/// `fav_name_table` on export. Other group ids in the database are left
/// alone entirely.
pub const MANAGED_GROUPS: &[(i64, &str)] = &[
    (1, "Cinema"),
    (2, "Sport"),
    (3, "News"),
    (4, "France"),
    (5, "Italie"),
    (6, "Nilesat"),
];

/// Satellite ids as shipped in the stock database, used when a satellite
/// name cannot be found in `satellite_table`.
pub const DEFAULT_SAT_IDS: &[(&str, i64)] = &[("Nilesat", 1), ("Hotbird", 4), ("Astra1", 5)];

pub fn group_id_for_label(label: &str) -> Option<i64> {
    MANAGED_GROUPS
        .iter()
        .find(|(_, l)| l.eq_ignore_ascii_case(label))
        .map(|(id, _)| *id)
}

pub fn is_managed_group(group_id: i64) -> bool {
    MANAGED_GROUPS.iter().any(|(id, _)| *id == group_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Add,
    Remove,
}

/// One editing session: load → mutate in memory → export.
///
/// Caching policy: a satellite is queried at most once per session; once
/// cached, its list is returned unchanged on every later selection, so
/// external changes to the database become invisible until
/// [`invalidate`](Self::invalidate) drops the entry. Export walks *all*
/// cached satellites, not just the most recently selected one.
pub struct FavoritesSession {
    db: Database,
    cache: HashMap<i64, Vec<Channel>>,
}

impl FavoritesSession {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            cache: HashMap::new(),
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Channels of the satellite, name-sorted, from cache when present.
    pub fn load_channels(&mut self, sat_id: i64) -> Result<&[Channel], AppError> {
        match self.cache.entry(sat_id) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_slice()),
            Entry::Vacant(entry) => {
                let channels = self.db.channels_for_satellite(sat_id)?;
                log::info!("Loaded {} channels for satellite {}", channels.len(), sat_id);
                Ok(entry.insert(channels).as_slice())
            }
        }
    }

    pub fn is_cached(&self, sat_id: i64) -> bool {
        self.cache.contains_key(&sat_id)
    }

    /// Satellites visited this session, in ascending id order.
    pub fn visited_satellites(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.cache.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Drop a satellite's cached list so the next load re-queries.
    pub fn invalidate(&mut self, sat_id: i64) {
        self.cache.remove(&sat_id);
    }

    /// Flip the channel's membership in a group. Returns the new state.
    pub fn toggle_membership(
        &mut self,
        sat_id: i64,
        channel_id: i64,
        group_id: i64,
    ) -> Result<bool, AppError> {
        let channel = self
            .cache
            .get_mut(&sat_id)
            .ok_or_else(|| AppError::NotFound(format!("satellite {} not loaded", sat_id)))?
            .iter_mut()
            .find(|c| c.id == channel_id)
            .ok_or_else(|| AppError::NotFound(format!("channel {}", channel_id)))?;

        if channel.favorites.remove(&group_id) {
            Ok(false)
        } else {
            channel.favorites.insert(group_id);
            Ok(true)
        }
    }

    /// Add or remove one group across many channels. Returns the number of
    /// channels actually changed; channels already in the target state are
    /// not counted. Other groups are never touched. Ids not present in the
    /// satellite's list are ignored.
    pub fn bulk_apply(
        &mut self,
        sat_id: i64,
        channel_ids: &[i64],
        group_id: i64,
        action: BulkAction,
    ) -> Result<usize, AppError> {
        let channels = self
            .cache
            .get_mut(&sat_id)
            .ok_or_else(|| AppError::NotFound(format!("satellite {} not loaded", sat_id)))?;

        let mut changed = 0;
        for channel in channels.iter_mut() {
            if !channel_ids.contains(&channel.id) {
                continue;
            }
            let did_change = match action {
                BulkAction::Add => channel.favorites.insert(group_id),
                BulkAction::Remove => channel.favorites.remove(&group_id),
            };
            if did_change {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Case-insensitive substring filter over the cached channel names.
    /// Purely presentational: never mutates or discards cached data.
    pub fn filter(&self, sat_id: i64, query: &str) -> Vec<&Channel> {
        let Some(channels) = self.cache.get(&sat_id) else {
            return Vec::new();
        };
        let query = query.to_lowercase();
        channels
            .iter()
            .filter(|c| query.is_empty() || c.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Write the session's favorites to a new database file.
    ///
    /// The source is copied verbatim to `target`, then — against the copy
    /// only, in one transaction — managed group labels are rewritten and,
    /// for every cached channel of every visited satellite, the managed
    /// join rows are replaced by the in-memory membership set
    /// (delete-then-reinsert keeps each `(channel, group)` pair unique).
    /// Channels of satellites never visited this session keep their
    /// original rows untouched.
    ///
    /// Any failure aborts the export as a single outcome; the copied file
    /// may remain on disk.
    pub fn export_database(&self, target: &Path) -> Result<(), AppError> {
        if target == self.db.path() {
            return Err(AppError::WouldClobberSource(target.to_path_buf()));
        }
        log::info!("Exporting favorites to {}", target.display());
        std::fs::copy(self.db.path(), target)?;

        let mut conn = Connection::open(target)?;
        let tx = conn.transaction()?;

        for (group_id, label) in MANAGED_GROUPS {
            tx.execute(
                "UPDATE fav_name_table SET fav_name = ? WHERE id = ?",
                params![label, group_id],
            )?;
        }

        for sat_id in self.visited_satellites() {
            let channels = &self.cache[&sat_id];
            log::info!("Writing favorites for satellite {}", sat_id);
            for channel in channels {
                for (group_id, _) in MANAGED_GROUPS {
                    tx.execute(
                        "DELETE FROM fav_prog_table WHERE prog_id = ? AND fav_group_id = ?",
                        params![channel.id, group_id],
                    )?;
                }
                for group_id in &channel.favorites {
                    if is_managed_group(*group_id) {
                        tx.execute(
                            "INSERT INTO fav_prog_table (prog_id, fav_group_id, disp_order, tv_type)
                             VALUES (?, ?, 0, 0)",
                            params![channel.id, group_id],
                        )?;
                    }
                }
            }
        }

        tx.commit()?;
        log::info!("Export complete: {}", target.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::stb_fixture;
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const ASTRA: i64 = 5;
    const HOTBIRD: i64 = 4;
    const BBC_ONE: i64 = 101;
    const RAI_1: i64 = 201;

    fn session() -> (FavoritesSession, TempDir, PathBuf) {
        let (tmp, db_path) = stb_fixture();
        let db = Database::open(&db_path).unwrap();
        (FavoritesSession::new(db), tmp, db_path)
    }

    fn favorites_of(session: &mut FavoritesSession, sat_id: i64, channel_id: i64) -> BTreeSet<i64> {
        session
            .load_channels(sat_id)
            .unwrap()
            .iter()
            .find(|c| c.id == channel_id)
            .unwrap()
            .favorites
            .clone()
    }

    fn managed_rows(conn: &Connection, prog_id: i64) -> BTreeSet<i64> {
        let managed: Vec<i64> = MANAGED_GROUPS.iter().map(|(id, _)| *id).collect();
        let mut stmt = conn
            .prepare("SELECT fav_group_id FROM fav_prog_table WHERE prog_id = ?")
            .unwrap();
        stmt.query_map(params![prog_id], |row| row.get::<_, i64>(0))
            .unwrap()
            .map(Result::unwrap)
            .filter(|g| managed.contains(g))
            .collect()
    }

    #[test]
    fn channels_load_name_sorted_with_memberships() {
        let (mut session, _tmp, _path) = session();
        let names: Vec<String> = session
            .load_channels(ASTRA)
            .unwrap()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, vec!["", "BBC One", "Das Erste", "Unname"]);
        assert_eq!(favorites_of(&mut session, HOTBIRD, RAI_1), BTreeSet::from([2, 9]));
    }

    #[test]
    fn toggle_twice_restores_the_membership_set() {
        let (mut session, _tmp, _path) = session();
        session.load_channels(HOTBIRD).unwrap();
        let before = favorites_of(&mut session, HOTBIRD, RAI_1);

        assert!(session.toggle_membership(HOTBIRD, RAI_1, 3).unwrap());
        assert!(!session.toggle_membership(HOTBIRD, RAI_1, 3).unwrap());
        assert_eq!(favorites_of(&mut session, HOTBIRD, RAI_1), before);
    }

    #[test]
    fn toggle_requires_a_loaded_satellite() {
        let (mut session, _tmp, _path) = session();
        let result = session.toggle_membership(ASTRA, BBC_ONE, 3);
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn bulk_apply_counts_only_real_changes() {
        let (mut session, _tmp, _path) = session();
        session.load_channels(HOTBIRD).unwrap();

        // Rai 1 already holds group 2, Rai 2 does not.
        let ids = [RAI_1, 202];
        assert_eq!(
            session.bulk_apply(HOTBIRD, &ids, 2, BulkAction::Add).unwrap(),
            1
        );
        // Converges regardless of prior state, and never touches group 9.
        assert_eq!(
            session.bulk_apply(HOTBIRD, &ids, 2, BulkAction::Remove).unwrap(),
            2
        );
        assert_eq!(
            session.bulk_apply(HOTBIRD, &ids, 2, BulkAction::Remove).unwrap(),
            0
        );
        assert_eq!(favorites_of(&mut session, HOTBIRD, RAI_1), BTreeSet::from([9]));
    }

    #[test]
    fn cache_hit_skips_requery_until_invalidated() {
        let (mut session, _tmp, db_path) = session();
        assert!(!session.is_cached(ASTRA));
        assert_eq!(session.load_channels(ASTRA).unwrap().len(), 4);
        assert!(session.is_cached(ASTRA));

        // An external write after first load is invisible to the session.
        let conn = Connection::open(&db_path).unwrap();
        conn.execute(
            "INSERT INTO program_table (id, name, tp_id) VALUES (105, 'Arte', 30)",
            [],
        )
        .unwrap();
        assert_eq!(session.load_channels(ASTRA).unwrap().len(), 4);

        session.invalidate(ASTRA);
        assert!(!session.is_cached(ASTRA));
        assert_eq!(session.load_channels(ASTRA).unwrap().len(), 5);
    }

    #[test]
    fn filter_is_case_insensitive_and_non_destructive() {
        let (mut session, _tmp, _path) = session();
        session.load_channels(ASTRA).unwrap();

        let hits = session.filter(ASTRA, "bbc");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "BBC One");

        assert_eq!(session.filter(ASTRA, "zzz").len(), 0);
        assert_eq!(session.filter(ASTRA, "").len(), 4);
        // The cache itself is untouched by filtering.
        assert_eq!(session.load_channels(ASTRA).unwrap().len(), 4);
    }

    #[test]
    fn export_never_mutates_the_source_database() {
        let (mut session, tmp, db_path) = session();
        let before = std::fs::read(&db_path).unwrap();

        session.load_channels(ASTRA).unwrap();
        session.toggle_membership(ASTRA, BBC_ONE, 3).unwrap();
        session
            .export_database(&tmp.path().join("database_new.db"))
            .unwrap();

        assert_eq!(std::fs::read(&db_path).unwrap(), before);
    }

    #[test]
    fn export_refuses_the_source_path() {
        let (session, _tmp, db_path) = session();
        let result = session.export_database(&db_path);
        assert!(matches!(result, Err(AppError::WouldClobberSource(_))));
    }

    #[test]
    fn export_writes_exactly_one_row_per_held_group() {
        let (mut session, tmp, _path) = session();
        session.load_channels(ASTRA).unwrap();
        session
            .bulk_apply(ASTRA, &[BBC_ONE, 102], 1, BulkAction::Add)
            .unwrap();
        session.toggle_membership(ASTRA, BBC_ONE, 3).unwrap();

        let target = tmp.path().join("database_new.db");
        session.export_database(&target).unwrap();

        let conn = Connection::open(&target).unwrap();
        assert_eq!(managed_rows(&conn, BBC_ONE), BTreeSet::from([1, 3]));
        assert_eq!(managed_rows(&conn, 102), BTreeSet::from([1]));
        // Cached channels with no memberships get zero managed rows.
        assert_eq!(managed_rows(&conn, 103), BTreeSet::new());

        // Managed group labels are rewritten from the fixed table.
        let label: String = conn
            .query_row("SELECT fav_name FROM fav_name_table WHERE id = 1", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(label, "Cinema");
    }

    #[test]
    fn export_leaves_unvisited_satellites_untouched() {
        let (mut session, tmp, _path) = session();
        // Only Astra is visited; Rai 1 lives on Hotbird.
        session.load_channels(ASTRA).unwrap();

        let target = tmp.path().join("database_new.db");
        session.export_database(&target).unwrap();

        let conn = Connection::open(&target).unwrap();
        let groups: BTreeSet<i64> = {
            let mut stmt = conn
                .prepare("SELECT fav_group_id FROM fav_prog_table WHERE prog_id = ?")
                .unwrap();
            stmt.query_map(params![RAI_1], |row| row.get(0))
                .unwrap()
                .map(Result::unwrap)
                .collect()
        };
        assert_eq!(groups, BTreeSet::from([2, 9]));
    }

    #[test]
    fn export_preserves_unmanaged_groups_of_visited_channels() {
        let (mut session, tmp, _path) = session();
        session.load_channels(HOTBIRD).unwrap();
        session.toggle_membership(HOTBIRD, RAI_1, 2).unwrap(); // drop Sport

        let target = tmp.path().join("database_new.db");
        session.export_database(&target).unwrap();

        let conn = Connection::open(&target).unwrap();
        assert_eq!(managed_rows(&conn, RAI_1), BTreeSet::new());
        // Group 9 is not managed by this tool and must survive.
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM fav_prog_table WHERE prog_id = ? AND fav_group_id = 9",
                params![RAI_1],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn export_round_trips_a_new_membership() {
        // BBC One starts with no memberships, gains group 3, and the
        // exported database reflects exactly that.
        let (mut session, tmp, _path) = session();
        session.load_channels(ASTRA).unwrap();
        assert!(favorites_of(&mut session, ASTRA, BBC_ONE).is_empty());

        session.toggle_membership(ASTRA, BBC_ONE, 3).unwrap();
        let target = tmp.path().join("database_new.db");
        session.export_database(&target).unwrap();

        let reloaded = Database::open(&target).unwrap();
        let mut session2 = FavoritesSession::new(reloaded);
        assert_eq!(
            favorites_of(&mut session2, ASTRA, BBC_ONE),
            BTreeSet::from([3])
        );
    }
}
