//! Miniature set-top-box database used by the test suites. The schema
//! mirrors the receiver firmware's export: programs, transponders,
//! satellites, favorite group names and the membership join table.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub fn create_stb_database(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE satellite_table (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            angle INTEGER NOT NULL
        );

        CREATE TABLE satellite_transponder_table (
            id INTEGER PRIMARY KEY,
            sat_id INTEGER NOT NULL,
            freq INTEGER NOT NULL,
            pol INTEGER NOT NULL,
            sym_rate INTEGER
        );

        CREATE TABLE program_table (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            tp_id INTEGER NOT NULL,
            service_type INTEGER DEFAULT 0,
            vid_type INTEGER DEFAULT 0,
            network_name_id INTEGER DEFAULT 0
        );

        CREATE TABLE fav_name_table (
            id INTEGER PRIMARY KEY,
            fav_name TEXT NOT NULL
        );

        CREATE TABLE fav_prog_table (
            prog_id INTEGER NOT NULL,
            fav_group_id INTEGER NOT NULL,
            disp_order INTEGER DEFAULT 0,
            tv_type INTEGER DEFAULT 0
        );

        CREATE TABLE tp_network_name_table (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );

        INSERT INTO satellite_table (id, name, angle) VALUES
            (1, 'Nilesat 101/102', 70),
            (4, 'Hotbird 13E', 130),
            (5, 'Astra 1 19.2E', 192),
            (7, 'Turksat 42E', 420);

        INSERT INTO satellite_transponder_table (id, sat_id, freq, pol, sym_rate) VALUES
            (10, 1, 11258, 0, 27500),
            (20, 4, 11200, 1, 29900),
            (30, 5, 10714, 0, 22000),
            (31, 5, 10847, 1, 22000),
            (40, 7, 11000, 0, 30000);

        INSERT INTO program_table (id, name, tp_id, service_type, vid_type, network_name_id) VALUES
            (101, 'BBC One', 30, 1, 1, 0),
            (102, 'Das Erste', 31, 1, 1, 1),
            (103, 'Unname', 31, 1, 1, 0),
            (104, '', 30, 1, 1, 0),
            (201, 'Rai 1', 20, 1, 1, 0),
            (202, 'Rai 2', 20, 1, 1, 0),
            (301, 'MBC 1', 10, 1, 1, 0),
            (302, 'Al Jazeera', 10, 1, 1, 0),
            (401, 'Kanal X', 40, 1, 1, 0);

        INSERT INTO fav_name_table (id, fav_name) VALUES
            (1, 'FAV1'), (2, 'FAV2'), (3, 'FAV3'),
            (4, 'FAV4'), (5, 'FAV5'), (6, 'FAV6');

        -- Rai 1 starts in managed group 2 plus unmanaged group 9.
        INSERT INTO fav_prog_table (prog_id, fav_group_id, disp_order, tv_type) VALUES
            (201, 2, 0, 0),
            (201, 9, 1, 0);

        INSERT INTO tp_network_name_table (id, name) VALUES
            (1, 'ARD Digital');
        "#,
    )
    .unwrap();
}

/// Fresh fixture database inside its own temp dir.
pub fn stb_fixture() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("database.db");
    create_stb_database(&db_path);
    (tmp, db_path)
}
