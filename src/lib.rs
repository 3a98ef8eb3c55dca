//! Toolkit for set-top-box channel databases: inspect them, enrich them
//! with provider labels, export channel reports and edit favorite groups.
//! The source database is always treated as read-only; every mutating
//! operation writes a new file.

pub mod commands;
pub mod config;
pub mod database;
pub mod enrich;
pub mod error;
pub mod export;
pub mod favorites;
pub mod provider;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::AppError;

/// Initialize logging; `RUST_LOG` overrides the default level.
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
