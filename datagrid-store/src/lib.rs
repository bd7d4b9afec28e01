//! Persistent settings storage for data grids.
//!
//! Provides [`SqliteStore`], a SQLite-backed [`SettingsStore`] with an
//! in-memory read cache, and [`paths`] for locating the settings database.
//!
//! [`SettingsStore`]: datagrid_lib::settings::SettingsStore

pub mod paths;

mod error;
mod sqlite;

pub use error::StoreError;
pub use sqlite::SqliteStore;
