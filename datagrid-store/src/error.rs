//! Store errors

use datagrid_lib::error::SettingsError;

/// Errors raised by [`SqliteStore`](crate::SqliteStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// No home directory to place the default database in.
    #[error("Could not determine the settings directory")]
    NoDataDir,

    /// A previous holder of the connection panicked.
    #[error("Settings connection lock poisoned")]
    Poisoned,

    /// A stored row has a type tag this version does not know.
    #[error("Setting '{key}' has unreadable value '{value}' of type '{tag}'")]
    Corrupt {
        key: String,
        tag: String,
        value: String,
    },
}

impl From<StoreError> for SettingsError {
    fn from(err: StoreError) -> Self {
        SettingsError::backend(err)
    }
}
