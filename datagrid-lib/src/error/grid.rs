//! GridError for grid, table and data source operations

use super::SettingsError;

/// Error type for operations that must surface to the caller.
///
/// Recoverable conditions (search string coercion, cell or column indices
/// that are out of range while the column set is being rebuilt) never show
/// up here; they degrade to a default value at the call site.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The grid or a column was configured inconsistently.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A column or call referenced a field the data source does not have.
    #[error("Field '{field}' is not defined in the data source")]
    UnknownField { field: String },

    /// A write targeted a column index outside the column collection.
    #[error("Column {index} is out of range ({count} columns)")]
    UnknownColumn { index: usize, count: usize },

    /// The data source rejected a write.
    #[error("Write to field '{field}' at row {row} rejected: {reason}")]
    SourceWrite {
        field: String,
        row: usize,
        reason: String,
    },

    /// The bound data source does not support the requested operation.
    #[error("Operation '{operation}' is not supported by this data source")]
    Unsupported { operation: &'static str },

    /// The settings store failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl GridError {
    /// Creates a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new unknown field error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    /// Creates a new source write error.
    pub fn source_write(field: impl Into<String>, row: usize, reason: impl Into<String>) -> Self {
        Self::SourceWrite {
            field: field.into(),
            row,
            reason: reason.into(),
        }
    }

    /// Returns `true` for errors caused by grid configuration rather than data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. } | Self::UnknownField { .. } | Self::UnknownColumn { .. }
        )
    }
}
