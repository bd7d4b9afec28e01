//! SettingsError for the settings store port

/// Settings error type.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The backing store failed.
    #[error("settings backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A stored value has a different type than requested.
    #[error("setting '{key}' type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl SettingsError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}
