//! Settings port for typed, per-user key-value storage.
//!
//! Grids persist user layout (column widths, column order, row height)
//! through a [`SettingsProvider`]. The provider wraps any
//! [`SettingsStore`]; this crate ships [`MemoryStore`], and the
//! `datagrid-store` crate ships a SQLite-backed store.

mod memory;
mod value;

pub use memory::MemoryStore;
pub use value::SettingValue;

use std::sync::Arc;

use crate::error::SettingsError;

/// Storage trait for settings.
///
/// Implementations store a [`SettingValue`] (which carries its own type
/// tag) under a string key.
pub trait SettingsStore: Send + Sync {
    /// Get the value for a key.
    fn get(&self, key: &str) -> Result<Option<SettingValue>, SettingsError>;

    /// Set the value for a key, replacing any previous value.
    fn set(&self, key: &str, value: SettingValue) -> Result<(), SettingsError>;

    /// Delete a key.
    fn delete(&self, key: &str) -> Result<(), SettingsError>;

    /// Get all keys starting with a prefix.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError>;
}

/// Typed settings provider.
///
/// Wraps a `SettingsStore` with typed accessors.
#[derive(Clone)]
pub struct SettingsProvider {
    store: Arc<dyn SettingsStore>,
}

impl std::fmt::Debug for SettingsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsProvider").finish_non_exhaustive()
    }
}

impl SettingsProvider {
    /// Create a new settings provider with the given store.
    pub fn new(store: impl SettingsStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a provider sharing an existing store.
    pub fn from_arc(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Create a provider backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Get a typed value for a key.
    pub fn get<T>(&self, key: &str) -> Result<Option<T>, SettingsError>
    where
        T: TryFrom<SettingValue, Error = SettingValue>,
        T: SettingType,
    {
        match self.store.get(key)? {
            Some(value) => T::try_from(value)
                .map(Some)
                .map_err(|actual| SettingsError::TypeMismatch {
                    key: key.to_string(),
                    expected: T::TAG,
                    actual: actual.type_tag(),
                }),
            None => Ok(None),
        }
    }

    /// Get a typed value for a key, returning a default if not found.
    pub fn get_or<T>(&self, key: &str, default: T) -> Result<T, SettingsError>
    where
        T: TryFrom<SettingValue, Error = SettingValue>,
        T: SettingType,
    {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Set a typed value for a key.
    pub fn set(&self, key: &str, value: impl Into<SettingValue>) -> Result<(), SettingsError> {
        self.store.set(key, value.into())
    }

    /// Delete a key.
    pub fn delete(&self, key: &str) -> Result<(), SettingsError> {
        self.store.delete(key)
    }

    /// Get all keys matching a prefix.
    pub fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        self.store.keys_with_prefix(prefix)
    }
}

/// Rust types that map onto one [`SettingValue`] variant.
pub trait SettingType {
    /// The type tag stored alongside values of this type.
    const TAG: &'static str;
}

impl SettingType for i64 {
    const TAG: &'static str = "int";
}

impl SettingType for f64 {
    const TAG: &'static str = "float";
}

impl SettingType for bool {
    const TAG: &'static str = "bool";
}

impl SettingType for String {
    const TAG: &'static str = "string";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_round_trip() {
        let settings = SettingsProvider::in_memory();
        settings.set("form.grid.RowHeight", 30i64).unwrap();
        assert_eq!(settings.get::<i64>("form.grid.RowHeight").unwrap(), Some(30));
        assert_eq!(settings.get::<i64>("missing").unwrap(), None);
        assert_eq!(settings.get_or("missing", 7i64).unwrap(), 7);
    }

    #[test]
    fn test_type_mismatch() {
        let settings = SettingsProvider::in_memory();
        settings.set("k", "wide").unwrap();
        let err = settings.get::<i64>("k").unwrap_err();
        match err {
            SettingsError::TypeMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, "int");
                assert_eq!(actual, "string");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_keys_with_prefix() {
        let settings = SettingsProvider::in_memory();
        settings.set("f.g.column_a.Width", 10i64).unwrap();
        settings.set("f.g.column_b.Width", 20i64).unwrap();
        settings.set("f.other.RowHeight", 20i64).unwrap();
        let mut keys = settings.keys_with_prefix("f.g.").unwrap();
        keys.sort();
        assert_eq!(keys, vec!["f.g.column_a.Width", "f.g.column_b.Width"]);
    }
}
