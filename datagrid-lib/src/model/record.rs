//! Dynamic field record

use indexmap::IndexMap;

use super::Value;
use crate::error::GridError;

/// One row of an in-memory data set.
///
/// Records hold field values in insertion order, which doubles as the schema
/// order when a grid infers its columns from a sample row.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Record, Value};
///
/// let record = Record::new()
///     .set("name", "Contoso")
///     .set("age", 42);
///
/// assert_eq!(record.get("age"), Some(&Value::Int(42)));
/// assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["name", "age"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a JSON object.
    pub fn from_json(value: serde_json::Value) -> Result<Self, GridError> {
        match value {
            serde_json::Value::Object(map) => Ok(Self {
                fields: map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            }),
            other => Err(GridError::configuration(format!(
                "expected a JSON object for a record, got {other}"
            ))),
        }
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Field names in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Sets a field value in place, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_keeps_field_order() {
        let record = Record::from_json(serde_json::json!({"b": 1, "a": "x"})).unwrap();
        assert_eq!(record.field_names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(record.get("b"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(Record::from_json(serde_json::json!([1, 2])).is_err());
    }

    #[test]
    fn test_missing_field_reads_as_none() {
        let record = Record::new().set("a", 1);
        assert_eq!(record.get("zzz"), None);
    }
}
