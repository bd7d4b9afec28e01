//! In-memory row sequence.

use super::DataSource;
use crate::error::GridError;
use crate::model::{Record, Value};

/// An ordered sequence of records held in memory.
///
/// # Example
///
/// ```
/// use datagrid_lib::source::{DataSource, RowSet};
/// use datagrid_lib::model::Value;
///
/// let rows = RowSet::from_json(serde_json::json!([
///     {"name": "Ada", "age": 36},
///     {"name": "Linus", "age": 28},
/// ])).unwrap();
///
/// assert_eq!(rows.row_count(), 2);
/// assert_eq!(rows.value(1, "age"), Some(Value::Int(28)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    rows: Vec<Record>,
}

impl RowSet {
    /// Wrap a vector of records.
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    /// Build from a JSON array of objects.
    pub fn from_json(value: serde_json::Value) -> Result<Self, GridError> {
        match value {
            serde_json::Value::Array(items) => Ok(Self {
                rows: items
                    .into_iter()
                    .map(Record::from_json)
                    .collect::<Result<_, _>>()?,
            }),
            other => Err(GridError::configuration(format!(
                "expected a JSON array of records, got {other}"
            ))),
        }
    }

    /// The records.
    pub fn records(&self) -> &[Record] {
        &self.rows
    }

    /// Record at `row`.
    pub fn get(&self, row: usize) -> Option<&Record> {
        self.rows.get(row)
    }

    /// Append a record.
    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    /// Remove the record at `row`.
    pub fn remove(&mut self, row: usize) -> Option<Record> {
        (row < self.rows.len()).then(|| self.rows.remove(row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume into the records.
    pub fn into_records(self) -> Vec<Record> {
        self.rows
    }
}

impl From<Vec<Record>> for RowSet {
    fn from(rows: Vec<Record>) -> Self {
        Self::new(rows)
    }
}

impl DataSource for RowSet {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn value(&self, row: usize, field: &str) -> Option<Value> {
        self.rows.get(row).and_then(|r| r.get(field)).cloned()
    }

    fn set_value(&mut self, row: usize, field: &str, value: Value) -> Result<(), GridError> {
        let count = self.rows.len();
        let record = self.rows.get_mut(row).ok_or_else(|| {
            GridError::source_write(field, row, format!("row out of range ({count} rows)"))
        })?;
        record.insert(field, value);
        Ok(())
    }

    fn reorder(&mut self, permutation: &[usize]) -> Result<(), GridError> {
        if permutation.len() != self.rows.len() {
            return Err(GridError::configuration(format!(
                "permutation of {} rows applied to {} rows",
                permutation.len(),
                self.rows.len()
            )));
        }
        let mut old: Vec<Option<Record>> = std::mem::take(&mut self.rows)
            .into_iter()
            .map(Some)
            .collect();
        let mut rows = Vec::with_capacity(old.len());
        for &idx in permutation {
            match old.get_mut(idx).and_then(Option::take) {
                Some(record) => rows.push(record),
                None => {
                    // Put back what we can so the set is not lost.
                    rows.extend(old.into_iter().flatten());
                    self.rows = rows;
                    return Err(GridError::configuration(format!(
                        "invalid permutation index {idx}"
                    )));
                }
            }
        }
        self.rows = rows;
        Ok(())
    }

    fn sample(&self) -> Option<Record> {
        self.rows.first().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> RowSet {
        RowSet::new(vec![
            Record::new().set("n", 1),
            Record::new().set("n", 2),
            Record::new().set("n", 3),
        ])
    }

    #[test]
    fn test_reorder() {
        let mut set = rows();
        set.reorder(&[2, 0, 1]).unwrap();
        let ns: Vec<_> = (0..3).map(|i| set.value(i, "n").unwrap()).collect();
        assert_eq!(ns, vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_reorder_rejects_bad_permutation() {
        let mut set = rows();
        assert!(set.reorder(&[0, 0, 1]).is_err());
        assert_eq!(set.len(), 3);
        assert!(set.reorder(&[0]).is_err());
    }

    #[test]
    fn test_write_out_of_range_is_source_write_error() {
        let mut set = rows();
        let err = set.set_value(9, "n", Value::Int(0)).unwrap_err();
        assert!(matches!(err, GridError::SourceWrite { row: 9, .. }));
    }

    #[test]
    fn test_missing_field_reads_none() {
        let set = RowSet::new(vec![Record::new().set("a", 1), Record::new()]);
        assert_eq!(set.value(1, "a"), None);
    }
}
