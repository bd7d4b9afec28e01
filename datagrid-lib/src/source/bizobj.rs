//! Adapter over live, cursor-based business objects.

use super::DataSource;
use crate::error::GridError;
use crate::model::{Record, Value};
use crate::sort::SortOrder;

/// A live record source with its own row pointer.
///
/// Reads address any row directly; writes go to the row under the cursor,
/// so the adapter moves the cursor first.
pub trait Bizobj {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Row the cursor points at.
    fn row_number(&self) -> usize;

    /// Move the cursor.
    fn set_row_number(&mut self, row: usize) -> Result<(), GridError>;

    /// Value of `field` at `row`.
    fn field_value(&self, field: &str, row: usize) -> Option<Value>;

    /// Write `field` on the current row. Validation failures are returned as
    /// [`GridError::SourceWrite`].
    fn set_field_value(&mut self, field: &str, value: Value) -> Result<(), GridError>;

    /// Sort the underlying cursor. The cursor should keep pointing at the
    /// same record afterwards.
    fn sort(&mut self, field: &str, order: SortOrder, case_sensitive: bool)
    -> Result<(), GridError>;

    /// Up to `limit` records (all when `None`) for schema introspection.
    fn data_set(&self, limit: Option<usize>) -> Vec<Record>;
}

/// [`DataSource`] adapter over a boxed [`Bizobj`].
pub struct BizobjSource {
    inner: Box<dyn Bizobj>,
}

impl std::fmt::Debug for BizobjSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BizobjSource")
            .field("row_count", &self.inner.row_count())
            .field("row_number", &self.inner.row_number())
            .finish()
    }
}

impl BizobjSource {
    pub fn new(bizobj: impl Bizobj + 'static) -> Self {
        Self {
            inner: Box::new(bizobj),
        }
    }

    /// The wrapped business object.
    pub fn bizobj(&self) -> &dyn Bizobj {
        self.inner.as_ref()
    }

    /// The wrapped business object, mutably.
    pub fn bizobj_mut(&mut self) -> &mut dyn Bizobj {
        self.inner.as_mut()
    }
}

impl DataSource for BizobjSource {
    fn row_count(&self) -> usize {
        self.inner.row_count()
    }

    fn value(&self, row: usize, field: &str) -> Option<Value> {
        if row >= self.inner.row_count() {
            return None;
        }
        self.inner.field_value(field, row)
    }

    fn set_value(&mut self, row: usize, field: &str, value: Value) -> Result<(), GridError> {
        if self.inner.row_number() != row {
            self.inner.set_row_number(row)?;
        }
        self.inner.set_field_value(field, value)
    }

    fn native_sort(
        &mut self,
        field: &str,
        order: SortOrder,
        case_sensitive: bool,
    ) -> Result<bool, GridError> {
        self.inner.sort(field, order, case_sensitive)?;
        Ok(true)
    }

    fn current_row(&self) -> Option<usize> {
        Some(self.inner.row_number())
    }

    fn set_current_row(&mut self, row: usize) -> Result<(), GridError> {
        self.inner.set_row_number(row)
    }

    fn sample(&self) -> Option<Record> {
        self.inner.data_set(Some(1)).into_iter().next()
    }
}
