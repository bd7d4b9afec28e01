//! Data sources a grid can bind to.
//!
//! The grid talks to its rows through the [`DataSource`] trait only. Two
//! implementations exist:
//!
//! - [`RowSet`]: an in-memory sequence of [`Record`]s (a "data set").
//! - [`BizobjSource`]: an adapter over a live, cursor-based [`Bizobj`].
//!
//! A grid holds at most one of them at a time through [`Binding`].

mod bizobj;
mod rows;

pub use bizobj::{Bizobj, BizobjSource};
pub use rows::RowSet;

use crate::error::GridError;
use crate::model::{Record, Value};
use crate::sort::SortOrder;

/// Row access shared by every kind of source.
pub trait DataSource {
    /// Number of rows.
    fn row_count(&self) -> usize;

    /// Value of `field` at `row`, or `None` when the row or field is absent.
    fn value(&self, row: usize, field: &str) -> Option<Value>;

    /// Write `value` into `field` at `row`.
    fn set_value(&mut self, row: usize, field: &str, value: Value) -> Result<(), GridError>;

    /// Sort with the source's own machinery.
    ///
    /// Returns `Ok(false)` when the source has no native sort and the grid
    /// should sort in memory.
    fn native_sort(
        &mut self,
        _field: &str,
        _order: SortOrder,
        _case_sensitive: bool,
    ) -> Result<bool, GridError> {
        Ok(false)
    }

    /// Reorder rows so that new row `i` is old row `permutation[i]`.
    fn reorder(&mut self, _permutation: &[usize]) -> Result<(), GridError> {
        Err(GridError::Unsupported {
            operation: "reorder",
        })
    }

    /// Row the source's own cursor points at, for cursor-based sources.
    fn current_row(&self) -> Option<usize> {
        None
    }

    /// Move the source's own cursor.
    fn set_current_row(&mut self, _row: usize) -> Result<(), GridError> {
        Ok(())
    }

    /// First record, used to infer columns.
    fn sample(&self) -> Option<Record>;
}

/// What a grid is bound to.
#[derive(Debug, Default)]
pub enum Binding {
    #[default]
    None,
    /// An in-memory data set.
    DataSet(RowSet),
    /// A live business-object cursor.
    DataSource(BizobjSource),
}

impl Binding {
    /// The bound source, if any.
    pub fn source(&self) -> Option<&dyn DataSource> {
        match self {
            Binding::None => None,
            Binding::DataSet(rows) => Some(rows),
            Binding::DataSource(biz) => Some(biz),
        }
    }

    /// The bound source, mutably.
    pub fn source_mut(&mut self) -> Option<&mut dyn DataSource> {
        match self {
            Binding::None => None,
            Binding::DataSet(rows) => Some(rows),
            Binding::DataSource(biz) => Some(biz),
        }
    }

    /// The in-memory data set, if that is what is bound.
    pub fn data_set(&self) -> Option<&RowSet> {
        match self {
            Binding::DataSet(rows) => Some(rows),
            _ => None,
        }
    }

    /// Returns `true` when bound to a live cursor.
    pub fn is_cursor(&self) -> bool {
        matches!(self, Binding::DataSource(_))
    }

    /// Number of rows of the bound source, 0 when unbound.
    pub fn row_count(&self) -> usize {
        self.source().map_or(0, |s| s.row_count())
    }
}
