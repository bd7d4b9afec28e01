//! Virtual table between the grid's columns and its data source.
//!
//! The table holds no row data. It remembers the structural signature of
//! the column set it was last given and the row count of the last fill, and
//! turns differences into the smallest notifications the rendering layer
//! needs.

use crate::column::{Column, ColumnAttribute, ColumnSignature};
use crate::error::GridError;
use crate::model::Value;
use crate::source::DataSource;
use crate::view::GridView;

/// Outcome of [`DataTable::set_columns`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnChange {
    /// Same structure; only metadata was refreshed.
    Refreshed,
    /// The column set changed and was replaced.
    Rebuilt,
}

#[derive(Debug, Clone, Default)]
pub struct DataTable {
    signature: Vec<ColumnSignature>,
    previous_row_count: usize,
}

impl DataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a new column set.
    ///
    /// Columns must already be in display order. A structurally identical
    /// set only triggers a repaint.
    pub fn set_columns(&mut self, columns: &[Column], view: &mut dyn GridView) -> ColumnChange {
        let signature: Vec<ColumnSignature> = columns.iter().map(Column::signature).collect();
        if signature == self.signature {
            view.refresh();
            return ColumnChange::Refreshed;
        }

        let old = self.signature.len();
        let new = signature.len();
        log::debug!("rebuilding column set: {old} -> {new} columns");
        if new > old {
            view.cols_appended(new - old);
        } else if new < old {
            view.cols_removed(new, old - new);
        }
        self.signature = signature;
        view.refresh();
        ColumnChange::Rebuilt
    }

    /// Number of columns in the last column set.
    pub fn column_count(&self) -> usize {
        self.signature.len()
    }

    /// Row count of the source at the last fill.
    pub fn previous_row_count(&self) -> usize {
        self.previous_row_count
    }

    pub fn row_count(&self, source: Option<&dyn DataSource>) -> usize {
        source.map_or(0, |s| s.row_count())
    }

    /// Value of a cell. Out-of-range cells and missing fields read as null.
    pub fn cell_value(
        &self,
        columns: &[Column],
        source: Option<&dyn DataSource>,
        row: usize,
        col: usize,
    ) -> Value {
        match (columns.get(col), source) {
            (Some(column), Some(source)) => source
                .value(row, column.data_field())
                .unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }

    /// Write a cell through to the source.
    pub fn set_cell_value(
        &self,
        columns: &[Column],
        source: &mut dyn DataSource,
        row: usize,
        col: usize,
        value: Value,
    ) -> Result<(), GridError> {
        let column = columns.get(col).ok_or(GridError::UnknownColumn {
            index: col,
            count: columns.len(),
        })?;
        source.set_value(row, column.data_field(), value)
    }

    /// Attribute of a cell with the row's overrides applied.
    ///
    /// A column index past the end yields [`ColumnAttribute::fallback`].
    pub fn cell_attribute(&self, columns: &[Column], row: usize, col: usize) -> ColumnAttribute {
        columns
            .get(col)
            .map_or_else(ColumnAttribute::fallback, |c| c.attribute_for_row(row))
    }

    /// Sync the view with the source's row count.
    ///
    /// Returns `true` when the view was notified. Without a source this is
    /// a no-op.
    pub fn fill(
        &mut self,
        source: Option<&dyn DataSource>,
        force: bool,
        view: &mut dyn GridView,
    ) -> bool {
        let Some(source) = source else {
            return false;
        };
        let old = self.previous_row_count;
        let new = source.row_count();
        if old == new && !force {
            return false;
        }

        log::debug!("filling table: {old} -> {new} rows");
        if new > old {
            view.rows_appended(new - old);
        } else if new < old {
            view.rows_removed(new, old - new);
        }
        self.previous_row_count = new;
        view.refresh();
        true
    }

    /// Forget the last fill so the next one starts from zero rows.
    pub fn reset_rows(&mut self, view: &mut dyn GridView) {
        if self.previous_row_count > 0 {
            view.rows_removed(0, self.previous_row_count);
        }
        self.previous_row_count = 0;
    }
}
