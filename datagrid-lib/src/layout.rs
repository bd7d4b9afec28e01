//! Column layout: setting keys, width resolution, moves and auto-sizing.

use unicode_width::UnicodeWidthStr;

use crate::column::{AUTO_WIDTH, Column};

/// Size of the sort indicator drawn in a header.
pub const SORT_INDICATOR_SIZE: i32 = 6;

/// Gap on each side of the sort indicator.
pub const SORT_INDICATOR_BUFFER: i32 = 3;

/// Extra width reserved next to a header caption so the sort indicator fits.
pub const HEADER_BUFFER: i32 = 5 + 2 * SORT_INDICATOR_SIZE + 2 * SORT_INDICATOR_BUFFER;

// -------------------------------------------------------------------------
// Setting keys
// -------------------------------------------------------------------------

/// Builds the composite keys grid layout is persisted under.
///
/// Column properties live at `{form}.{grid}.{column}.{property}` and grid
/// properties at `{form}.{grid}.{property}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingKey {
    prefix: String,
}

impl SettingKey {
    pub fn new(form: &str, grid: &str) -> Self {
        Self {
            prefix: format!("{form}.{grid}"),
        }
    }

    /// `{form}.{grid}`, the prefix shared by every key of the grid.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Key of a column property.
    pub fn column(&self, column: &Column, property: &str) -> String {
        format!("{}.{}.{}", self.prefix, column.identifier(), property)
    }

    /// Key of a grid-level property.
    pub fn grid(&self, property: &str) -> String {
        format!("{}.{}", self.prefix, property)
    }

    pub fn width(&self, column: &Column) -> String {
        self.column(column, "Width")
    }

    pub fn order(&self, column: &Column) -> String {
        self.column(column, "Order")
    }

    pub fn row_height(&self) -> String {
        self.grid("RowHeight")
    }
}

// -------------------------------------------------------------------------
// Widths
// -------------------------------------------------------------------------

/// How a column width was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthSource {
    Persisted(i32),
    Declared(i32),
    /// Size to content.
    Auto,
}

/// Width precedence: a persisted user width, then the declared width, then
/// auto-size. Non-positive persisted values are ignored.
pub fn resolve_width(persisted: Option<i64>, declared: i32) -> WidthSource {
    if let Some(width) = persisted.and_then(|w| i32::try_from(w).ok()).filter(|w| *w > 0) {
        return WidthSource::Persisted(width);
    }
    if declared == AUTO_WIDTH || declared < 0 {
        WidthSource::Auto
    } else {
        WidthSource::Declared(declared)
    }
}

/// Measures rendered text in pixels.
pub trait TextMeasure {
    fn text_width(&self, text: &str) -> i32;
}

/// Fixed-pitch measurement: display columns times a cell width, plus padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonospaceMeasure {
    pub cell_width: i32,
    pub padding: i32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            cell_width: 8,
            padding: 8,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn text_width(&self, text: &str) -> i32 {
        let cols = i32::try_from(text.width()).unwrap_or(i32::MAX / self.cell_width.max(1));
        cols.saturating_mul(self.cell_width).saturating_add(self.padding)
    }
}

/// Width that fits a caption and every rendered cell, capped at `max_width`.
pub fn auto_width<'a>(
    measure: &dyn TextMeasure,
    caption: &str,
    cells: impl IntoIterator<Item = &'a str>,
    max_width: i32,
) -> i32 {
    let header = measure.text_width(caption) + HEADER_BUFFER;
    let content = cells
        .into_iter()
        .map(|text| measure.text_width(text))
        .max()
        .unwrap_or(0);
    header.max(content).min(max_width)
}

// -------------------------------------------------------------------------
// Ordering
// -------------------------------------------------------------------------

/// Sort columns by their `order`, giving unplaced columns their position.
///
/// Ties keep their current relative order.
pub fn sort_by_order(columns: &mut [Column]) {
    for (idx, col) in columns.iter_mut().enumerate() {
        if col.order_value() < 0 {
            col.set_order(i32::try_from(idx).unwrap_or(i32::MAX));
        }
    }
    columns.sort_by_key(Column::order_value);
}

/// Set every column's order to `index * 10`.
pub fn renormalize(columns: &mut [Column]) {
    for (idx, col) in columns.iter_mut().enumerate() {
        col.set_order(i32::try_from(idx * 10).unwrap_or(i32::MAX));
    }
}

/// Position a column lands on when dragged from `from` and dropped at `to`.
///
/// The column is removed first, so dropping it to the right shifts the
/// target left by one.
pub fn move_target(from: usize, to: usize, len: usize) -> usize {
    let target = if to > from { to - 1 } else { to };
    target.min(len.saturating_sub(1))
}

/// Move the column at `from` to `to` and renormalize every order.
///
/// Returns `false` when `from` is out of range.
pub fn move_column(columns: &mut Vec<Column>, from: usize, to: usize) -> bool {
    if from >= columns.len() {
        return false;
    }
    let col = columns.remove(from);
    let target = to.min(columns.len());
    columns.insert(target, col);
    renormalize(columns);
    true
}
