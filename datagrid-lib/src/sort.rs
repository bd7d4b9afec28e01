//! In-memory sorting of grid rows.
//!
//! Rows are sorted by one column at a time with a stable sort, so sorting by
//! a secondary column and then by a primary one yields a multi-key order.
//! Descending order is produced by reversing the ascending result, which
//! keeps equal keys in the exact reverse of their ascending order.
//!
//! Nulls form one total order across every data type: a null equals another
//! null and sorts before any non-null value. Ascending puts nulls first,
//! descending puts them last.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use chrono::NaiveTime;

use crate::model::{DataType, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which column the grid is sorted by, and how.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    column: Option<String>,
    order: Option<SortOrder>,
}

impl SortState {
    /// Field of the sorted column.
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Current direction, `None` when unsorted.
    pub fn order(&self) -> Option<SortOrder> {
        self.order
    }

    /// Toggle sort for a field.
    ///
    /// If the field is already sorted, flips the direction. Sorting a
    /// different field starts ascending. Returns the new direction.
    pub fn toggle(&mut self, field: &str) -> SortOrder {
        let order = match (&self.column, self.order) {
            (Some(current), Some(order)) if current == field => order.toggled(),
            _ => SortOrder::Asc,
        };
        self.column = Some(field.to_string());
        self.order = Some(order);
        order
    }

    /// Record an explicit sort.
    pub fn set(&mut self, field: &str, order: SortOrder) {
        self.column = Some(field.to_string());
        self.order = Some(order);
    }

    /// Forget the sort.
    pub fn clear(&mut self) {
        self.column = None;
        self.order = None;
    }
}

/// Picks the comparison type for a column.
///
/// Declared type first; otherwise the type of the first value, or of the
/// last one when the first is null, or of any non-null value; string when
/// every value is null.
pub fn infer_type(declared: Option<DataType>, values: &[Value]) -> DataType {
    if let Some(ty) = declared {
        return ty;
    }
    values
        .first()
        .and_then(Value::data_type)
        .or_else(|| values.last().and_then(Value::data_type))
        .or_else(|| values.iter().find_map(Value::data_type))
        .unwrap_or_default()
}

/// Compare two cell values under a column's comparison type.
pub fn compare_values(a: &Value, b: &Value, kind: DataType, case_sensitive: bool) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }
    if kind.is_textual() {
        return compare_text(a, b, case_sensitive);
    }
    compare_typed(a, b).unwrap_or_else(|| {
        type_rank(a)
            .cmp(&type_rank(b))
            .then_with(|| compare_text(a, b, case_sensitive))
    })
}

/// Stable ascending sort of `keys`, reversed for descending.
///
/// Returns the permutation: new position `i` holds old row `result[i]`.
pub fn sort_permutation(
    keys: &[Value],
    kind: DataType,
    case_sensitive: bool,
    order: SortOrder,
) -> Vec<usize> {
    let mut rows: Vec<usize> = (0..keys.len()).collect();
    if kind.is_textual() && !case_sensitive {
        // Fold once instead of on every comparison.
        let folded: Vec<Option<String>> = keys.iter().map(fold_key).collect();
        rows.sort_by(|&i, &j| folded[i].cmp(&folded[j]));
    } else {
        rows.sort_by(|&i, &j| compare_values(&keys[i], &keys[j], kind, case_sensitive));
    }
    if order == SortOrder::Desc {
        rows.reverse();
    }
    rows
}

fn fold_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(text_of(other).to_lowercase()),
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_display_string("", usize::MAX),
    }
}

fn compare_text(a: &Value, b: &Value, case_sensitive: bool) -> Ordering {
    if case_sensitive {
        text_of(a).cmp(&text_of(b))
    } else {
        text_of(a).to_lowercase().cmp(&text_of(b).to_lowercase())
    }
}

/// Same-family comparison, `None` when the values cannot be compared.
fn compare_typed(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Float(_), _) | (_, Value::Float(_)) => {
            Some(a.as_f64()?.total_cmp(&b.as_f64()?))
        }
        (Value::Date(_) | Value::DateTime(_), Value::Date(_) | Value::DateTime(_)) => {
            Some(as_datetime(a)?.cmp(&as_datetime(b)?))
        }
        (Value::Time(x), Value::Time(y)) => Some(x.cmp(y)),
        _ => Some(a.as_decimal()?.cmp(&b.as_decimal()?)),
    }
}

fn as_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Date(d) => Some(d.and_time(NaiveTime::MIN)),
        Value::DateTime(dt) => Some(*dt),
        _ => None,
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Decimal(_) => 2,
        Value::Date(_) | Value::DateTime(_) => 3,
        Value::Time(_) => 4,
        Value::String(_) => 5,
    }
}
