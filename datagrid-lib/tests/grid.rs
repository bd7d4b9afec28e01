//! Tests for the grid controller.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use datagrid_lib::column::{Alignment, Color, HeaderStyle};
use datagrid_lib::prelude::*;
use datagrid_lib::sort::{infer_type, sort_permutation};
use datagrid_lib::table::ColumnChange;
use serde_json::json;
use simplelog::{Config, LevelFilter, TestLogger};

fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

// -------------------------------------------------------------------------
// Test doubles
// -------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum ViewEvent {
    RowsAppended(usize),
    RowsRemoved(usize, usize),
    ColsAppended(usize),
    ColsRemoved(usize, usize),
}

#[derive(Clone, Default)]
struct RecordingView {
    events: Rc<RefCell<Vec<ViewEvent>>>,
}

impl RecordingView {
    fn take(&self) -> Vec<ViewEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl GridView for RecordingView {
    fn rows_appended(&mut self, count: usize) {
        self.events.borrow_mut().push(ViewEvent::RowsAppended(count));
    }

    fn rows_removed(&mut self, at: usize, count: usize) {
        self.events.borrow_mut().push(ViewEvent::RowsRemoved(at, count));
    }

    fn cols_appended(&mut self, count: usize) {
        self.events.borrow_mut().push(ViewEvent::ColsAppended(count));
    }

    fn cols_removed(&mut self, at: usize, count: usize) {
        self.events.borrow_mut().push(ViewEvent::ColsRemoved(at, count));
    }
}

#[derive(Clone, Default)]
struct RecordingHooks {
    calls: Rc<RefCell<Vec<String>>>,
}

impl GridHooks for RecordingHooks {
    fn on_enter(&mut self, row: usize, col: usize) {
        self.calls.borrow_mut().push(format!("enter {row},{col}"));
    }

    fn on_delete(&mut self, row: usize, _col: usize) {
        self.calls.borrow_mut().push(format!("delete {row}"));
    }

    fn on_escape(&mut self) {
        self.calls.borrow_mut().push("escape".to_string());
    }

    fn on_key(&mut self, key: KeyCombo, _row: usize, _col: usize) -> bool {
        self.calls.borrow_mut().push(format!("key {:?}", key.key));
        key.key == Key::F(2)
    }

    fn custom_sort(
        &mut self,
        field: &str,
        order: SortOrder,
        _source: Option<&mut dyn DataSource>,
    ) -> Result<(), GridError> {
        self.calls.borrow_mut().push(format!("sort {field} {order}"));
        Ok(())
    }
}

#[derive(Debug, Default)]
struct CursorState {
    rows: Vec<Record>,
    pos: usize,
    sorts: usize,
}

/// A cursor over shared rows. Negative ages are rejected.
#[derive(Clone, Default)]
struct MockBizobj {
    state: Rc<RefCell<CursorState>>,
}

impl MockBizobj {
    fn new(rows: Vec<Record>) -> Self {
        Self {
            state: Rc::new(RefCell::new(CursorState {
                rows,
                ..CursorState::default()
            })),
        }
    }
}

impl Bizobj for MockBizobj {
    fn row_count(&self) -> usize {
        self.state.borrow().rows.len()
    }

    fn row_number(&self) -> usize {
        self.state.borrow().pos
    }

    fn set_row_number(&mut self, row: usize) -> Result<(), GridError> {
        self.state.borrow_mut().pos = row;
        Ok(())
    }

    fn field_value(&self, field: &str, row: usize) -> Option<Value> {
        self.state.borrow().rows.get(row)?.get(field).cloned()
    }

    fn set_field_value(&mut self, field: &str, value: Value) -> Result<(), GridError> {
        let mut state = self.state.borrow_mut();
        let pos = state.pos;
        if field == "age" && value.as_f64().is_some_and(|v| v < 0.0) {
            return Err(GridError::source_write(field, pos, "age must not be negative"));
        }
        state.rows[pos].insert(field, value);
        Ok(())
    }

    fn sort(
        &mut self,
        field: &str,
        order: SortOrder,
        case_sensitive: bool,
    ) -> Result<(), GridError> {
        let mut state = self.state.borrow_mut();
        let keys: Vec<Value> = state
            .rows
            .iter()
            .map(|r| r.get(field).cloned().unwrap_or_default())
            .collect();
        let perm = sort_permutation(&keys, infer_type(None, &keys), case_sensitive, order);
        let current = state.pos;
        let sorted: Vec<Record> = perm.iter().map(|&i| state.rows[i].clone()).collect();
        state.rows = sorted;
        state.pos = perm.iter().position(|&i| i == current).unwrap_or(0);
        state.sorts += 1;
        Ok(())
    }

    fn data_set(&self, limit: Option<usize>) -> Vec<Record> {
        let state = self.state.borrow();
        state
            .rows
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

// -------------------------------------------------------------------------
// Helpers
// -------------------------------------------------------------------------

fn people() -> Vec<Record> {
    vec![
        Record::new().set("id", 1).set("name", "carol").set("age", 41),
        Record::new().set("id", 2).set("name", "Alice").set("age", 29),
        Record::new().set("id", 3).set("name", "bob").set("age", 35),
        Record::new().set("id", 4).set("name", "dave").set("age", 29),
    ]
}

fn people_grid() -> GridController {
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.build_from_data_set(people(), &DataSetOptions::new())
        .unwrap();
    grid
}

fn column_values(grid: &GridController, field: &str) -> Vec<Value> {
    let col = grid.column_index(field).unwrap();
    (0..grid.row_count()).map(|r| grid.cell_value(r, col)).collect()
}

fn ids(grid: &GridController) -> Vec<Value> {
    column_values(grid, "id")
}

fn date(y: i32, m: u32, d: u32) -> Value {
    Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

// -------------------------------------------------------------------------
// Binding and fill
// -------------------------------------------------------------------------

#[test]
fn test_fill_row_count_matches_source() {
    init_logger();
    let grid = people_grid();
    assert_eq!(grid.row_count(), 4);
    assert_eq!(grid.table().previous_row_count(), 4);
    assert_eq!(grid.column_count(), 3);
}

#[test]
fn test_fill_notifies_row_deltas() {
    init_logger();
    let view = RecordingView::default();
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory())
        .with_view(view.clone());
    grid.set_columns(vec![Column::new("id")]).unwrap();
    assert_eq!(view.take(), vec![ViewEvent::ColsAppended(1)]);

    grid.set_data_set(RowSet::new(people())).unwrap();
    assert_eq!(view.take(), vec![ViewEvent::RowsAppended(4)]);

    grid.data_set_mut().unwrap().push(Record::new().set("id", 5));
    assert!(grid.fill(false));
    assert_eq!(view.take(), vec![ViewEvent::RowsAppended(1)]);

    assert!(!grid.fill(false));
    assert!(view.take().is_empty());

    let rows = grid.data_set_mut().unwrap();
    rows.remove(0);
    rows.remove(0);
    assert!(grid.fill(false));
    assert_eq!(view.take(), vec![ViewEvent::RowsRemoved(3, 2)]);
}

#[test]
fn test_fill_without_binding_is_noop() {
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    assert!(!grid.fill(true));
    assert_eq!(grid.row_count(), 0);
}

#[test]
fn test_data_set_rejected_while_source_bound() {
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_data_source(BizobjSource::new(MockBizobj::new(people())));
    let err = grid.set_data_set(RowSet::new(people())).unwrap_err();
    assert!(err.is_configuration());
    assert!(grid.binding().is_cursor());
}

#[test]
fn test_data_source_replaces_data_set() {
    let mut grid = people_grid();
    grid.set_data_source(BizobjSource::new(MockBizobj::new(people()[..2].to_vec())));
    assert!(grid.binding().data_set().is_none());
    assert_eq!(grid.row_count(), 2);
}

#[test]
fn test_identical_columns_take_cheap_path() {
    let mut grid = people_grid();
    let columns = grid.columns().to_vec();
    assert_eq!(grid.set_columns(columns).unwrap(), ColumnChange::Refreshed);
    assert_eq!(
        grid.set_columns(vec![Column::new("id")]).unwrap(),
        ColumnChange::Rebuilt
    );
}

// -------------------------------------------------------------------------
// Columns
// -------------------------------------------------------------------------

#[test]
fn test_build_from_data_set_introspects_schema() {
    let rows = RowSet::from_json(json!([
        {"dabo-pk": 1, "code": null, "name": "a", "price": 1.5, "secret": "x"},
        {"dabo-pk": 2, "code": 7, "name": "b", "price": 2.5, "secret": "y"},
    ]))
    .unwrap();
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    let options = DataSetOptions::new()
        .skip("secret")
        .caption("name", "Name")
        .width("price", 60);
    grid.build_from_data_set(rows.into_records(), &options)
        .unwrap();

    let fields: Vec<_> = grid.columns().iter().map(|c| c.data_field()).collect();
    assert_eq!(fields, ["code", "name", "price"]);
    assert_eq!(grid.column(0).unwrap().declared_type(), Some(DataType::Int));
    assert_eq!(grid.column(1).unwrap().caption_text(), "Name");
    assert_eq!(grid.column(2).unwrap().declared_type(), Some(DataType::Float));
    assert_eq!(grid.column(2).unwrap().width_value(), 60);
    // Auto-sized columns never exceed the cap.
    assert!(grid.column(1).unwrap().width_value() <= 250);
}

#[test]
fn test_add_column_places_after_last() {
    let mut grid = people_grid();
    let idx = grid.add_column(Column::new("extra")).unwrap();
    assert_eq!(idx, 3);
    let col = grid.column(3).unwrap();
    assert_eq!(col.order_value(), 30);
    assert_eq!(col.width_value(), 75);
}

#[test]
fn test_add_column_with_order_renormalizes_and_persists() {
    let mut grid = GridController::new(
        GridConfig::new("frm", "grd"),
        SettingsProvider::in_memory(),
    );
    grid.set_columns(vec![Column::new("a"), Column::new("b")])
        .unwrap();
    assert_eq!(grid.add_column(Column::new("x").order(5)).unwrap(), 1);
    // "x" now sits at 10; an equal order lands after it.
    assert_eq!(grid.add_column(Column::new("y").order(10)).unwrap(), 2);

    let layout: Vec<_> = grid
        .columns()
        .iter()
        .map(|c| (c.data_field(), c.order_value()))
        .collect();
    assert_eq!(layout, [("a", 0), ("x", 10), ("y", 20), ("b", 30)]);
    assert_eq!(
        grid.settings().get::<i64>("frm.grd.column_b.Order").unwrap(),
        Some(30)
    );
    assert_eq!(
        grid.settings().get::<i64>("frm.grd.column_y.Order").unwrap(),
        Some(20)
    );
}

#[test]
fn test_duplicate_field_is_rejected() {
    let mut grid = people_grid();
    let err = grid.add_column(Column::new("id")).unwrap_err();
    assert!(matches!(err, GridError::Configuration { .. }));
    assert_eq!(grid.column_count(), 3);

    let err = grid
        .set_columns(vec![Column::new("b"), Column::new("b")])
        .unwrap_err();
    assert!(matches!(err, GridError::Configuration { .. }));
    let fields: Vec<_> = grid.columns().iter().map(|c| c.data_field()).collect();
    assert_eq!(fields, ["id", "name", "age"]);
}

#[test]
fn test_blank_columns_may_repeat() {
    let mut grid = people_grid();
    grid.set_column_count(5).unwrap();
    assert_eq!(grid.column_count(), 5);
    assert_eq!(grid.column(4).unwrap().data_field(), "");
    grid.set_column_count(2).unwrap();
    assert_eq!(grid.column_count(), 2);
}

#[test]
fn test_header_style_inherits_grid_defaults() {
    let defaults = HeaderStyle {
        background: Some(Color::rgb(220, 220, 220)),
        alignment: Some(Alignment::Center),
        ..HeaderStyle::default()
    };
    let mut grid = GridController::new(
        GridConfig::default().with_header_defaults(defaults),
        SettingsProvider::in_memory(),
    );
    grid.set_columns(vec![Column::new("a"), Column::new("b")])
        .unwrap();
    grid.column_mut(1).unwrap().header_mut().alignment = Some(Alignment::Right);

    let a = grid.header_style(0).unwrap();
    assert_eq!(a.alignment, Some(Alignment::Center));
    assert_eq!(a.background, Some(Color::rgb(220, 220, 220)));
    let b = grid.header_style(1).unwrap();
    assert_eq!(b.alignment, Some(Alignment::Right));
    assert_eq!(b.background, Some(Color::rgb(220, 220, 220)));
    assert!(grid.header_style(2).is_none());
}

#[test]
fn test_move_column_renormalizes_and_persists() {
    let mut grid = GridController::new(
        GridConfig::new("frm", "grd"),
        SettingsProvider::in_memory(),
    );
    grid.set_columns(["a", "b", "c", "d"].into_iter().map(Column::new).collect()).unwrap();
    assert!(grid.move_column(0, 2));

    let fields: Vec<_> = grid.columns().iter().map(|c| c.data_field()).collect();
    assert_eq!(fields, ["b", "c", "a", "d"]);
    let orders: Vec<_> = grid.columns().iter().map(Column::order_value).collect();
    assert_eq!(orders, [0, 10, 20, 30]);
    assert_eq!(
        grid.settings().get::<i64>("frm.grd.column_a.Order").unwrap(),
        Some(20)
    );
}

#[test]
fn test_persisted_width_beats_declared() {
    let settings = SettingsProvider::in_memory();
    settings.set("frm.grd.column_name.Width", 120i64).unwrap();
    let mut grid = GridController::new(GridConfig::new("frm", "grd"), settings);
    grid.set_columns(vec![Column::new("name").width(80), Column::new("age").width(80)]).unwrap();
    assert_eq!(grid.column(0).unwrap().width_value(), 120);
    assert_eq!(grid.column(1).unwrap().width_value(), 80);
}

#[test]
fn test_auto_size_persists_when_asked() {
    let mut grid = people_grid();
    let col = grid.column_index("name").unwrap();
    grid.auto_size_column(col, true);
    let width = grid.column(col).unwrap().width_value();
    assert_eq!(
        grid.settings()
            .get::<i64>("form.grid.column_name.Width")
            .unwrap(),
        Some(i64::from(width))
    );
}

#[test]
fn test_current_field_must_exist() {
    let mut grid = people_grid();
    grid.set_current_field("age").unwrap();
    assert_eq!(grid.current_field(), Some("age"));
    assert!(matches!(
        grid.set_current_field("nope"),
        Err(GridError::UnknownField { .. })
    ));
}

// -------------------------------------------------------------------------
// Cells
// -------------------------------------------------------------------------

#[test]
fn test_cell_write_goes_to_source() {
    let mut grid = people_grid();
    let col = grid.column_index("age").unwrap();
    grid.set_cell_value(1, col, Value::Int(30)).unwrap();
    let rows = grid.binding().data_set().unwrap();
    assert_eq!(rows.get(1).unwrap().get("age"), Some(&Value::Int(30)));
}

#[test]
fn test_write_without_binding_is_configuration_error() {
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("a")]).unwrap();
    assert!(grid.set_cell_value(0, 0, Value::Int(1)).unwrap_err().is_configuration());
}

#[test]
fn test_out_of_range_cells_degrade() {
    let grid = people_grid();
    assert_eq!(grid.cell_value(99, 0), Value::Null);
    assert_eq!(grid.cell_value(0, 99), Value::Null);
    assert!(grid.cell_attribute(0, 99).read_only);
    assert_eq!(grid.cell_display(99, 0), "<null>");
}

#[test]
fn test_cells_read_only_unless_grid_and_column_editable() {
    let mut grid = GridController::new(
        GridConfig::default().with_editable(true),
        SettingsProvider::in_memory(),
    );
    grid.set_columns(vec![Column::new("a").editable(), Column::new("b")]).unwrap();
    assert!(!grid.cell_attribute(0, 0).read_only);
    assert!(grid.cell_attribute(0, 1).read_only);

    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("a").editable()]).unwrap();
    assert!(grid.cell_attribute(0, 0).read_only);
}

#[test]
fn test_row_labels() {
    let mut grid = GridController::new(
        GridConfig::default().with_row_labels(30),
        SettingsProvider::in_memory(),
    );
    grid.set_data_set(RowSet::new(people())).unwrap();
    assert_eq!(grid.row_label(2), Some("3".to_string()));
    grid.set_row_labels(vec!["a".into(), "b".into(), "c".into(), "d".into()]);
    assert_eq!(grid.row_label(2), Some("c".to_string()));
    assert_eq!(people_grid().row_label(0), None);
    assert_eq!(grid.row_label_width(), 30);
    assert_eq!(people_grid().row_label_width(), 0);
}

#[test]
fn test_bool_column_displays_numeric_flags() {
    let rows = RowSet::from_json(json!([{"done": 1}, {"done": 0}, {"done": null}])).unwrap();
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("done").data_type(DataType::Bool)])
        .unwrap();
    grid.set_data_set(rows).unwrap();
    assert_eq!(grid.cell_display(0, 0), "true");
    assert_eq!(grid.cell_display(1, 0), "false");
    assert_eq!(grid.cell_display(2, 0), "<null>");
}

// -------------------------------------------------------------------------
// Sorting
// -------------------------------------------------------------------------

#[test]
fn test_sort_folds_case_by_default() {
    let mut grid = people_grid();
    let col = grid.column_index("name").unwrap();
    grid.process_sort(col).unwrap();
    assert_eq!(
        column_values(&grid, "name"),
        vec![
            Value::from("Alice"),
            Value::from("bob"),
            Value::from("carol"),
            Value::from("dave")
        ]
    );
    assert_eq!(grid.sort_state().order(), Some(SortOrder::Asc));
}

#[test]
fn test_descending_reverses_ascending_with_ties() {
    let mut grid = people_grid();
    let col = grid.column_index("age").unwrap();
    grid.process_sort(col).unwrap();
    let mut asc = ids(&grid);
    assert_eq!(asc, vec![Value::Int(2), Value::Int(4), Value::Int(3), Value::Int(1)]);

    grid.process_sort(col).unwrap();
    assert_eq!(grid.sort_state().order(), Some(SortOrder::Desc));
    asc.reverse();
    assert_eq!(ids(&grid), asc);
}

#[test]
fn test_date_nulls_first_ascending_last_descending() {
    let rows = vec![
        Record::new().set("id", 1).set("due", date(2024, 3, 1)),
        Record::new().set("id", 2).set("due", Value::Null),
        Record::new().set("id", 3).set("due", date(2023, 1, 9)),
        Record::new().set("id", 4).set("due", Value::Null),
    ];
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![
        Column::new("id").data_type(DataType::Int),
        Column::new("due").data_type(DataType::Date),
    ]).unwrap();
    grid.set_data_set(RowSet::new(rows)).unwrap();

    grid.sort_by("due", SortOrder::Asc).unwrap();
    let asc = ids(&grid);
    assert_eq!(asc, vec![Value::Int(2), Value::Int(4), Value::Int(3), Value::Int(1)]);

    grid.sort_by("due", SortOrder::Desc).unwrap();
    let mut expected = asc;
    expected.reverse();
    assert_eq!(ids(&grid), expected);
}

#[test]
fn test_integer_nulls_share_the_same_total_order() {
    let rows = RowSet::from_json(json!([{"age": 30}, {"age": null}, {"age": 10}])).unwrap();
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("age").data_type(DataType::Int)]).unwrap();
    grid.set_data_set(rows).unwrap();
    grid.sort_by("age", SortOrder::Asc).unwrap();
    assert_eq!(
        column_values(&grid, "age"),
        vec![Value::Null, Value::Int(10), Value::Int(30)]
    );
}

#[test]
fn test_sort_is_idempotent() {
    let mut grid = people_grid();
    grid.sort_by("age", SortOrder::Asc).unwrap();
    let once = ids(&grid);
    grid.sort_by("age", SortOrder::Asc).unwrap();
    assert_eq!(ids(&grid), once);
}

#[test]
fn test_successive_sorts_give_multi_key_order() {
    let mut grid = people_grid();
    grid.sort_by("name", SortOrder::Asc).unwrap();
    grid.sort_by("age", SortOrder::Asc).unwrap();
    // Ties on age stay ordered by name.
    assert_eq!(
        column_values(&grid, "name"),
        vec![
            Value::from("Alice"),
            Value::from("dave"),
            Value::from("bob"),
            Value::from("carol")
        ]
    );
}

#[test]
fn test_unsortable_column_is_left_alone() {
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("id").not_sortable()]).unwrap();
    grid.set_data_set(RowSet::new(people())).unwrap();
    grid.sort_by("id", SortOrder::Desc).unwrap();
    assert_eq!(grid.sort_state().column(), None);

    let mut grid = GridController::new(
        GridConfig::default().with_sortable(false),
        SettingsProvider::in_memory(),
    );
    grid.set_columns(vec![Column::new("id")]).unwrap();
    grid.set_data_set(RowSet::new(people())).unwrap();
    grid.process_sort(0).unwrap();
    assert_eq!(grid.sort_state().column(), None);
}

#[test]
fn test_sort_moves_row_labels_and_selection() {
    let mut grid = GridController::new(
        GridConfig::default().with_row_labels(30),
        SettingsProvider::in_memory(),
    );
    grid.set_columns(vec![Column::new("id"), Column::new("age")]).unwrap();
    grid.set_data_set(RowSet::new(people())).unwrap();
    grid.set_row_labels(vec!["r1".into(), "r2".into(), "r3".into(), "r4".into()]);
    grid.set_current_row(0).unwrap();

    grid.sort_by("age", SortOrder::Asc).unwrap();
    assert_eq!(grid.row_labels(), ["r2", "r4", "r3", "r1"]);
    // Row 0 (id 1, age 41) is now last.
    assert_eq!(grid.current_row(), 3);
}

#[test]
fn test_sort_by_unknown_field() {
    let mut grid = people_grid();
    assert!(matches!(
        grid.sort_by("nope", SortOrder::Asc),
        Err(GridError::UnknownField { .. })
    ));
}

#[test]
fn test_custom_sort_hook_replaces_sorting() {
    let hooks = RecordingHooks::default();
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory())
        .with_hooks(hooks.clone());
    grid.build_from_data_set(people(), &DataSetOptions::new())
        .unwrap();
    grid.set_custom_sort(true);
    let before = ids(&grid);
    grid.sort_by("age", SortOrder::Desc).unwrap();
    assert_eq!(ids(&grid), before);
    assert_eq!(*hooks.calls.borrow(), vec!["sort age DESC".to_string()]);
}

// -------------------------------------------------------------------------
// Cursor sources
// -------------------------------------------------------------------------

#[test]
fn test_cursor_write_moves_pointer_first() {
    let biz = MockBizobj::new(people());
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("id"), Column::new("age")]).unwrap();
    grid.set_data_source(BizobjSource::new(biz.clone()));

    grid.set_cell_value(2, 1, Value::Int(36)).unwrap();
    assert_eq!(biz.state.borrow().pos, 2);
    assert_eq!(grid.cell_value(2, 1), Value::Int(36));
}

#[test]
fn test_cursor_rejected_write_propagates() {
    let biz = MockBizobj::new(people());
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("id"), Column::new("age")]).unwrap();
    grid.set_data_source(BizobjSource::new(biz));

    let err = grid.set_cell_value(1, 1, Value::Int(-5)).unwrap_err();
    assert!(matches!(err, GridError::SourceWrite { row: 1, .. }));
    assert_eq!(grid.cell_value(1, 1), Value::Int(29));
}

#[test]
fn test_cursor_native_sort_keeps_selection() {
    let biz = MockBizobj::new(people());
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("id"), Column::new("age")]).unwrap();
    grid.set_data_source(BizobjSource::new(biz.clone()));
    grid.set_current_row(0).unwrap();

    grid.process_sort(1).unwrap();
    assert_eq!(biz.state.borrow().sorts, 1);
    assert_eq!(grid.current_row(), 3);
    assert_eq!(grid.cell_value(grid.current_row(), 0), Value::Int(1));
}

#[test]
fn test_cursor_follows_selection() {
    let biz = MockBizobj::new(people());
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("id")]).unwrap();
    grid.set_data_source(BizobjSource::new(biz.clone()));
    grid.set_current_row(3).unwrap();
    assert_eq!(biz.state.borrow().pos, 3);
}

#[test]
fn test_cursor_row_count_changes_notify() {
    let view = RecordingView::default();
    let biz = MockBizobj::new(people());
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory())
        .with_view(view.clone());
    grid.set_columns(vec![Column::new("id")]).unwrap();
    grid.set_data_source(BizobjSource::new(biz.clone()));
    view.take();

    biz.state.borrow_mut().rows.truncate(1);
    assert!(grid.fill(false));
    assert_eq!(view.take(), vec![ViewEvent::RowsRemoved(1, 3)]);
}

// -------------------------------------------------------------------------
// Incremental search
// -------------------------------------------------------------------------

fn ages_grid() -> GridController {
    let rows = RowSet::from_json(json!([
        {"age": 40}, {"age": 10}, {"age": 30}, {"age": 20}
    ]))
    .unwrap();
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("age").data_type(DataType::Int)]).unwrap();
    grid.set_data_set(rows).unwrap();
    grid
}

#[test]
fn test_search_waits_for_debounce() {
    init_logger();
    let mut grid = ages_grid();
    let t0 = Instant::now();
    grid.add_to_search('3', t0);
    grid.add_to_search('0', t0 + Duration::from_millis(200));
    assert!(!grid.poll_search(t0 + Duration::from_millis(700)).unwrap());
    assert_eq!(grid.search_buffer(), "30");

    assert!(grid.poll_search(t0 + Duration::from_millis(800)).unwrap());
    assert_eq!(grid.current_row(), 2);
    assert_eq!(grid.search_buffer(), "");
    assert_eq!(grid.search_deadline(), None);
}

#[test]
fn test_nearest_search_lands_below() {
    let mut grid = ages_grid();
    assert!(grid.run_search("25").unwrap());
    assert_eq!(grid.cell_value(grid.current_row(), 0), Value::Int(20));
}

#[test]
fn test_nearest_search_without_lower_value_is_noop() {
    let mut grid = ages_grid();
    grid.set_current_row(2).unwrap();
    assert!(!grid.run_search("5").unwrap());
    assert_eq!(grid.current_row(), 2);
}

#[test]
fn test_exact_search_without_nearest() {
    let rows = RowSet::from_json(json!([{"age": 40}, {"age": 10}])).unwrap();
    let mut grid = GridController::new(
        GridConfig::default().with_search_nearest(false),
        SettingsProvider::in_memory(),
    );
    grid.set_columns(vec![Column::new("age")]).unwrap();
    grid.set_data_set(rows).unwrap();
    assert!(!grid.run_search("25").unwrap());
    assert_eq!(grid.current_row(), 0);
    assert!(grid.run_search("10").unwrap());
    assert_eq!(grid.current_row(), 1);
}

#[test]
fn test_uncoercible_search_text_becomes_zero() {
    let rows = RowSet::from_json(json!([{"n": 5}, {"n": 0}])).unwrap();
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("n")]).unwrap();
    grid.set_data_set(rows).unwrap();
    assert!(grid.run_search("abc").unwrap());
    assert_eq!(grid.current_row(), 1);
}

#[test]
fn test_text_search_ignores_case() {
    let mut grid = people_grid();
    grid.set_current_field("name").unwrap();
    assert!(grid.run_search("BOB").unwrap());
    assert_eq!(grid.cell_value(grid.current_row(), 0), Value::Int(3));
}

#[test]
fn test_search_on_empty_grid_is_noop() {
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("a")]).unwrap();
    grid.set_data_set(RowSet::default()).unwrap();
    assert!(!grid.run_search("x").unwrap());
}

#[test]
fn test_unsearchable_column_ignores_typing() {
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("age").not_searchable()]).unwrap();
    grid.set_data_set(RowSet::new(people())).unwrap();
    let t0 = Instant::now();
    assert_eq!(
        grid.key_down(KeyCombo::key(Key::Char('3')), t0),
        EventResult::Ignored
    );
    assert_eq!(grid.search_buffer(), "");
}

// -------------------------------------------------------------------------
// Keys
// -------------------------------------------------------------------------

#[test]
fn test_keys_route_to_search_and_hooks() {
    let hooks = RecordingHooks::default();
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory())
        .with_hooks(hooks.clone());
    grid.build_from_data_set(people(), &DataSetOptions::new())
        .unwrap();
    let t0 = Instant::now();

    assert_eq!(grid.key_down(KeyCombo::key(Key::Char('4')), t0), EventResult::Consumed);
    assert_eq!(grid.key_down(KeyCombo::key(Key::Char('A')).shift(), t0), EventResult::Consumed);
    assert_eq!(grid.search_buffer(), "4A");

    assert_eq!(grid.key_down(KeyCombo::key(Key::Escape), t0), EventResult::Consumed);
    assert_eq!(grid.search_buffer(), "");
    assert_eq!(grid.search_deadline(), None);

    assert_eq!(grid.key_down(KeyCombo::key(Key::Enter), t0), EventResult::Consumed);
    assert_eq!(grid.key_down(KeyCombo::key(Key::Delete), t0), EventResult::Consumed);
    assert_eq!(grid.key_down(KeyCombo::key(Key::Char('s')).ctrl(), t0), EventResult::Ignored);
    assert_eq!(grid.key_down(KeyCombo::key(Key::F(2)), t0), EventResult::Consumed);
    assert_eq!(grid.search_buffer(), "");

    assert_eq!(
        *hooks.calls.borrow(),
        vec![
            "escape".to_string(),
            "enter 0,0".to_string(),
            "delete 0".to_string(),
            "key Char('s')".to_string(),
            "key F(2)".to_string(),
        ]
    );
}

#[test]
fn test_editable_column_does_not_search() {
    let mut grid = GridController::new(
        GridConfig::default().with_editable(true),
        SettingsProvider::in_memory(),
    );
    grid.set_columns(vec![Column::new("name").editable()]).unwrap();
    grid.set_data_set(RowSet::new(people())).unwrap();
    assert_eq!(
        grid.key_down(KeyCombo::key(Key::Char('b')), Instant::now()),
        EventResult::Ignored
    );
    assert_eq!(grid.search_buffer(), "");
    assert!(grid.begin_edit());
    assert!(grid.is_editing());
}

// -------------------------------------------------------------------------
// Header gestures
// -------------------------------------------------------------------------

#[test]
fn test_header_click_sorts() {
    let mut grid = people_grid();
    let col = grid.column_index("age").unwrap();
    grid.header_press(HeaderEvent::new(HeaderHit::Column(col), 100));
    let result = grid
        .header_release(HeaderEvent::new(HeaderHit::Column(col), 100))
        .unwrap();
    assert_eq!(result, EventResult::Consumed);
    assert_eq!(grid.sort_state().column(), Some("age"));
}

#[test]
fn test_header_drag_moves_column() {
    let mut grid = GridController::new(GridConfig::default(), SettingsProvider::in_memory());
    grid.set_columns(["a", "b", "c", "d"].into_iter().map(Column::new).collect()).unwrap();

    grid.header_press(HeaderEvent::new(HeaderHit::Column(0), 10));
    assert_eq!(
        grid.header_drag(HeaderEvent::new(HeaderHit::Column(0), 14)),
        EventResult::StartDrag
    );
    grid.header_drag(HeaderEvent::new(HeaderHit::Column(2), 160));
    grid.header_release(HeaderEvent::new(HeaderHit::Column(2), 160))
        .unwrap();

    let fields: Vec<_> = grid.columns().iter().map(|c| c.data_field()).collect();
    assert_eq!(fields, ["b", "c", "a", "d"]);
    assert_eq!(grid.sort_state().column(), None);
}

#[test]
fn test_header_border_drag_resizes_and_persists() {
    let mut grid = GridController::new(GridConfig::new("f", "g"), SettingsProvider::in_memory());
    grid.set_columns(vec![Column::new("a").width(100), Column::new("b").width(100)]).unwrap();

    grid.header_press(HeaderEvent::new(HeaderHit::Border(0), 100));
    grid.header_drag(HeaderEvent::new(HeaderHit::Border(0), 130));
    assert_eq!(grid.column(0).unwrap().width_value(), 130);
    assert_eq!(grid.settings().get::<i64>("f.g.column_a.Width").unwrap(), None);

    grid.header_release(HeaderEvent::new(HeaderHit::Column(1), 130))
        .unwrap();
    assert_eq!(grid.settings().get::<i64>("f.g.column_a.Width").unwrap(), Some(130));
}

#[test]
fn test_row_height_persisted() {
    let settings = SettingsProvider::in_memory();
    let mut grid = GridController::new(GridConfig::new("f", "g"), settings.clone());
    assert_eq!(grid.row_height(), 24);
    grid.set_row_height(32);
    let grid = GridController::new(GridConfig::new("f", "g"), settings);
    assert_eq!(grid.row_height(), 32);
}
