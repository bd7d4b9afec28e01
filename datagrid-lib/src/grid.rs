//! The grid controller.
//!
//! [`GridController`] owns the column collection, the binding to a data
//! source and the virtual [`DataTable`], and drives layout changes, sorting,
//! incremental search and layout persistence. It holds no copy of the row
//! data: every read and write goes through the bound source.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::column::{AUTO_WIDTH, Column, ColumnAttribute, HeaderStyle, UNSET_ORDER};
use crate::config::GridConfig;
use crate::error::GridError;
use crate::input::{EventResult, HeaderEvent, HeaderHit, Key, KeyCombo, MouseButton};
use crate::layout::{self, MonospaceMeasure, SettingKey, TextMeasure, WidthSource};
use crate::model::{DataType, Record, Value};
use crate::search::{IncrementalSearch, coerce_search_text, find_row};
use crate::settings::{SettingValue, SettingsProvider};
use crate::sort::{SortOrder, SortState, infer_type, sort_permutation};
use crate::source::{Binding, BizobjSource, DataSource, RowSet};
use crate::table::{ColumnChange, DataTable};
use crate::view::{GridView, NullView};

/// Prefix of record fields that are internal and never shown.
const INTERNAL_FIELD_PREFIX: &str = "dabo-";

/// Application hooks for keys and sorting.
///
/// Every method has a no-op default.
pub trait GridHooks {
    /// Enter was pressed on a cell.
    fn on_enter(&mut self, _row: usize, _col: usize) {}

    /// Delete was pressed on a cell.
    fn on_delete(&mut self, _row: usize, _col: usize) {}

    /// Escape was pressed. Any pending search has already been abandoned.
    fn on_escape(&mut self) {}

    /// A key the grid does not handle itself. Return `true` to consume it.
    fn on_key(&mut self, _key: KeyCombo, _row: usize, _col: usize) -> bool {
        false
    }

    /// Sort replacement used while the grid's custom sort is enabled.
    fn custom_sort(
        &mut self,
        _field: &str,
        _order: SortOrder,
        _source: Option<&mut dyn DataSource>,
    ) -> Result<(), GridError> {
        Ok(())
    }
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl GridHooks for NoHooks {}

/// How [`GridController::build_from_data_set`] turns record fields into
/// columns.
#[derive(Debug, Clone, Default)]
pub struct DataSetOptions {
    skip: HashSet<String>,
    captions: HashMap<String, String>,
    orders: HashMap<String, i32>,
    widths: HashMap<String, i32>,
    auto_size: bool,
}

impl DataSetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Do not create a column for `field`.
    pub fn skip(mut self, field: impl Into<String>) -> Self {
        self.skip.insert(field.into());
        self
    }

    pub fn caption(mut self, field: impl Into<String>, caption: impl Into<String>) -> Self {
        self.captions.insert(field.into(), caption.into());
        self
    }

    pub fn order(mut self, field: impl Into<String>, order: i32) -> Self {
        self.orders.insert(field.into(), order);
        self
    }

    pub fn width(mut self, field: impl Into<String>, width: i32) -> Self {
        self.widths.insert(field.into(), width);
        self
    }

    /// Auto-size every column after building, even those given a width.
    pub fn auto_size(mut self, auto_size: bool) -> Self {
        self.auto_size = auto_size;
        self
    }
}

/// In-progress header gesture.
#[derive(Debug, Clone, Copy)]
struct HeaderGesture {
    hit: HeaderHit,
    start_x: i32,
    start_width: i32,
    dragging: bool,
}

pub struct GridController {
    config: GridConfig,
    keys: SettingKey,
    settings: SettingsProvider,
    columns: Vec<Column>,
    binding: Binding,
    table: DataTable,
    view: Box<dyn GridView>,
    hooks: Box<dyn GridHooks>,
    measure: Box<dyn TextMeasure>,
    sort: SortState,
    custom_sort: bool,
    search: IncrementalSearch,
    current_row: usize,
    current_col: usize,
    row_labels: Vec<String>,
    row_height: i32,
    editing: bool,
    gesture: Option<HeaderGesture>,
}

impl std::fmt::Debug for GridController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridController")
            .field("config", &self.config)
            .field("columns", &self.columns.len())
            .field("binding", &self.binding)
            .field("sort", &self.sort)
            .field("current_row", &self.current_row)
            .field("current_col", &self.current_col)
            .finish_non_exhaustive()
    }
}

impl GridController {
    /// Create an unbound grid. A persisted row height is applied at once.
    pub fn new(config: GridConfig, settings: SettingsProvider) -> Self {
        let keys = SettingKey::new(&config.form_name, &config.grid_name);
        let search = IncrementalSearch::new(config.search_delay());
        let mut grid = Self {
            row_height: config.row_height,
            config,
            keys,
            settings,
            columns: Vec::new(),
            binding: Binding::None,
            table: DataTable::new(),
            view: Box::new(NullView),
            hooks: Box::new(NoHooks),
            measure: Box::new(MonospaceMeasure::default()),
            sort: SortState::default(),
            custom_sort: false,
            search,
            current_row: 0,
            current_col: 0,
            row_labels: Vec::new(),
            editing: false,
            gesture: None,
        };
        let key = grid.keys.row_height();
        if let Some(height) = grid.load_int(&key).and_then(|h| i32::try_from(h).ok()) {
            grid.row_height = height;
        }
        grid
    }

    pub fn with_view(mut self, view: impl GridView + 'static) -> Self {
        self.view = Box::new(view);
        self
    }

    pub fn with_hooks(mut self, hooks: impl GridHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn settings(&self) -> &SettingsProvider {
        &self.settings
    }

    pub fn setting_keys(&self) -> &SettingKey {
        &self.keys
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    // -------------------------------------------------------------------------
    // Binding
    // -------------------------------------------------------------------------

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// The bound data set, for in-place edits. Call [`fill`](Self::fill)
    /// afterwards so the view learns about added or removed rows.
    pub fn data_set_mut(&mut self) -> Option<&mut RowSet> {
        match &mut self.binding {
            Binding::DataSet(rows) => Some(rows),
            _ => None,
        }
    }

    fn source(&self) -> Option<&dyn DataSource> {
        self.binding.source()
    }

    /// Bind an in-memory data set.
    ///
    /// Fails while a live data source is bound; clear it first.
    pub fn set_data_set(&mut self, rows: RowSet) -> Result<(), GridError> {
        if self.binding.is_cursor() {
            return Err(GridError::configuration(
                "cannot set a data set while a data source is bound",
            ));
        }
        self.rebind(Binding::DataSet(rows));
        Ok(())
    }

    /// Bind a live data source, replacing any data set.
    pub fn set_data_source(&mut self, source: BizobjSource) {
        self.rebind(Binding::DataSource(source));
        self.sync_cursor();
    }

    /// Drop the binding.
    pub fn clear_binding(&mut self) {
        self.rebind(Binding::None);
    }

    fn rebind(&mut self, binding: Binding) {
        self.binding = binding;
        self.sort.clear();
        self.search.abandon();
        self.row_labels.clear();
        self.current_row = 0;
        self.table.reset_rows(self.view.as_mut());
        self.fill(true);
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, idx: usize) -> Option<&Column> {
        self.columns.get(idx)
    }

    /// Mutable access to a column. Call [`refresh_columns`](Self::refresh_columns)
    /// after structural changes.
    pub fn column_mut(&mut self, idx: usize) -> Option<&mut Column> {
        self.columns.get_mut(idx)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of the column showing `field`.
    pub fn column_index(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.data_field() == field)
    }

    pub fn column_by_field(&self, field: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.data_field() == field)
    }

    pub fn column_caption(&self, idx: usize) -> Option<&str> {
        self.columns.get(idx).map(Column::caption_text)
    }

    /// Header style of a column with the grid's header defaults filled in.
    pub fn header_style(&self, idx: usize) -> Option<HeaderStyle> {
        self.columns
            .get(idx)
            .map(|c| c.header().resolve(&self.config.header_defaults))
    }

    /// Replace the column collection.
    ///
    /// Persisted orders override declared ones, unplaced columns keep their
    /// position, and orders are renormalized. A set structurally identical
    /// to the current one only refreshes the view. Two columns bound to the
    /// same field are a configuration error and leave the grid unchanged.
    pub fn set_columns(&mut self, mut columns: Vec<Column>) -> Result<ColumnChange, GridError> {
        check_unique_fields(&columns)?;
        for col in &mut columns {
            let key = self.keys.order(col);
            if let Some(order) = self.load_int(&key).and_then(|o| i32::try_from(o).ok()) {
                col.set_order(order);
            }
        }
        layout::sort_by_order(&mut columns);
        layout::renormalize(&mut columns);
        self.columns = columns;
        let change = self.refresh_columns();
        if change == ColumnChange::Rebuilt {
            self.resolve_widths();
        }
        Ok(change)
    }

    /// Push the current column collection to the table.
    pub fn refresh_columns(&mut self) -> ColumnChange {
        let change = self.table.set_columns(&self.columns, self.view.as_mut());
        self.clamp_current();
        change
    }

    /// Add a column.
    ///
    /// An unplaced column goes after the last one, and a placed one after
    /// any column of equal order; a column without a width gets the
    /// configured default. Orders are then renormalized and persisted.
    /// Returns the new column's index.
    pub fn add_column(&mut self, mut column: Column) -> Result<usize, GridError> {
        let field = column.data_field();
        if !field.is_empty() && self.column_index(field).is_some() {
            return Err(duplicate_field(field));
        }
        if column.order_value() == UNSET_ORDER {
            let next = self
                .columns
                .iter()
                .map(Column::order_value)
                .max()
                .map_or(0, |max| max + 10);
            column.set_order(next);
        }
        if column.width_value() == AUTO_WIDTH {
            column.set_width(self.config.default_column_width);
        }
        let idx = self
            .columns
            .iter()
            .position(|c| c.order_value() > column.order_value())
            .unwrap_or(self.columns.len());
        self.columns.insert(idx, column);
        layout::renormalize(&mut self.columns);
        self.persist_orders();
        self.refresh_columns();
        Ok(idx)
    }

    /// Remove the column at `idx`.
    pub fn remove_column(&mut self, idx: usize) -> Option<Column> {
        if idx >= self.columns.len() {
            return None;
        }
        let removed = self.columns.remove(idx);
        layout::renormalize(&mut self.columns);
        self.refresh_columns();
        Some(removed)
    }

    /// Grow with blank columns or shrink from the end.
    pub fn set_column_count(&mut self, count: usize) -> Result<(), GridError> {
        if count < self.columns.len() {
            self.columns.truncate(count);
            self.refresh_columns();
        } else {
            while self.columns.len() < count {
                self.add_column(Column::default())?;
            }
        }
        Ok(())
    }

    /// Move the column at `from` so it ends up at index `to`.
    ///
    /// Every column's order is renormalized and persisted. The current
    /// column follows the column it pointed at.
    pub fn move_column(&mut self, from: usize, to: usize) -> bool {
        let current = self.columns.get(self.current_col).map(|c| c.identifier());
        if !layout::move_column(&mut self.columns, from, to) {
            return false;
        }
        log::debug!("moved column {from} to {to}");
        self.persist_orders();
        if let Some(id) = current
            && let Some(idx) = self.columns.iter().position(|c| c.identifier() == id)
        {
            self.current_col = idx;
        }
        self.refresh_columns();
        true
    }

    // -------------------------------------------------------------------------
    // Widths
    // -------------------------------------------------------------------------

    /// Apply width precedence to every column.
    pub fn resolve_widths(&mut self) {
        for idx in 0..self.columns.len() {
            let key = self.keys.width(&self.columns[idx]);
            let persisted = self.load_int(&key);
            match layout::resolve_width(persisted, self.columns[idx].width_value()) {
                WidthSource::Persisted(width) => self.columns[idx].set_width(width),
                WidthSource::Declared(_) => {}
                WidthSource::Auto => self.auto_size_column(idx, false),
            }
        }
    }

    /// Set a column width, persisting it when `persist` is set.
    pub fn set_column_width(&mut self, idx: usize, width: i32, persist: bool) {
        let Some(col) = self.columns.get_mut(idx) else {
            return;
        };
        col.set_width(width);
        if persist {
            let col = &self.columns[idx];
            self.persist(self.keys.width(col), width);
        }
        self.view.refresh();
    }

    /// Size a column to fit its caption and content.
    pub fn auto_size_column(&mut self, idx: usize, persist: bool) {
        let Some(col) = self.columns.get(idx) else {
            return;
        };
        let cells: Vec<String> = (0..self.row_count())
            .map(|row| self.cell_display(row, idx))
            .collect();
        let width = layout::auto_width(
            self.measure.as_ref(),
            col.caption_text(),
            cells.iter().map(String::as_str),
            self.config.max_auto_width,
        );
        self.set_column_width(idx, width, persist);
    }

    pub fn auto_size_all(&mut self, persist: bool) {
        for idx in 0..self.columns.len() {
            self.auto_size_column(idx, persist);
        }
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    pub fn row_count(&self) -> usize {
        self.table.row_count(self.source())
    }

    /// Sync the view with the source. See [`DataTable::fill`].
    pub fn fill(&mut self, force: bool) -> bool {
        let changed = self
            .table
            .fill(self.binding.source(), force, self.view.as_mut());
        if changed {
            self.resolve_widths();
            self.sync_cursor();
            self.clamp_current();
        }
        changed
    }

    pub fn row_height(&self) -> i32 {
        self.row_height
    }

    /// Set the row height and persist it.
    pub fn set_row_height(&mut self, height: i32) {
        self.row_height = height;
        self.persist(self.keys.row_height(), height);
        self.view.refresh();
    }

    /// Labels shown in the row gutter. They move with their rows on sort.
    pub fn set_row_labels(&mut self, labels: Vec<String>) {
        self.row_labels = labels;
        self.view.refresh();
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Width of the row label gutter, zero when labels are hidden.
    pub fn row_label_width(&self) -> i32 {
        if self.config.show_row_labels {
            self.config.row_label_width
        } else {
            0
        }
    }

    /// Label of a row, or its 1-based number when none was given.
    ///
    /// `None` when row labels are not shown.
    pub fn row_label(&self, row: usize) -> Option<String> {
        if !self.config.show_row_labels {
            return None;
        }
        Some(
            self.row_labels
                .get(row)
                .cloned()
                .unwrap_or_else(|| (row + 1).to_string()),
        )
    }

    // -------------------------------------------------------------------------
    // Cells
    // -------------------------------------------------------------------------

    pub fn cell_value(&self, row: usize, col: usize) -> Value {
        self.table.cell_value(&self.columns, self.source(), row, col)
    }

    /// Display text of a cell.
    ///
    /// Bool columns show 0/1 style values as `true`/`false`.
    pub fn cell_display(&self, row: usize, col: usize) -> String {
        let value = self.cell_value(row, col);
        if self.columns.get(col).and_then(Column::declared_type) == Some(DataType::Bool)
            && let Some(flag) = value.to_bool()
        {
            return flag.to_string();
        }
        value.to_display_string(&self.config.none_display, self.config.string_display_len)
    }

    /// Write a cell through to the source.
    pub fn set_cell_value(
        &mut self,
        row: usize,
        col: usize,
        value: Value,
    ) -> Result<(), GridError> {
        let source = self
            .binding
            .source_mut()
            .ok_or_else(|| GridError::configuration("grid has no data to write to"))?;
        self.table
            .set_cell_value(&self.columns, source, row, col, value)?;
        self.view.refresh();
        Ok(())
    }

    /// Attribute of a cell. Cells are read-only unless both the grid and the
    /// column are editable.
    pub fn cell_attribute(&self, row: usize, col: usize) -> ColumnAttribute {
        let mut attr = self.table.cell_attribute(&self.columns, row, col);
        if !self.is_column_editable(col) {
            attr.read_only = true;
        }
        attr
    }

    pub fn current_value(&self) -> Value {
        self.cell_value(self.current_row, self.current_col)
    }

    pub fn set_current_value(&mut self, value: Value) -> Result<(), GridError> {
        self.set_cell_value(self.current_row, self.current_col, value)
    }

    // -------------------------------------------------------------------------
    // Position
    // -------------------------------------------------------------------------

    pub fn current_row(&self) -> usize {
        self.current_row
    }

    pub fn current_col(&self) -> usize {
        self.current_col
    }

    /// Select a row. A cursor-style source moves its row pointer along.
    pub fn set_current_row(&mut self, row: usize) -> Result<(), GridError> {
        let count = self.row_count();
        let row = row.min(count.saturating_sub(1));
        if count > 0
            && let Some(source) = self.binding.source_mut()
            && source.current_row() != Some(row)
        {
            source.set_current_row(row)?;
        }
        self.current_row = row;
        Ok(())
    }

    pub fn set_current_col(&mut self, col: usize) {
        self.current_col = col.min(self.columns.len().saturating_sub(1));
    }

    /// Field of the current column.
    pub fn current_field(&self) -> Option<&str> {
        self.columns.get(self.current_col).map(Column::data_field)
    }

    /// Make the column showing `field` current.
    pub fn set_current_field(&mut self, field: &str) -> Result<(), GridError> {
        let idx = self
            .column_index(field)
            .ok_or_else(|| GridError::unknown_field(field))?;
        self.current_col = idx;
        Ok(())
    }

    fn sync_cursor(&mut self) {
        if let Some(row) = self.source().and_then(|s| s.current_row()) {
            self.current_row = row;
        }
    }

    fn clamp_current(&mut self) {
        self.current_row = self.current_row.min(self.row_count().saturating_sub(1));
        self.current_col = self.current_col.min(self.columns.len().saturating_sub(1));
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    pub fn is_column_editable(&self, col: usize) -> bool {
        self.config.editable && self.columns.get(col).is_some_and(Column::is_editable)
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Start editing the current cell. Abandons any pending search.
    pub fn begin_edit(&mut self) -> bool {
        if !self.is_column_editable(self.current_col) {
            return false;
        }
        self.search.abandon();
        self.editing = true;
        true
    }

    pub fn end_edit(&mut self) {
        self.editing = false;
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Route sorting through [`GridHooks::custom_sort`].
    pub fn set_custom_sort(&mut self, enabled: bool) {
        self.custom_sort = enabled;
    }

    /// Sort by the column at `col`, toggling the direction if it is already
    /// the sorted column. Unsortable columns are left alone.
    pub fn process_sort(&mut self, col: usize) -> Result<(), GridError> {
        let Some(column) = self.columns.get(col) else {
            return Ok(());
        };
        if !(self.config.sortable && column.is_sortable()) {
            return Ok(());
        }
        let field = column.data_field().to_string();
        let order = self.sort.toggle(&field);
        self.apply_sort(col, order)
    }

    /// Sort by `field` in an explicit direction.
    pub fn sort_by(&mut self, field: &str, order: SortOrder) -> Result<(), GridError> {
        let col = self
            .column_index(field)
            .ok_or_else(|| GridError::unknown_field(field))?;
        if !(self.config.sortable && self.columns[col].is_sortable()) {
            return Ok(());
        }
        self.sort.set(field, order);
        self.apply_sort(col, order)
    }

    fn apply_sort(&mut self, col: usize, order: SortOrder) -> Result<(), GridError> {
        let field = self.columns[col].data_field().to_string();
        let case_sensitive = self.config.case_sensitive_sorting;
        log::debug!("sorting by {field} {order}");

        if self.custom_sort {
            self.hooks
                .custom_sort(&field, order, self.binding.source_mut())?;
            self.fill(true);
            return Ok(());
        }

        let Some(source) = self.binding.source_mut() else {
            return Ok(());
        };
        if source.native_sort(&field, order, case_sensitive)? {
            self.sync_cursor();
            self.view.refresh();
            return Ok(());
        }

        let count = source.row_count();
        let keys: Vec<Value> = (0..count)
            .map(|row| source.value(row, &field).unwrap_or(Value::Null))
            .collect();
        let kind = infer_type(self.columns[col].declared_type(), &keys);
        let permutation = sort_permutation(&keys, kind, case_sensitive, order);
        source.reorder(&permutation)?;

        if self.row_labels.len() == count {
            self.row_labels = permutation
                .iter()
                .map(|&old| self.row_labels[old].clone())
                .collect();
        }
        if let Some(new) = permutation.iter().position(|&old| old == self.current_row) {
            self.current_row = new;
        }
        self.view.refresh();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Incremental search
    // -------------------------------------------------------------------------

    pub fn search_buffer(&self) -> &str {
        self.search.buffer()
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.timer().deadline()
    }

    /// Whether typing on a column searches it.
    pub fn is_column_searchable(&self, col: usize) -> bool {
        self.config.searchable
            && self.columns.get(col).is_some_and(Column::is_searchable)
            && !self.is_column_editable(col)
    }

    /// Add a character to the search and restart the debounce.
    pub fn add_to_search(&mut self, ch: char, now: Instant) {
        self.search.push(ch, now);
    }

    /// Run the search if its deadline has passed. Returns `true` when the
    /// current row moved.
    pub fn poll_search(&mut self, now: Instant) -> Result<bool, GridError> {
        match self.search.poll(now) {
            Some(text) => self.run_search(&text),
            None => Ok(false),
        }
    }

    /// Search the current column for `text` and move to the match.
    ///
    /// The pending buffer is cleared whatever the outcome.
    pub fn run_search(&mut self, text: &str) -> Result<bool, GridError> {
        self.search.abandon();
        let count = self.row_count();
        if count == 0 || !self.is_column_searchable(self.current_col) {
            return Ok(false);
        }
        let column = &self.columns[self.current_col];
        let field = column.data_field();
        let Some(source) = self.source() else {
            return Ok(false);
        };
        let values: Vec<Value> = (0..count)
            .map(|row| source.value(row, field).unwrap_or(Value::Null))
            .collect();
        let kind = infer_type(column.declared_type(), &values);
        let target = coerce_search_text(text, kind);
        let found = find_row(
            &values,
            &target,
            kind,
            self.config.search_case_sensitive,
            self.config.search_nearest,
        );
        log::debug!("search for '{text}' in {field}: {found:?}");
        match found {
            Some(row) if row != self.current_row => {
                self.set_current_row(row)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Handle a key press on the grid body.
    pub fn key_down(&mut self, combo: KeyCombo, now: Instant) -> EventResult {
        if self.editing || self.is_column_editable(self.current_col) {
            return EventResult::Ignored;
        }
        let (row, col) = (self.current_row, self.current_col);
        match combo.key {
            Key::Enter => {
                self.hooks.on_enter(row, col);
                EventResult::Consumed
            }
            Key::Delete => {
                self.hooks.on_delete(row, col);
                EventResult::Consumed
            }
            Key::Escape => {
                self.search.abandon();
                self.hooks.on_escape();
                EventResult::Consumed
            }
            key => {
                let plain = !(combo.modifiers.ctrl || combo.modifiers.alt);
                if let Some(ch) = key.search_char()
                    && plain
                    && self.is_column_searchable(col)
                {
                    self.add_to_search(ch, now);
                    EventResult::Consumed
                } else if self.hooks.on_key(combo, row, col) {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
        }
    }

    /// Pointer pressed on the header.
    pub fn header_press(&mut self, event: HeaderEvent) -> EventResult {
        if event.button != MouseButton::Left {
            return EventResult::Ignored;
        }
        let start_width = match event.hit {
            HeaderHit::Border(idx) | HeaderHit::Column(idx) => {
                self.columns.get(idx).map_or(0, Column::width_value)
            }
            HeaderHit::Empty => 0,
        };
        self.gesture = Some(HeaderGesture {
            hit: event.hit,
            start_x: event.x,
            start_width,
            dragging: false,
        });
        EventResult::Consumed
    }

    /// Pointer moved with the button held.
    pub fn header_drag(&mut self, event: HeaderEvent) -> EventResult {
        let Some(gesture) = self.gesture.as_mut() else {
            return EventResult::Ignored;
        };
        match gesture.hit {
            HeaderHit::Border(idx) => {
                let width = (gesture.start_width + event.x - gesture.start_x).max(1);
                self.set_column_width(idx, width, false);
                EventResult::Consumed
            }
            HeaderHit::Column(_) if !gesture.dragging => {
                gesture.dragging = true;
                EventResult::StartDrag
            }
            _ => EventResult::Consumed,
        }
    }

    /// Pointer released on the header.
    ///
    /// Ends a resize (persisting the width), a column drag (moving the
    /// column) or a click (sorting the clicked column).
    pub fn header_release(&mut self, event: HeaderEvent) -> Result<EventResult, GridError> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(EventResult::Ignored);
        };
        match (gesture.hit, event.hit) {
            (HeaderHit::Border(idx), _) => {
                if let Some(col) = self.columns.get(idx) {
                    self.persist(self.keys.width(col), col.width_value());
                }
            }
            (HeaderHit::Column(from), HeaderHit::Column(to)) if gesture.dragging => {
                if from != to {
                    // Dropping right of the origin lands after the target.
                    let drop = if to > from { to + 1 } else { to };
                    let target = layout::move_target(from, drop, self.columns.len());
                    self.move_column(from, target);
                }
            }
            (HeaderHit::Column(col), _) if !gesture.dragging => {
                self.process_sort(col)?;
            }
            _ => {}
        }
        Ok(EventResult::Consumed)
    }

    // -------------------------------------------------------------------------
    // Schema introspection
    // -------------------------------------------------------------------------

    /// Bind `records` and build one column per field of the first record.
    ///
    /// Internal (`dabo-` prefixed) and skipped fields get no column. A
    /// column's type is that of the first non-null value in its field.
    pub fn build_from_data_set(
        &mut self,
        records: Vec<Record>,
        options: &DataSetOptions,
    ) -> Result<(), GridError> {
        let columns = match records.first() {
            Some(first) => first
                .field_names()
                .filter(|f| !f.starts_with(INTERNAL_FIELD_PREFIX) && !options.skip.contains(*f))
                .enumerate()
                .map(|(idx, field)| {
                    let data_type = records
                        .iter()
                        .find_map(|r| r.get(field).and_then(Value::data_type))
                        .unwrap_or(DataType::String);
                    let order = options
                        .orders
                        .get(field)
                        .copied()
                        .unwrap_or_else(|| i32::try_from(idx * 10).unwrap_or(i32::MAX));
                    Column::new(field)
                        .caption(options.captions.get(field).map_or(field, String::as_str))
                        .data_type(data_type)
                        .order(order)
                        .width(options.widths.get(field).copied().unwrap_or(AUTO_WIDTH))
                })
                .collect(),
            None => Vec::new(),
        };
        log::debug!("built {} columns from data set", columns.len());

        self.set_data_set(RowSet::new(records))?;
        self.set_columns(columns)?;
        self.fill(true);
        if options.auto_size {
            self.auto_size_all(false);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    fn load_int(&self, key: &str) -> Option<i64> {
        match self.settings.get::<i64>(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("failed to read setting {key}: {e}");
                None
            }
        }
    }

    fn persist(&self, key: String, value: impl Into<SettingValue>) {
        if let Err(e) = self.settings.set(&key, value) {
            log::warn!("failed to persist setting {key}: {e}");
        }
    }

    /// Persist the order of every column bound to a field.
    fn persist_orders(&self) {
        for col in self.columns.iter().filter(|c| !c.data_field().is_empty()) {
            self.persist(self.keys.order(col), col.order_value());
        }
    }
}

fn duplicate_field(field: &str) -> GridError {
    GridError::configuration(format!("field '{field}' already has a column"))
}

/// Blank columns are not bound to a field and may repeat.
fn check_unique_fields(columns: &[Column]) -> Result<(), GridError> {
    let mut seen = HashSet::new();
    for col in columns.iter().filter(|c| !c.data_field().is_empty()) {
        if !seen.insert(col.data_field()) {
            return Err(duplicate_field(col.data_field()));
        }
    }
    Ok(())
}
