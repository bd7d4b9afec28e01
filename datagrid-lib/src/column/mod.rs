//! Column definitions for the grid.
//!
//! A [`Column`] is the controller-side description of one grid field: which
//! record field it shows, how it is captioned, where it sits, how wide it
//! is, and how its cells are rendered and edited. Cells resolve their
//! renderer and editor through a three-tier chain:
//!
//! 1. a per-row override (`set_row_renderer` / `set_row_editor`),
//! 2. the column's custom class (`set_custom_renderer` / `set_custom_editor`),
//! 3. the default for the column's data type.
//!
//! Tiers 2 and 3 are folded into a cached [`ColumnAttribute`] whenever the
//! field, type or custom classes change, so per-cell lookups only have to
//! check the sparse row maps.

mod attribute;
mod header;

pub use attribute::{
    Alignment, ColumnAttribute, EditorKind, HorizontalAlignment, RendererKind, VerticalAlignment,
};
pub use header::{Color, Font, HeaderStyle};

use std::collections::BTreeMap;

use crate::model::DataType;

/// Width value meaning "size to content".
pub const AUTO_WIDTH: i32 = -1;

/// Order value of a column that has not been placed yet.
pub const UNSET_ORDER: i32 = -1;

/// Structural identity of a column, used to detect column-set changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSignature {
    pub data_field: String,
    pub order: i32,
    pub data_type: Option<DataType>,
}

/// A grid column definition.
///
/// # Examples
///
/// ```
/// use datagrid_lib::column::{Alignment, Column, RendererKind};
/// use datagrid_lib::model::DataType;
///
/// let col = Column::new("price")
///     .caption("Price")
///     .data_type(DataType::Decimal)
///     .width(90);
///
/// assert_eq!(col.alignment(), Alignment::Right);
/// assert_eq!(col.renderer(), Some(&RendererKind::Number));
/// ```
#[derive(Debug, Clone)]
pub struct Column {
    data_field: String,
    caption: String,
    order: i32,
    width: i32,
    data_type: Option<DataType>,
    editable: bool,
    searchable: bool,
    sortable: bool,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
    header: HeaderStyle,
    list_choices: Vec<String>,
    custom_renderer: Option<RendererKind>,
    custom_editor: Option<EditorKind>,
    row_renderers: BTreeMap<usize, RendererKind>,
    row_editors: BTreeMap<usize, EditorKind>,
    row_list_choices: BTreeMap<usize, Vec<String>>,
    /// Effective attribute with tiers 2 and 3 resolved.
    attr: ColumnAttribute,
}

impl Default for Column {
    fn default() -> Self {
        Self::new("")
    }
}

impl Column {
    /// Create a column bound to a record field.
    pub fn new(data_field: impl Into<String>) -> Self {
        let mut col = Self {
            data_field: data_field.into(),
            caption: "Column".to_string(),
            order: UNSET_ORDER,
            width: AUTO_WIDTH,
            data_type: None,
            editable: false,
            searchable: true,
            sortable: true,
            horizontal_alignment: HorizontalAlignment::Automatic,
            vertical_alignment: VerticalAlignment::Top,
            header: HeaderStyle::default(),
            list_choices: Vec::new(),
            custom_renderer: None,
            custom_editor: None,
            row_renderers: BTreeMap::new(),
            row_editors: BTreeMap::new(),
            row_list_choices: BTreeMap::new(),
            attr: ColumnAttribute::default(),
        };
        col.refresh_attribute();
        col
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    /// Set the header caption.
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    /// Set the declared data type.
    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.set_data_type(Some(data_type));
        self
    }

    /// Set the display order.
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Set the width in pixels ([`AUTO_WIDTH`] for auto-size).
    pub fn width(mut self, width: i32) -> Self {
        self.width = width;
        self
    }

    /// Make cells editable (still gated by the grid's own flag).
    pub fn editable(mut self) -> Self {
        self.set_editable(true);
        self
    }

    /// Exclude the column from sorting.
    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Exclude the column from incremental search.
    pub fn not_searchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// Set the list choices used by `list` columns.
    pub fn choices<S: Into<String>>(mut self, choices: impl IntoIterator<Item = S>) -> Self {
        self.set_list_choices(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Set the horizontal alignment.
    pub fn align(mut self, alignment: HorizontalAlignment) -> Self {
        self.set_horizontal_alignment(alignment);
        self
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    /// The record field this column shows.
    pub fn data_field(&self) -> &str {
        &self.data_field
    }

    /// Rebind the column to another field.
    pub fn set_data_field(&mut self, field: impl Into<String>) {
        self.data_field = field.into();
        self.refresh_attribute();
    }

    /// Header caption.
    pub fn caption_text(&self) -> &str {
        &self.caption
    }

    /// Set the header caption.
    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    /// Display order.
    pub fn order_value(&self) -> i32 {
        self.order
    }

    /// Set the display order.
    pub fn set_order(&mut self, order: i32) {
        self.order = order;
    }

    /// Width in pixels, [`AUTO_WIDTH`] when unresolved.
    pub fn width_value(&self) -> i32 {
        self.width
    }

    /// Set the width in pixels.
    pub fn set_width(&mut self, width: i32) {
        self.width = width;
    }

    /// Identifier used in persisted setting keys.
    pub fn identifier(&self) -> String {
        format!("column_{}", self.data_field)
    }

    /// Structural identity used to detect column-set changes.
    pub fn signature(&self) -> ColumnSignature {
        ColumnSignature {
            data_field: self.data_field.clone(),
            order: self.order,
            data_type: self.data_type,
        }
    }

    // -------------------------------------------------------------------------
    // Type and behavior
    // -------------------------------------------------------------------------

    /// Declared data type, if any.
    pub fn declared_type(&self) -> Option<DataType> {
        self.data_type
    }

    /// Declared data type, defaulting to string.
    pub fn effective_type(&self) -> DataType {
        self.data_type.unwrap_or_default()
    }

    /// Set (or clear) the declared data type.
    pub fn set_data_type(&mut self, data_type: Option<DataType>) {
        self.data_type = data_type;
        self.refresh_attribute();
    }

    /// Whether the column allows editing.
    pub fn is_editable(&self) -> bool {
        self.editable
    }

    /// Allow or forbid editing.
    pub fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
        self.attr.read_only = !editable;
    }

    /// Whether incremental search applies to this column.
    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    pub fn set_searchable(&mut self, searchable: bool) {
        self.searchable = searchable;
    }

    /// Whether the column can be sorted.
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn set_sortable(&mut self, sortable: bool) {
        self.sortable = sortable;
    }

    /// Choices offered by the editor of `list` columns.
    pub fn list_choices(&self) -> &[String] {
        &self.list_choices
    }

    pub fn set_list_choices(&mut self, choices: Vec<String>) {
        self.list_choices = choices;
        self.refresh_attribute();
    }

    // -------------------------------------------------------------------------
    // Alignment and header
    // -------------------------------------------------------------------------

    /// The alignment setting (possibly `Automatic`).
    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    /// The resolved alignment cells are drawn with.
    pub fn alignment(&self) -> Alignment {
        self.attr.alignment
    }

    /// Set the alignment. Any value other than `Automatic` switches the
    /// numeric-right rule off until `Automatic` is set again.
    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) {
        self.horizontal_alignment = alignment;
        self.attr.alignment = alignment.resolve(self.effective_type());
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.vertical_alignment = alignment;
        self.attr.vertical_alignment = alignment;
    }

    /// Header styling of this column.
    pub fn header(&self) -> &HeaderStyle {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut HeaderStyle {
        &mut self.header
    }

    // -------------------------------------------------------------------------
    // Renderers and editors
    // -------------------------------------------------------------------------

    /// Column-level renderer: the custom class, or the type default.
    pub fn renderer(&self) -> Option<&RendererKind> {
        self.attr.renderer.as_ref()
    }

    /// Column-level editor: the custom class, or the type default.
    pub fn editor(&self) -> Option<&EditorKind> {
        self.attr.editor.as_ref()
    }

    pub fn custom_renderer(&self) -> Option<&RendererKind> {
        self.custom_renderer.as_ref()
    }

    pub fn set_custom_renderer(&mut self, renderer: Option<RendererKind>) {
        self.custom_renderer = renderer;
        self.refresh_attribute();
    }

    pub fn custom_editor(&self) -> Option<&EditorKind> {
        self.custom_editor.as_ref()
    }

    pub fn set_custom_editor(&mut self, editor: Option<EditorKind>) {
        self.custom_editor = editor;
        self.refresh_attribute();
    }

    /// Override the renderer for one row.
    pub fn set_row_renderer(&mut self, row: usize, renderer: RendererKind) {
        self.row_renderers.insert(row, renderer);
    }

    /// Override the editor for one row.
    pub fn set_row_editor(&mut self, row: usize, editor: EditorKind) {
        self.row_editors.insert(row, editor);
    }

    /// Override the list choices for one row.
    pub fn set_row_list_choices(&mut self, row: usize, choices: Vec<String>) {
        self.row_list_choices.insert(row, choices);
    }

    /// Renderer for a given row.
    pub fn renderer_for_row(&self, row: usize) -> Option<&RendererKind> {
        self.row_renderers.get(&row).or(self.attr.renderer.as_ref())
    }

    /// The column attribute with the row's overrides applied.
    pub fn attribute_for_row(&self, row: usize) -> ColumnAttribute {
        let mut attr = self.attr.clone();
        if let Some(editor) = self.row_editors.get(&row) {
            attr.editor = Some(editor.clone());
        } else if let (Some(EditorKind::Choice(_)), Some(choices)) =
            (&attr.editor, self.row_list_choices.get(&row))
        {
            attr.editor = Some(EditorKind::Choice(choices.clone()));
        }
        if let Some(renderer) = self.row_renderers.get(&row) {
            attr.renderer = Some(renderer.clone());
        }
        attr
    }

    /// The cached column attribute (no row overrides).
    pub fn attribute(&self) -> &ColumnAttribute {
        &self.attr
    }

    /// Re-derive the cached renderer, editor and alignment.
    fn refresh_attribute(&mut self) {
        let data_type = self.effective_type();
        self.attr.renderer = Some(
            self.custom_renderer
                .clone()
                .unwrap_or_else(|| RendererKind::for_type(data_type)),
        );
        self.attr.editor = Some(
            self.custom_editor
                .clone()
                .unwrap_or_else(|| EditorKind::for_type(data_type, &self.list_choices)),
        );
        self.attr.alignment = self.horizontal_alignment.resolve(data_type);
        self.attr.vertical_alignment = self.vertical_alignment;
        self.attr.read_only = !self.editable;
    }
}
