//! Grid configuration

use std::time::Duration;

use serde::Deserialize;

use crate::column::HeaderStyle;

/// Grid-level behavior and layout defaults.
///
/// `form_name` and `grid_name` name the grid in persisted settings, so two
/// grids with the same names share a saved layout.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use datagrid_lib::config::GridConfig;
///
/// let config = GridConfig::new("frmOrders", "grdLines")
///     .with_search_delay(Duration::from_millis(300))
///     .with_editable(true);
///
/// assert_eq!(config.search_delay(), Duration::from_millis(300));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Name of the form the grid lives on.
    pub form_name: String,

    /// Name of the grid within its form.
    pub grid_name: String,

    /// Debounce between the last keystroke and the incremental search.
    ///
    /// Default: 600 ms
    pub search_delay_ms: u64,

    /// Land on the nearest lower value when a search has no exact match.
    pub search_nearest: bool,

    pub search_case_sensitive: bool,

    pub case_sensitive_sorting: bool,

    /// Grid-wide switch; columns can also opt out individually.
    pub sortable: bool,

    /// Grid-wide switch; columns can also opt out individually.
    pub searchable: bool,

    /// Grid-wide switch; a column is editable only when both agree.
    pub editable: bool,

    /// Strings longer than this are truncated for display.
    ///
    /// Default: 64 characters
    pub string_display_len: usize,

    /// Cap for auto-sized column widths, in pixels.
    pub max_auto_width: i32,

    /// Width given to columns added without one.
    pub default_column_width: i32,

    pub row_height: i32,

    pub show_row_labels: bool,

    pub row_label_width: i32,

    /// Text shown for null values.
    pub none_display: String,

    /// Header styling for properties a column leaves unset.
    pub header_defaults: HeaderStyle,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            form_name: "form".to_string(),
            grid_name: "grid".to_string(),
            search_delay_ms: 600,
            search_nearest: true,
            search_case_sensitive: false,
            case_sensitive_sorting: false,
            sortable: true,
            searchable: true,
            editable: false,
            string_display_len: 64,
            max_auto_width: 250,
            default_column_width: 75,
            row_height: 24,
            show_row_labels: false,
            row_label_width: 40,
            none_display: "<null>".to_string(),
            header_defaults: HeaderStyle::default(),
        }
    }
}

impl GridConfig {
    /// Creates a config for a named grid with default values.
    pub fn new(form_name: impl Into<String>, grid_name: impl Into<String>) -> Self {
        Self {
            form_name: form_name.into(),
            grid_name: grid_name.into(),
            ..Self::default()
        }
    }

    /// The search debounce as a [`Duration`].
    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    pub fn with_search_delay(mut self, delay: Duration) -> Self {
        self.search_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_search_nearest(mut self, nearest: bool) -> Self {
        self.search_nearest = nearest;
        self
    }

    pub fn with_search_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.search_case_sensitive = case_sensitive;
        self
    }

    pub fn with_case_sensitive_sorting(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive_sorting = case_sensitive;
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_max_auto_width(mut self, width: i32) -> Self {
        self.max_auto_width = width;
        self
    }

    pub fn with_row_height(mut self, height: i32) -> Self {
        self.row_height = height;
        self
    }

    /// Shows row labels in a gutter of the given width.
    pub fn with_row_labels(mut self, width: i32) -> Self {
        self.show_row_labels = true;
        self.row_label_width = width;
        self
    }

    pub fn with_none_display(mut self, text: impl Into<String>) -> Self {
        self.none_display = text.into();
        self
    }

    pub fn with_header_defaults(mut self, style: HeaderStyle) -> Self {
        self.header_defaults = style;
        self
    }
}
