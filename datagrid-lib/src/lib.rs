//! Data grid engine
//!
//! A headless, virtualized data grid: a column model with per-cell
//! renderer and editor resolution, a virtual table over in-memory or
//! cursor-based data sources, stable in-memory sorting, type-ahead search
//! and per-user layout persistence. Painting and native event dispatch are
//! left to the host toolkit.

pub mod column;
pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod model;
pub mod search;
pub mod settings;
pub mod sort;
pub mod source;
pub mod table;
pub mod view;

mod grid;

pub use grid::*;

pub mod prelude {
    pub use crate::column::{
        Column, ColumnAttribute, EditorKind, HorizontalAlignment, RendererKind,
    };
    pub use crate::config::GridConfig;
    pub use crate::error::{GridError, SettingsError};
    pub use crate::grid::{DataSetOptions, GridController, GridHooks};
    pub use crate::input::{EventResult, HeaderEvent, HeaderHit, Key, KeyCombo, Modifiers};
    pub use crate::model::{DataType, Record, Value};
    pub use crate::settings::{SettingValue, SettingsProvider, SettingsStore};
    pub use crate::sort::SortOrder;
    pub use crate::source::{Bizobj, BizobjSource, DataSource, RowSet};
    pub use crate::view::GridView;
}
