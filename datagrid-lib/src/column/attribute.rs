//! Per-column cell attributes: alignment, renderer and editor selection.

use serde::Deserialize;

use crate::model::DataType;

/// Horizontal alignment for cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Horizontal alignment setting of a column.
///
/// `Automatic` resolves to [`Alignment::Right`] for numeric data types and
/// [`Alignment::Left`] for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    #[default]
    Automatic,
    Left,
    Center,
    Right,
}

impl HorizontalAlignment {
    /// Resolves the setting against a declared data type.
    pub fn resolve(self, data_type: DataType) -> Alignment {
        match self {
            HorizontalAlignment::Automatic if data_type.is_numeric() => Alignment::Right,
            HorizontalAlignment::Automatic => Alignment::Left,
            HorizontalAlignment::Left => Alignment::Left,
            HorizontalAlignment::Center => Alignment::Center,
            HorizontalAlignment::Right => Alignment::Right,
        }
    }
}

/// Vertical alignment for cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

/// How the rendering layer draws a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RendererKind {
    Text,
    Bool,
    Number,
    Float,
    DateTime,
    Choice,
    /// An application-registered renderer, looked up by name.
    Custom(String),
}

impl RendererKind {
    /// Default renderer for a data type.
    pub fn for_type(data_type: DataType) -> Self {
        match data_type {
            DataType::String => RendererKind::Text,
            DataType::Bool => RendererKind::Bool,
            DataType::Int | DataType::Long | DataType::Decimal => RendererKind::Number,
            DataType::Float => RendererKind::Float,
            DataType::Date | DataType::DateTime | DataType::Time => RendererKind::DateTime,
            DataType::List => RendererKind::Choice,
        }
    }
}

/// How the rendering layer edits a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditorKind {
    Text,
    Bool,
    Number,
    Float,
    DateTime,
    /// Pick one of a fixed set of strings.
    Choice(Vec<String>),
    /// An application-registered editor, looked up by name.
    Custom(String),
}

impl EditorKind {
    /// Default editor for a data type. List columns get their choices.
    pub fn for_type(data_type: DataType, choices: &[String]) -> Self {
        match data_type {
            DataType::String => EditorKind::Text,
            DataType::Bool => EditorKind::Bool,
            DataType::Int | DataType::Long | DataType::Decimal => EditorKind::Number,
            DataType::Float => EditorKind::Float,
            DataType::Date | DataType::DateTime | DataType::Time => EditorKind::DateTime,
            DataType::List => EditorKind::Choice(choices.to_vec()),
        }
    }
}

/// The attribute object the rendering layer asks for on every paint.
///
/// A column keeps one of these with its effective renderer and editor
/// already resolved; per-row overrides are applied to a clone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnAttribute {
    /// Cells cannot be edited.
    pub read_only: bool,
    /// Resolved horizontal alignment.
    pub alignment: Alignment,
    /// Vertical alignment.
    pub vertical_alignment: VerticalAlignment,
    /// Renderer for the cell, `None` lets the rendering layer choose.
    pub renderer: Option<RendererKind>,
    /// Editor for the cell, `None` lets the rendering layer choose.
    pub editor: Option<EditorKind>,
}

impl ColumnAttribute {
    /// Attribute used for cells with no backing column.
    pub fn fallback() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_automatic_alignment() {
        let auto = HorizontalAlignment::Automatic;
        assert_eq!(auto.resolve(DataType::Decimal), Alignment::Right);
        assert_eq!(auto.resolve(DataType::Long), Alignment::Right);
        assert_eq!(auto.resolve(DataType::String), Alignment::Left);
        assert_eq!(auto.resolve(DataType::Date), Alignment::Left);
        assert_eq!(
            HorizontalAlignment::Center.resolve(DataType::Int),
            Alignment::Center
        );
    }

    #[test]
    fn test_type_lookup_table() {
        assert_eq!(RendererKind::for_type(DataType::Decimal), RendererKind::Number);
        assert_eq!(RendererKind::for_type(DataType::Float), RendererKind::Float);
        assert_eq!(
            EditorKind::for_type(DataType::Decimal, &[]),
            EditorKind::Number
        );
        let choices = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            EditorKind::for_type(DataType::List, &choices),
            EditorKind::Choice(choices.clone())
        );
    }
}
