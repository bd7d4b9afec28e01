//! Declared column data types

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::GridError;

/// The declared data type of a grid column.
///
/// Record sources describe their fields with a zoo of names ("varchar",
/// "bigint", "logical", single-letter codes, ...). [`DataType::from_str`]
/// folds all of them onto this enum.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::DataType;
///
/// assert_eq!("varchar".parse::<DataType>().unwrap(), DataType::String);
/// assert_eq!("bigint".parse::<DataType>().unwrap(), DataType::Long);
/// assert!(DataType::Decimal.is_numeric());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    String,
    Bool,
    Int,
    Long,
    Decimal,
    Float,
    Date,
    DateTime,
    Time,
    /// A string column edited through a fixed list of choices.
    List,
}

impl DataType {
    /// Returns `true` for the types that render right-aligned by default.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Int | DataType::Long | DataType::Decimal | DataType::Float
        )
    }

    /// Returns `true` for the date-like types.
    pub fn is_temporal(&self) -> bool {
        matches!(self, DataType::Date | DataType::DateTime | DataType::Time)
    }

    /// Returns `true` for types compared as text.
    pub fn is_textual(&self) -> bool {
        matches!(self, DataType::String | DataType::List)
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Bool => "bool",
            DataType::Int => "int",
            DataType::Long => "long",
            DataType::Decimal => "decimal",
            DataType::Float => "float",
            DataType::Date => "date",
            DataType::DateTime => "datetime",
            DataType::Time => "time",
            DataType::List => "list",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.trim().to_ascii_lowercase().as_str() {
            "str" | "string" | "unicode" | "char" | "varchar" | "text" | "c" | "s" => {
                DataType::String
            }
            "bool" | "boolean" | "logical" | "l" => DataType::Bool,
            "int" | "integer" | "i" => DataType::Int,
            "long" | "bigint" => DataType::Long,
            "decimal" | "numeric" => DataType::Decimal,
            "float" | "double" | "real" | "f" => DataType::Float,
            "date" | "d" => DataType::Date,
            "datetime" | "timestamp" | "t" => DataType::DateTime,
            "time" => DataType::Time,
            "list" | "choice" => DataType::List,
            other => {
                return Err(GridError::configuration(format!(
                    "unknown data type '{other}'"
                )));
            }
        };
        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("Integer".parse::<DataType>().unwrap(), DataType::Int);
        assert_eq!("L".parse::<DataType>().unwrap(), DataType::Bool);
        assert_eq!(" text ".parse::<DataType>().unwrap(), DataType::String);
        assert_eq!("timestamp".parse::<DataType>().unwrap(), DataType::DateTime);
        assert_eq!("choice".parse::<DataType>().unwrap(), DataType::List);
    }

    #[test]
    fn test_parse_unknown_is_configuration_error() {
        let err = "blob".parse::<DataType>().unwrap_err();
        assert!(matches!(err, GridError::Configuration { .. }));
        assert!(err.to_string().contains("blob"));
    }

    #[test]
    fn test_numeric_types() {
        assert!(DataType::Int.is_numeric());
        assert!(DataType::Float.is_numeric());
        assert!(!DataType::String.is_numeric());
        assert!(!DataType::Date.is_numeric());
    }
}
