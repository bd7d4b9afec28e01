//! Typed setting values

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// A stored setting value together with its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SettingValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl SettingValue {
    /// The type tag persisted next to the value.
    pub fn type_tag(&self) -> &'static str {
        match self {
            SettingValue::Int(_) => "int",
            SettingValue::Float(_) => "float",
            SettingValue::Bool(_) => "bool",
            SettingValue::String(_) => "string",
        }
    }

    /// Rebuilds a value from its type tag and its textual form.
    ///
    /// Returns `None` when the tag is unknown or the text does not parse as
    /// the tagged type.
    pub fn parse_tagged(tag: &str, text: &str) -> Option<Self> {
        match tag {
            "int" => text.parse().ok().map(SettingValue::Int),
            "float" => text.parse().ok().map(SettingValue::Float),
            "bool" => text.parse().ok().map(SettingValue::Bool),
            "string" => Some(SettingValue::String(text.to_string())),
            _ => None,
        }
    }
}

/// Textual form, the inverse of [`SettingValue::parse_tagged`].
impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Int(v) => write!(f, "{v}"),
            SettingValue::Float(v) => write!(f, "{v}"),
            SettingValue::Bool(v) => write!(f, "{v}"),
            SettingValue::String(v) => f.write_str(v),
        }
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        SettingValue::Int(v)
    }
}

impl From<i32> for SettingValue {
    fn from(v: i32) -> Self {
        SettingValue::Int(i64::from(v))
    }
}

impl From<u32> for SettingValue {
    fn from(v: u32) -> Self {
        SettingValue::Int(i64::from(v))
    }
}

impl From<f64> for SettingValue {
    fn from(v: f64) -> Self {
        SettingValue::Float(v)
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        SettingValue::String(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::String(v.to_string())
    }
}

impl TryFrom<SettingValue> for i64 {
    type Error = SettingValue;

    fn try_from(value: SettingValue) -> Result<Self, Self::Error> {
        match value {
            SettingValue::Int(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl TryFrom<SettingValue> for f64 {
    type Error = SettingValue;

    fn try_from(value: SettingValue) -> Result<Self, Self::Error> {
        match value {
            SettingValue::Float(v) => Ok(v),
            SettingValue::Int(v) => Ok(v as f64),
            other => Err(other),
        }
    }
}

impl TryFrom<SettingValue> for bool {
    type Error = SettingValue;

    fn try_from(value: SettingValue) -> Result<Self, Self::Error> {
        match value {
            SettingValue::Bool(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl TryFrom<SettingValue> for String {
    type Error = SettingValue;

    fn try_from(value: SettingValue) -> Result<Self, Self::Error> {
        match value {
            SettingValue::String(v) => Ok(v),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_text_round_trip() {
        for value in [
            SettingValue::Int(-3),
            SettingValue::Float(1.25),
            SettingValue::Bool(true),
            SettingValue::String("a b".into()),
        ] {
            let text = value.to_string();
            assert_eq!(SettingValue::parse_tagged(value.type_tag(), &text), Some(value));
        }
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(SettingValue::Int(1).type_tag(), "int");
        assert_eq!(SettingValue::from("wide").type_tag(), "string");
        assert_eq!(
            SettingValue::parse_tagged("string", "wide"),
            Some(SettingValue::from("wide"))
        );
        assert_eq!(SettingValue::parse_tagged("str", "wide"), None);
    }

    #[test]
    fn test_parse_tagged_rejects_bad_text() {
        assert_eq!(SettingValue::parse_tagged("int", "wide"), None);
        assert_eq!(SettingValue::parse_tagged("blob", "1"), None);
    }
}
