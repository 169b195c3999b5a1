//! Attribute data types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attribute types of a relation declaration.
///
/// Anything that is not a primitive keyword is a user-defined type name
/// (records, unions, subtypes). The analysis never looks inside them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    /// Signed integer.
    Number,
    /// Unsigned integer.
    Unsigned,
    /// Floating point.
    Float,
    /// Interned string.
    Symbol,
    /// User-defined type, by name.
    Named(String),
}

impl FromStr for DataType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "number" => Self::Number,
            "unsigned" => Self::Unsigned,
            "float" => Self::Float,
            "symbol" => Self::Symbol,
            other => Self::Named(other.to_string()),
        })
    }
}

impl From<String> for DataType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<DataType> for String {
    fn from(t: DataType) -> Self {
        t.to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_str = match self {
            Self::Number => "number",
            Self::Unsigned => "unsigned",
            Self::Float => "float",
            Self::Symbol => "symbol",
            Self::Named(name) => name,
        };
        write!(f, "{type_str}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_roundtrip() {
        for t in [
            DataType::Number,
            DataType::Unsigned,
            DataType::Float,
            DataType::Symbol,
            DataType::Named("Point".into()),
        ] {
            let parsed: DataType = t.to_string().parse().unwrap();
            assert_eq!(t, parsed);
        }
    }

    #[test]
    fn unknown_keyword_is_named() {
        assert_eq!(
            "Tree".parse::<DataType>().unwrap(),
            DataType::Named("Tree".into())
        );
    }
}
