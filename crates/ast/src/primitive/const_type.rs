//! Constant values appearing in atom arguments and constraints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstType {
    /// Integer constant.
    Number(i64),
    /// String constant.
    Symbol(String),
}

impl fmt::Display for ConstType {
    /// Integers as-is, strings with quotes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Symbol(s) => write!(f, "\"{s}\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_golden() {
        assert_eq!(ConstType::Number(42).to_string(), "42");
        assert_eq!(ConstType::Symbol("hello".into()).to_string(), "\"hello\"");
    }

    #[test]
    fn untagged_json() {
        let n: ConstType = serde_json::from_str("7").unwrap();
        let s: ConstType = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(n, ConstType::Number(7));
        assert_eq!(s, ConstType::Symbol("x".into()));
    }
}
