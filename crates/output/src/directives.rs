//! Key/value configuration of one relation's output.

use crate::error::WriteError;
use ast::Relation;
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_DELIMITER: &str = "\t";

/// String directives attached to an output relation, e.g. `IO=file`,
/// `filename=out.csv`, `delimiter=,`, `headers=true`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IoDirectives {
    entries: BTreeMap<String, String>,
}

impl IoDirectives {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Fill `name` and `attributeNames` from a declaration. Column names are
    /// joined with the delimiter in effect, so set `delimiter` first.
    pub fn with_relation(&mut self, relation: &Relation) -> &mut Self {
        let header = relation.attribute_names(self.delimiter());
        self.set("name", relation.name().to_string());
        self.set("attributeNames", header)
    }

    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Writer name from the `IO` directive.
    pub fn io_type(&self) -> Result<&str, WriteError> {
        self.get("IO").ok_or(WriteError::MissingDirective("IO"))
    }

    pub fn filename(&self) -> Result<&str, WriteError> {
        self.get("filename")
            .ok_or(WriteError::MissingDirective("filename"))
    }

    /// Relation name, empty when unset.
    pub fn relation_name(&self) -> &str {
        self.get("name").unwrap_or_default()
    }

    pub fn delimiter(&self) -> &str {
        self.get("delimiter").unwrap_or(DEFAULT_DELIMITER)
    }

    /// Header line, when `headers=true`.
    pub fn header(&self) -> Option<&str> {
        if self.get("headers") == Some("true") {
            Some(self.get("attributeNames").unwrap_or_default())
        } else {
            None
        }
    }

    /// Presence of `compress` selects gzip output, regardless of its value.
    pub fn compress(&self) -> bool {
        self.has("compress")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for IoDirectives {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for IoDirectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{k}={v}")?;
        }
        write!(f, "}}")
    }
}
