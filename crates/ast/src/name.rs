//! Qualified relation names (`component.sub.rel`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dot-separated relation name.
///
/// Names coming out of component instantiation carry their scope as leading
/// segments, so `graph.edge` and `edge` are distinct relations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    /// Build a name from its segments.
    #[must_use]
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<&str> for QualifiedName {
    fn from(s: &str) -> Self {
        Self {
            segments: s
                .split('.')
                .filter(|seg| !seg.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

impl From<String> for QualifiedName {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}

impl FromStr for QualifiedName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
