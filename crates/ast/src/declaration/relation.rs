//! Relation declarations and their columns.

use crate::primitive::DataType;
use crate::QualifiedName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One column of a relation, serialized as `{"name": .., "type": ..}`.
///
/// Only the name reaches the analysis output, as part of writer headers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    #[serde(rename = "type")]
    data_type: DataType,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }
}

/// A relation declaration: `.decl name(attr: type, ...)`.
///
/// Identity is the qualified name plus arity. Declarations are owned by the
/// [`Program`](crate::Program); analyses hold [`RelationId`](crate::RelationId)
/// handles instead of references into this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    name: QualifiedName,
    #[serde(default)]
    attributes: Vec<Attribute>,
}

impl Relation {
    /// Create a relation declaration.
    #[must_use]
    pub fn new(name: impl Into<QualifiedName>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &QualifiedName {
        &self.name
    }

    #[must_use]
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Number of attributes.
    #[must_use]
    #[inline]
    pub fn arity(&self) -> usize {
        self.attributes.len()
    }

    /// Column names joined by `delimiter`; the `attributeNames` output directive.
    #[must_use]
    pub fn attribute_names(&self, delimiter: &str) -> String {
        self.attributes
            .iter()
            .map(Attribute::name)
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".decl {}(", self.name)?;
        for (i, attr) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", attr.name, attr.data_type)?;
        }
        write!(f, ")")
    }
}
