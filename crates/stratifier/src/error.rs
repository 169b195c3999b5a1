use ast::QualifiedName;
use itertools::Itertools;
use thiserror::Error;

/// Failure to order a program into strata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StratifyError {
    /// A negated dependency lies on a cycle.
    #[error(
        "Stratification error: negation through recursion in {{{}}} (negated: {})",
        .relations.iter().join(", "),
        .edges.iter().map(|(from, to)| format!("{to} :- !{from}")).join(", ")
    )]
    NegationCycle {
        /// Every relation of the offending component, in declaration order.
        relations: Vec<QualifiedName>,
        /// Negative edges `(dependency, dependent)` inside the component.
        edges: Vec<(QualifiedName, QualifiedName)>,
    },
}

impl StratifyError {
    /// Relations named by the failure.
    #[must_use]
    pub fn relations(&self) -> &[QualifiedName] {
        match self {
            Self::NegationCycle { relations, .. } => relations,
        }
    }
}

/// Failure to emit a diagnostic rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Render error: failed to write '{target}': {source}")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },
}
