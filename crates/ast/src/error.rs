use crate::QualifiedName;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AstError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Program error: malformed program description: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Program error: relation '{0}' is declared more than once")]
    DuplicateRelation(QualifiedName),
    #[error("Program error: clause `{clause}` defines undeclared relation '{name}'")]
    UndeclaredHead { name: QualifiedName, clause: String },
}
