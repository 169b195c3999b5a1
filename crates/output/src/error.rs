use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: unknown writer '{0}' (expected file, stdout or stdoutprintsize)")]
    UnknownWriter(String),

    #[error("Output error: relation '{0}' is written as a size only, not as tuples")]
    SizeOnly(String),

    #[error("Output error: {0} writer accepts tuples, not a size")]
    TuplesOnly(crate::WriterKind),

    #[error("Output error: missing '{0}' directive")]
    MissingDirective(&'static str),
}
