//! Relation output.
//!
//! A [`WriterRegistry`] maps the writer names used in output directives
//! (`file`, `stdout`, `stdoutprintsize`) to a [`Writer`]. Writers are
//! configured by [`IoDirectives`], receive already formatted tuple values,
//! and must be closed with [`Writer::finish`].
//!
//! ```rust,no_run
//! use output::{IoDirectives, WriterRegistry};
//!
//! let directives = IoDirectives::from_iter([
//!     ("name", "path"),
//!     ("filename", "path.csv"),
//!     ("delimiter", ","),
//! ]);
//! let mut writer = WriterRegistry::new().get_writer("file", &directives)?;
//! writer.write_tuple(&["a", "b"])?;
//! writer.finish()?;
//! # Ok::<(), output::WriteError>(())
//! ```

pub mod directives;
pub mod error;
pub mod lock;
pub mod writer;

pub use directives::IoDirectives;
pub use error::WriteError;
pub use lock::ConsoleLock;
pub use writer::{CsvWriter, PrintSizeWriter, Writer, WriterKind, WriterRegistry};

pub type Result<T> = std::result::Result<T, WriteError>;
