//! Writers and the registry that selects them by name.

use crate::directives::IoDirectives;
use crate::error::WriteError;
use crate::lock::ConsoleLock;
use crate::Result;
use std::fmt::{self, Display};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::str::FromStr;
use tracing::debug;

#[cfg(feature = "compress")]
use flate2::{write::GzEncoder, Compression};

const BANNER_TOP: &str = "---------------";
const BANNER_RULE: &str = "===============";

/// Closed set of writer names accepted in the `IO` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriterKind {
    File,
    Stdout,
    StdoutPrintSize,
}

impl WriterKind {
    pub const ALL: [WriterKind; 3] = [Self::File, Self::Stdout, Self::StdoutPrintSize];

    pub fn name(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Stdout => "stdout",
            Self::StdoutPrintSize => "stdoutprintsize",
        }
    }
}

impl FromStr for WriterKind {
    type Err = WriteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| WriteError::UnknownWriter(s.to_string()))
    }
}

impl Display for WriterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Delimited text output over any sink.
///
/// A tuple is its values joined by the delimiter; a nullary tuple is `()`.
/// A banner writer that is dropped without [`CsvWriter::finish`] still closes
/// its banner, ignoring write errors.
pub struct CsvWriter<W: Write> {
    // `None` once handed back by `finish`
    sink: Option<W>,
    delimiter: String,
    footer: Option<&'static str>,
}

fn finished() -> io::Error {
    io::Error::other("writer already finished")
}

impl<W: Write> CsvWriter<W> {
    /// Plain output: optional header line, then tuples.
    pub fn new(mut sink: W, directives: &IoDirectives) -> Result<Self> {
        if let Some(header) = directives.header() {
            writeln!(sink, "{header}")?;
        }
        Ok(Self {
            sink: Some(sink),
            delimiter: directives.delimiter().to_string(),
            footer: None,
        })
    }

    /// Console output: the relation name (and header) framed by rules, with a
    /// closing rule written by [`CsvWriter::finish`] or on drop.
    pub fn with_banner(mut sink: W, directives: &IoDirectives) -> Result<Self> {
        write!(sink, "{BANNER_TOP}\n{}", directives.relation_name())?;
        if let Some(header) = directives.header() {
            write!(sink, "\n{header}")?;
        }
        writeln!(sink, "\n{BANNER_RULE}")?;
        Ok(Self {
            sink: Some(sink),
            delimiter: directives.delimiter().to_string(),
            footer: Some(BANNER_RULE),
        })
    }

    pub fn write_tuple<T: Display>(&mut self, tuple: &[T]) -> Result<()> {
        let sink = self.sink.as_mut().ok_or_else(finished)?;
        if tuple.is_empty() {
            writeln!(sink, "()")?;
            return Ok(());
        }
        for (col, value) in tuple.iter().enumerate() {
            if col > 0 {
                sink.write_all(self.delimiter.as_bytes())?;
            }
            write!(sink, "{value}")?;
        }
        writeln!(sink)?;
        Ok(())
    }

    /// Write the footer, flush and hand back the sink.
    pub fn finish(mut self) -> Result<W> {
        let mut sink = self.sink.take().ok_or_else(finished)?;
        if let Some(footer) = self.footer.take() {
            writeln!(sink, "{footer}")?;
        }
        sink.flush()?;
        Ok(sink)
    }
}

impl<W: Write> Drop for CsvWriter<W> {
    fn drop(&mut self) {
        if let (Some(sink), Some(footer)) = (self.sink.as_mut(), self.footer.take()) {
            let _ = writeln!(sink, "{footer}").and_then(|()| sink.flush());
        }
    }
}

/// Writes `<relation>\t<size>` under the console lock; rejects tuples.
pub struct PrintSizeWriter<W: Write> {
    sink: W,
    relation: String,
    lock: ConsoleLock,
}

impl<W: Write> PrintSizeWriter<W> {
    pub fn new(sink: W, relation: impl Into<String>, lock: ConsoleLock) -> Self {
        Self {
            sink,
            relation: relation.into(),
            lock,
        }
    }

    pub fn write_size(&mut self, size: usize) -> Result<()> {
        let _guard = self.lock.acquire();
        writeln!(self.sink, "{}\t{}", self.relation, size)?;
        self.sink.flush()?;
        Ok(())
    }

    pub fn write_tuple<T: Display>(&mut self, _tuple: &[T]) -> Result<()> {
        Err(WriteError::SizeOnly(self.relation.clone()))
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// A writer obtained from [`WriterRegistry::get_writer`].
pub enum Writer {
    File(CsvWriter<BufWriter<File>>),
    #[cfg(feature = "compress")]
    GzipFile(CsvWriter<GzEncoder<BufWriter<File>>>),
    Stdout(CsvWriter<io::Stdout>),
    PrintSize(PrintSizeWriter<io::Stdout>),
}

impl Writer {
    pub fn write_tuple<T: Display>(&mut self, tuple: &[T]) -> Result<()> {
        match self {
            Self::File(w) => w.write_tuple(tuple),
            #[cfg(feature = "compress")]
            Self::GzipFile(w) => w.write_tuple(tuple),
            Self::Stdout(w) => w.write_tuple(tuple),
            Self::PrintSize(w) => w.write_tuple(tuple),
        }
    }

    /// Only print-size writers accept a size.
    pub fn write_size(&mut self, size: usize) -> Result<()> {
        match self {
            Self::PrintSize(w) => w.write_size(size),
            _ => Err(WriteError::TuplesOnly(self.kind())),
        }
    }

    pub fn kind(&self) -> WriterKind {
        match self {
            Self::File(_) => WriterKind::File,
            #[cfg(feature = "compress")]
            Self::GzipFile(_) => WriterKind::File,
            Self::Stdout(_) => WriterKind::Stdout,
            Self::PrintSize(_) => WriterKind::StdoutPrintSize,
        }
    }

    /// Flush everything, closing the gzip stream if there is one.
    pub fn finish(self) -> Result<()> {
        match self {
            Self::File(w) => {
                w.finish()?;
            }
            #[cfg(feature = "compress")]
            Self::GzipFile(w) => w.finish()?.finish()?.flush()?,
            Self::Stdout(w) => {
                w.finish()?;
            }
            Self::PrintSize(w) => w.into_inner().flush()?,
        }
        Ok(())
    }
}

/// Resolves writer names to writers. Print-size writers share the
/// registry's console lock.
#[derive(Debug, Clone, Default)]
pub struct WriterRegistry {
    console: ConsoleLock,
}

impl WriterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_console_lock(console: ConsoleLock) -> Self {
        Self { console }
    }

    pub fn console_lock(&self) -> &ConsoleLock {
        &self.console
    }

    /// Writer registered under `name`, configured by `directives`.
    pub fn get_writer(&self, name: &str, directives: &IoDirectives) -> Result<Writer> {
        let kind: WriterKind = name.parse()?;
        debug!("Opening {kind} writer for '{}'", directives.relation_name());
        match kind {
            WriterKind::File => open_file(directives),
            WriterKind::Stdout => Ok(Writer::Stdout(CsvWriter::with_banner(
                io::stdout(),
                directives,
            )?)),
            WriterKind::StdoutPrintSize => Ok(Writer::PrintSize(PrintSizeWriter::new(
                io::stdout(),
                directives.relation_name(),
                self.console.clone(),
            ))),
        }
    }

    /// Writer named by the `IO` directive.
    pub fn writer_for(&self, directives: &IoDirectives) -> Result<Writer> {
        self.get_writer(directives.io_type()?, directives)
    }
}

fn open_file(directives: &IoDirectives) -> Result<Writer> {
    let file = BufWriter::new(File::create(directives.filename()?)?);
    if directives.compress() {
        return open_gzip(file, directives);
    }
    Ok(Writer::File(CsvWriter::new(file, directives)?))
}

#[cfg(feature = "compress")]
fn open_gzip(file: BufWriter<File>, directives: &IoDirectives) -> Result<Writer> {
    let encoder = GzEncoder::new(file, Compression::default());
    Ok(Writer::GzipFile(CsvWriter::new(encoder, directives)?))
}

#[cfg(not(feature = "compress"))]
fn open_gzip(file: BufWriter<File>, directives: &IoDirectives) -> Result<Writer> {
    debug!("Built without gzip support; writing '{}' uncompressed", directives.relation_name());
    Ok(Writer::File(CsvWriter::new(file, directives)?))
}
