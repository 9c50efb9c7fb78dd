//! CSV output sink.
//!
//! Wide layout: a `trajectory,time,<species…>` header, then one record per
//! trajectory per output time.  Values use Rust's shortest round-trip float
//! formatting, so identical buffers produce byte-identical files.

use std::fs::File;
use std::io::{self, Stdout, Write};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputSink;
use crate::{OutputError, OutputResult, TrajectoryRow};

/// Writes trajectories as CSV to any [`Write`] stream.
pub struct CsvSink<W: Write> {
    writer:   Writer<W>,
    /// Species column count, known once the header is written.
    width:    Option<usize>,
    finished: bool,
}

impl<W: Write> CsvSink<W> {
    pub fn new(stream: W) -> Self {
        Self { writer: Writer::from_writer(stream), width: None, finished: false }
    }

    /// Flush and hand back the underlying stream.
    pub fn into_inner(mut self) -> OutputResult<W> {
        self.finish()?;
        self.writer.into_inner().map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl CsvSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl CsvSink<File> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> OutputSink for CsvSink<W> {
    fn write_header(&mut self, species: &[String]) -> OutputResult<()> {
        if self.width.is_some() {
            return Err(OutputError::HeaderRewritten);
        }
        self.writer.write_record(
            ["trajectory", "time"]
                .into_iter()
                .chain(species.iter().map(String::as_str)),
        )?;
        self.width = Some(species.len());
        Ok(())
    }

    fn write_row(&mut self, row: &TrajectoryRow<'_>) -> OutputResult<()> {
        if let Some(expected) = self.width.filter(|&w| w != row.values.len()) {
            return Err(OutputError::RowWidth { expected, got: row.values.len() });
        }
        self.writer.write_record(
            [row.trajectory.to_string(), row.time.to_string()]
                .into_iter()
                .chain(row.values.iter().map(f64::to_string)),
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
