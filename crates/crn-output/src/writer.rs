//! The `OutputSink` trait and the buffer-to-sink driver.

use crn_sim::TrajectoryBuffer;

use crate::{OutputResult, TrajectoryRow};

/// Trait implemented by the CSV and SQLite sinks.
pub trait OutputSink {
    /// Name the species columns.  Called once, before any row.
    fn write_header(&mut self, species: &[String]) -> OutputResult<()>;

    /// Write one `(trajectory, time)` row.
    fn write_row(&mut self, row: &TrajectoryRow<'_>) -> OutputResult<()>;

    /// Flush and close the underlying stream.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn write_header(&mut self, species: &[String]) -> OutputResult<()> {
        (**self).write_header(species)
    }

    fn write_row(&mut self, row: &TrajectoryRow<'_>) -> OutputResult<()> {
        (**self).write_row(row)
    }

    fn finish(&mut self) -> OutputResult<()> {
        (**self).finish()
    }
}

/// Write every trajectory in `buffer` to `sink`, then finish the sink.
///
/// Trajectories are written in index order, each as one row per timeline
/// point.  Returns the number of rows written.
pub fn write_trajectories<S: OutputSink + ?Sized>(
    sink:    &mut S,
    species: &[String],
    buffer:  &TrajectoryBuffer,
) -> OutputResult<usize> {
    sink.write_header(species)?;

    let mut written = 0;
    for trajectory in 0..buffer.trajectory_count() {
        for (time, values) in buffer.rows(trajectory) {
            sink.write_row(&TrajectoryRow { trajectory: trajectory as u32, time, values })?;
            written += 1;
        }
    }

    sink.finish()?;
    log::info!(
        "wrote {written} rows ({} trajectories × {} points)",
        buffer.trajectory_count(),
        buffer.timeline().len()
    );
    Ok(written)
}
