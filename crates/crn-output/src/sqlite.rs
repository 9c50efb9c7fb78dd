//! SQLite output sink (feature `sqlite`).
//!
//! Long layout: one row per trajectory, output time and species in a single
//! `trajectory_values` table.  All rows of a run go into one transaction,
//! committed by `finish()`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputSink;
use crate::{OutputError, OutputResult, TrajectoryRow};

/// Writes trajectories to an SQLite database.
pub struct SqliteSink {
    conn:     Connection,
    species:  Option<Vec<String>>,
    finished: bool,
}

impl SqliteSink {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> OutputResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS trajectory_values (
                 trajectory INTEGER NOT NULL,
                 time       REAL    NOT NULL,
                 species    TEXT    NOT NULL,
                 value      REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, species: None, finished: false })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl OutputSink for SqliteSink {
    fn write_header(&mut self, species: &[String]) -> OutputResult<()> {
        if self.species.is_some() {
            return Err(OutputError::HeaderRewritten);
        }
        self.conn.execute_batch("BEGIN;")?;
        self.species = Some(species.to_vec());
        Ok(())
    }

    fn write_row(&mut self, row: &TrajectoryRow<'_>) -> OutputResult<()> {
        let species = self.species.as_deref().unwrap_or(&[]);
        if species.len() != row.values.len() {
            return Err(OutputError::RowWidth { expected: species.len(), got: row.values.len() });
        }
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO trajectory_values (trajectory, time, species, value) \
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for (name, value) in species.iter().zip(row.values) {
            stmt.execute(rusqlite::params![row.trajectory, row.time, name, value])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT;")?;
        }
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
