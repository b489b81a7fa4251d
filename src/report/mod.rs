//! Line-oriented output for scan progress and results.
//!
//! The scanner writes whole lines to an `OutputSink`. The binary wires
//! `StdoutSink`; tests collect into a `BufferSink`.

use std::io::{self, StdoutLock, Write};

pub trait OutputSink {
    fn emit_line(&mut self, line: &str) -> io::Result<()>;
}

/// Writes each line to standard output, holding the lock for the whole scan.
pub struct StdoutSink {
    out: StdoutLock<'static>,
}

impl StdoutSink {
    pub fn new() -> Self {
        StdoutSink {
            out: io::stdout().lock(),
        }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for StdoutSink {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }
}

/// Keeps every emitted line in memory.
#[derive(Debug, Default)]
pub struct BufferSink {
    pub lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputSink for BufferSink {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn emit_line(&mut self, line: &str) -> io::Result<()> {
        (**self).emit_line(line)
    }
}

pub fn header_line(date_after: &str, date_before: &str) -> String {
    format!("Searching posts from {date_after} to {date_before}...")
}

pub fn batch_line(batch_number: u32, found: usize, total_found: u64) -> String {
    format!("--- Batch {batch_number}: Found {found} posts (total found: {total_found}) ---")
}

pub fn csv_line(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

pub const NO_MATCHES_LINE: &str = "No posts found containing the DMG Read More block.";

pub fn success_line(total_found: u64, elapsed_seconds: f64) -> String {
    format!(
        "Success: Found {total_found} posts containing the DMG Read More block in {elapsed_seconds:.2} seconds."
    )
}
