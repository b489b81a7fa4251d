pub mod date;

use std::time::Instant;

use tracing::{debug, info};

use crate::error::ScanError;
use crate::report::{self, OutputSink};
use crate::store::{BatchFilter, ContentStore};

/// Rows requested per query.
pub const BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Ids streamed one per line with a summary after each batch.
    #[default]
    Line,
    /// Ids buffered and printed once as a comma separated list.
    Csv,
}

impl OutputMode {
    /// `csv` selects CSV output; anything else, including unknown values,
    /// falls back to line output.
    pub fn from_format(format: &str) -> Self {
        match format {
            "csv" => OutputMode::Csv,
            _ => OutputMode::Line,
        }
    }
}

/// Validated parameters for one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    date_after: String,
    date_before: String,
    mode: OutputMode,
    batch_size: usize,
}

impl ScanRequest {
    pub fn new(
        date_after: impl Into<String>,
        date_before: impl Into<String>,
        mode: OutputMode,
    ) -> Result<Self, ScanError> {
        let date_after = date_after.into();
        let date_before = date_before.into();

        if !date::is_valid_date(&date_after) || !date::is_valid_date(&date_before) {
            return Err(ScanError::Validation);
        }

        Ok(ScanRequest {
            date_after,
            date_before,
            mode,
            batch_size: BATCH_SIZE,
        })
    }

    /// Overrides the rows fetched per query. Zero is raised to one.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn date_after(&self) -> &str {
        &self.date_after
    }

    pub fn date_before(&self) -> &str {
        &self.date_before
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

/// Keyset position between batches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCursor {
    pub last_seen_id: u64,
    pub batch_number: u32,
    pub total_found: u64,
}

impl ScanCursor {
    /// Counts a batch and moves past its highest id. Ids arrive ascending,
    /// so the highest is the last one.
    fn record_batch(&mut self, ids: &[u64]) {
        self.total_found += ids.len() as u64;
        if let Some(&last) = ids.last() {
            debug_assert!(last > self.last_seen_id, "keyset cursor must advance");
            self.last_seen_id = last;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    /// Populated in CSV mode only; line mode streams ids without keeping them.
    pub matched_ids: Vec<u64>,
    pub total_found: u64,
    pub batches: u32,
    pub elapsed_seconds: f64,
}

pub struct Scanner<S> {
    store: S,
}

impl<S: ContentStore> Scanner<S> {
    pub fn new(store: S) -> Self {
        Scanner { store }
    }

    /// Sweeps every matching post in ascending id order.
    ///
    /// A storage failure aborts the sweep. Lines already streamed stay
    /// emitted; ids buffered for CSV output are dropped. A sink write error
    /// also stops the sweep before the next query.
    pub fn run(
        &self,
        request: &ScanRequest,
        sink: &mut impl OutputSink,
    ) -> Result<ScanResult, ScanError> {
        let start = Instant::now();
        let csv = request.mode() == OutputMode::Csv;
        let filter = BatchFilter::for_dates(request.date_after(), request.date_before());
        let limit = request.batch_size();

        info!(
            date_after = request.date_after(),
            date_before = request.date_before(),
            mode = ?request.mode(),
            "starting scan"
        );

        if !csv {
            sink.emit_line(&report::header_line(request.date_after(), request.date_before()))?;
            sink.emit_line("")?;
        }

        let mut cursor = ScanCursor::default();
        let mut matched_ids = Vec::new();

        loop {
            cursor.batch_number += 1;

            let ids = self.store.query_batch(&filter, cursor.last_seen_id, limit)?;
            let found = ids.len();
            cursor.record_batch(&ids);

            debug!(
                batch = cursor.batch_number,
                found,
                total_found = cursor.total_found,
                last_seen_id = cursor.last_seen_id,
                "batch complete"
            );

            if found > 0 {
                if csv {
                    matched_ids.extend_from_slice(&ids);
                } else {
                    for id in &ids {
                        sink.emit_line(&id.to_string())?;
                    }
                    sink.emit_line(&report::batch_line(
                        cursor.batch_number,
                        found,
                        cursor.total_found,
                    ))?;
                }
            }

            if found < limit {
                break;
            }
        }

        let elapsed_seconds = start.elapsed().as_secs_f64();

        if csv && !matched_ids.is_empty() {
            sink.emit_line(&report::csv_line(&matched_ids))?;
        }

        sink.emit_line("")?;

        if cursor.total_found == 0 {
            sink.emit_line(report::NO_MATCHES_LINE)?;
        } else {
            sink.emit_line(&report::success_line(cursor.total_found, elapsed_seconds))?;
        }

        info!(
            total_found = cursor.total_found,
            batches = cursor.batch_number,
            "scan finished in {elapsed_seconds:.2}s"
        );
        if let Some(usage) = memory_stats::memory_stats() {
            debug!(physical_bytes = usage.physical_mem, "memory after scan");
        }

        Ok(ScanResult {
            matched_ids,
            total_found: cursor.total_found,
            batches: cursor.batch_number,
            elapsed_seconds,
        })
    }
}
