//! Content store access.
//!
//! The scanner only needs one capability from storage: fetch the next batch of
//! matching post ids above a cursor. Everything else (connection handling,
//! table naming, SQL dialect) lives behind `ContentStore`.
//!
//! - `BatchFilter`: the fixed predicates pushed into every batch query
//! - `sqlite::SqliteStore`: rusqlite implementation over a `<prefix>posts` table

pub mod sqlite;

use thiserror::Error;

/// Marker text the block writes into post content.
pub const READ_MORE_MARKER: &str = "<!-- wp:dmg/read-more";

/// Diagnostic reported by the storage layer, passed through untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct StoreError(pub String);

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError(err.to_string())
    }
}

/// Predicates shared by every batch of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFilter {
    /// Inclusive lower publish bound, `YYYY-MM-DD 00:00:00`.
    pub published_from: String,
    /// Inclusive upper publish bound, `YYYY-MM-DD 23:59:59`.
    pub published_to: String,
    /// LIKE pattern matching the marker anywhere in the body.
    pub marker_pattern: String,
}

impl BatchFilter {
    pub fn for_dates(date_after: &str, date_before: &str) -> Self {
        BatchFilter {
            published_from: format!("{date_after} 00:00:00"),
            published_to: format!("{date_before} 23:59:59"),
            marker_pattern: format!("%{READ_MORE_MARKER}%"),
        }
    }
}

pub trait ContentStore {
    /// Ids of published posts matching `filter` with id greater than
    /// `after_id`, ascending, at most `limit` of them.
    fn query_batch(
        &self,
        filter: &BatchFilter,
        after_id: u64,
        limit: usize,
    ) -> Result<Vec<u64>, StoreError>;
}

impl<S: ContentStore + ?Sized> ContentStore for &S {
    fn query_batch(
        &self,
        filter: &BatchFilter,
        after_id: u64,
        limit: usize,
    ) -> Result<Vec<u64>, StoreError> {
        (**self).query_batch(filter, after_id, limit)
    }
}
