use std::path::Path;

use rusqlite::{params, Connection, OpenFlags};
use tracing::debug;

use super::{BatchFilter, ContentStore, StoreError};

pub const DEFAULT_TABLE_PREFIX: &str = "wp_";

/// Read-only handle on a WordPress-shaped posts table.
///
/// The table prefix is spliced into the SQL text, so callers must pass one
/// that satisfies `is_valid_table_prefix`.
pub struct SqliteStore {
    conn: Connection,
    batch_sql: String,
}

impl SqliteStore {
    pub fn open(path: &Path, table_prefix: &str) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!(path = %path.display(), "opened content database");
        Ok(Self::from_connection(conn, table_prefix))
    }

    pub fn from_connection(conn: Connection, table_prefix: &str) -> Self {
        SqliteStore {
            conn,
            batch_sql: batch_query(table_prefix),
        }
    }
}

impl ContentStore for SqliteStore {
    fn query_batch(
        &self,
        filter: &BatchFilter,
        after_id: u64,
        limit: usize,
    ) -> Result<Vec<u64>, StoreError> {
        let mut stmt = self.conn.prepare_cached(&self.batch_sql)?;

        let ids = stmt
            .query_map(
                params![
                    filter.published_from,
                    filter.published_to,
                    filter.marker_pattern,
                    i64::try_from(after_id).unwrap_or(i64::MAX),
                    i64::try_from(limit).unwrap_or(i64::MAX),
                ],
                |row| Ok(row.get::<_, i64>(0)?.max(0) as u64),
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ids)
    }
}

fn batch_query(table_prefix: &str) -> String {
    format!(
        "SELECT ID FROM {table_prefix}posts
         WHERE post_type = 'post'
         AND post_status = 'publish'
         AND post_date BETWEEN ?1 AND ?2
         AND post_content LIKE ?3
         AND ID > ?4
         ORDER BY ID ASC
         LIMIT ?5"
    )
}

pub fn is_valid_table_prefix(prefix: &str) -> bool {
    prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
