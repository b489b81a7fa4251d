use std::path::Path;

use dmg_read_more::error::ScanError;
use dmg_read_more::report::{BufferSink, NO_MATCHES_LINE};
use dmg_read_more::scan::{OutputMode, ScanRequest, Scanner};
use dmg_read_more::store::sqlite::SqliteStore;
use rusqlite::{params, Connection};
use tempfile::TempDir;

const BLOCK: &str = "<p>Intro</p>\n<!-- wp:dmg/read-more {\"postId\":9,\"postTitle\":\"Next\"} /-->";

fn create_site(dir: &Path, posts: &[(i64, &str, &str)]) -> std::path::PathBuf {
    let path = dir.join("site.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "CREATE TABLE wp_posts (
            ID INTEGER PRIMARY KEY AUTOINCREMENT,
            post_date TEXT NOT NULL,
            post_content TEXT NOT NULL,
            post_status TEXT NOT NULL DEFAULT 'publish',
            post_type TEXT NOT NULL DEFAULT 'post'
        )",
        [],
    )
    .unwrap();

    let tx = conn.unchecked_transaction().unwrap();
    for (id, date, content) in posts {
        tx.execute(
            "INSERT INTO wp_posts (ID, post_date, post_content) VALUES (?1, ?2, ?3)",
            params![id, date, content],
        )
        .unwrap();
    }
    tx.commit().unwrap();
    path
}

#[test]
fn scans_sqlite_file_across_batches() {
    let dir = TempDir::new().unwrap();
    let mut posts: Vec<(i64, &str, &str)> = (1..=2500)
        .map(|id| {
            let content = if id % 2 == 0 { BLOCK } else { "<p>no block here</p>" };
            (id, "2023-06-15 08:30:00", content)
        })
        .collect();
    posts.push((3000, "2024-01-01 00:00:00", BLOCK));
    let path = create_site(dir.path(), &posts);

    let store = SqliteStore::open(&path, "wp_").unwrap();
    let request = ScanRequest::new("2023-01-01", "2023-12-31", OutputMode::Line).unwrap();
    let mut sink = BufferSink::new();

    let result = Scanner::new(store).run(&request, &mut sink).unwrap();

    assert_eq!(result.total_found, 1250);
    assert_eq!(result.batches, 2);
    assert_eq!(sink.lines[0], "Searching posts from 2023-01-01 to 2023-12-31...");
    assert!(sink
        .lines
        .contains(&"--- Batch 1: Found 1000 posts (total found: 1000) ---".to_string()));
    assert!(sink
        .lines
        .contains(&"--- Batch 2: Found 250 posts (total found: 1250) ---".to_string()));
    assert!(!sink.lines.contains(&"3000".to_string()));
    assert!(sink.lines.last().unwrap().starts_with("Success: Found 1250 posts"));
}

#[test]
fn csv_output_on_sqlite_file() {
    let dir = TempDir::new().unwrap();
    let path = create_site(
        dir.path(),
        &[
            (4, "2023-03-01 10:00:00", BLOCK),
            (8, "2023-03-02 10:00:00", "plain"),
            (15, "2023-03-03 10:00:00", BLOCK),
        ],
    );

    let store = SqliteStore::open(&path, "wp_").unwrap();
    let request = ScanRequest::new("2023-03-01", "2023-03-31", OutputMode::Csv).unwrap();
    let mut sink = BufferSink::new();

    let result = Scanner::new(store).run(&request, &mut sink).unwrap();

    assert_eq!(result.matched_ids, vec![4, 15]);
    assert_eq!(sink.lines[0], "4,15");
    assert_eq!(sink.lines[1], "");
}

#[test]
fn empty_window_reports_no_matches() {
    let dir = TempDir::new().unwrap();
    let path = create_site(dir.path(), &[(1, "2020-01-01 12:00:00", BLOCK)]);

    let store = SqliteStore::open(&path, "wp_").unwrap();
    let request = ScanRequest::new("2023-01-01", "2023-01-31", OutputMode::Csv).unwrap();
    let mut sink = BufferSink::new();

    let result = Scanner::new(store).run(&request, &mut sink).unwrap();

    assert_eq!(result.total_found, 0);
    assert_eq!(sink.lines, vec![String::new(), NO_MATCHES_LINE.to_string()]);
}

#[test]
fn wrong_prefix_is_a_storage_error() {
    let dir = TempDir::new().unwrap();
    let path = create_site(dir.path(), &[]);

    let store = SqliteStore::open(&path, "blog_").unwrap();
    let request = ScanRequest::new("2023-01-01", "2023-01-31", OutputMode::Line).unwrap();
    let mut sink = BufferSink::new();

    let err = Scanner::new(store).run(&request, &mut sink).unwrap_err();

    assert_eq!(
        err,
        ScanError::Storage("no such table: blog_posts".to_string())
    );
}

#[test]
fn missing_database_file_fails_to_open() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.db");

    assert!(SqliteStore::open(&missing, "wp_").is_err());
    assert!(!missing.exists());
}
