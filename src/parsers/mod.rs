//! # Parsers Module
//!
//! Schema readers for browser history stores. Every reader works on a
//! [`Snapshot`] of the source file, never on the live database.

pub mod browser;
pub mod chrome;
pub mod firefox;

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};

use crate::error::HistoryError;
use crate::snapshot::Snapshot;
use crate::timestamp::to_iso8601;

use browser::{HistoryRecord, StoreKind};

pub const DEFAULT_SNAPSHOT_SUFFIX: &str = ".copy";

/// A reader for one on-disk history schema.
pub trait HistoryReader {
    /// Read up to `limit` records from `db_path`, most recent first.
    fn read(&self, db_path: &Path, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError>;
}

pub fn reader_for(kind: StoreKind, snapshot_suffix: &str) -> Box<dyn HistoryReader> {
    match kind {
        StoreKind::ChromeFamily => Box::new(chrome::ChromeReader::new(snapshot_suffix)),
        StoreKind::Firefox => Box::new(firefox::FirefoxReader::new(snapshot_suffix)),
    }
}

/// A single recent-visits query. Columns must be `url, title, visit_count,
/// timestamp` and the only parameter the row limit.
pub(crate) struct VisitQuery {
    pub sql: &'static str,
    pub decode_time: fn(i64) -> Option<DateTime<Utc>>,
}

pub(crate) fn query_snapshot(
    db_path: &Path,
    snapshot_suffix: &str,
    limit: usize,
    query: &VisitQuery,
) -> Result<Vec<HistoryRecord>, HistoryError> {
    let snapshot = Snapshot::create(db_path, snapshot_suffix)?;
    let read_err = |source| HistoryError::Read {
        path: db_path.to_path_buf(),
        source,
    };

    let conn = Connection::open_with_flags(
        snapshot.path(),
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(read_err)?;
    let records = collect_rows(&conn, query, limit).map_err(read_err);

    // The handle must be closed before the copy and its sidecars go away.
    drop(conn);
    drop(snapshot);
    records
}

fn collect_rows(
    conn: &Connection,
    query: &VisitQuery,
    limit: usize,
) -> rusqlite::Result<Vec<HistoryRecord>> {
    let mut stmt = conn.prepare(query.sql)?;
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = stmt.query_map([limit], |row| decode_row(row, query.decode_time))?;

    let mut out = Vec::new();
    for row in rows {
        if let Some(record) = row? {
            out.push(record);
        }
    }
    Ok(out)
}

fn decode_row(
    row: &Row<'_>,
    decode_time: fn(i64) -> Option<DateTime<Utc>>,
) -> rusqlite::Result<Option<HistoryRecord>> {
    let Some(url) = text_column(row.get_ref(0)?) else {
        return Ok(None);
    };
    let title = text_column(row.get_ref(1)?).unwrap_or_default();
    let visit_count = integer_column(row.get_ref(2)?)
        .map(|count| count.max(0) as u64)
        .unwrap_or(0);
    let visited_at_utc = integer_column(row.get_ref(3)?)
        .and_then(decode_time)
        .map(|dt| to_iso8601(&dt));

    Ok(Some(HistoryRecord {
        url,
        title,
        visit_count,
        visited_at_utc,
    }))
}

fn text_column(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
    }
}

/// SQLite does not enforce column types; accept integers stored as REAL or
/// TEXT and treat anything else as missing.
fn integer_column(value: ValueRef<'_>) -> Option<i64> {
    match value {
        ValueRef::Integer(i) => Some(i),
        ValueRef::Real(f) if f.is_finite() => Some(f as i64),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok(),
        _ => None,
    }
}
