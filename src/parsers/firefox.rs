use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::error::HistoryError;
use crate::parsers::browser::HistoryRecord;
use crate::parsers::{HistoryReader, VisitQuery, query_snapshot};
use crate::timestamp::unix_micro_to_utc;

/// Pages joined with their visit events. A page visited several times
/// yields several rows; pages without events still appear, sorted last.
const RECENT_VISITS: VisitQuery = VisitQuery {
    sql: "SELECT p.url, p.title, p.visit_count, v.visit_date \
          FROM moz_places p \
          LEFT JOIN moz_historyvisits v ON p.id = v.place_id \
          ORDER BY v.visit_date DESC \
          LIMIT ?1",
    decode_time: unix_micro_to_utc,
};

/// Reader for the Firefox `places.sqlite` database.
#[derive(Debug, Clone)]
pub struct FirefoxReader {
    snapshot_suffix: String,
}

impl FirefoxReader {
    pub fn new(snapshot_suffix: &str) -> Self {
        Self {
            snapshot_suffix: snapshot_suffix.to_string(),
        }
    }
}

impl Default for FirefoxReader {
    fn default() -> Self {
        Self::new(super::DEFAULT_SNAPSHOT_SUFFIX)
    }
}

impl HistoryReader for FirefoxReader {
    fn read(&self, db_path: &Path, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        let rows = query_snapshot(db_path, &self.snapshot_suffix, limit, &RECENT_VISITS)?;
        let fetched = rows.len();
        let records = dedup_by_url(rows, limit);
        debug!(
            "firefox reader: {} visit rows, {} unique urls from {}",
            fetched,
            records.len(),
            db_path.display()
        );
        Ok(records)
    }
}

/// Keep the first (most recent) row for each URL.
fn dedup_by_url(rows: Vec<HistoryRecord>, limit: usize) -> Vec<HistoryRecord> {
    let mut seen = HashSet::new();
    let mut out: Vec<HistoryRecord> = rows
        .into_iter()
        .filter(|record| seen.insert(record.url.clone()))
        .collect();
    out.truncate(limit);
    out
}
