use std::path::Path;

use tracing::debug;

use crate::error::HistoryError;
use crate::parsers::browser::HistoryRecord;
use crate::parsers::{HistoryReader, VisitQuery, query_snapshot};
use crate::timestamp::chrome_time_to_utc;

/// One row per distinct URL with its cumulative count and last visit.
const RECENT_URLS: VisitQuery = VisitQuery {
    sql: "SELECT urls.url, urls.title, urls.visit_count, urls.last_visit_time \
          FROM urls \
          ORDER BY urls.last_visit_time DESC \
          LIMIT ?1",
    decode_time: chrome_time_to_utc,
};

/// Reader for the Chrome/Edge `History` database.
#[derive(Debug, Clone)]
pub struct ChromeReader {
    snapshot_suffix: String,
}

impl ChromeReader {
    pub fn new(snapshot_suffix: &str) -> Self {
        Self {
            snapshot_suffix: snapshot_suffix.to_string(),
        }
    }
}

impl Default for ChromeReader {
    fn default() -> Self {
        Self::new(super::DEFAULT_SNAPSHOT_SUFFIX)
    }
}

impl HistoryReader for ChromeReader {
    fn read(&self, db_path: &Path, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        let records = query_snapshot(db_path, &self.snapshot_suffix, limit, &RECENT_URLS)?;
        debug!("chrome reader: {} records from {}", records.len(), db_path.display());
        Ok(records)
    }
}
