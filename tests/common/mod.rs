//! Shared fixtures for history store tests.
//!
//! Builds small Chrome-family and Firefox databases with the same table
//! layout the browsers use, plus fake home directories to resolve against.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use histoscope::config::Config;
use histoscope::fetch::HistoryFetcher;
use histoscope::platform::{HostEnv, Platform};

/// 2023-11-14T22:13:20Z in microseconds since the Unix epoch.
pub const UNIX_BASE_MICROS: i64 = 1_700_000_000_000_000;
/// Seconds between 1601-01-01 and 1970-01-01.
pub const CHROME_EPOCH_OFFSET_SECS: i64 = 11_644_473_600;

pub fn chrome_micros(unix_micros: i64) -> i64 {
    unix_micros + CHROME_EPOCH_OFFSET_SECS * 1_000_000
}

#[derive(Debug, Clone)]
pub struct Visit {
    pub url: String,
    pub title: Option<String>,
    pub visit_count: i64,
    /// Unix microseconds; converted per schema.
    pub visits: Vec<i64>,
}

pub fn visit(url: &str, title: &str, visits: &[i64]) -> Visit {
    Visit {
        url: url.to_string(),
        title: Some(title.to_string()),
        visit_count: visits.len() as i64,
        visits: visits.to_vec(),
    }
}

pub fn write_chrome_db(path: &Path, visits: &[Visit]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    let conn = Connection::open(path).expect("conn");
    conn.execute_batch(
        "CREATE TABLE urls (id INTEGER PRIMARY KEY AUTOINCREMENT, url LONGVARCHAR, \
             title LONGVARCHAR, visit_count INTEGER DEFAULT 0 NOT NULL, \
             typed_count INTEGER DEFAULT 0 NOT NULL, last_visit_time INTEGER NOT NULL, \
             hidden INTEGER DEFAULT 0 NOT NULL);
         CREATE TABLE visits (id INTEGER PRIMARY KEY, url INTEGER NOT NULL, \
             visit_time INTEGER NOT NULL, transition INTEGER DEFAULT 0 NOT NULL);",
    )
    .expect("schema");
    for v in visits {
        let last = v.visits.iter().copied().max().map(chrome_micros).unwrap_or(0);
        conn.execute(
            "INSERT INTO urls (url, title, visit_count, last_visit_time) VALUES (?1, ?2, ?3, ?4)",
            (&v.url, &v.title, v.visit_count, last),
        )
        .expect("insert url");
        let url_id = conn.last_insert_rowid();
        for ts in &v.visits {
            conn.execute(
                "INSERT INTO visits (url, visit_time) VALUES (?1, ?2)",
                (url_id, chrome_micros(*ts)),
            )
            .expect("insert visit");
        }
    }
}

pub fn write_firefox_db(path: &Path, visits: &[Visit]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("mkdir");
    }
    let conn = Connection::open(path).expect("conn");
    conn.execute_batch(
        "CREATE TABLE moz_places (id INTEGER PRIMARY KEY, url LONGVARCHAR, title LONGVARCHAR, \
             rev_host LONGVARCHAR, visit_count INTEGER DEFAULT 0, hidden INTEGER DEFAULT 0 NOT NULL, \
             last_visit_date INTEGER);
         CREATE TABLE moz_historyvisits (id INTEGER PRIMARY KEY, from_visit INTEGER, \
             place_id INTEGER, visit_date INTEGER, visit_type INTEGER, session INTEGER);",
    )
    .expect("schema");
    for v in visits {
        conn.execute(
            "INSERT INTO moz_places (url, title, visit_count, last_visit_date) VALUES (?1, ?2, ?3, ?4)",
            (&v.url, &v.title, v.visit_count, v.visits.iter().copied().max()),
        )
        .expect("insert place");
        let place_id = conn.last_insert_rowid();
        for ts in &v.visits {
            conn.execute(
                "INSERT INTO moz_historyvisits (place_id, visit_date, visit_type) VALUES (?1, ?2, 1)",
                (place_id, *ts),
            )
            .expect("insert visit");
        }
    }
}

pub fn linux_chrome_path(home: &Path) -> PathBuf {
    home.join(".config/google-chrome/Default/History")
}

pub fn linux_edge_path(home: &Path) -> PathBuf {
    home.join(".config/microsoft-edge/Default/History")
}

pub fn linux_firefox_path(home: &Path, profile: &str) -> PathBuf {
    home.join(".mozilla/firefox").join(profile).join("places.sqlite")
}

pub fn linux_fetcher(home: &Path) -> HistoryFetcher {
    let env = HostEnv {
        platform: Platform::Linux,
        home: Some(home.to_path_buf()),
        local_app_data: None,
        roaming_app_data: None,
    };
    HistoryFetcher::new(env, Config::default())
}

/// Names of all files under `dir`, recursively, relative to it.
pub fn files_under(dir: &Path) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(&current).expect("read dir").filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if let Ok(rel) = path.strip_prefix(dir) {
                out.push(rel.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    out.sort();
    out
}
