//! Fetches that discover stores in default profile locations.

mod common;

use std::fs;

use chrono::DateTime;
use common::{
    UNIX_BASE_MICROS, files_under, linux_chrome_path, linux_edge_path, linux_fetcher,
    linux_firefox_path, visit, write_chrome_db, write_firefox_db,
};
use histoscope::api::{self, HistoryParams};
use histoscope::{Browser, BrowserSelector, FetchRequest};

#[test]
fn auto_without_browsers_is_empty() {
    let home = tempfile::tempdir().expect("home");
    let fetcher = linux_fetcher(home.path());
    assert!(fetcher.discover().is_empty());
    let records = fetcher.fetch(&FetchRequest::new(200)).expect("fetch");
    assert!(records.is_empty());
}

#[test]
fn auto_prefers_chrome_then_edge_then_firefox() {
    let home = tempfile::tempdir().expect("home");
    write_firefox_db(
        &linux_firefox_path(home.path(), "x1.default-release"),
        &[visit("https://firefox.example", "F", &[UNIX_BASE_MICROS])],
    );
    let fetcher = linux_fetcher(home.path());
    let records = fetcher.fetch(&FetchRequest::new(10)).expect("fetch");
    assert_eq!(records[0].url, "https://firefox.example");

    write_chrome_db(
        &linux_edge_path(home.path()),
        &[visit("https://edge.example", "E", &[UNIX_BASE_MICROS])],
    );
    let records = fetcher.fetch(&FetchRequest::new(10)).expect("fetch");
    assert_eq!(records[0].url, "https://edge.example");

    write_chrome_db(
        &linux_chrome_path(home.path()),
        &[visit("https://chrome.example", "C", &[UNIX_BASE_MICROS])],
    );
    let records = fetcher.fetch(&FetchRequest::new(10)).expect("fetch");
    assert_eq!(records[0].url, "https://chrome.example");
}

#[test]
fn broken_store_falls_through_to_next_browser() {
    let home = tempfile::tempdir().expect("home");
    let chrome = linux_chrome_path(home.path());
    fs::create_dir_all(chrome.parent().expect("parent")).expect("mkdir");
    fs::write(&chrome, vec![0xFFu8; 2048]).expect("garbage");
    write_chrome_db(
        &linux_edge_path(home.path()),
        &[visit("https://edge.example", "E", &[UNIX_BASE_MICROS])],
    );

    let fetcher = linux_fetcher(home.path());
    let records = fetcher.fetch(&FetchRequest::new(10)).expect("fetch");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, "https://edge.example");

    let leftovers = files_under(home.path());
    assert_eq!(
        leftovers,
        vec![
            ".config/google-chrome/Default/History",
            ".config/microsoft-edge/Default/History",
        ]
    );
}

#[test]
fn single_browser_does_not_fall_back() {
    let home = tempfile::tempdir().expect("home");
    write_chrome_db(
        &linux_chrome_path(home.path()),
        &[visit("https://chrome.example", "C", &[UNIX_BASE_MICROS])],
    );
    let fetcher = linux_fetcher(home.path());

    let records = fetcher
        .fetch(&FetchRequest::new(10).browser(Browser::Firefox))
        .expect("fetch");
    assert!(records.is_empty());

    let records = fetcher
        .fetch(&FetchRequest::new(10).browser(BrowserSelector::Other("safari".into())))
        .expect("fetch");
    assert!(records.is_empty());
}

#[test]
fn tries_every_firefox_profile() {
    let home = tempfile::tempdir().expect("home");
    let broken = linux_firefox_path(home.path(), "a000.default-release");
    fs::create_dir_all(broken.parent().expect("parent")).expect("mkdir");
    fs::write(&broken, b"corrupt").expect("write");
    write_firefox_db(
        &linux_firefox_path(home.path(), "b111.default-release"),
        &[visit("https://second.example", "S", &[UNIX_BASE_MICROS])],
    );

    let fetcher = linux_fetcher(home.path());
    assert_eq!(fetcher.discover().firefox.len(), 2);
    let records = fetcher
        .fetch(&FetchRequest::new(5).browser(Browser::Firefox))
        .expect("fetch");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, "https://second.example");
}

#[test]
fn api_payload_has_utc_timestamps() {
    let home = tempfile::tempdir().expect("home");
    let visits: Vec<_> = (0..5)
        .map(|i| {
            visit(
                &format!("https://p{i}.example"),
                "P",
                &[UNIX_BASE_MICROS + i * 60_000_000],
            )
        })
        .collect();
    write_chrome_db(&linux_chrome_path(home.path()), &visits);
    let fetcher = linux_fetcher(home.path());

    let response = api::history(
        &fetcher,
        HistoryParams {
            browser: Some("chrome".to_string()),
            path: None,
            limit: Some("3".to_string()),
        },
    )
    .expect("history");

    assert_eq!(response.count, 3);
    assert_eq!(response.results.len(), 3);
    for record in &response.results {
        let ts = record.visited_at_utc.as_deref().expect("timestamp");
        let parsed = DateTime::parse_from_rfc3339(ts).expect("rfc3339");
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }
    assert_eq!(response.results[0].url, "https://p4.example");

    let page = api::index(&fetcher);
    assert_eq!(page.paths.chrome, vec![linux_chrome_path(home.path())]);
}
