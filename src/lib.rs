//! # Histoscope
//!
//! Finds Chrome, Edge and Firefox history databases on the local machine,
//! reads them through throwaway snapshots, and returns the most recent
//! visits in one normalized shape.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod parsers;
pub mod platform;
pub mod snapshot;
pub mod timestamp;

pub use error::{ErrorKind, HistoryError};
pub use fetch::{FetchRequest, HistoryFetcher, fetch};
pub use parsers::browser::{Browser, BrowserSelector, HistoryRecord, StoreKind};
pub use platform::{BrowserPaths, resolve_default_paths};
