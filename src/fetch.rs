//! # Fetch Module
//!
//! Picks the history store(s) to read for a request and applies the
//! fallback chain across browsers and profile locations.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::HistoryError;
use crate::parsers::browser::{Browser, BrowserSelector, HistoryRecord, StoreKind};
use crate::parsers::reader_for;
use crate::platform::{BrowserPaths, HostEnv, PathResolver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub browser: BrowserSelector,
    pub path: Option<PathBuf>,
    pub limit: usize,
}

impl FetchRequest {
    pub fn new(limit: usize) -> Self {
        Self {
            browser: BrowserSelector::Auto,
            path: None,
            limit,
        }
    }

    pub fn browser(mut self, browser: impl Into<BrowserSelector>) -> Self {
        self.browser = browser.into();
        self
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

pub struct HistoryFetcher {
    resolver: PathResolver,
    config: Config,
}

impl HistoryFetcher {
    pub fn new(env: HostEnv, config: Config) -> Self {
        let resolver = PathResolver::new(env, &config.firefox_profile_glob);
        Self { resolver, config }
    }

    pub fn from_host(config: Config) -> Self {
        Self::new(HostEnv::detect(), config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Default history locations currently present on this host.
    pub fn discover(&self) -> BrowserPaths {
        self.resolver.resolve()
    }

    /// Read the most recent visits.
    ///
    /// An explicit path is read as-is and any failure is returned. Without
    /// one, default locations are tried in order and the first readable
    /// store wins; if none is readable the result is empty.
    pub fn fetch(&self, request: &FetchRequest) -> Result<Vec<HistoryRecord>, HistoryError> {
        if request.limit == 0 {
            return Ok(Vec::new());
        }

        if let Some(path) = request.path.as_deref() {
            if !path.exists() {
                return Err(HistoryError::NotFound(path.to_path_buf()));
            }
            let kind = StoreKind::resolve(request.browser.is_firefox(), path);
            info!("reading {} as {:?}", path.display(), kind);
            return self.read_store(kind, path, request.limit);
        }

        let paths = self.resolver.resolve();
        for browser in self.search_order(&request.browser) {
            for path in paths.get(browser) {
                let kind = StoreKind::resolve(browser == Browser::Firefox, path);
                match self.read_store(kind, path, request.limit) {
                    Ok(records) => {
                        info!(
                            "read {} records from {} ({browser})",
                            records.len(),
                            path.display()
                        );
                        return Ok(records);
                    }
                    Err(err) => {
                        debug!("skipping {} ({browser}): {err}", path.display());
                    }
                }
            }
        }

        info!("no readable history store for browser={}", request.browser);
        Ok(Vec::new())
    }

    fn search_order(&self, selector: &BrowserSelector) -> Vec<Browser> {
        match selector {
            BrowserSelector::Auto => self.config.auto_order.clone(),
            BrowserSelector::Only(browser) => vec![*browser],
            BrowserSelector::Other(_) => Vec::new(),
        }
    }

    fn read_store(
        &self,
        kind: StoreKind,
        path: &Path,
        limit: usize,
    ) -> Result<Vec<HistoryRecord>, HistoryError> {
        let mut records = reader_for(kind, &self.config.snapshot_suffix).read(path, limit)?;
        records.truncate(limit);
        Ok(records)
    }
}

/// Fetch from the host's default locations with the built-in configuration.
pub fn fetch(
    browser: BrowserSelector,
    path: Option<&Path>,
    limit: usize,
) -> Result<Vec<HistoryRecord>, HistoryError> {
    let request = FetchRequest {
        browser,
        path: path.map(Path::to_path_buf),
        limit,
    };
    HistoryFetcher::from_host(Config::default()).fetch(&request)
}
