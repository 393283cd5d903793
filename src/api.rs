//! Request and response shapes served to the HTTP layer.
//!
//! `GET /` maps to [`index`], `GET /api/history/` to [`history`]. Query
//! parameters arrive as raw strings and are validated here.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;
use crate::fetch::{FetchRequest, HistoryFetcher};
use crate::parsers::browser::{BrowserSelector, HistoryRecord};
use crate::platform::BrowserPaths;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    pub browser: Option<String>,
    pub path: Option<String>,
    pub limit: Option<String>,
}

impl HistoryParams {
    pub fn into_request(self, default_limit: usize) -> Result<FetchRequest, HistoryError> {
        let limit = match self.limit.as_deref() {
            Some(raw) => parse_limit(raw)?,
            None => default_limit,
        };
        let browser = self
            .browser
            .as_deref()
            .map(BrowserSelector::parse)
            .unwrap_or_default();
        let path = self
            .path
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        Ok(FetchRequest {
            browser,
            path,
            limit,
        })
    }
}

/// A limit must be a positive integer.
pub fn parse_limit(raw: &str) -> Result<usize, HistoryError> {
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(HistoryError::InvalidLimit(raw.to_string())),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub results: Vec<HistoryRecord>,
    pub count: usize,
}

impl From<Vec<HistoryRecord>> for HistoryResponse {
    fn from(results: Vec<HistoryRecord>) -> Self {
        let count = results.len();
        Self { results, count }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    pub paths: BrowserPaths,
}

pub fn index(fetcher: &HistoryFetcher) -> IndexPage {
    IndexPage {
        paths: fetcher.discover(),
    }
}

pub fn history(
    fetcher: &HistoryFetcher,
    params: HistoryParams,
) -> Result<HistoryResponse, HistoryError> {
    let request = params.into_request(fetcher.config().default_limit)?;
    Ok(fetcher.fetch(&request)?.into())
}
