use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Conventional file name of the Firefox places store.
pub const FIREFOX_STORE_NAME: &str = "places.sqlite";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    Chrome,
    Edge,
    Firefox,
}

impl Browser {
    pub const ALL: [Browser; 3] = [Browser::Chrome, Browser::Edge, Browser::Firefox];

    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Edge => "edge",
            Browser::Firefox => "firefox",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Browser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chrome" => Ok(Browser::Chrome),
            "edge" => Ok(Browser::Edge),
            "firefox" => Ok(Browser::Firefox),
            other => Err(format!("unknown browser: {other}")),
        }
    }
}

/// Which browser(s) a fetch should consider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BrowserSelector {
    #[default]
    Auto,
    Only(Browser),
    /// A name no reader knows. It has no default locations and reads
    /// explicit paths as a Chrome-family store.
    Other(String),
}

impl BrowserSelector {
    /// Lenient, case-insensitive parse; empty input means `Auto`.
    pub fn parse(raw: &str) -> Self {
        let name = raw.trim().to_ascii_lowercase();
        if name.is_empty() || name == "auto" {
            return BrowserSelector::Auto;
        }
        match name.parse::<Browser>() {
            Ok(browser) => BrowserSelector::Only(browser),
            Err(_) => BrowserSelector::Other(name),
        }
    }

    pub fn is_firefox(&self) -> bool {
        matches!(self, BrowserSelector::Only(Browser::Firefox))
    }
}

impl From<Browser> for BrowserSelector {
    fn from(browser: Browser) -> Self {
        BrowserSelector::Only(browser)
    }
}

impl fmt::Display for BrowserSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowserSelector::Auto => f.write_str("auto"),
            BrowserSelector::Only(browser) => write!(f, "{browser}"),
            BrowserSelector::Other(name) => f.write_str(name),
        }
    }
}

/// On-disk history schema family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    ChromeFamily,
    Firefox,
}

impl StoreKind {
    /// Firefox when the browser says so or the file carries the places
    /// store name; everything else is read as Chrome-family.
    pub fn resolve(firefox_hint: bool, path: &Path) -> Self {
        let named_places = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(FIREFOX_STORE_NAME))
            .unwrap_or(false);
        if firefox_hint || named_places {
            StoreKind::Firefox
        } else {
            StoreKind::ChromeFamily
        }
    }
}

/// One visited URL, normalized across browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub visit_count: u64,
    pub visited_at_utc: Option<String>,
}
