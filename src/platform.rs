//! # Platform Module
//!
//! Discovery of the conventional history store locations for each supported
//! browser. Nothing is cached: installs and profiles can change between
//! calls, so every resolution walks the filesystem again.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use serde::Serialize;
use tracing::{debug, warn};

use crate::parsers::browser::{Browser, FIREFOX_STORE_NAME};

pub const DEFAULT_FIREFOX_PROFILE_GLOB: &str = "*.default-release";

const CHROME_STORE_NAME: &str = "History";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Mac,
    /// Linux and anything else unix-like.
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Linux
        }
    }
}

/// The directories profile locations are built from. Missing entries simply
/// produce no candidates.
#[derive(Debug, Clone)]
pub struct HostEnv {
    pub platform: Platform,
    pub home: Option<PathBuf>,
    pub local_app_data: Option<PathBuf>,
    pub roaming_app_data: Option<PathBuf>,
}

impl HostEnv {
    pub fn detect() -> Self {
        let platform = Platform::current();
        let (local_app_data, roaming_app_data) = match platform {
            Platform::Windows => (dirs::data_local_dir(), dirs::data_dir()),
            _ => (None, None),
        };
        Self {
            platform,
            home: dirs::home_dir(),
            local_app_data,
            roaming_app_data,
        }
    }
}

/// Existing history store paths per browser, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BrowserPaths {
    pub chrome: Vec<PathBuf>,
    pub edge: Vec<PathBuf>,
    pub firefox: Vec<PathBuf>,
}

impl BrowserPaths {
    pub fn get(&self, browser: Browser) -> &[PathBuf] {
        match browser {
            Browser::Chrome => &self.chrome,
            Browser::Edge => &self.edge,
            Browser::Firefox => &self.firefox,
        }
    }

    fn get_mut(&mut self, browser: Browser) -> &mut Vec<PathBuf> {
        match browser {
            Browser::Chrome => &mut self.chrome,
            Browser::Edge => &mut self.edge,
            Browser::Firefox => &mut self.firefox,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Browser, &[PathBuf])> {
        Browser::ALL.into_iter().map(move |b| (b, self.get(b)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, paths)| paths.is_empty())
    }
}

pub struct PathResolver {
    env: HostEnv,
    profile_glob: Option<GlobMatcher>,
}

impl PathResolver {
    /// An unparsable profile pattern is logged and matches no profile.
    pub fn new(env: HostEnv, firefox_profile_glob: &str) -> Self {
        let profile_glob = match Glob::new(firefox_profile_glob) {
            Ok(glob) => Some(glob.compile_matcher()),
            Err(err) => {
                warn!("invalid firefox profile pattern {firefox_profile_glob:?}: {err}");
                None
            }
        };
        Self { env, profile_glob }
    }

    /// Candidate locations filtered to files that exist right now.
    pub fn resolve(&self) -> BrowserPaths {
        let mut paths = self.candidates();
        for browser in Browser::ALL {
            let list = paths.get_mut(browser);
            list.retain(|p| p.is_file());
            debug!("{browser}: {} history store(s) found", list.len());
        }
        paths
    }

    /// Conventional locations for this platform, before the existence check.
    /// Firefox entries come from matching profile directories and are
    /// therefore already limited to what is on disk.
    pub fn candidates(&self) -> BrowserPaths {
        let env = &self.env;
        let mut paths = BrowserPaths::default();
        match env.platform {
            Platform::Windows => {
                if let Some(local) = env.local_app_data.as_deref() {
                    paths.chrome.push(nested(
                        local,
                        &["Google", "Chrome", "User Data", "Default", CHROME_STORE_NAME],
                    ));
                    paths.edge.push(nested(
                        local,
                        &["Microsoft", "Edge", "User Data", "Default", CHROME_STORE_NAME],
                    ));
                }
                if let Some(roaming) = env.roaming_app_data.as_deref() {
                    paths.firefox = self
                        .firefox_profiles(&nested(roaming, &["Mozilla", "Firefox", "Profiles"]));
                }
            }
            Platform::Mac => {
                if let Some(home) = env.home.as_deref() {
                    let base = nested(home, &["Library", "Application Support"]);
                    paths
                        .chrome
                        .push(nested(&base, &["Google", "Chrome", "Default", CHROME_STORE_NAME]));
                    paths
                        .edge
                        .push(nested(&base, &["Microsoft Edge", "Default", CHROME_STORE_NAME]));
                    paths.firefox = self.firefox_profiles(&nested(&base, &["Firefox", "Profiles"]));
                }
            }
            Platform::Linux => {
                if let Some(home) = env.home.as_deref() {
                    paths.chrome.push(nested(
                        home,
                        &[".config", "google-chrome", "Default", CHROME_STORE_NAME],
                    ));
                    paths.edge.push(nested(
                        home,
                        &[".config", "microsoft-edge", "Default", CHROME_STORE_NAME],
                    ));
                    paths.firefox = self.firefox_profiles(&nested(home, &[".mozilla", "firefox"]));
                }
            }
        }
        paths
    }

    fn firefox_profiles(&self, profiles_dir: &Path) -> Vec<PathBuf> {
        let Some(matcher) = self.profile_glob.as_ref() else {
            return Vec::new();
        };
        let Ok(entries) = std::fs::read_dir(profiles_dir) else {
            return Vec::new();
        };
        let mut out: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| matcher.is_match(entry.file_name()))
            .map(|entry| entry.path())
            .filter(|dir| dir.is_dir())
            .map(|dir| dir.join(FIREFOX_STORE_NAME))
            .collect();
        out.sort();
        out
    }
}

/// Resolve the host's default history locations.
pub fn resolve_default_paths() -> BrowserPaths {
    PathResolver::new(HostEnv::detect(), DEFAULT_FIREFOX_PROFILE_GLOB).resolve()
}

fn nested(base: &Path, parts: &[&str]) -> PathBuf {
    let mut path = base.to_path_buf();
    for part in parts {
        path.push(part);
    }
    path
}
