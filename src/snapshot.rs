//! Point-in-time copies of live history databases.
//!
//! Browsers keep their history file locked while running. Reading happens on
//! a sibling copy instead, which is removed together with any SQLite sidecar
//! files when the [`Snapshot`] goes out of scope.

use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tracing::debug;

use crate::error::HistoryError;

const SQLITE_SIDECARS: [&str; 3] = ["-journal", "-wal", "-shm"];

#[derive(Debug)]
pub struct Snapshot {
    path: TempPath,
}

impl Snapshot {
    /// Copy `original` next to itself as `<name>.<random><suffix>`.
    ///
    /// The random part keeps concurrent fetches of the same source from
    /// sharing one copy.
    pub fn create(original: &Path, suffix: &str) -> Result<Self, HistoryError> {
        if !original.is_file() {
            return Err(HistoryError::NotFound(original.to_path_buf()));
        }
        let snapshot_err = |source| HistoryError::Snapshot {
            path: original.to_path_buf(),
            source,
        };

        let dir = original
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = original
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "history".to_string());
        let prefix = format!("{name}.");

        let path = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(suffix)
            .rand_bytes(8)
            .tempfile_in(dir)
            .map_err(snapshot_err)?
            .into_temp_path();

        fs::copy(original, &path).map_err(snapshot_err)?;
        preserve_mtime(original, &path);

        debug!("snapshot {} -> {}", original.display(), path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Snapshot {
    fn drop(&mut self) {
        for sidecar in SQLITE_SIDECARS {
            let side = sidecar_path(&self.path, sidecar);
            if side.exists() {
                let _ = fs::remove_file(&side);
            }
        }
        // The copy itself is removed by `TempPath`, which ignores failures.
    }
}

fn sidecar_path(path: &Path, sidecar: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(sidecar);
    PathBuf::from(raw)
}

fn preserve_mtime(original: &Path, copy: &Path) {
    let result = fs::metadata(original)
        .and_then(|meta| meta.modified())
        .and_then(|modified| {
            File::options()
                .write(true)
                .open(copy)
                .and_then(|file| file.set_modified(modified))
        });
    if let Err(err) = result {
        debug!("could not carry mtime to {}: {err}", copy.display());
    }
}
