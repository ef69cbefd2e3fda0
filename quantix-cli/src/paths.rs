//! Where quantix keeps its files.
//!
//! Directories follow the platform conventions (XDG on Linux) through
//! `directories`; tests point [`Paths`] at a temporary root instead.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "quantix";
const APPLICATION: &str = "quantix";

const SETTINGS_DB: &str = "settings.db";
const LATEST_LOG: &str = "latest.log";

/// Archived logs kept besides `latest.log`.
const MAX_OLD_LOGS: usize = 25;

/// Data and cache directories of one installation.
#[derive(Debug, Clone)]
pub struct Paths {
    data: PathBuf,
    cache: PathBuf,
}

impl Paths {
    /// Platform directories, or `None` without a home directory.
    ///
    /// - Linux: `~/.local/share/quantix` and `~/.cache/quantix`
    /// - macOS: `~/Library/Application Support/dev.quantix.quantix` and
    ///   `~/Library/Caches/dev.quantix.quantix`
    /// - Windows: `AppData\Roaming\quantix\quantix\data` and
    ///   `AppData\Local\quantix\quantix\cache`
    pub fn detect() -> Option<Self> {
        let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)?;
        Some(Self {
            data: dirs.data_dir().to_path_buf(),
            cache: dirs.cache_dir().to_path_buf(),
        })
    }

    /// Keeps everything under `root`.
    #[cfg(test)]
    pub fn at(root: &Path) -> Self {
        Self {
            data: root.join("data"),
            cache: root.join("cache"),
        }
    }

    /// The preferences database. Creates its directory.
    pub fn settings_db(&self) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.data)?;
        Ok(self.data.join(SETTINGS_DB))
    }

    /// Archives the previous `latest.log`, prunes old logs and returns the
    /// path for this run's log. Creates the cache directory.
    pub fn rotate_logs(&self) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.cache)?;
        let latest = self.cache.join(LATEST_LOG);

        if latest.exists() {
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            fs::rename(&latest, self.cache.join(format!("{}.log", timestamp)))?;
        }

        prune_logs(&self.cache);
        Ok(latest)
    }
}

/// Deletes all but the `MAX_OLD_LOGS` newest archived logs.
fn prune_logs(cache: &Path) {
    let Ok(entries) = fs::read_dir(cache) else { return };

    let mut logs: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();

    if logs.len() <= MAX_OLD_LOGS {
        return;
    }

    // Oldest first
    logs.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());
    for entry in &logs[..logs.len() - MAX_OLD_LOGS] {
        if let Err(e) = fs::remove_file(entry.path()) {
            log::warn!("Failed to remove {}: {}", entry.path().display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_archives_latest_and_prunes() {
        let root = tempfile::tempdir().unwrap();
        let paths = Paths::at(root.path());
        let cache = root.path().join("cache");
        fs::create_dir_all(&cache).unwrap();
        for i in 0..30 {
            fs::write(cache.join(format!("202001{:02}_000000.log", i + 1)), "old").unwrap();
        }
        fs::write(cache.join(LATEST_LOG), "current").unwrap();

        let latest = paths.rotate_logs().unwrap();

        assert_eq!(latest, cache.join(LATEST_LOG));
        assert!(!latest.exists());
        assert_eq!(fs::read_dir(&cache).unwrap().count(), MAX_OLD_LOGS);
    }

    #[test]
    fn test_settings_db_creates_data_dir() {
        let root = tempfile::tempdir().unwrap();
        let db = Paths::at(root.path()).settings_db().unwrap();
        assert!(db.parent().unwrap().is_dir());
        assert!(db.ends_with("data/settings.db"));
    }
}
