//! Log file location and rotation.
//!
//! Logs live in the platform cache directory, which belongs to this program
//! alone, so rotation may rename and delete files there. Without a cache
//! directory the log goes to a fixed file in the working directory and is
//! never rotated.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "frozen-table";
const APPLICATION: &str = "frozen-table-demo";

const LATEST_LOG: &str = "latest.log";
const FALLBACK_LOG: &str = "frozen-table-demo.log";

/// Name stem of rotated logs.
const ARCHIVE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

/// - Linux: `$XDG_CACHE_HOME/frozen-table-demo` or `~/.cache/frozen-table-demo`
/// - macOS: `~/Library/Caches/dev.frozen-table.frozen-table-demo`
/// - Windows: `C:\Users\<User>\AppData\Local\frozen-table\frozen-table-demo\cache`
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Where to write this run's log.
pub fn log_file() -> PathBuf {
    match cache_dir().filter(|dir| fs::create_dir_all(dir).is_ok()) {
        Some(dir) => {
            rotate_logs(&dir);
            dir.join(LATEST_LOG)
        }
        None => PathBuf::from(FALLBACK_LOG),
    }
}

/// Archive `latest.log` under a timestamped name and drop the oldest
/// archives. Files this program did not name are left alone.
pub fn rotate_logs(dir: &Path) {
    let latest = dir.join(LATEST_LOG);

    if latest.exists() {
        let stamp = chrono::Local::now().format(ARCHIVE_FORMAT);
        let _ = fs::rename(&latest, dir.join(format!("{stamp}.log")));
    }

    cleanup_old_logs(dir);
}

fn is_archive(name: &str) -> bool {
    name.strip_suffix(".log")
        .is_some_and(|stem| NaiveDateTime::parse_from_str(stem, ARCHIVE_FORMAT).is_ok())
}

fn cleanup_old_logs(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archives: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.file_name().and_then(|n| n.to_str()).is_some_and(is_archive))
        .collect();

    // Timestamped names sort oldest first
    archives.sort();

    let excess = archives.len().saturating_sub(MAX_OLD_LOGS);
    for path in &archives[..excess] {
        let _ = fs::remove_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn rotation_leaves_foreign_logs_alone() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..30 {
            fs::write(dir.path().join(format!("user-build-{i:02}.log")), "").unwrap();
        }

        rotate_logs(dir.path());

        assert_eq!(names(dir.path()).len(), 30);
    }

    #[test]
    fn rotation_keeps_newest_archives() {
        let dir = tempfile::tempdir().unwrap();
        for day in 1..=28 {
            fs::write(dir.path().join(format!("202401{day:02}_120000.log")), "").unwrap();
        }
        fs::write(dir.path().join(LATEST_LOG), "previous run").unwrap();

        rotate_logs(dir.path());

        let left = names(dir.path());
        assert_eq!(left.len(), MAX_OLD_LOGS);
        assert!(!left.contains(&LATEST_LOG.to_string()));
        assert!(!left.contains(&"20240104_120000.log".to_string()));
        assert!(left.contains(&"20240105_120000.log".to_string()));
    }

    #[test]
    fn archive_names_are_recognised() {
        assert!(is_archive("20240131_235959.log"));
        assert!(!is_archive(LATEST_LOG));
        assert!(!is_archive("20240131_235959.txt"));
        assert!(!is_archive("build.log"));
    }
}
