//! Retention sweeper - age-based deletion of old log files
//!
//! Rotation keeps the active file bounded; the sweeper keeps the archive
//! directory bounded. An independent hourly task deletes every regular
//! file in the target directory whose modification age exceeds the
//! configured maximum. The directory itself, subdirectories, and files
//! young enough to keep are never touched.

use std::path::{Path, PathBuf};
use std::time::Duration;

const ONE_HOUR: Duration = Duration::from_secs(60 * 60);

/// Start the hourly sweeper for `directory`
///
/// `max_age_hours` is clamped to at least 1. The first sweep runs
/// immediately; subsequent sweeps run every hour. The task never holds
/// the process open - it dies with the runtime.
///
/// Must be called from within a tokio runtime.
pub fn start_sweeper(max_age_hours: u64, directory: impl Into<PathBuf>) {
    let max_age = Duration::from_secs(3600 * max_age_hours.max(1));
    let directory = directory.into();

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(ONE_HOUR);
        loop {
            ticker.tick().await;
            sweep(&directory, max_age).await;
        }
    });
}

/// Delete files in `directory` older than `max_age`, one pass
///
/// A missing path or a non-directory is a silent no-op (the sweeper may
/// start before the first rotation creates the directory). Per-file
/// failures are logged and never abort the rest of the pass.
pub async fn sweep(directory: &Path, max_age: Duration) {
    match tokio::fs::metadata(directory).await {
        Ok(metadata) if metadata.is_dir() => {}
        _ => return,
    }

    let mut entries = match tokio::fs::read_dir(directory).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %directory.display(), error = %e, "retention sweep cannot list directory");
            return;
        }
    };

    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(path = %directory.display(), error = %e, "retention sweep read failed");
                break;
            }
        };

        let path = entry.path();
        let metadata = match entry.metadata().await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot stat old log file");
                continue;
            }
        };

        if !metadata.is_file() {
            continue;
        }

        let age = metadata
            .modified()
            .ok()
            .and_then(|mtime| mtime.elapsed().ok());
        let expired = match age {
            Some(age) => age > max_age,
            // Unreadable mtime (or clock skew): keep the file
            None => false,
        };

        if expired {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                tracing::warn!(path = %path.display(), error = %e, "cannot remove old log file");
            }
        }
    }
}
