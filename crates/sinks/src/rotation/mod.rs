//! Rotation manager - size-triggered file rotation
//!
//! A process-scoped registry of rotation clients polled by one shared
//! timer task. When a client's file exceeds its size threshold the
//! manager runs the rotation sequence:
//!
//! ```text
//! before_rotate().await   close the handle, wait until released
//! rename                  logfile.log -> logfile_20250115-103045.log
//! after_rotate()          reopen fresh, replay entries queued meanwhile
//! gzip (optional)         logfile_20250115-103045.log.gz, unlink source
//! ```
//!
//! Each client's check runs as its own task per tick: one failing or
//! panicking client never blocks the others. A file that does not exist
//! yet is not an error - the sink simply has not been written to. Any
//! other failure abandons that client's tick; the next poll retries.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tokio::task::JoinSet;

use timber_core::Lifecycle;

/// Interval between size-check polls
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Rotation-facing capability of a file sink
///
/// Registered once per sink with size rotation enabled; the registry
/// never removes entries (bounded by sink count, which is fine for this
/// domain).
#[async_trait]
pub trait RotationClient: Send + Sync {
    /// Close the handle for process exit or hot reload
    fn flush(&self);

    /// Stop writing and release the file handle
    ///
    /// Resolves only once the handle is fully flushed and released, so
    /// the caller can safely rename the file. Must return immediately if
    /// the sink is already closed.
    async fn before_rotate(&self);

    /// The file has been renamed away; reopen at the original path
    fn after_rotate(&self);

    /// Size threshold in MiB
    fn max_file_size_mb(&self) -> u64;

    /// Path of the actively written file
    fn file_path(&self) -> PathBuf;

    /// Whether the rotated file should be gzipped
    fn gzip_after_rotate(&self) -> bool;
}

/// Process-scoped rotation manager
///
/// Owns the client registry and the shared poll task. The poll task is
/// spawned lazily on the first registration, exactly once.
pub struct Rotator {
    clients: Mutex<Vec<Arc<dyn RotationClient>>>,
    started: AtomicBool,
    hot_reload: AtomicBool,
    weak: Weak<Rotator>,
}

impl Rotator {
    /// Create a rotation manager wired to the process lifecycle
    ///
    /// On exit every registered client is flushed before teardown; on hot
    /// reload the poll loop stops rescheduling (the process is about to
    /// be replaced) and a final flush runs instead.
    pub fn new(lifecycle: &Lifecycle) -> Arc<Self> {
        let rotator = Arc::new_cyclic(|weak| Self {
            clients: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
            hot_reload: AtomicBool::new(false),
            weak: weak.clone(),
        });

        let exit_ref = Arc::downgrade(&rotator);
        lifecycle.on_exiting(move || {
            if let Some(rotator) = exit_ref.upgrade() {
                rotator.flush_all();
            }
        });

        let reload_ref = Arc::downgrade(&rotator);
        lifecycle.on_hot_reload(move || {
            if let Some(rotator) = reload_ref.upgrade() {
                rotator.hot_reload.store(true, Ordering::SeqCst);
                rotator.flush_all();
            }
        });

        rotator
    }

    /// Register a client; starts the shared poll task on first call
    ///
    /// Must be called from within a tokio runtime.
    pub fn register(&self, client: Arc<dyn RotationClient>) {
        self.clients.lock().push(client);

        if !self.started.swap(true, Ordering::SeqCst) {
            let weak = self.weak.clone();
            tokio::spawn(async move {
                // First check one interval after registration: a freshly
                // registered sink has nothing worth rotating yet.
                let start = tokio::time::Instant::now() + POLL_INTERVAL;
                let mut ticker = tokio::time::interval_at(start, POLL_INTERVAL);
                loop {
                    ticker.tick().await;
                    let Some(rotator) = weak.upgrade() else { break };
                    if rotator.hot_reload.load(Ordering::SeqCst) {
                        break;
                    }
                    rotator.check_all().await;
                }
            });
        }
    }

    /// Number of registered clients
    pub fn client_count(&self) -> usize {
        self.clients.lock().len()
    }

    /// Close every registered client's handle
    pub fn flush_all(&self) {
        for client in self.clients.lock().iter() {
            client.flush();
        }
    }

    /// Run one poll tick: check every client, rotating where needed
    ///
    /// Clients are checked concurrently and in isolation; a panic in one
    /// check is contained to its task.
    pub async fn check_all(&self) {
        let clients = self.clients.lock().clone();

        let mut checks = JoinSet::new();
        for client in clients {
            checks.spawn(check_client(client));
        }
        while let Some(result) = checks.join_next().await {
            if let Err(e) = result {
                tracing::error!(error = %e, "rotation check task failed");
            }
        }
    }
}

/// Check one client and rotate its file if oversized
async fn check_client(client: Arc<dyn RotationClient>) {
    let path = client.file_path();

    let metadata = match tokio::fs::metadata(&path).await {
        Ok(metadata) => metadata,
        // Not created yet - the sink has never been written to
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "rotation size check failed");
            return;
        }
    };

    let size_mb = metadata.len() as f64 / BYTES_PER_MB;
    if size_mb <= client.max_file_size_mb() as f64 {
        return;
    }

    client.before_rotate().await;

    let rotated = match rename_rotated(&path).await {
        Ok(rotated) => rotated,
        Err(e) => {
            // The sink stays closed and keeps queueing; the next poll
            // tick retries the whole sequence.
            tracing::error!(path = %path.display(), error = %e, "rotation rename failed");
            return;
        }
    };

    client.after_rotate();

    if client.gzip_after_rotate() {
        match gzip_file(rotated.clone()).await {
            Ok(()) => {
                if let Err(e) = tokio::fs::remove_file(&rotated).await {
                    tracing::warn!(path = %rotated.display(), error = %e, "failed to remove rotated file after gzip");
                }
            }
            Err(e) => {
                // Keep the uncompressed rotated file
                tracing::warn!(path = %rotated.display(), error = %e, "gzip of rotated file failed");
            }
        }
    }
}

/// Rename `logfile.log` to `logfile_{YYYYMMDD-HHMMSS}.log` (UTC)
///
/// Timestamp collisions are not deduplicated; two rotations of the same
/// file within one second would collide, which the 5 s poll cadence
/// cannot produce.
async fn rename_rotated(path: &Path) -> std::io::Result<PathBuf> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("logfile");
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();

    let timestamp = Utc::now().format("%Y%m%d-%H%M%S");
    let rotated_name = format!("{}_{}{}", stem, timestamp, extension);
    let rotated = path.with_file_name(rotated_name);

    tokio::fs::rename(path, &rotated).await?;
    Ok(rotated)
}

/// Compress `path` to `path.gz`
///
/// flate2 is synchronous, so the compress-and-copy runs on the blocking
/// pool.
async fn gzip_file(path: PathBuf) -> std::io::Result<()> {
    tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let mut input = std::fs::File::open(&path)?;
        let output = std::fs::File::create(gz_path(&path))?;
        let mut encoder = flate2::write::GzEncoder::new(output, flate2::Compression::default());
        std::io::copy(&mut input, &mut encoder)?;
        encoder.finish()?;
        Ok(())
    })
    .await
    .map_err(|e| std::io::Error::other(e.to_string()))?
}

/// `logfile_20250115-103045.log` -> `logfile_20250115-103045.log.gz`
fn gz_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".gz");
    PathBuf::from(name)
}
