//! File sink - line-oriented persistence with rotation support
//!
//! Writes one formatted line per entry to an append-mode file. The sink is
//! always in exactly one of two states:
//!
//! - **Open**: a live file handle; entries are formatted and appended.
//! - **Closed**: no handle; entries queue in memory and never touch the
//!   filesystem (e.g. while the rotation manager is renaming the file).
//!
//! Reopening replays the queued entries in order before any new write
//! enters the stream, so rotation never reorders or drops entries.
//!
//! # Example
//!
//! ```ignore
//! let config = FileSinkConfig::default()
//!     .with_directory("/var/log/app")
//!     .with_rotate(RotatePolicy::OnSize)
//!     .with_max_file_size_mb(50);
//!
//! let sink = FileSink::new(config, format_plain, &rotator, &lifecycle)?;
//! sink.add_entry(entry);
//! ```

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use timber_core::{EntryFormatter, Lifecycle, LogEntry, Sink};

use crate::common::SinkError;
use crate::rotation::{RotationClient, Rotator};

/// File rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotatePolicy {
    /// Never rotate; the file grows unbounded
    #[default]
    Never,
    /// Rotate when the file exceeds `max_file_size_mb`
    OnSize,
}

/// Configuration for the file sink
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    /// Output directory, created if absent (default: `"logs"`)
    pub directory: PathBuf,

    /// File name including extension (default: `"logfile.log"`)
    pub file_name: String,

    /// Rotation policy (default: `Never`)
    pub rotate: RotatePolicy,

    /// Size threshold for `OnSize` rotation, in MiB (default: 100)
    pub max_file_size_mb: u64,

    /// Gzip the rotated file and delete the uncompressed copy
    /// (default: false)
    pub gzip_after_rotate: bool,

    /// Delete a pre-existing same-named file on construction
    /// (default: false)
    pub clear_on_start: bool,
}

impl Default for FileSinkConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            file_name: "logfile.log".into(),
            rotate: RotatePolicy::Never,
            max_file_size_mb: 100,
            gzip_after_rotate: false,
            clear_on_start: false,
        }
    }
}

impl FileSinkConfig {
    /// Set the output directory
    #[must_use]
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    /// Set the file name
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Set the rotation policy
    #[must_use]
    pub fn with_rotate(mut self, rotate: RotatePolicy) -> Self {
        self.rotate = rotate;
        self
    }

    /// Set the size threshold for `OnSize` rotation
    #[must_use]
    pub fn with_max_file_size_mb(mut self, mb: u64) -> Self {
        self.max_file_size_mb = mb;
        self
    }

    /// Enable gzip compression of rotated files
    #[must_use]
    pub fn with_gzip_after_rotate(mut self, enabled: bool) -> Self {
        self.gzip_after_rotate = enabled;
        self
    }

    /// Delete a pre-existing file on construction
    #[must_use]
    pub fn with_clear_on_start(mut self, enabled: bool) -> Self {
        self.clear_on_start = enabled;
        self
    }
}

/// Open/closed state - a handle or a queue, never both
enum FileState {
    Open(File),
    Closed(Vec<LogEntry>),
}

/// Sink that appends formatted entries to a file
pub struct FileSink {
    path: PathBuf,
    config: FileSinkConfig,
    formatter: EntryFormatter,
    state: Mutex<FileState>,
}

impl FileSink {
    /// Create a file sink and open its file
    ///
    /// Creates the directory, resolves it to an absolute path, optionally
    /// unlinks a pre-existing file, and opens an append-mode handle. With
    /// `rotate == OnSize` the sink registers itself with `rotator`. An
    /// exit hook drains and closes the sink once pending deliveries have
    /// been flushed.
    pub fn new(
        config: FileSinkConfig,
        formatter: EntryFormatter,
        rotator: &Arc<Rotator>,
        lifecycle: &Lifecycle,
    ) -> Result<Arc<Self>, SinkError> {
        std::fs::create_dir_all(&config.directory)
            .map_err(|e| SinkError::create_dir(config.directory.display().to_string(), e))?;
        let directory = config.directory.canonicalize()?;
        let path = directory.join(&config.file_name);

        if config.clear_on_start {
            // A missing file is fine
            let _ = std::fs::remove_file(&path);
        }

        let file = open_append(&path)?;

        let sink = Arc::new(Self {
            path,
            config,
            formatter,
            state: Mutex::new(FileState::Open(file)),
        });

        if sink.config.rotate == RotatePolicy::OnSize {
            rotator.register(sink.clone());
        }

        // Closing happens in the exited phase, after the exiting phase
        // has flushed upstream delay buffers into this sink.
        let close_ref = Arc::downgrade(&sink);
        lifecycle.on_exited(move || {
            if let Some(sink) = close_ref.upgrade() {
                sink.drain_and_close();
            }
        });

        Ok(sink)
    }

    /// Path of the actively written file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the sink currently holds a live handle
    pub fn is_open(&self) -> bool {
        matches!(*self.state.lock(), FileState::Open(_))
    }

    /// Number of entries queued while closed
    pub fn buffered(&self) -> usize {
        match *self.state.lock() {
            FileState::Closed(ref buffer) => buffer.len(),
            FileState::Open(_) => 0,
        }
    }

    /// Close the handle; subsequent entries queue in memory
    pub fn close(&self) {
        let mut state = self.state.lock();
        if let FileState::Open(ref mut file) = *state {
            if let Err(e) = file.flush() {
                tracing::warn!(path = %self.path.display(), error = %e, "flush on close failed");
            }
            *state = FileState::Closed(Vec::new());
        }
    }

    /// Reopen the file and replay entries queued while closed
    ///
    /// The replay happens under the same lock acquisition that installs
    /// the open state, so a live write can never slip between a queued
    /// entry and the reopen.
    pub fn reopen(&self) {
        let mut state = self.state.lock();
        let buffered = match *state {
            FileState::Closed(ref mut buffer) => std::mem::take(buffer),
            FileState::Open(_) => return,
        };

        let mut file = match open_append(&self.path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "reopen failed, keeping entries queued");
                *state = FileState::Closed(buffered);
                return;
            }
        };

        for entry in &buffered {
            write_line(&mut file, self.formatter, entry, &self.path);
        }
        *state = FileState::Open(file);
    }

    /// Exit-time close: drain any queued entries first
    ///
    /// A sink closed at exit time (e.g. rotation was interrupted) still
    /// holds queued entries; they are replayed into a fresh handle before
    /// the final close so nothing is silently dropped at shutdown.
    fn drain_and_close(&self) {
        if !self.is_open() {
            self.reopen();
        }
        self.close();
    }
}

impl Sink for FileSink {
    fn add_entry(&self, entry: LogEntry) {
        let mut state = self.state.lock();
        match *state {
            FileState::Open(ref mut file) => {
                write_line(file, self.formatter, &entry, &self.path);
            }
            FileState::Closed(ref mut buffer) => buffer.push(entry),
        }
    }
}

#[async_trait]
impl RotationClient for FileSink {
    fn flush(&self) {
        self.close();
    }

    async fn before_rotate(&self) {
        // Already closed (an earlier rotation attempt failed mid-way):
        // nothing to release.
        self.close();
    }

    fn after_rotate(&self) {
        self.reopen();
    }

    fn max_file_size_mb(&self) -> u64 {
        self.config.max_file_size_mb
    }

    fn file_path(&self) -> PathBuf {
        self.path.clone()
    }

    fn gzip_after_rotate(&self) -> bool {
        self.config.gzip_after_rotate
    }
}

/// Open a file for appending, creating it if absent
fn open_append(path: &Path) -> std::io::Result<File> {
    File::options().create(true).append(true).open(path)
}

/// Format and append one line; failures are reported, not propagated
///
/// Reporting goes through `tracing`, never back into the sink chain - an
/// error while writing a log line must not produce another log line
/// through the same failing sink.
fn write_line(file: &mut File, formatter: EntryFormatter, entry: &LogEntry, path: &Path) {
    let mut line = formatter(entry);
    line.push('\n');
    if let Err(e) = file.write_all(line.as_bytes()) {
        tracing::warn!(path = %path.display(), error = %e, "log write failed, entry lost");
    }
}
