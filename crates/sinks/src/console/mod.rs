//! Console sink - human-readable stdout output
//!
//! Writes one formatted line per entry to stdout. Not intended for high
//! throughput; wrap it in a `DelaySink` if bursts are a concern.
//!
//! # Example Output
//!
//! ```text
//! error - connection lost        server.http {"peer":"10.0.0.1"}
//! info  - started                app.worker {"pid":42}
//! ```

use owo_colors::{OwoColorize, Style};

use timber_core::{EntryFormatter, LogEntry, LogLevel, Sink};

/// Sink that prints each entry to stdout
pub struct ConsoleSink {
    formatter: EntryFormatter,
}

impl ConsoleSink {
    /// Create a console sink with the default colored formatter
    pub fn new() -> Self {
        Self {
            formatter: format_colored,
        }
    }

    /// Create a console sink with a custom formatter
    pub fn with_formatter(formatter: EntryFormatter) -> Self {
        Self { formatter }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn add_entry(&self, entry: LogEntry) {
        println!("{}", (self.formatter)(&entry));
    }
}

// =============================================================================
// Colored formatter
// =============================================================================

/// Get style for a log level
fn level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::new().red(),
        LogLevel::Warn => Style::new().yellow(),
        LogLevel::Info => Style::new().cyan(),
        LogLevel::Spam => Style::new().dimmed(),
    }
}

/// Colored formatter:
/// `{level} - {title}{logger} {data}`
///
/// The level tag is styled per severity; logger name and payload are
/// dimmed so the title stands out. Output is a single line.
pub fn format_colored(entry: &LogEntry) -> String {
    // Pad before styling: the escape codes would otherwise count
    // against the column width.
    let level = format!("{:<5}", entry.level.as_str().to_lowercase());
    let title = entry.title.as_deref().unwrap_or("");
    let data = entry
        .data
        .as_ref()
        .map(|d| d.to_string())
        .unwrap_or_default();
    let tail = format!("{} {}", entry.logger, data);

    format!(
        "{} - {:<50}{}",
        level.style(level_style(entry.level)),
        title,
        tail.dimmed()
    )
}
