//! Tests for the preset chains

use super::*;
use std::time::Duration;
use tempfile::TempDir;
use timber_core::LogLevel;

#[tokio::test]
async fn test_console_preset_installs_default() {
    let runtime = LogRuntime::new();
    assert!(!runtime.default_sink().is_redirected());

    use_console_preset(&runtime, false, false);
    assert!(runtime.default_sink().is_redirected());
}

#[tokio::test]
async fn test_file_preset_end_to_end() {
    let temp = TempDir::new().unwrap();
    let runtime = LogRuntime::new();

    // Entries logged before the preset buffer and replay afterwards
    let log = runtime.root_logger("server", LogLevel::Info);
    log.info("before-wiring");

    use_file_preset(
        &runtime,
        false,
        false,
        FileSinkConfig::default().with_directory(temp.path()),
    );
    log.info("after-wiring");

    runtime.shutdown();

    let contents = std::fs::read_to_string(temp.path().join("logfile.log")).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("before-wiring"));
    assert!(lines[1].contains("after-wiring"));
}

#[tokio::test]
async fn test_file_preset_with_delay_flushes_on_shutdown() {
    let temp = TempDir::new().unwrap();
    let runtime = LogRuntime::new();

    use_file_preset(
        &runtime,
        true,
        false,
        FileSinkConfig::default().with_directory(temp.path()),
    );

    let log = runtime.root_logger("server", LogLevel::Info);
    log.info("delayed");

    // Still inside the 2 s window: nothing on disk yet
    let on_disk = std::fs::read_to_string(temp.path().join("logfile.log")).unwrap_or_default();
    assert!(on_disk.is_empty());

    runtime.shutdown();
    let contents = std::fs::read_to_string(temp.path().join("logfile.log")).unwrap();
    assert!(contents.contains("delayed"));
}

#[tokio::test]
async fn test_file_preset_with_forwarder_delivers_across_contexts() {
    let temp = TempDir::new().unwrap();
    let runtime = LogRuntime::new();

    use_file_preset(
        &runtime,
        false,
        true,
        FileSinkConfig::default().with_directory(temp.path()),
    );

    let log = runtime.root_logger("server", LogLevel::Info);
    log.info("crossed");

    tokio::time::sleep(Duration::from_millis(100)).await;
    let contents = std::fs::read_to_string(temp.path().join("logfile.log")).unwrap();
    assert!(contents.contains("crossed"));
}

#[tokio::test]
async fn test_file_chain_degrades_to_console_on_bad_path() {
    let temp = TempDir::new().unwrap();
    // A file where the directory should be makes create_dir_all fail
    let blocked = temp.path().join("blocked");
    std::fs::write(&blocked, "x").unwrap();

    let runtime = LogRuntime::new();
    let chain = create_file_chain(
        &runtime,
        false,
        false,
        FileSinkConfig::default().with_directory(&blocked),
    );

    // Chain still accepts entries (console fallback)
    chain.add_entry(timber_core::LogEntry::new(
        LogLevel::Info,
        "test",
        Some("degraded".into()),
        None,
    ));
}

#[tokio::test]
async fn test_error_skips_the_delay_window() {
    let temp = TempDir::new().unwrap();
    let runtime = LogRuntime::new();

    use_file_preset(
        &runtime,
        true,
        false,
        FileSinkConfig::default().with_directory(temp.path()),
    );

    let log = runtime.root_logger("server", LogLevel::Info);
    log.info("held");
    log.error("urgent");

    // The error flush carried the held entry with it, synchronously
    let contents = std::fs::read_to_string(temp.path().join("logfile.log")).unwrap();
    assert!(contents.contains("held"));
    assert!(contents.contains("urgent"));
}
