//! Ready-made sink chains
//!
//! The two wirings almost every application wants, assembled in the
//! right order: an optional delay stage batching bursts, an optional
//! forwarder moving delivery into its own execution context, and a
//! terminal console or file sink.
//!
//! ```text
//! use_file_preset(rt, true, true, config):
//!
//! [Logger] -> [DelaySink] -> [ForwarderSink] ~~> [FileSink + rotation]
//! ```

use std::sync::Arc;

use timber_core::{format_plain, Sink};
use timber_sinks::{ConsoleSink, DelayConfig, DelaySink, FileSinkConfig, ForwarderSink};

use crate::runtime::LogRuntime;

/// Build the console chain: Delay? -> Forwarder? -> Console
pub fn create_console_chain(
    runtime: &LogRuntime,
    use_delay: bool,
    use_forwarder: bool,
) -> Arc<dyn Sink> {
    let terminal: Arc<dyn Sink> = if use_forwarder {
        Arc::new(ForwarderSink::spawn(runtime.lifecycle(), || {
            Arc::new(ConsoleSink::new())
        }))
    } else {
        Arc::new(ConsoleSink::new())
    };

    wrap_delay(runtime, terminal, use_delay)
}

/// Build the file chain: Delay? -> Forwarder? -> File
///
/// With `use_forwarder` the file sink is constructed inside the
/// forwarded context, which owns it from the start. A file sink that
/// cannot be constructed degrades to the console with a warning - the
/// chain always delivers somewhere.
pub fn create_file_chain(
    runtime: &LogRuntime,
    use_delay: bool,
    use_forwarder: bool,
    config: FileSinkConfig,
) -> Arc<dyn Sink> {
    let terminal: Arc<dyn Sink> = if use_forwarder {
        let rotator = runtime.rotator().clone();
        let lifecycle = runtime.lifecycle().clone();
        Arc::new(ForwarderSink::spawn(runtime.lifecycle(), move || {
            make_file_sink(config, &rotator, &lifecycle)
        }))
    } else {
        make_file_sink(config, runtime.rotator(), runtime.lifecycle())
    };

    wrap_delay(runtime, terminal, use_delay)
}

/// Install the console chain as the default sink
pub fn use_console_preset(runtime: &LogRuntime, use_delay: bool, use_forwarder: bool) {
    let chain = create_console_chain(runtime, use_delay, use_forwarder);
    runtime.set_default_sink(chain);
}

/// Install the file chain as the default sink
pub fn use_file_preset(
    runtime: &LogRuntime,
    use_delay: bool,
    use_forwarder: bool,
    config: FileSinkConfig,
) {
    let chain = create_file_chain(runtime, use_delay, use_forwarder, config);
    runtime.set_default_sink(chain);
}

fn wrap_delay(runtime: &LogRuntime, base: Arc<dyn Sink>, use_delay: bool) -> Arc<dyn Sink> {
    if use_delay {
        let delayed: Arc<dyn Sink> =
            DelaySink::new(base, DelayConfig::default(), runtime.lifecycle());
        delayed
    } else {
        base
    }
}

fn make_file_sink(
    config: FileSinkConfig,
    rotator: &Arc<timber_sinks::Rotator>,
    lifecycle: &Arc<timber_core::Lifecycle>,
) -> Arc<dyn Sink> {
    match timber_sinks::FileSink::new(config, format_plain, rotator, lifecycle) {
        Ok(sink) => sink,
        Err(e) => {
            tracing::warn!(error = %e, "file sink unavailable, falling back to console");
            Arc::new(ConsoleSink::new())
        }
    }
}

#[cfg(test)]
#[path = "preset_test.rs"]
mod preset_test;
