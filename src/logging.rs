//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, fmt};

/// Where log output may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Line-oriented subcommands: stderr, `warn` unless `RUST_LOG` says otherwise.
    Stderr,
    /// The TUI owns the terminal: only log when `RUST_LOG` is set explicitly.
    Quiet,
}

/// Initialize logging. Safe to call more than once (later calls are no-ops).
pub fn init(target: LogTarget) {
    let filter = match (target, EnvFilter::try_from_default_env()) {
        (_, Ok(filter)) => filter,
        (LogTarget::Stderr, Err(_)) => EnvFilter::new("warn,reclaim_model=warn"),
        (LogTarget::Quiet, Err(_)) => return,
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
