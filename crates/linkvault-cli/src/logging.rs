//! Logging setup
//!
//! Logs go to the configured `log_file` when set, otherwise to stderr.
//! `RUST_LOG` overrides the level chosen from `--verbose`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use linkvault_core::Config;

/// Initialise the global subscriber (no-op if one is already set)
pub fn init(config: &Config, verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "linkvault_core={},linkvault_cli={}",
            log_level, log_level
        ))
    });

    let Some(log_path) = config.log_file.as_ref() else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
        return;
    };

    let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
            return;
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();

    debug!("Logging to {:?}", log_path);
}
