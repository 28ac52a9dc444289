//! Log file setup.
//!
//! The terminal belongs to the user interface, so log output goes to a file instead.

use std::{fs::File, sync::Mutex};

use color_eyre::eyre::{eyre, Result, WrapErr as _};

use crate::config::Config;

/// Installs the global subscriber writing to the configured log file.
///
/// # Errors
///
/// This function may return errors if:
/// - The log file cannot be created
/// - A global subscriber is already installed
pub fn init(config: &Config) -> Result<()> {
    let file = File::create(&config.log_file)
        .wrap_err_with(|| format!("failed to create log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level)
        .try_init()
        .map_err(|err| eyre!(err))
}
