//! The `log` module defines an interface to the generator's internal logging
//! facilities. This is not to be confused with the generated _tables_, which
//! are the data product of a run.
//!
//! This module (re)exports the five logging macros: `error!`, `warn!`,
//! `info!`, `debug!` and `trace!` where `error!` represents the
//! highest-priority log messages and `trace!` the lowest.
//!
//! Logging is _disabled_ by default. Log messages can be enabled by passing
//! the command line option `--log-level <level>`, or from code using:
//!
//!  - `enable_logging()`: turns on all log messages
//!  - `disable_logging()`: turns off all log messages
//!  - `set_log_level(level: LevelFilter)`: enables only log messages with
//!    priority at least `level`

pub use log::{debug, error, info, trace, warn, LevelFilter};

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use std::sync::Mutex;

// Use an ISO 8601 timestamp format and color coded level tag
const DEFAULT_LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

/// A handle to the installed logger, kept so the level filter can be
/// changed after initialization.
static LOG_HANDLE: Mutex<Option<Handle>> = Mutex::new(None);

fn build_config(level: LevelFilter) -> Config {
    let stdout: ConsoleAppender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))
        .expect("failed to build log configuration")
}

/// Sets the global log level. The logger is installed on first use; later
/// calls swap the configuration in place.
pub fn set_log_level(level: LevelFilter) {
    let config = build_config(level);
    let mut handle = LOG_HANDLE.lock().unwrap();
    match handle.as_ref() {
        Some(handle) => handle.set_config(config),
        None => {
            *handle = Some(log4rs::init_config(config).expect("failed to install logger"));
        }
    }
}

/// Enables the logger with no global level filter / full logging. Equivalent
/// to `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Disables all log messages.
pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_level_then_change_it() {
        set_log_level(LevelFilter::Info);
        // The second call takes the reload path.
        set_log_level(LevelFilter::Off);
    }
}
