//! Runtime configuration loaded from environment variables.

use crate::term_color::TermColor;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_QUIT_TIMES: usize = 3;
pub const DEFAULT_MESSAGE_SECS: u64 = 5;
pub const DEFAULT_LOG_FILTER: &str = "typeaway=info";

#[derive(Debug, Clone)]
pub struct Config {
    /// How many more times Ctrl-Q must be pressed to quit with unsaved changes.
    pub quit_times: usize,
    /// How long a status message stays on the message bar.
    pub message_timeout: Duration,
    pub color: TermColor,
    /// Log file path. Logs are never written to the terminal since it is the editor screen.
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quit_times: DEFAULT_QUIT_TIMES,
            message_timeout: Duration::from_secs(DEFAULT_MESSAGE_SECS),
            color: TermColor::Only16,
            log_file: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            quit_times: parse_env("TYPEAWAY_QUIT_TIMES").unwrap_or(DEFAULT_QUIT_TIMES),
            message_timeout: Duration::from_secs(
                parse_env("TYPEAWAY_MESSAGE_SECS").unwrap_or(DEFAULT_MESSAGE_SECS),
            ),
            color: TermColor::from_env(),
            log_file: env::var_os("TYPEAWAY_LOG")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            log_filter: env::var("TYPEAWAY_LOG_FILTER")
                .ok()
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}
