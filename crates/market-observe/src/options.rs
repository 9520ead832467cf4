use std::str::FromStr;

use crate::error::ObserveError;

/// Output encoding of the exporter's log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ObserveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ObserveError::UnknownFormat(other.to_string())),
        }
    }
}

/// Settings consumed once at startup by [`crate::init_logging`].
#[derive(Debug, Clone)]
pub struct LogOptions {
    pub format: LogFormat,
    /// Env-filter directives, e.g. `"info"` or `"market_refresh=debug"`.
    pub filter: String,
    /// ANSI colors for text output; `None` means "when stdout is a tty".
    pub ansi: Option<bool>,
    /// Include the emitting module in each line.
    pub targets: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            filter: "info".to_string(),
            ansi: None,
            targets: true,
        }
    }
}
