use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObserveError {
    #[error("unknown log format: {0} (expected text or json)")]
    UnknownFormat(String),

    #[error("invalid log filter directive: {0}")]
    InvalidFilter(String),

    #[error("could not install the global subscriber: {0}")]
    Install(String),
}
