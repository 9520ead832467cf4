use thiserror::Error;

#[derive(Debug, Error)]
pub enum RobotError {
    #[error("could not read credentials file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed credentials file: {0}")]
    MalformedCredentials(#[source] serde_json::Error),

    #[error("http request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("robot api returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid robot api response: {0}")]
    InvalidResponse(String),
}
