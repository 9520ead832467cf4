use std::{fs, path::Path};

use serde::Deserialize;

use crate::errors::RobotError;

/// Robot API credentials.
///
/// Loaded from a JSON file of the shape `{"username": "...", "password": "..."}`.
/// Load failures are fatal at startup; nothing in the exporter can run
/// without a working account.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RobotError> {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(RobotError::MalformedCredentials)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
