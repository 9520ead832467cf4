use std::time::Duration;

use thiserror::Error;

use crate::source::BoxError;

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("catalog fetch failed: {0}")]
    Fetch(#[source] BoxError),

    #[error("catalog fetch timed out after {0:?}")]
    Timeout(Duration),
}
