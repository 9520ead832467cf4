use std::time::Duration;

/// Shortest poll interval that stays under the Robot API rate limit of
/// 500 requests per hour.
pub const MIN_SAFE_INTERVAL: Duration = Duration::from_secs(8);

#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Time between poll cycles.
    pub interval: Duration,
    /// Deadline for a single catalog fetch; expiry counts as a failed cycle.
    pub fetch_timeout: Duration,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(600),
            fetch_timeout: Duration::from_secs(30),
        }
    }
}
