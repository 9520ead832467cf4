use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing_subscriber::{EnvFilter, fmt::time::OffsetTime, util::SubscriberInitExt};

use crate::error::ObserveError;
use crate::options::{LogFormat, LogOptions};

/// Install the global tracing subscriber for the exporter.
///
/// Call once, before anything logs. The filter string is validated before
/// anything is installed, so a bad `--log-level` fails startup cleanly; a
/// second call fails because the global dispatcher is already set.
pub fn init_logging(opts: &LogOptions) -> Result<(), ObserveError> {
    let filter = EnvFilter::try_new(&opts.filter)
        .map_err(|e| ObserveError::InvalidFilter(format!("{}: {}", opts.filter, e)))?;

    // RFC3339 stamps in local time, UTC when the offset cannot be
    // determined (multi-threaded init on some platforms).
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(opts.targets)
        .with_timer(OffsetTime::new(offset, Rfc3339));

    let installed = match opts.format {
        LogFormat::Text => {
            let ansi = opts.ansi.unwrap_or_else(|| atty::is(atty::Stream::Stdout));
            builder.with_ansi(ansi).finish().try_init()
        }
        LogFormat::Json => builder.json().with_ansi(false).finish().try_init(),
    };

    installed.map_err(|e| ObserveError::Install(e.to_string()))
}
