use std::collections::HashSet;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use market_model::OfferId;
use market_registry::OfferRegistry;

use crate::config::{MIN_SAFE_INTERVAL, RefreshConfig};
use crate::errors::RefreshError;
use crate::source::CatalogSource;

/// Drive the poll-diff cycle until `cancel` fires.
///
/// The first fetch happens immediately, then one per interval tick. A
/// failed cycle is logged and skipped; the loop never terminates on fetch
/// failure.
pub async fn run<S>(
    source: S,
    registry: OfferRegistry,
    config: RefreshConfig,
    cancel: CancellationToken,
) where
    S: CatalogSource,
{
    if config.interval < MIN_SAFE_INTERVAL {
        warn!(
            "refresh interval of {}s risks exceeding the Robot API request limit \
             (500 per hour); minimum safe interval is {}s",
            config.interval.as_secs(),
            MIN_SAFE_INTERVAL.as_secs()
        );
    }
    debug!(
        "fetching the server market every {} seconds",
        config.interval.as_secs()
    );

    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("refresh loop stopped");
                return;
            }
            _ = ticker.tick() => {
                if let Err(e) = refresh_once(&source, &registry, config.fetch_timeout).await {
                    warn!("could not fetch server market products: {}", e);
                }
            }
        }
    }
}

/// Run one fetch-diff cycle against the registry.
///
/// On fetch failure or deadline expiry the registry is left untouched.
/// Upserts for the fetched offers complete before reconcile runs, so an
/// offer is never inserted and tombstoned within the same cycle.
pub async fn refresh_once<S>(
    source: &S,
    registry: &OfferRegistry,
    fetch_timeout: Duration,
) -> Result<(), RefreshError>
where
    S: CatalogSource + ?Sized,
{
    let offers = tokio::time::timeout(fetch_timeout, source.fetch_catalog())
        .await
        .map_err(|_| RefreshError::Timeout(fetch_timeout))?
        .map_err(RefreshError::Fetch)?;

    debug!("found {} products on the server market", offers.len());

    let current_ids: HashSet<OfferId> = offers.iter().map(|o| o.id).collect();
    for offer in offers {
        registry.upsert_if_absent(offer);
    }
    registry.reconcile(&current_ids);

    Ok(())
}
