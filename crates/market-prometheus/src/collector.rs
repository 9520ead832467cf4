use prometheus::core::{Collector, Desc};
use prometheus::{GaugeVec, Opts, proto};
use tracing::{debug, warn};

use market_model::OFFER_LABEL_NAMES;
use market_registry::OfferRegistry;

pub const METRIC_NAMESPACE: &str = "hetzner";
pub const METRIC_SUBSYSTEM: &str = "server_market";
pub const METRIC_NAME: &str = "price";
pub const METRIC_HELP: &str = "Monthly price in euros";

/// Gauge collector over the offer registry.
///
/// One gauge family (`hetzner_server_market_price`) with the fixed 16-label
/// schema, declared once at construction; no package-level registration
/// state. Each [`Collector::collect`] call flushes pending tombstones before
/// rendering the live set, so a removed offer's sample disappears from
/// exactly one scrape onward and the registry forgets the id afterwards.
pub struct PriceCollector {
    offers: OfferRegistry,
    prices: GaugeVec,
}

impl PriceCollector {
    pub fn new(offers: OfferRegistry) -> Result<Self, prometheus::Error> {
        let opts = Opts::new(METRIC_NAME, METRIC_HELP)
            .namespace(METRIC_NAMESPACE)
            .subsystem(METRIC_SUBSYSTEM);
        let prices = GaugeVec::new(opts, &OFFER_LABEL_NAMES)?;

        Ok(Self { offers, prices })
    }
}

impl Collector for PriceCollector {
    fn desc(&self) -> Vec<&Desc> {
        self.prices.desc()
    }

    fn collect(&self) -> Vec<proto::MetricFamily> {
        // Delete samples for offers that left the market, then let the
        // registry forget them. Deletion must come first: once flushed, the
        // label set is gone and the stale sample could never be removed.
        for offer in self.offers.snapshot_tombstoned() {
            let labels = offer.label_values();
            let values: Vec<&str> = labels.iter().map(String::as_str).collect();
            // An offer whose price never parsed has no sample to delete.
            let _ = self.prices.remove_label_values(&values);
            self.offers.flush_tombstone(offer.id);
            debug!("flushed deleted offer {}", offer.id);
        }

        for offer in self.offers.snapshot_live() {
            let price = match offer.price_vat.parse::<f64>() {
                Ok(value) => value,
                Err(e) => {
                    warn!(
                        "could not convert price string [{}] to float: {}",
                        offer.price_vat, e
                    );
                    continue;
                }
            };
            let labels = offer.label_values();
            let values: Vec<&str> = labels.iter().map(String::as_str).collect();
            self.prices.with_label_values(&values).set(price);
        }

        self.prices.collect()
    }
}
