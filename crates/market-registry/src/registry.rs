use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, RwLock},
};

use tracing::debug;

use market_model::{Offer, OfferId};

/// In-memory registry of server-market offers.
///
/// Single source of truth for which offers currently exist (`live`) and
/// which just stopped existing (`tombstoned`). The refresher mutates it on
/// every poll cycle; the price collector reads it on every scrape and
/// flushes tombstones after deleting their samples.
///
/// An id lives in at most one of the two sets at any time. Offers are
/// immutable once inserted: attribute or price changes for a known id are
/// ignored until the offer disappears and is re-admitted as a new one.
#[derive(Clone)]
pub struct OfferRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

struct RegistryInner {
    /// Offers currently believed to be on the market.
    live: HashMap<OfferId, Offer>,
    /// Offers missing from the latest poll, pending one final sample
    /// deletion on the next scrape.
    tombstoned: HashMap<OfferId, Offer>,
}

impl OfferRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                live: HashMap::new(),
                tombstoned: HashMap::new(),
            })),
        }
    }

    /// Insert `offer` into the live set unless its id is already known.
    ///
    /// First-seen wins: a second upsert for the same id is a no-op even when
    /// the attributes differ. An id still pending tombstone flush is also
    /// left alone; it becomes insertable again once the flush has happened.
    pub fn upsert_if_absent(&self, offer: Offer) {
        let mut inner = self.inner.write().unwrap();

        if inner.live.contains_key(&offer.id) || inner.tombstoned.contains_key(&offer.id) {
            return;
        }
        inner.live.insert(offer.id, offer);
    }

    /// Move every live id absent from `current_ids` into the tombstoned set.
    ///
    /// Ids in `current_ids` that the registry has never seen are not
    /// inserted here; that is the caller's job via [`Self::upsert_if_absent`].
    pub fn reconcile(&self, current_ids: &HashSet<OfferId>) {
        let mut inner = self.inner.write().unwrap();

        let gone: Vec<OfferId> = inner
            .live
            .keys()
            .filter(|id| !current_ids.contains(id))
            .copied()
            .collect();

        for id in gone {
            if let Some(offer) = inner.live.remove(&id) {
                debug!("offer {} disappeared from the market", id);
                inner.tombstoned.insert(id, offer);
            }
        }
    }

    /// Snapshot of the live set.
    ///
    /// The lock is held only for the copy; callers iterate without it.
    pub fn snapshot_live(&self) -> Vec<Offer> {
        let inner = self.inner.read().unwrap();
        inner.live.values().cloned().collect()
    }

    /// Snapshot of the offers pending flush.
    pub fn snapshot_tombstoned(&self) -> Vec<Offer> {
        let inner = self.inner.read().unwrap();
        inner.tombstoned.values().cloned().collect()
    }

    /// Permanently forget a tombstoned id.
    ///
    /// Must only be called after the corresponding metric sample has been
    /// deleted; the collector owns that ordering.
    pub fn flush_tombstone(&self, id: OfferId) {
        let mut inner = self.inner.write().unwrap();
        inner.tombstoned.remove(&id);
    }
}

impl Default for OfferRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(id: OfferId, price_vat: &str) -> Offer {
        Offer {
            id,
            name: format!("SB{}", id),
            description: vec![],
            traffic: "unlimited".to_string(),
            dist: vec![],
            arch: vec![64],
            lang: vec!["en".to_string()],
            cpu: "test-cpu".to_string(),
            cpu_benchmark: 1000,
            memory_size: 32,
            hdd_size: 512,
            hdd_text: "1x SSD".to_string(),
            hdd_count: 1,
            datacenter: "FSN1-DC1".to_string(),
            network_speed: "1 Gbit/s".to_string(),
            price: price_vat.to_string(),
            price_setup: "0.00".to_string(),
            price_vat: price_vat.to_string(),
            price_setup_vat: "0.00".to_string(),
            fixed_price: false,
        }
    }

    fn ids(values: &[OfferId]) -> HashSet<OfferId> {
        values.iter().copied().collect()
    }

    #[test]
    fn upsert_inserts_unknown_offer() {
        let registry = OfferRegistry::new();

        registry.upsert_if_absent(offer(1, "12.50"));

        let live = registry.snapshot_live();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, 1);
    }

    #[test]
    fn upsert_is_first_seen_wins() {
        let registry = OfferRegistry::new();

        registry.upsert_if_absent(offer(1, "12.50"));
        registry.upsert_if_absent(offer(1, "99.99"));

        let live = registry.snapshot_live();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].price_vat, "12.50");
    }

    #[test]
    fn reconcile_tombstones_missing_ids() {
        let registry = OfferRegistry::new();
        registry.upsert_if_absent(offer(1, "10.00"));
        registry.upsert_if_absent(offer(2, "20.00"));
        registry.upsert_if_absent(offer(3, "30.00"));

        registry.reconcile(&ids(&[2, 3, 4]));

        let mut live: Vec<OfferId> = registry.snapshot_live().iter().map(|o| o.id).collect();
        live.sort_unstable();
        assert_eq!(live, vec![2, 3]);

        let tombstoned: Vec<OfferId> = registry
            .snapshot_tombstoned()
            .iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(tombstoned, vec![1]);
    }

    #[test]
    fn reconcile_never_inserts_new_ids() {
        let registry = OfferRegistry::new();
        registry.upsert_if_absent(offer(1, "10.00"));

        registry.reconcile(&ids(&[1, 4]));

        assert_eq!(registry.snapshot_live().len(), 1);
        assert!(registry.snapshot_tombstoned().is_empty());
    }

    #[test]
    fn flush_forgets_tombstoned_id() {
        let registry = OfferRegistry::new();
        registry.upsert_if_absent(offer(1, "10.00"));
        registry.reconcile(&ids(&[]));
        assert_eq!(registry.snapshot_tombstoned().len(), 1);

        registry.flush_tombstone(1);

        assert!(registry.snapshot_tombstoned().is_empty());
        assert!(registry.snapshot_live().is_empty());
    }

    #[test]
    fn pending_tombstone_is_not_resurrected() {
        let registry = OfferRegistry::new();
        registry.upsert_if_absent(offer(1, "10.00"));
        registry.reconcile(&ids(&[]));

        // Reappears before the scrape flushed it: still owed one deletion.
        registry.upsert_if_absent(offer(1, "10.00"));

        assert!(registry.snapshot_live().is_empty());
        assert_eq!(registry.snapshot_tombstoned().len(), 1);
    }

    #[test]
    fn flushed_id_is_admitted_as_new_offer() {
        let registry = OfferRegistry::new();
        registry.upsert_if_absent(offer(1, "10.00"));
        registry.reconcile(&ids(&[]));
        registry.flush_tombstone(1);

        registry.upsert_if_absent(offer(1, "11.00"));

        let live = registry.snapshot_live();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].price_vat, "11.00");
        assert!(registry.snapshot_tombstoned().is_empty());
    }

    #[test]
    fn snapshots_are_copies() {
        let registry = OfferRegistry::new();
        registry.upsert_if_absent(offer(1, "10.00"));

        let mut snapshot = registry.snapshot_live();
        snapshot.clear();

        assert_eq!(registry.snapshot_live().len(), 1);
    }

    #[test]
    fn clones_share_state() {
        let registry = OfferRegistry::new();
        let handle = registry.clone();

        handle.upsert_if_absent(offer(7, "10.00"));

        assert_eq!(registry.snapshot_live().len(), 1);
    }
}
