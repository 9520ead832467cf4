//! Prometheus backend for the server-market price exporter.
//!
//! [`PriceCollector`] renders every live offer in an
//! [`market_registry::OfferRegistry`] as one labeled gauge sample and owns
//! the tombstone-flush handshake: a scrape first deletes the samples of
//! offers that disappeared from the market, then tells the registry those
//! ids are safe to forget. Scraping therefore mutates registry state; this
//! is a contract, not an accident — metric deletion must happen before an
//! id can be forgotten, and it must happen exactly once.
//!
//! ## HTTP server
//! This crate does NOT provide an HTTP server for the `/metrics` endpoint.
//! Register the collector in a [`Registry`] and expose it with your
//! application's HTTP framework:
//!
//! ```rust,ignore
//! // Example with axum
//! async fn metrics_handler(State(registry): State<prometheus::Registry>) -> Response {
//!     let families = registry.gather();
//!     let encoder = prometheus::TextEncoder::new();
//!     let mut buffer = vec![];
//!     encoder.encode(&families, &mut buffer).unwrap();
//!     Response::builder()
//!         .header("Content-Type", encoder.format_type())
//!         .body(buffer.into())
//!         .unwrap()
//! }
//! ```

mod collector;
pub use collector::{METRIC_HELP, METRIC_NAME, METRIC_NAMESPACE, METRIC_SUBSYSTEM, PriceCollector};

pub use prometheus::{Encoder, Registry, TextEncoder};
