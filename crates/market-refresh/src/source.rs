use async_trait::async_trait;

use market_model::Offer;

/// Boxed transport error returned by a catalog source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Opaque data source returning the full list of currently offered servers.
///
/// Implementations must be safely callable repeatedly and must not retain
/// state between calls; the refresh loop owns deadline enforcement, so a
/// source only has to perform the plain fetch.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the current catalog, unfiltered.
    async fn fetch_catalog(&self) -> Result<Vec<Offer>, BoxError>;
}
