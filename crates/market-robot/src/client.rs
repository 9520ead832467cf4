use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use market_model::Offer;
use market_refresh::{BoxError, CatalogSource};

use crate::credentials::Credentials;
use crate::errors::RobotError;

const DEFAULT_BASE_URL: &str = "https://robot-ws.your-server.de";

/// HTTP client for the Hetzner Robot webservice.
///
/// Stateless between calls; every request authenticates with basic auth.
pub struct RobotClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

/// The Robot list endpoints wrap each record in a one-field object.
#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    product: Offer,
}

impl RobotClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            credentials,
        }
    }

    /// Fetch the full server-market product list, unfiltered.
    pub async fn list_market_products(&self) -> Result<Vec<Offer>, RobotError> {
        let url = format!("{}/order/server_market/product", self.base_url);
        debug!("fetching server market products");

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RobotError::Status(status));
        }

        let body = response.text().await?;
        let envelopes: Vec<ProductEnvelope> = serde_json::from_str(&body).map_err(|e| {
            RobotError::InvalidResponse(format!(
                "failed to parse product list: {}, body: {}",
                e, body
            ))
        })?;

        Ok(envelopes.into_iter().map(|e| e.product).collect())
    }
}

#[async_trait]
impl CatalogSource for RobotClient {
    async fn fetch_catalog(&self) -> Result<Vec<Offer>, BoxError> {
        self.list_market_products().await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_enveloped_product_list() {
        let body = r#"[
            {"product": {
                "id": 1523075,
                "name": "SB42",
                "description": ["Intel Core i7-6700", "2x SSD SATA 512 GB"],
                "traffic": "unlimited",
                "dist": ["Rescue system"],
                "arch": [64],
                "lang": ["en"],
                "cpu": "Intel Core i7-6700",
                "cpu_benchmark": 8036,
                "memory_size": 64,
                "hdd_size": 512,
                "hdd_text": "2x SSD SATA 512 GB",
                "hdd_count": 2,
                "datacenter": "FSN1-DC5",
                "network_speed": "1 Gbit/s",
                "price": "34.50",
                "price_setup": "0.00",
                "price_vat": "41.06",
                "price_setup_vat": "0.00",
                "fixed_price": false
            }},
            {"product": {
                "id": 2049743,
                "name": "SB36",
                "description": [],
                "traffic": "unlimited",
                "dist": [],
                "arch": [64],
                "lang": ["en"],
                "cpu": "AMD Ryzen 5 3600",
                "cpu_benchmark": 17827,
                "memory_size": 64,
                "hdd_size": 512,
                "hdd_text": "2x SSD M.2 NVMe 512 GB",
                "hdd_count": 2,
                "datacenter": "HEL1-DC4",
                "network_speed": "1 Gbit/s",
                "price": "30.25",
                "price_setup": "0.00",
                "price_vat": "35.99",
                "price_setup_vat": "0.00",
                "fixed_price": true
            }}
        ]"#;

        let envelopes: Vec<ProductEnvelope> = serde_json::from_str(body).unwrap();
        let offers: Vec<Offer> = envelopes.into_iter().map(|e| e.product).collect();

        assert_eq!(offers.len(), 2);
        assert_eq!(offers[0].id, 1_523_075);
        assert_eq!(offers[1].name, "SB36");
        assert!(offers[1].fixed_price);
    }

    #[test]
    fn empty_catalog_decodes_to_empty_list() {
        let envelopes: Vec<ProductEnvelope> = serde_json::from_str("[]").unwrap();
        assert!(envelopes.is_empty());
    }
}
