use serde::Deserialize;

/// Unique key of a server-market offer.
///
/// Stable across polls for the same physical offering. A numerically reused
/// id after the offer has been forgotten is a new logical offer.
pub type OfferId = u32;

/// Label names of the price gauge, in wire order.
///
/// The schema is fixed at 16 dimensions; [`Offer::label_values`] produces
/// values in exactly this order.
pub const OFFER_LABEL_NAMES: [&str; 16] = [
    "id",
    "name",
    "description",
    "traffic",
    "dist",
    "arch",
    "lang",
    "cpu",
    "cpu_benchmark",
    "memory_size",
    "hdd_size",
    "hdd_text",
    "hdd_count",
    "datacenter",
    "network_speed",
    "fixed_price",
];

/// One priced offer from the Robot server-market catalog.
///
/// Deserialized as-is from the API payload. Prices arrive as decimal strings
/// and are only parsed at export time; the record itself is never mutated
/// once it enters the registry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub name: String,
    #[serde(default)]
    pub description: Vec<String>,
    pub traffic: String,
    #[serde(default)]
    pub dist: Vec<String>,
    #[serde(default)]
    pub arch: Vec<u32>,
    #[serde(default)]
    pub lang: Vec<String>,
    pub cpu: String,
    pub cpu_benchmark: i64,
    pub memory_size: u32,
    pub hdd_size: u32,
    pub hdd_text: String,
    pub hdd_count: u32,
    pub datacenter: String,
    pub network_speed: String,
    /// Net monthly price.
    pub price: String,
    /// Net setup price.
    #[serde(default)]
    pub price_setup: String,
    /// Gross monthly price (VAT included). This is the exported value.
    pub price_vat: String,
    /// Gross setup price (VAT included).
    #[serde(default)]
    pub price_setup_vat: String,
    pub fixed_price: bool,
}

impl Offer {
    /// Render this offer as label values matching [`OFFER_LABEL_NAMES`].
    ///
    /// Multi-valued attributes are joined with `"; "`, numbers are base-10
    /// strings, booleans render as `"true"`/`"false"`.
    pub fn label_values(&self) -> [String; 16] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.description.join("; "),
            self.traffic.clone(),
            self.dist.join("; "),
            join_numbers(&self.arch),
            self.lang.join("; "),
            self.cpu.clone(),
            self.cpu_benchmark.to_string(),
            self.memory_size.to_string(),
            self.hdd_size.to_string(),
            self.hdd_text.clone(),
            self.hdd_count.to_string(),
            self.datacenter.clone(),
            self.network_speed.clone(),
            self.fixed_price.to_string(),
        ]
    }
}

fn join_numbers(values: &[u32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
