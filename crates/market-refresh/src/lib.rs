mod tasks;
pub use tasks::{refresh_once, run};

mod config;
pub use config::{MIN_SAFE_INTERVAL, RefreshConfig};

mod source;
pub use source::{BoxError, CatalogSource};

mod errors;
pub use errors::RefreshError;
