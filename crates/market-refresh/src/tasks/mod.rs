mod refresh;
pub use refresh::{refresh_once, run};
