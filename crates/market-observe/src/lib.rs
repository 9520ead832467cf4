mod options;
pub use options::{LogFormat, LogOptions};

mod error;
pub use error::ObserveError;

mod setup;
pub use setup::init_logging;
