mod client;
pub use client::RobotClient;

mod credentials;
pub use credentials::Credentials;

mod errors;
pub use errors::RobotError;
