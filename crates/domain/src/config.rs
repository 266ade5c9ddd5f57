pub mod errors;
pub mod logging;
pub mod query_log;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use query_log::QueryLogConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
