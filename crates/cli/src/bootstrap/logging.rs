use querylog_domain::config::LogFormat;
use querylog_domain::Config;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber on stderr so stdout carries command output.
///
/// Priority: `RUST_LOG` > `--log-level` > `[logging] level` > `info`. The
/// CLI flag has already been folded into the config at this point.
pub fn init_logging(config: &Config) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        level = %config.logging.level,
        format = ?config.logging.format,
        "Logging initialised"
    );
}
