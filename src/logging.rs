use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::AlertError;

const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn";

/// Human-readable logs on stdout plus JSON logs rotated daily under `log_dir`.
/// `RUST_LOG` overrides the default filter.
pub fn init_logging(log_dir: &str) -> Result<(), AlertError> {
    let file_appender = rolling::daily(log_dir, "alertctl.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| AlertError::Config(format!("Failed to initialise logging: {e}")))
}
