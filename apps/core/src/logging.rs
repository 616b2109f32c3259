use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

use crate::config::LogFormat;
use crate::error::AppError;

pub const SERVICE_NAME: &str = "peerverse-core";

/// Used when `RUST_LOG` is unset or unparsable
const DEFAULT_FILTER: &str = "peerverse_core=info,tower_http=info";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` controls verbosity. `LogFormat::Json` emits Bunyan records on stdout,
/// `LogFormat::Pretty` emits plain lines.
pub fn init_logging(format: LogFormat) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = match format {
        LogFormat::Json => {
            let subscriber = Registry::default()
                .with(filter)
                .with(JsonStorageLayer)
                .with(BunyanFormattingLayer::new(
                    SERVICE_NAME.to_string(),
                    std::io::stdout,
                ));
            set_global_default(subscriber)
        }
        LogFormat::Pretty => {
            let subscriber = Registry::default().with(filter).with(fmt::layer());
            set_global_default(subscriber)
        }
    };

    installed.map_err(|e| AppError::Internal(format!("failed to install log subscriber: {}", e)))
}
