use snafu::ResultExt;
use tracing::Subscriber;
use tracing_subscriber::layer::Filter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, prelude::*};

use crate::config::Logging;
use crate::error::{self, Result};

const GDAL_LOG_TARGET: &str = "GDAL";

/// Installs the global tracing subscriber that logs to `STDERR` and routes GDAL's messages into it.
pub fn init_logging(logging_config: &Logging) -> Result<()> {
    let console_filter = EnvFilter::try_new(&logging_config.log_spec).context(error::InvalidLogSpec {
        log_spec: logging_config.log_spec.clone(),
    })?;

    tracing_subscriber::Registry::default()
        .with(console_layer_with_filter(console_filter))
        .try_init()
        .context(error::LoggingAlreadyInitialized)?;

    reroute_gdal_logging();

    Ok(())
}

fn console_layer_with_filter<S, F: Filter<S> + 'static>(filter: F) -> impl Layer<S>
where
    S: Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(filter)
}

/// We install a GDAL error handler that logs all messages with our log macros.
pub fn reroute_gdal_logging() {
    gdal::config::set_error_handler(|error_type, error_num, error_msg| match error_type {
        gdal::errors::CplErrType::None => {
            // should never log anything
            tracing::info!(target: GDAL_LOG_TARGET, "GDAL None {error_num}: {error_msg}");
        }
        gdal::errors::CplErrType::Debug => {
            tracing::debug!(target: GDAL_LOG_TARGET, "GDAL Debug {error_num}: {error_msg}");
        }
        gdal::errors::CplErrType::Warning => {
            tracing::warn!(target: GDAL_LOG_TARGET, "GDAL Warning {error_num}: {error_msg}");
        }
        gdal::errors::CplErrType::Failure => {
            tracing::error!(target: GDAL_LOG_TARGET, "GDAL Failure {error_num}: {error_msg}");
        }
        gdal::errors::CplErrType::Fatal => {
            tracing::error!(target: GDAL_LOG_TARGET, "GDAL Fatal {error_num}: {error_msg}");
        }
    });
}
