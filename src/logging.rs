//! File-based logging
//!
//! The display surface owns the terminal or window, so diagnostics go to a
//! daily rolling file instead of stdout.

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Initialize the logging system.
///
/// Logs are written to `<directory>/<file_prefix>.YYYY-MM-DD`. The level is
/// taken from `RUST_LOG`, falling back to the configured filter. The
/// returned guard flushes pending lines when dropped, so keep it alive for
/// the lifetime of the application.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(&config.directory)
        .with_context(|| format!("creating log directory {}", config.directory.display()))?;

    let file_appender =
        RollingFileAppender::new(Rotation::DAILY, &config.directory, &config.file_prefix);

    // Non-blocking writer so logging never stalls the async runtime
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .context("invalid log filter")?;

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    tracing::info!("Logging initialized - logs written to {}/", config.directory.display());

    Ok(guard)
}

/// Log the start of a catalog request
#[macro_export]
macro_rules! log_catalog_request {
    ($operation:expr, $($field:tt)*) => {
        tracing::debug!(operation = $operation, $($field)*, "Catalog request started");
    };
}

/// Log a catalog request and its result
#[macro_export]
macro_rules! log_catalog_result {
    ($operation:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::debug!(operation = $operation, "Catalog request successful"),
            Err(e) => tracing::error!(operation = $operation, error = %e, "Catalog request failed"),
        }
    };
}
