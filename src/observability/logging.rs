//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Pick pretty or JSON output
//! - Route output through non-blocking writers (stdout, optional rolling file)
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level
//! - Dropping the returned [`LogGuard`] flushes buffered lines

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::{LogFormat, ObservabilityConfig};

const DEFAULT_LOG_TARGETS: &[&str] = &["call_logger", "tower_http"];

/// Keeps the background log writers alive.
///
/// Must be held for the lifetime of the application so buffered lines are
/// written out before shutdown.
#[must_use = "dropping the guard stops the background log writers"]
pub struct LogGuard {
    _guards: Vec<WorkerGuard>,
}

/// Initialize the logging subsystem.
///
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> LogGuard {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.log_level)));

    let mut guards = Vec::new();
    let mut layers = Vec::with_capacity(2);

    let stdout = if config.non_blocking {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);
        BoxMakeWriter::new(writer)
    } else {
        BoxMakeWriter::new(std::io::stdout)
    };
    layers.push(fmt_layer(config.format, stdout, true));

    if let Some(log_dir) = &config.log_dir {
        let appender = tracing_appender::rolling::daily(log_dir, &config.log_file_name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);
        layers.push(fmt_layer(config.format, BoxMakeWriter::new(writer), false));
    }

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global subscriber already set, keeping it");
    }

    LogGuard { _guards: guards }
}

fn fmt_layer<S>(
    format: LogFormat,
    writer: BoxMakeWriter,
    ansi: bool,
) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true);
    match format {
        LogFormat::Pretty => layer.boxed(),
        LogFormat::Json => layer.json().flatten_event(true).boxed(),
    }
}

/// `target=level` for each of this service's log targets.
fn filter_directives(level: &str) -> String {
    let level = level.to_ascii_lowercase();
    DEFAULT_LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        assert_eq!(
            filter_directives("DEBUG"),
            "call_logger=debug,tower_http=debug"
        );
    }

    #[test]
    fn test_directives_parse() {
        assert!(EnvFilter::try_new(filter_directives("info")).is_ok());
    }
}
