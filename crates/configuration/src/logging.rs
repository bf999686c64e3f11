use crate::error::ConfigError;
use crate::settings::Logging;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `logging.level`. When `logging.directory` is set a
/// second, ANSI-free layer writes to a daily rolling file; the returned guard
/// must be held until exit so buffered lines are flushed.
pub fn init_tracing(settings: &Logging) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    let stderr_layer = fmt::layer()
        .with_timer(LocalTime::rfc_3339())
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match &settings.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "sales-dashboard.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    tracing::info!(level = %settings.level, directory = ?settings.directory, "Logging initialised.");
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    // The global subscriber can be installed once per test binary, so this is
    // the only test here that calls `init_tracing` successfully.
    #[test]
    fn file_layer_receives_events() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Logging {
            level: "info".to_string(),
            directory: Some(dir.path().to_path_buf()),
        };

        let guard = init_tracing(&settings).unwrap();
        assert!(guard.is_some());
        drop(guard);

        let logged: String = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
            .collect();
        assert!(logged.contains("Logging initialised."));

        // A second install is refused rather than silently replacing the first.
        let err = init_tracing(&Logging::default()).unwrap_err();
        assert!(matches!(err, ConfigError::LoggingError(_)));
    }
}
