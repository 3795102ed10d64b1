use std::{env, error::Error, path::Path};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Environment variable overriding the configured console format.
pub const LOG_FORMAT_ENV: &str = "GAF_LOG_FORMAT";

const LOG_FILE_PREFIX: &str = "gaf";
const DAYS_TO_KEEP: usize = 7;

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
}

/// Console format: `GAF_LOG_FORMAT` if set to `json` or `pretty`, otherwise
/// the configured one.
pub fn resolve_format(config: &LoggingConfig) -> LogFormat {
    match env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => LogFormat::Json,
        Ok("pretty") => LogFormat::Pretty,
        _ => config.format,
    }
}

/// Initialize tracing for the application
///
/// Uses RUST_LOG if set, otherwise the configured level. Console output is
/// pretty or JSON per [`resolve_format`].
///
/// # Errors
/// Returns error if a global subscriber is already installed
pub fn init(config: &LoggingConfig) -> Result<(), Box<dyn Error>> {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    match resolve_format(config) {
        LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Initialize tracing with file output
///
/// Like [`init`], plus a daily rolling `gaf.*.log` file in `log_dir`. Files
/// older than a week are pruned.
///
/// # Errors
/// Returns error if the log directory cannot be created or a global
/// subscriber is already installed
pub fn init_with_file(config: &LoggingConfig, log_dir: &Path) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .max_log_files(DAYS_TO_KEEP)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let registry = tracing_subscriber::registry().with(env_filter(config));

    match resolve_format(config) {
        LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .try_init()?;
        }
        LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(true)
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .try_init()?;
        }
    }

    // The writer thread must outlive every span; the process exits soon after.
    std::mem::forget(guard);

    Ok(())
}
