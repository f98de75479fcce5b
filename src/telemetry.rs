use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::{FileLoggingConfig, LogFormat, LogRotation, LoggingConfig};
use crate::paths;

const LOG_FILE_PREFIX: &str = "checklist-sync.log";
const LOG_ENV_VAR: &str = "CKS_LOG";

#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    pub verbosity: u8,
    pub logging: LoggingConfig,
}

impl TelemetryConfig {
    pub fn new(verbosity: u8, logging: LoggingConfig) -> Self {
        Self { verbosity, logging }
    }
}

/// Keeps the non-blocking file writers flushing until dropped.
pub struct TelemetryGuard {
    _guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
}

/// Install the global subscriber. Filter precedence: `CKS_LOG`, then the
/// configured filter, then verbosity.
pub fn init(config: TelemetryConfig) -> TelemetryGuard {
    let filter = build_filter(
        config.verbosity,
        config.logging.filter.as_deref(),
        std::env::var(LOG_ENV_VAR).ok(),
    );

    let mut guards = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.logging.stdout {
        layers.push(build_stdout_layer(config.logging.stdout_format));
    }

    let mut pruned = None;
    let mut file_setup_error = None;
    if config.logging.file.enabled {
        let dir = resolve_log_dir(&config.logging.file);
        match fs::create_dir_all(&dir) {
            Ok(()) => {
                if let Some(max_files) = config.logging.file.max_files {
                    match prune_logs(&dir, LOG_FILE_PREFIX, max_files) {
                        Ok(removed) => pruned = Some(removed),
                        Err(err) => file_setup_error = Some(format!("log pruning failed: {err}")),
                    }
                }
                let (layer, guard) = build_file_layer(&config.logging.file, &dir);
                layers.push(layer);
                guards.push(guard);
            }
            Err(err) => {
                file_setup_error =
                    Some(format!("log dir init failed for {}: {err}", dir.display()));
            }
        }
    }

    // A subscriber may already be installed (tests, embedding apps).
    if Registry::default()
        .with(layers.with_filter(filter))
        .try_init()
        .is_err()
    {
        return TelemetryGuard { _guards: guards };
    }

    if let Some(removed) = pruned
        && removed > 0
    {
        tracing::info!(removed, "pruned old log files");
    }
    if let Some(error) = file_setup_error {
        tracing::warn!("{error}");
    }

    TelemetryGuard { _guards: guards }
}

/// `from_env` is the raw value of `CKS_LOG`, if set.
fn build_filter(verbosity: u8, configured: Option<&str>, from_env: Option<String>) -> EnvFilter {
    if let Some(raw) = from_env
        && !raw.trim().is_empty()
    {
        return EnvFilter::builder()
            .with_default_directive(level_from_verbosity(verbosity).into())
            .parse_lossy(raw);
    }
    EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbosity).into())
        .parse_lossy(configured.unwrap_or_default())
}

fn build_stdout_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Tree => Box::new(
            tracing_tree::HierarchicalLayer::new(2).with_writer(std::io::stderr),
        ),
        LogFormat::Pretty => Box::new(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(std::io::stderr)
                .with_target(true),
        ),
        LogFormat::Compact => Box::new(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false),
        ),
        LogFormat::Json => Box::new(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_current_span(true),
        ),
    }
}

fn build_file_layer(
    config: &FileLoggingConfig,
    dir: &Path,
) -> (
    Box<dyn Layer<Registry> + Send + Sync>,
    tracing_appender::non_blocking::WorkerGuard,
) {
    let rotation = match config.rotation {
        LogRotation::Daily => tracing_appender::rolling::Rotation::DAILY,
        LogRotation::Hourly => tracing_appender::rolling::Rotation::HOURLY,
        LogRotation::Never => tracing_appender::rolling::Rotation::NEVER,
    };
    let appender =
        tracing_appender::rolling::RollingFileAppender::new(rotation, dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Tree => Box::new(
            tracing_tree::HierarchicalLayer::new(2)
                .with_ansi(false)
                .with_writer(writer),
        ),
        LogFormat::Pretty => Box::new(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(writer)
                .with_ansi(false),
        ),
        LogFormat::Compact => Box::new(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(false),
        ),
        LogFormat::Json => Box::new(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true),
        ),
    };
    (layer, guard)
}

fn level_from_verbosity(verbosity: u8) -> tracing::metadata::LevelFilter {
    match verbosity {
        0 => tracing::metadata::LevelFilter::WARN,
        1 => tracing::metadata::LevelFilter::INFO,
        _ => tracing::metadata::LevelFilter::DEBUG,
    }
}

fn resolve_log_dir(config: &FileLoggingConfig) -> PathBuf {
    config.dir.clone().unwrap_or_else(paths::log_dir)
}

/// Remove the oldest log files beyond `max_files`. Returns how many went.
fn prune_logs(dir: &Path, prefix: &str, max_files: usize) -> std::io::Result<usize> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !name.starts_with(prefix) {
            continue;
        }
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        entries.push((modified, path));
    }
    Ok(remove_excess(entries, max_files))
}

fn remove_excess(mut entries: Vec<(SystemTime, PathBuf)>, max_files: usize) -> usize {
    if entries.len() <= max_files {
        return 0;
    }
    entries.sort_by_key(|(modified, _)| *modified);
    let excess = entries.len() - max_files;
    entries
        .drain(..excess)
        .filter(|(_, path)| fs::remove_file(path).is_ok())
        .count()
}
