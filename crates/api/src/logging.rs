//! Logging setup

use crate::config::LoggingSettings;
use anyhow::Context;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize logging to stdout and, when configured, an appended log file.
///
/// Must be called once per process.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    let level: LevelFilter = settings
        .level
        .parse()
        .with_context(|| format!("invalid log level {:?}", settings.level))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    if settings.json {
        layers.push(fmt::layer().json().with_target(true).boxed());
    } else {
        layers.push(fmt::layer().with_target(true).boxed());
    }

    if let Some(path) = settings.file.as_ref().filter(|p| !p.as_os_str().is_empty()) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        layers.push(
            fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file))
                .boxed(),
        );
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(level)
        .try_init()
        .context("failed to set tracing subscriber")?;

    Ok(())
}
