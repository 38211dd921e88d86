use std::path::Path;

use anyhow::Context;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};

use crate::configuration::{LogLevel, LoggingConfig};

const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} - {m}{n}";

/// Installs the global logger: a file appender when `config.file` is set,
/// otherwise a stderr subscriber that also picks up `log` records.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    match &config.file {
        Some(path) => init_file(path, config.level),
        None => tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(config.level)
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}")),
    }
}

fn init_file(path: &Path, level: LogLevel) -> anyhow::Result<()> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(level.into()))?;

    log4rs::init_config(config)?;
    Ok(())
}
