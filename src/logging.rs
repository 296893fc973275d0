//! Logger setup.
//!
//! All records go to stderr, filtered by a configurable threshold. Records for
//! [`AUDIT_TARGET`] are additionally appended to the audit file, if one is configured, at `info`
//! level regardless of that threshold.

use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::filter::threshold::ThresholdFilter;

use crate::AUDIT_TARGET;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} - {t} - {l} - {m}{n}";

const CONSOLE_APPENDER: &str = "console";
const AUDIT_APPENDER: &str = "audit";

/// Build the `log4rs` configuration.
///
/// `console_level` is the minimum level shown on stderr. When `audit_file` is given, every line
/// logged to [`AUDIT_TARGET`] is appended to it.
///
/// # Errors
///
/// Returns an error if the audit file can't be opened, or the configuration is inconsistent.
pub fn config(
    console_level: LevelFilter,
    audit_file: Option<&Path>,
) -> Result<Config, Box<dyn std::error::Error>> {
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let mut builder = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(console_level)))
            .build(CONSOLE_APPENDER, Box::new(console)),
    );

    let mut audit = Logger::builder();
    if let Some(path) = audit_file {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .append(true)
            .build(path)?;
        builder = builder.appender(Appender::builder().build(AUDIT_APPENDER, Box::new(file)));
        audit = audit.appender(AUDIT_APPENDER);
    }

    let config = builder
        .logger(audit.build(AUDIT_TARGET, LevelFilter::Info))
        .build(
            Root::builder()
                .appender(CONSOLE_APPENDER)
                .build(console_level),
        )?;
    Ok(config)
}

/// Install the global logger.
///
/// # Errors
///
/// Returns an error if [`config`] fails, or a logger has already been installed.
pub fn init(
    console_level: LevelFilter,
    audit_file: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    log4rs::init_config(config(console_level, audit_file)?)?;
    Ok(())
}
