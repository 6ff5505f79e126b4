//! Logging setup
//!
//! Builds a `tracing` dispatcher that writes every event twice: to the
//! console and to a persistent log file. The dispatcher is returned rather
//! than installed globally; the caller attaches it to the work it should
//! observe with [`tracing::instrument::WithSubscriber`].

use chrono::Local;
use std::path::Path;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, format::Writer, time::FormatTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// Local wall-clock timestamps, e.g. `2026-10-19 14:03:07,512`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S,%3f"))
    }
}

/// Builds the level filter from CLI verbosity
///
/// `RUST_LOG` takes precedence when it is set and valid.
pub fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if quiet {
        return EnvFilter::new("error");
    }

    match verbose {
        0 => EnvFilter::new("krisha_scout=info,warn"),
        1 => EnvFilter::new("krisha_scout=debug,info"),
        2 => EnvFilter::new("krisha_scout=trace,debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Builds the console + file dispatcher
///
/// The log file is appended to. The returned guard flushes the file writer
/// when dropped and must outlive every event that should reach the file.
pub fn build_dispatch(log_path: &Path, filter: EnvFilter) -> std::io::Result<(Dispatch, WorkerGuard)> {
    let file_name = log_path
        .file_name()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("log path '{}' has no file name", log_path.display()),
            )
        })?
        .to_string_lossy()
        .into_owned();

    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    std::fs::create_dir_all(&directory)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(&directory)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let console_layer = fmt::layer()
        .with_target(false)
        .with_timer(LocalTimer)
        .with_writer(std::io::stdout);

    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_timer(LocalTimer)
        .with_writer(file_writer);

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer);

    Ok((Dispatch::new(subscriber), guard))
}
