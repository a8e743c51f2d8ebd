//! Tracing setup: human-readable output on stderr plus a plain-text log file.

use std::fs;
use std::path::Path;

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};


/// Installs the global tracing subscriber.
///
/// Console output goes to stderr (stdout is reserved for the resolved
/// configuration), file output goes to `log_file_name` inside
/// `log_file_output_directory`, which is created if missing.
///
/// The returned guard flushes the log file when dropped, so keep it
/// alive until the program exits.
pub fn initialize_tracing<P>(
    console_level_filter: EnvFilter,
    log_file_level_filter: EnvFilter,
    log_file_output_directory: P,
    log_file_name: &str,
) -> Result<WorkerGuard>
where
    P: AsRef<Path>,
{
    let log_file_output_directory = log_file_output_directory.as_ref();

    fs::create_dir_all(log_file_output_directory)
        .into_diagnostic()
        .wrap_err_with(|| {
            miette!(
                "Failed to create missing log file directory at {}.",
                log_file_output_directory.display()
            )
        })?;

    let log_file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(log_file_name)
        .build(log_file_output_directory)
        .into_diagnostic()
        .wrap_err("Failed to open log file.")?;

    let (non_blocking_log_file_writer, guard) = tracing_appender::non_blocking(log_file_appender);


    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(console_level_filter);

    let log_file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking_log_file_writer)
        .with_filter(log_file_level_filter);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(log_file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to install tracing subscriber.")?;


    Ok(guard)
}
