//! stderr (and optional file) logging for the listener

use std::backtrace::Backtrace;

use colored::{Color, Colorize};
use flexi_logger::{style, DeferredNow, FileSpec, Logger, LoggerHandle, Record};

use crate::cli::LogOptions;

const UNNAMED_MODULE: &str = "<unnamed module>";

/// Start logging to stderr, and to [`LogOptions::log_file`] if requested
///
/// stdout is left for the metadata output.
/// The returned handle has to be kept alive for as long as logging is wanted.
pub fn setup(options: &LogOptions) -> LoggerHandle {
    let mut logger = Logger::try_with_env_or_str("warn")
        .expect("Expected flexi_logger to be able to parse env or string")
        .adaptive_format_for_stderr(flexi_logger::AdaptiveFormat::Custom(
            log_format,
            color_log_format,
        ))
        .panic_if_error_channel_is_broken(false)
        .log_to_stderr();

    if options.log_to_file {
        logger = logger.format_for_files(if options.file_color_log {
            color_log_format
        } else {
            log_format
        });

        let filespec = FileSpec::try_from(&options.log_file)
            .expect("Expected log file path to be a valid file spec");
        logger = logger
            .log_to_file(filespec)
            .append()
            .duplicate_to_stderr(flexi_logger::Duplicate::All);
    }

    let handle = logger
        .start()
        .expect("Expected flexi_logger to be able to start");

    if options.log_to_file {
        info!("Logging to file {}", options.log_file.display());
    }

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let backtrace = Backtrace::capture();
        error!("Panic occured:\n{panic}\n{backtrace}");
        original_hook(panic);
    }));

    handle
}

/// Plain format, used for files and when stderr is not a terminal
///
/// `[2024-05-01T20:15:03.114+0200 WARN icylisterlib::icy]: Closing stream after error: ..`
pub fn log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record<'_>,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{} {} {}]: {}",
        now.format_rfc3339(),
        record.level(),
        record.module_path().unwrap_or(UNNAMED_MODULE),
        &record.args()
    )
}

/// Colored format for terminals, the level is padded to 5 characters
pub fn color_log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record<'_>,
) -> Result<(), std::io::Error> {
    let level = record.level();
    // padding has to happen before painting, the color codes would count as width
    let padded_level = format!("{level:5}");
    write!(
        w,
        "[{} {} {}]: {}",
        now.format_rfc3339().color(Color::BrightBlack),
        style(level).paint(padded_level),
        record.module_path().unwrap_or(UNNAMED_MODULE),
        &record.args()
    )
}
