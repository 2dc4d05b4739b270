//! Module implementing logging for the application.
//!
//! This includes setting up log filtering given a verbosity value,
//! as well as defining how the logs are being formatted to stderr.

use std::env;
use std::io::{self, Write};

use ansi_term::{Colour, Style};
use log::SetLoggerError;
use slog::{self, Drain, FilterLevel, Level, Logger, OwnedKVList, Record};
use slog_envlogger::LogBuilder;


// Default logging level defined using the two enums used by slog.
// Both values must correspond to the same level. (This is checked by a test).
const DEFAULT_LEVEL: Level = Level::Info;
const DEFAULT_FILTER_LEVEL: FilterLevel = FilterLevel::Info;

// Arrays of log levels, indexed by verbosity.
const POSITIVE_VERBOSITY_LEVELS: &[FilterLevel] = &[
    DEFAULT_FILTER_LEVEL,
    FilterLevel::Debug,
    FilterLevel::Trace,
];
const NEGATIVE_VERBOSITY_LEVELS: &[FilterLevel] = &[
    DEFAULT_FILTER_LEVEL,
    FilterLevel::Warning,
    FilterLevel::Error,
    FilterLevel::Critical,
    FilterLevel::Off,
];


/// Initialize logging with given verbosity.
/// The verbosity value has the same meaning as in args::Options::verbosity.
pub fn init(verbosity: isize) -> Result<(), SetLoggerError> {
    let istty = isatty::stderr_isatty();
    let stderr = ColoredStderr{colors: istty};

    // Initialize the logger, possibly also incorporating the RUST_LOG env variable.
    let level = filter_level(verbosity);
    let mut builder = LogBuilder::new(stderr).filter(None, level);
    if let Ok(spec) = env::var("RUST_LOG") {
        builder = builder.parse(&spec);
    }
    let drain = std::sync::Mutex::new(builder.build()).fuse();

    let logger = Logger::root(drain, slog::o!());
    slog_scope::set_global_logger(logger).cancel_reset();
    slog_stdlog::init()?;

    if verbosity >= POSITIVE_VERBOSITY_LEVELS.len() as isize {
        warn!("-v/--verbose flag has been passed too many times, extra ones will be ignored");
    }
    if -verbosity >= NEGATIVE_VERBOSITY_LEVELS.len() as isize {
        warn!("-q/--quiet flag has been passed too many times, extra ones will be ignored");
    }
    Ok(())
}

/// Logging filter level that corresponds to given verbosity.
fn filter_level(verbosity: isize) -> FilterLevel {
    if verbosity >= 0 {
        let i = (verbosity as usize).min(POSITIVE_VERBOSITY_LEVELS.len() - 1);
        POSITIVE_VERBOSITY_LEVELS[i]
    } else {
        let i = (-verbosity as usize).min(NEGATIVE_VERBOSITY_LEVELS.len() - 1);
        NEGATIVE_VERBOSITY_LEVELS[i]
    }
}


/// Drain writing log records to standard error, one per line,
/// optionally colored according to their level.
struct ColoredStderr {
    colors: bool,
}

impl Drain for ColoredStderr {
    type Ok = ();
    type Err = io::Error;

    fn log(&self, record: &Record, _: &OwnedKVList) -> io::Result<()> {
        let level = format!("{:>5}", record.level().as_short_str());
        let (level, module) = if self.colors {
            let level_style = match record.level() {
                Level::Critical | Level::Error => Colour::Red.bold(),
                Level::Warning => Colour::Yellow.normal(),
                Level::Info => Colour::Green.normal(),
                Level::Debug => Colour::Blue.normal(),
                Level::Trace => Style::new().dimmed(),
            };
            (level_style.paint(level).to_string(),
             Colour::Fixed(242).paint(record.module()).to_string())
        } else {
            (level, record.module().to_owned())
        };

        let stderr = io::stderr();
        let mut out = stderr.lock();
        writeln!(out, "{} {}: {}", level, module, record.msg())
    }
}
