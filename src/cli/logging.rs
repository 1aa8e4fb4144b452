//! Module implementing logging for the application.
//!
//! Records from the `log` crate are forwarded to a global `slog` logger
//! which writes them to standard error.

use std::env;
use std::io::{self, Write};
use std::sync::Mutex;

use ansi_term::{Colour, Style};
use isatty;
use log::{self, SetLoggerError};
use slog::{self, Drain, FilterLevel, Level, Logger, OwnedKVList, Record};
use slog_envlogger::LogBuilder;
use slog_scope::{self, GlobalLoggerGuard};
use slog_stdlog;
use time;


// Default logging level defined using the two enums used by slog.
// Both values must correspond to the same level. (This is checked by a test).
const DEFAULT_LEVEL: Level = Level::Warning;
const DEFAULT_FILTER_LEVEL: FilterLevel = FilterLevel::Warning;

// Arrays of log levels, indexed by verbosity.
const POSITIVE_VERBOSITY_LEVELS: &'static [FilterLevel] = &[
    DEFAULT_FILTER_LEVEL,
    FilterLevel::Info,
    FilterLevel::Debug,
    FilterLevel::Trace,
];
const NEGATIVE_VERBOSITY_LEVELS: &'static [FilterLevel] = &[
    DEFAULT_FILTER_LEVEL,
    FilterLevel::Error,
    FilterLevel::Critical,
    FilterLevel::Off,
];

/// Format of the timestamp in log records.
const TIMESTAMP_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";


/// Initialize logging with given verbosity.
/// The verbosity value has the same meaning as in args::Options::verbosity.
///
/// The returned guard has to be kept alive for as long as the logging is needed.
pub fn init(verbosity: isize) -> Result<GlobalLoggerGuard, SetLoggerError> {
    let stderr = Stderr::new(isatty::stderr_isatty());

    // Determine the log filtering level based on verbosity.
    // If the argument is excessive, log that but clamp to the highest/lowest log level.
    let mut verbosity = verbosity;
    let mut excessive = false;
    if verbosity > 0 {
        if verbosity >= POSITIVE_VERBOSITY_LEVELS.len() as isize {
            excessive = true;
            verbosity = POSITIVE_VERBOSITY_LEVELS.len() as isize - 1;
        }
    } else if verbosity < 0 {
        if -verbosity >= NEGATIVE_VERBOSITY_LEVELS.len() as isize {
            excessive = true;
            verbosity = -(NEGATIVE_VERBOSITY_LEVELS.len() as isize - 1);
        }
    }
    let level = if verbosity >= 0 {
        POSITIVE_VERBOSITY_LEVELS[verbosity as usize]
    } else {
        NEGATIVE_VERBOSITY_LEVELS[(-verbosity) as usize]
    };

    // Include universal logger options, like the level.
    let mut builder = LogBuilder::new(stderr);
    builder = builder.filter(None, level);

    // Make some of the libraries less chatty
    // by raising the minimum logging level for them
    // (e.g. Info means that Debug and Trace level logs are filtered).
    let more_verbose = [FilterLevel::Debug, FilterLevel::Trace];
    if more_verbose.contains(&level) {
        builder = builder.filter(Some("rusttype"), FilterLevel::Info);
    }

    // Include any additional config from environmental variables.
    // This will override the options above if necessary,
    // so e.g. it is still possible to get full debug output from rusttype.
    if let Ok(ref conf) = env::var("RUST_LOG") {
        builder = builder.parse(conf);
    }

    // Initialize the logger, possibly logging the excessive verbosity option.
    let drain = Mutex::new(builder.build().ignore_res()).fuse();
    let logger = Logger::root(drain, o!());
    let guard = slog_scope::set_global_logger(logger);
    slog_stdlog::init_with_level(log::Level::Trace)?;
    if excessive {
        warn!("-v/-q flag passed too many times, logging level {:?} assumed", level);
    }
    Ok(guard)
}


/// Drain that writes log records to standard error.
struct Stderr {
    /// Whether to decorate the output with ANSI colors.
    colored: bool,
}

impl Stderr {
    #[inline]
    pub fn new(colored: bool) -> Self {
        Stderr{colored}
    }

    fn format_level(&self, level: Level) -> String {
        let name = level.as_short_str();
        if !self.colored {
            return format!("[{}]", name);
        }
        let style = match level {
            Level::Critical | Level::Error => Colour::Red.bold(),
            Level::Warning => Colour::Yellow.bold(),
            Level::Info => Colour::Green.normal(),
            Level::Debug => Colour::White.normal(),
            Level::Trace => Colour::White.dimmed(),
        };
        format!("[{}]", style.paint(name))
    }

    fn format_module(&self, module: &str) -> String {
        if self.colored {
            format!("{}", Style::new().dimmed().paint(module))
        } else {
            module.to_owned()
        }
    }
}

impl Drain for Stderr {
    type Ok = ();
    type Err = io::Error;

    fn log(&self, record: &Record, _: &OwnedKVList) -> io::Result<()> {
        let now = time::now();
        let timestamp = time::strftime(TIMESTAMP_FORMAT, &now)
            .unwrap_or_else(|_| format!("{}", now.rfc3339()));

        let stderr = io::stderr();
        let mut out = stderr.lock();
        writeln!(out, "{} {} {}: {}", timestamp,
            self.format_level(record.level()),
            self.format_module(record.module()),
            record.msg())
    }
}
