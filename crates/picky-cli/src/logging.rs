use tracing::level_filters::LevelFilter;

use crate::cli::LogLevel;

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Install the global subscriber, writing to stderr so stdout only carries
/// command output such as JSON findings or the environment diff.
///
/// Below debug, messages are printed bare so the drift report reads as
/// plain text; at debug and trace the full timestamped format is used.
pub fn init(level: LogLevel) {
    let filter = LevelFilter::from(level);
    let builder = tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_writer(std::io::stderr);
    if filter >= LevelFilter::DEBUG {
        builder.init();
    } else {
        builder
            .without_time()
            .with_target(false)
            .with_level(false)
            .init();
    }
}
