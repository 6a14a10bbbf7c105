pub mod config;
pub mod download;
pub mod fetch;
pub mod unzip;

use crate::core::config::Config;
use crate::core::progress::{ConsoleProgress, LogProgress, ProgressSink};

/// Console output unless the user asked for quiet transfers, in which case
/// progress only reaches the log.
pub(crate) fn progress_sink(config: &Config, quiet: bool) -> Box<dyn ProgressSink> {
    if quiet || !config.show_progress {
        Box::new(LogProgress)
    } else {
        Box::new(ConsoleProgress::stdout())
    }
}
