//! Progress reporting for downloads.
//!
//! The downloader never prints directly. It reports to a [`ProgressSink`],
//! which callers can point at a terminal, a log, a callback or nowhere.

use std::io::Write;

/// Width of the rendered bar, one glyph per percent.
pub const BAR_WIDTH: usize = 100;

pub const UNKNOWN_SIZE_NOTICE: &str = "Downloading please wait... (filesize unknown)";

/// Receives status and progress events from a download.
///
/// `total` is `None` when the server did not announce a usable size.
pub trait ProgressSink {
    fn notice(&mut self, _message: &str) {}

    fn begin(&mut self, _total: Option<u64>) {}

    /// Called after every non-empty chunk with the running byte count.
    fn advance(&mut self, _received: u64, _total: Option<u64>) {}

    fn finish(&mut self, _received: u64, _total: Option<u64>) {}
}

/// Percentage of `total` covered by `received`, floored and clamped to 0..=100.
///
/// A zero total has no meaningful ratio and reports 0.
pub fn percent(received: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = u128::from(received) * 100 / u128::from(total);
    pct.min(100) as u8
}

/// `*` for each completed percent, `-` for the rest.
pub fn render_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100));
    let mut bar = String::with_capacity(BAR_WIDTH);
    bar.push_str(&"*".repeat(filled));
    bar.push_str(&"-".repeat(BAR_WIDTH - filled));
    bar
}

/// Renders progress as a single self-overwriting terminal line.
pub struct ConsoleProgress<W: Write> {
    out: W,
}

impl ConsoleProgress<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    // Output is best effort: a closed terminal must not abort the transfer.
    fn emit(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn notice(&mut self, message: &str) {
        self.emit(&format!("{message}\n"));
    }

    fn begin(&mut self, total: Option<u64>) {
        if total.is_none() {
            self.emit(&format!("{UNKNOWN_SIZE_NOTICE}\n"));
        }
    }

    fn advance(&mut self, received: u64, total: Option<u64>) {
        if let Some(total) = total {
            let pct = percent(received, total);
            self.emit(&format!("\r{pct}% done \t[{}]", render_bar(pct)));
        }
    }

    fn finish(&mut self, _received: u64, total: Option<u64>) {
        if total.is_some() {
            self.emit("\n");
        }
    }
}

/// Swallows every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl ProgressSink for Silent {}

/// Forwards notices and chunk progress to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn notice(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn advance(&mut self, received: u64, total: Option<u64>) {
        match total {
            Some(total) => log::debug!("{received}/{total} bytes ({}%)", percent(received, total)),
            None => log::debug!("{received} bytes"),
        }
    }

    fn finish(&mut self, received: u64, _total: Option<u64>) {
        log::info!("Transfer complete: {received} bytes");
    }
}

/// Adapts a closure `(received, total)` into a sink; other events are dropped.
pub struct ProgressFn<F>(pub F);

impl<F: FnMut(u64, Option<u64>)> ProgressSink for ProgressFn<F> {
    fn advance(&mut self, received: u64, total: Option<u64>) {
        (self.0)(received, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_percent_floors() {
        assert_eq!(percent(0, 11), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 66);
        assert_eq!(percent(11, 11), 100);
    }

    #[test]
    fn test_percent_clamps_and_guards_zero() {
        assert_eq!(percent(50, 10), 100);
        assert_eq!(percent(10, 0), 0);
        assert_eq!(percent(u64::MAX, u64::MAX), 100);
    }

    #[test]
    fn test_render_bar() {
        let bar = render_bar(42);
        assert_eq!(bar.len(), BAR_WIDTH);
        assert_eq!(bar.chars().filter(|c| *c == '*').count(), 42);
        assert!(bar.starts_with("**"));
        assert!(bar.ends_with("--"));

        assert_eq!(render_bar(0), "-".repeat(100));
        assert_eq!(render_bar(100), "*".repeat(100));
        assert_eq!(render_bar(200), "*".repeat(100));
    }

    #[test]
    fn test_console_known_size() {
        let mut console = ConsoleProgress::new(Vec::new());
        console.begin(Some(4));
        console.advance(2, Some(4));
        console.advance(4, Some(4));
        console.finish(4, Some(4));

        let out = String::from_utf8(console.into_inner()).unwrap();
        let expected = format!(
            "\r50% done \t[{}{}]\r100% done \t[{}]\n",
            "*".repeat(50),
            "-".repeat(50),
            "*".repeat(100)
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_console_unknown_size() {
        let mut console = ConsoleProgress::new(Vec::new());
        console.notice("Downloading out.bin from http://host/file");
        console.begin(None);
        console.advance(10, None);
        console.advance(20, None);
        console.finish(20, None);

        let out = String::from_utf8(console.into_inner()).unwrap();
        assert_eq!(
            out,
            format!("Downloading out.bin from http://host/file\n{UNKNOWN_SIZE_NOTICE}\n")
        );
    }

    #[test]
    fn test_progress_fn_receives_advances() {
        let mut seen = Vec::new();
        {
            let mut sink =
                ProgressFn(|received: u64, total: Option<u64>| seen.push((received, total)));
            sink.notice("ignored");
            sink.advance(1, Some(2));
            sink.advance(2, Some(2));
        }
        assert_eq!(seen, vec![(1, Some(2)), (2, Some(2))]);
    }
}
