//! Tracing output routed to the browser console.
//!
//! Each event is buffered by a [`ConsoleWriter`] and handed to the sink as
//! one line when the writer drops, at the console level matching the event.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

/// Console method an event is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Log,
    Warn,
    Error,
}

impl From<Level> for ConsoleLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => ConsoleLevel::Error,
            Level::WARN => ConsoleLevel::Warn,
            _ => ConsoleLevel::Log,
        }
    }
}

/// Receives finished lines.
pub type ConsoleSink = fn(ConsoleLevel, &str);

/// Formatted event text as one console line. `None` when there is nothing to print.
pub fn console_line(buf: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(buf);
    let line = text.trim_end_matches(['\r', '\n']);
    (!line.is_empty()).then(|| line.to_string())
}

pub struct ConsoleWriter {
    level: ConsoleLevel,
    buf: Vec<u8>,
    sink: ConsoleSink,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if let Some(line) = console_line(&self.buf) {
            (self.sink)(self.level, &line);
        }
    }
}

#[derive(Clone, Copy)]
pub struct MakeConsoleWriter {
    sink: ConsoleSink,
}

impl MakeConsoleWriter {
    pub fn new(sink: ConsoleSink) -> Self {
        Self { sink }
    }

    fn writer(&self, level: ConsoleLevel) -> ConsoleWriter {
        ConsoleWriter {
            level,
            buf: Vec::new(),
            sink: self.sink,
        }
    }
}

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.writer(ConsoleLevel::Log)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.writer(ConsoleLevel::from(*meta.level()))
    }
}

/// Install a global subscriber that writes warnings and errors to `sink`.
///
/// Returns false when a subscriber was already installed.
pub fn init_console_logging(sink: ConsoleSink) -> bool {
    tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter::new(sink))
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .with_max_level(Level::WARN)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    thread_local! {
        static LINES: RefCell<Vec<(ConsoleLevel, String)>> = const { RefCell::new(Vec::new()) };
    }

    fn record(level: ConsoleLevel, line: &str) {
        LINES.with(|lines| lines.borrow_mut().push((level, line.to_string())));
    }

    fn take_lines() -> Vec<(ConsoleLevel, String)> {
        LINES.with(|lines| std::mem::take(&mut *lines.borrow_mut()))
    }

    #[test]
    fn events_reach_the_sink_at_their_console_level() {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(MakeConsoleWriter::new(record))
            .without_time()
            .with_ansi(false)
            .with_target(false)
            .with_max_level(Level::WARN)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(handler = "validate form", "guard re-entered, event ignored");
            tracing::error!("alert failed");
            tracing::info!("wired");
        });

        let lines = take_lines();
        assert_eq!(lines.len(), 2, "{lines:?}");
        assert_eq!(lines[0].0, ConsoleLevel::Warn);
        assert!(lines[0].1.contains("guard re-entered, event ignored"), "{}", lines[0].1);
        assert!(lines[0].1.contains("handler=\"validate form\""), "{}", lines[0].1);
        assert!(!lines[0].1.ends_with('\n'));
        assert_eq!(lines[1].0, ConsoleLevel::Error);
        assert!(lines[1].1.contains("alert failed"));
    }

    #[test]
    fn blank_output_is_not_printed() {
        assert_eq!(console_line(b""), None);
        assert_eq!(console_line(b"\n"), None);
        assert_eq!(console_line(b" WARN x\r\n").as_deref(), Some(" WARN x"));
    }

    #[test]
    fn levels_map_to_console_methods() {
        assert_eq!(ConsoleLevel::from(Level::ERROR), ConsoleLevel::Error);
        assert_eq!(ConsoleLevel::from(Level::WARN), ConsoleLevel::Warn);
        assert_eq!(ConsoleLevel::from(Level::DEBUG), ConsoleLevel::Log);
    }
}
