//! `log` backend that echoes to stderr and buffers lines so the embedding UI can drain them.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use once_cell::sync::Lazy;
use std::sync::Mutex;

static LOG_BUFFER: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));
static LOGGER: BufferedLogger = BufferedLogger;

const MAX_BUFFER_LEN: usize = 500;

pub struct BufferedLogger;

impl Log for BufferedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        push(format!("[{}] {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

fn push(line: String) {
    eprintln!("{}", line);
    if let Ok(mut v) = LOG_BUFFER.lock() {
        v.push(line);
        let n = v.len();
        if n > MAX_BUFFER_LEN {
            v.drain(0..n - MAX_BUFFER_LEN);
        }
    }
}

/// Installs the buffered logger. Fails if another logger is already set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Drain and clear buffered log lines.
pub fn drain_logs() -> Vec<String> {
    LOG_BUFFER
        .lock()
        .map(|mut v| std::mem::take(&mut *v))
        .unwrap_or_default()
}

/// Copy of the buffered lines, leaving the buffer intact.
pub fn buffered_logs() -> Vec<String> {
    LOG_BUFFER.lock().map(|v| v.clone()).unwrap_or_default()
}
