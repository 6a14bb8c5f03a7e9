/// Logger that keeps records in memory so nothing is written over the terminal UI.
/// The activity pane renders the tail of the buffer.
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};

const MAX_LOG_LINES: usize = 2_000;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: Level,
    pub message: String,
}

impl LogEntry {
    pub fn format(&self) -> String {
        format!("{} {:<5} {}", self.timestamp, self.level, self.message)
    }
}

/// Thread-safe ring buffer of log entries
#[derive(Clone, Default)]
pub struct LogBuffer {
    logs: Arc<RwLock<VecDeque<LogEntry>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_log(&self, entry: LogEntry) {
        let mut logs = self.logs.write().unwrap_or_else(PoisonError::into_inner);
        if logs.len() >= MAX_LOG_LINES {
            logs.pop_front();
        }
        logs.push_back(entry);
    }

    pub fn get_recent_logs(&self, count: usize) -> Vec<LogEntry> {
        let logs = self.logs.read().unwrap_or_else(PoisonError::into_inner);
        let start = logs.len().saturating_sub(count);
        logs.iter().skip(start).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.logs.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

struct BufferedLogger {
    buffer: LogBuffer,
    level: LevelFilter,
}

impl log::Log for BufferedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.buffer.add_log(LogEntry {
                timestamp: chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
                level: record.level(),
                message: record.args().to_string(),
            });
        }
    }

    fn flush(&self) {}
}

/// Install the buffered logger and return the buffer for the activity pane
pub fn init_memory_logger(level: LevelFilter) -> Result<LogBuffer, SetLoggerError> {
    let buffer = LogBuffer::new();
    log::set_boxed_logger(Box::new(BufferedLogger {
        buffer: buffer.clone(),
        level,
    }))?;
    log::set_max_level(level);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_buffer_drops_oldest() {
        let buffer = LogBuffer::new();
        for i in 0..MAX_LOG_LINES + 5 {
            buffer.add_log(LogEntry {
                timestamp: String::new(),
                level: Level::Info,
                message: i.to_string(),
            });
        }
        assert_eq!(buffer.len(), MAX_LOG_LINES);
        let recent = buffer.get_recent_logs(1);
        assert_eq!(recent[0].message, (MAX_LOG_LINES + 4).to_string());
    }

    #[test]
    fn test_logger_respects_level() {
        let buffer = LogBuffer::new();
        let logger = BufferedLogger {
            buffer: buffer.clone(),
            level: LevelFilter::Info,
        };
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("hidden"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .args(format_args!("shown"))
                .build(),
        );
        let logs = buffer.get_recent_logs(10);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].format().ends_with("shown"));
    }
}
