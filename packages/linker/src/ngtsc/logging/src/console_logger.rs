use super::logger::{LogLevel, Logger};

/// Writes `[LEVEL] message` lines. Info goes to stdout, everything else to stderr.
pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    fn write(&self, level: LogLevel, msg: &str) {
        if !self.is_enabled(level) {
            return;
        }
        let line = format_line(level, msg);
        if level == LogLevel::Info {
            println!("{}", line);
        } else {
            eprintln!("{}", line);
        }
    }
}

pub(crate) fn format_line(level: LogLevel, msg: &str) -> String {
    format!("[{}] {}", level.label(), msg)
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        self.write(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.write(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.write(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.write(LogLevel::Error, msg);
    }
}
