use chrono::Local;
use once_cell::sync::Lazy;
use std::sync::Mutex;

static LOG_LEVEL: Lazy<Mutex<LogLevel>> = Lazy::new(|| Mutex::new(LogLevel::Warning));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Level selected by the CLI's `--debug` / `--verbose` flags.
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warning
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Debug => "🔍",
            LogLevel::Info => "ℹ️",
            LogLevel::Warning => "⚠️",
            LogLevel::Error => "❌",
        }
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut current_level) = LOG_LEVEL.lock() {
        *current_level = level;
    }
}

pub fn get_log_level() -> LogLevel {
    match LOG_LEVEL.lock() {
        Ok(level) => *level,
        Err(_) => LogLevel::Warning,
    }
}

fn format_line(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%H:%M:%S");
    format!("[{}] {} {}", timestamp, level.prefix(), message)
}

/// Prints `message` when `level` is at or above the current level. Warnings
/// and errors go to stderr.
pub fn log(level: LogLevel, message: &str) {
    if level < get_log_level() {
        return;
    }

    let formatted = format_line(level, message);
    match level {
        LogLevel::Error | LogLevel::Warning => eprintln!("{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn debug(message: &str) {
    log(LogLevel::Debug, message);
}

pub fn info(message: &str) {
    log(LogLevel::Info, message);
}

pub fn warning(message: &str) {
    log(LogLevel::Warning, message);
}

pub fn error(message: &str) {
    log(LogLevel::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_flags() {
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Warning);
        assert_eq!(LogLevel::from_flags(true, false), LogLevel::Info);
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Debug);
    }

    #[test]
    fn test_line_format() {
        let line = format_line(LogLevel::Debug, "loading unit.yaml");
        assert!(line.starts_with('['));
        assert_eq!(line.find(']'), Some(9));
        assert!(line.ends_with("] 🔍 loading unit.yaml"));
    }

    #[test]
    fn test_set_and_get_level() {
        set_log_level(LogLevel::Error);
        assert_eq!(get_log_level(), LogLevel::Error);
        set_log_level(LogLevel::Warning);
    }
}
