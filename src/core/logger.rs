// Arch Package Search - Systemd-Style Logger
// Copyright (C) 2025 Akaere Networks
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Systemd-style stderr logger compatible with journald
//!
//! stdout is reserved for result data (JSON envelopes or rendered items), so
//! every log line goes to stderr. Levels follow syslog priorities; when
//! `--journald` is given the output switches to `KEY=value` journal fields.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};

/// Syslog identifier written in journald mode
pub const SYSLOG_IDENTIFIER: &str = "arch-pkg-search";

/// Log levels following systemd priority conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

impl LogLevel {
    /// Parse a level name as used in `ARCH_PKG_SEARCH_LOG`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "err" | "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warning),
            "notice" => Some(LogLevel::Notice),
            "info" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    pub fn priority(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERR",
            LogLevel::Warning => "WARNING",
            LogLevel::Notice => "NOTICE",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    fn color_code(self) -> &'static str {
        match self {
            LogLevel::Error => "\x1b[31m",
            LogLevel::Warning => "\x1b[33m",
            LogLevel::Notice => "\x1b[36m",
            LogLevel::Info => "\x1b[32m",
            LogLevel::Debug => "\x1b[37m",
        }
    }
}

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub use_colors: bool,
    pub include_timestamp: bool,
    /// Prefix terminal lines with the emitting module path
    pub include_target: bool,
    pub journald_format: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Warning,
            use_colors: atty::is(atty::Stream::Stderr),
            include_timestamp: true,
            include_target: false,
            journald_format: false,
        }
    }
}

static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
    min_level: AtomicU8,
}

impl Logger {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            min_level: AtomicU8::new(config.min_level.priority()),
            config,
        }
    }

    /// Install the global logger. Fails if one is already installed.
    pub fn init(config: LoggerConfig) -> Result<(), LoggerError> {
        let mut global_logger = LOGGER.lock().map_err(|_| LoggerError::InitError)?;
        if global_logger.is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }
        *global_logger = Some(Self::new(config));
        Ok(())
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level.priority() <= self.min_level.load(Ordering::Relaxed)
    }

    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        if !self.should_log(level) {
            return;
        }

        let formatted = if self.config.journald_format {
            self.format_journald(level, target, message)
        } else {
            self.format_terminal(level, target, message)
        };

        eprintln!("{}", formatted);
    }

    fn format_journald(&self, level: LogLevel, target: &str, message: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("PRIORITY={}\n", level.priority()));
        output.push_str(&format!("MESSAGE={}\n", message));
        if self.config.include_target && !target.is_empty() {
            output.push_str(&format!("CODE_FILE={}\n", target));
        }
        output.push_str(&format!("SYSLOG_IDENTIFIER={}\n", SYSLOG_IDENTIFIER));
        output
    }

    fn format_terminal(&self, level: LogLevel, target: &str, message: &str) -> String {
        let mut output = String::new();

        if self.config.include_timestamp {
            let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            output.push_str(&format!("{} ", now));
        }

        if self.config.use_colors {
            output.push_str(&format!("{}[{}]\x1b[0m ", level.color_code(), level.as_str()));
        } else {
            output.push_str(&format!("[{}] ", level.as_str()));
        }

        if self.config.include_target && !target.is_empty() {
            output.push_str(&format!("{}: ", target));
        }

        output.push_str(message);
        output
    }
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::core::logger::log_with_level($crate::core::logger::LogLevel::Error, module_path!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::core::logger::log_with_level($crate::core::logger::LogLevel::Warning, module_path!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_notice {
    ($($arg:tt)*) => {
        $crate::core::logger::log_with_level($crate::core::logger::LogLevel::Notice, module_path!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::core::logger::log_with_level($crate::core::logger::LogLevel::Info, module_path!(), &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::core::logger::log_with_level($crate::core::logger::LogLevel::Debug, module_path!(), &format!($($arg)*))
    };
}

/// Internal function to log with level. A no-op until a logger is installed.
pub fn log_with_level(level: LogLevel, target: &str, message: &str) {
    if let Ok(logger_guard) = LOGGER.lock()
        && let Some(ref logger) = *logger_guard
    {
        logger.log(level, target, message);
    }
}

/// Systemd-style task starting message
pub fn log_task_start(task_name: &str) {
    log_with_level(LogLevel::Notice, module_path!(), &format!("[*] {}...", task_name));
}

/// Systemd-style task completion with details
pub fn log_task_complete_with_details(task_name: &str, details: &str) {
    log_with_level(
        LogLevel::Info,
        module_path!(),
        &format!("[   OK   ] {} ({})", task_name, details),
    );
}

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("Logger already initialized")]
    AlreadyInitialized,
    #[error("Failed to initialize logger")]
    InitError,
}

/// Build the logger configuration from CLI flags and `ARCH_PKG_SEARCH_LOG`.
///
/// `--debug` wins over the environment; otherwise the env level applies,
/// falling back to warnings only so a launcher host's stderr stays quiet.
pub fn config_from_args(debug: bool, journald: bool, no_color: bool) -> LoggerConfig {
    let env_level = std::env::var("ARCH_PKG_SEARCH_LOG")
        .ok()
        .and_then(|value| LogLevel::from_name(&value));

    let min_level = if debug {
        LogLevel::Debug
    } else {
        env_level.unwrap_or(LogLevel::Warning)
    };

    LoggerConfig {
        min_level,
        use_colors: atty::is(atty::Stream::Stderr) && !journald && !no_color,
        include_timestamp: !journald,
        include_target: debug,
        journald_format: journald,
    }
}

/// Initialize logger from CLI arguments
pub fn init_from_args(debug: bool, journald: bool, no_color: bool) -> Result<(), LoggerError> {
    Logger::init(config_from_args(debug, journald, no_color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Info < LogLevel::Debug);
    }

    #[test]
    fn test_log_level_from_name() {
        assert_eq!(LogLevel::from_name("debug"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_name(" WARN "), Some(LogLevel::Warning));
        assert_eq!(LogLevel::from_name("err"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_name("loud"), None);
    }

    #[test]
    fn test_logger_level_filtering() {
        let logger = Logger::new(LoggerConfig {
            min_level: LogLevel::Warning,
            ..Default::default()
        });

        assert!(logger.should_log(LogLevel::Error));
        assert!(logger.should_log(LogLevel::Warning));
        assert!(!logger.should_log(LogLevel::Info));
        assert!(!logger.should_log(LogLevel::Debug));
    }

    #[test]
    fn test_journald_format_fields() {
        let logger = Logger::new(LoggerConfig {
            min_level: LogLevel::Debug,
            use_colors: false,
            include_timestamp: false,
            include_target: true,
            journald_format: true,
        });
        let out = logger.format_journald(LogLevel::Info, "arch_pkg_search::core", "hello");
        assert!(out.contains("PRIORITY=6\n"));
        assert!(out.contains("MESSAGE=hello\n"));
        assert!(out.contains("CODE_FILE=arch_pkg_search::core\n"));
        assert!(out.contains("SYSLOG_IDENTIFIER=arch-pkg-search\n"));
    }

    #[test]
    fn test_terminal_format_without_colors() {
        let logger = Logger::new(LoggerConfig {
            min_level: LogLevel::Debug,
            use_colors: false,
            include_timestamp: false,
            include_target: false,
            journald_format: false,
        });
        assert_eq!(logger.format_terminal(LogLevel::Warning, "x", "slow AUR"), "[WARNING] slow AUR");
    }
}
