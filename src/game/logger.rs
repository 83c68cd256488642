//! Session event logger
//!
//! Messages carry a verbosity level and an optional category. They can be
//! printed, captured in memory for tests and tooling, or both.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};
use std::ops::Deref;

/// How much the session reports
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// No output
    Silent = 0,
    /// Only solves and failures
    Minimal = 1,
    /// Level loading and checkpoints (default)
    #[default]
    Normal = 2,
    /// Every move, including rejected ones
    Verbose = 3,
}

impl std::str::FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityLevel::Silent),
            "minimal" | "1" => Ok(VerbosityLevel::Minimal),
            "normal" | "2" => Ok(VerbosityLevel::Normal),
            "verbose" | "3" => Ok(VerbosityLevel::Verbose),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// Output format for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// Machine-readable JSON output (one object per line)
    Json,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to in-memory buffer (no stdout)
    Memory,
    /// Both stdout and in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
    /// e.g. "move", "solve", "checkpoint"
    pub category: Option<String>,
}

/// Read-only view over captured entries
pub struct LogGuard<'a> {
    guard: Ref<'a, Vec<LogEntry>>,
}

impl<'a> Deref for LogGuard<'a> {
    type Target = [LogEntry];

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

/// Logger shared by the session and the command-line driver
#[derive(Debug)]
pub struct EventLogger {
    verbosity: VerbosityLevel,
    output_format: OutputFormat,
    output_mode: OutputMode,
    log_buffer: RefCell<Vec<LogEntry>>,
}

impl EventLogger {
    pub fn new() -> Self {
        Self::with_verbosity(VerbosityLevel::default())
    }

    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        EventLogger {
            verbosity,
            output_format: OutputFormat::default(),
            output_mode: OutputMode::default(),
            log_buffer: RefCell::new(Vec::new()),
        }
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn set_output_mode(&mut self, mode: OutputMode) {
        self.output_mode = mode;
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    /// Capture to memory only
    pub fn enable_capture(&mut self) {
        self.output_mode = OutputMode::Memory;
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.output_mode, OutputMode::Memory | OutputMode::Both)
    }

    pub fn logs(&self) -> LogGuard<'_> {
        LogGuard {
            guard: self.log_buffer.borrow(),
        }
    }

    pub fn clear_logs(&self) {
        self.log_buffer.borrow_mut().clear();
    }

    pub fn minimal(&self, message: &str) {
        self.log(VerbosityLevel::Minimal, None, message);
    }

    pub fn normal(&self, message: &str) {
        self.log(VerbosityLevel::Normal, None, message);
    }

    pub fn verbose(&self, message: &str) {
        self.log(VerbosityLevel::Verbose, None, message);
    }

    /// Log with a category tag
    pub fn event(&self, level: VerbosityLevel, category: &str, message: &str) {
        self.log(level, Some(category), message);
    }

    fn log(&self, level: VerbosityLevel, category: Option<&str>, message: &str) {
        if level == VerbosityLevel::Silent || level > self.verbosity {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            category: category.map(str::to_string),
        };

        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            self.print(&entry);
        }
        if self.is_capturing() {
            self.log_buffer.borrow_mut().push(entry);
        }
    }

    fn print(&self, entry: &LogEntry) {
        match self.output_format {
            OutputFormat::Text => {
                if entry.level == VerbosityLevel::Minimal {
                    println!("{}", entry.message);
                } else {
                    println!("  {}", entry.message);
                }
            }
            OutputFormat::Json => match serde_json::to_string(entry) {
                Ok(line) => println!("{line}"),
                Err(e) => eprintln!("failed to encode log entry: {e}"),
            },
        }
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventLogger {
    /// Copies the settings; the captured buffer starts empty
    fn clone(&self) -> Self {
        EventLogger {
            verbosity: self.verbosity,
            output_format: self.output_format,
            output_mode: self.output_mode,
            log_buffer: RefCell::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_creation() {
        let logger = EventLogger::new();
        assert_eq!(logger.verbosity(), VerbosityLevel::Normal);
        assert!(!logger.is_capturing());
    }

    #[test]
    fn test_log_capture_respects_verbosity() {
        let mut logger = EventLogger::with_verbosity(VerbosityLevel::Normal);
        logger.enable_capture();

        logger.minimal("solved");
        logger.normal("loaded");
        logger.verbose("moved");

        let logs = logger.logs();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].message, "solved");
        assert_eq!(logs[1].message, "loaded");
    }

    #[test]
    fn test_event_category() {
        let mut logger = EventLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        logger.event(VerbosityLevel::Verbose, "move", "up");

        let logs = logger.logs();
        assert_eq!(logs[0].category.as_deref(), Some("move"));
    }

    #[test]
    fn test_silent_logs_nothing() {
        let mut logger = EventLogger::with_verbosity(VerbosityLevel::Silent);
        logger.enable_capture();
        logger.minimal("solved");
        assert!(logger.logs().is_empty());
    }

    #[test]
    fn test_clone_drops_buffer() {
        let mut logger = EventLogger::with_verbosity(VerbosityLevel::Verbose);
        logger.enable_capture();
        logger.verbose("one");
        let copy = logger.clone();
        assert!(copy.logs().is_empty());
        assert!(copy.is_capturing());
    }

    #[test]
    fn test_parse_verbosity() {
        assert_eq!("3".parse::<VerbosityLevel>(), Ok(VerbosityLevel::Verbose));
        assert_eq!("Minimal".parse::<VerbosityLevel>(), Ok(VerbosityLevel::Minimal));
        assert!("loud".parse::<VerbosityLevel>().is_err());
    }
}
