//! Console log formatting for the Web Caesar service
//!
//! ## Features
//!
//! - Standard logging levels (info, warn, error, debug, success)
//! - Multi-line message support with consistent prefixes
//! - All output to stderr
//! - Rotating JSONL request log (`request-log` feature)
//!
//! ## Usage
//!
//! Functions: `info()`, `warn()`, `error()`, `debug()`, `success()`
//!
//! Macros take `format!` arguments: `scribe::info!("listening on {addr}")`

use colored::*;
use std::fmt;

#[cfg(feature = "request-log")]
pub mod request_log;

/// Severity of a console log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
  Debug,
  Info,
  Success,
  Warn,
  Error,
}

impl Level {
  /// Short tag printed inside the prefix brackets
  pub fn tag(self) -> &'static str {
    match self {
      Level::Debug => "debug",
      Level::Info => "info",
      Level::Success => "sccs",
      Level::Warn => "warn",
      Level::Error => "error",
    }
  }

  /// Name used when the level is persisted
  pub fn as_str(self) -> &'static str {
    match self {
      Level::Debug => "debug",
      Level::Info => "info",
      Level::Success => "success",
      Level::Warn => "warn",
      Level::Error => "error",
    }
  }

  fn color(self) -> Color {
    match self {
      Level::Debug => Color::Magenta,
      Level::Info => Color::Blue,
      Level::Success => Color::Green,
      Level::Warn => Color::Yellow,
      Level::Error => Color::Red,
    }
  }
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Format a colored prefix padded so messages line up across levels
pub fn prefix(level: Level) -> String {
  let tag = level.tag();
  let padding = 7usize.saturating_sub(tag.len() + 2);
  format!("[{}]{:<padding$}", tag.color(level.color()).bold(), "")
}

/// Prefix every line of `message`, ready for output
pub fn format_lines(level: Level, message: &str) -> Vec<String> {
  let prefix = prefix(level);
  message.lines().map(|line| format!("{prefix} {line}")).collect()
}

/// Write a message at the given level to stderr
pub fn emit(level: Level, message: &str) {
  for line in format_lines(level, message) {
    eprintln!("{line}");
  }
}

/// Info level logging - general information
pub fn info(message: &str) {
  emit(Level::Info, message);
}

/// Warning level logging - something needs attention
pub fn warn(message: &str) {
  emit(Level::Warn, message);
}

/// Error level logging - something went wrong
pub fn error(message: &str) {
  emit(Level::Error, message);
}

/// Debug level logging - detailed diagnostic information
pub fn debug(message: &str) {
  emit(Level::Debug, message);
}

/// Success level logging - something completed successfully
pub fn success(message: &str) {
  emit(Level::Success, message);
}

#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => {
    $crate::info(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! warn {
  ($($arg:tt)*) => {
    $crate::warn(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => {
    $crate::error(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => {
    $crate::debug(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => {
    $crate::success(&format!($($arg)*)) // LCOV_EXCL_LINE
  };
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_lines_prefixes_every_line() {
    colored::control::set_override(false);

    let lines = format_lines(Level::Info, "first\nsecond");
    assert_eq!(lines, vec!["[info]  first".to_string(), "[info]  second".to_string()]);
  }

  #[test]
  fn test_prefix_width_is_stable() {
    colored::control::set_override(false);

    for level in [Level::Debug, Level::Info, Level::Success, Level::Warn, Level::Error] {
      assert!(prefix(level).len() >= 7, "prefix too short for {level}");
    }
  }

  #[test]
  fn test_level_names() {
    assert_eq!(Level::Success.as_str(), "success");
    assert_eq!(Level::Success.tag(), "sccs");
    assert_eq!(Level::Warn.to_string(), "warn");
  }
}
