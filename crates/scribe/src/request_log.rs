//! Rotating request log for the web service
//!
//! Structured JSONL log storage with:
//! - Size-bounded files, rotated to `<file>.1` once `max_bytes` would be exceeded
//! - Thread-safe async operations with internal locking
//! - Optional console echo (silent mode support)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(feature = "schemars")]
use schemars::JsonSchema;

use crate::Level;

/// Rotation size used when none is configured
pub const DEFAULT_MAX_BYTES: u64 = 10_000;

// Types and Data Structures
// =========================

/// Request context information for logs
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct LogContext {
  /// Request ID for correlation
  #[serde(skip_serializing_if = "Option::is_none")]
  pub request_id: Option<String>,

  /// HTTP method
  #[serde(skip_serializing_if = "Option::is_none")]
  pub method: Option<String>,

  /// Request path
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,

  /// User agent
  #[serde(skip_serializing_if = "Option::is_none")]
  pub user_agent: Option<String>,

  /// Request duration in milliseconds
  #[serde(skip_serializing_if = "Option::is_none")]
  pub duration_ms: Option<f64>,

  /// HTTP status code
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status_code: Option<u16>,
}

/// A structured log entry
#[derive(Debug, Serialize, Deserialize, Clone)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub struct LogEntry {
  pub timestamp: DateTime<Utc>,
  pub level: String,
  pub message: String,
  pub component: String,

  /// Optional request context
  #[serde(skip_serializing_if = "Option::is_none")]
  pub context: Option<LogContext>,
}

struct RequestLogInner {
  path: PathBuf,
  max_bytes: u64,
  silent: bool,
}

/// Thread-safe, size-rotated JSONL log shared by all request handlers
#[derive(Clone)]
pub struct RequestLog {
  inner: Arc<tokio::sync::Mutex<RequestLogInner>>,
}

// File Handling
// =============

fn rotated_path(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(".1");
  path.with_file_name(name)
}

fn read_entries(path: &Path, entries: &mut Vec<LogEntry>) -> std::io::Result<()> {
  if !path.exists() {
    return Ok(());
  }

  let reader = BufReader::new(File::open(path)?);
  for line in reader.lines() {
    let line = line?;
    if line.trim().is_empty() {
      continue;
    }
    // Malformed lines are skipped
    if let Ok(entry) = serde_json::from_str::<LogEntry>(&line) {
      entries.push(entry);
    }
  }

  Ok(())
}

impl RequestLogInner {
  fn new(path: PathBuf, max_bytes: u64, silent: bool) -> std::io::Result<Self> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }

    // Create the file without truncating an existing log
    OpenOptions::new().create(true).append(true).open(&path)?;

    Ok(Self { path, max_bytes, silent })
  }

  fn append(&mut self, entry: &LogEntry) -> std::io::Result<()> {
    let json_line = serde_json::to_string(entry)
      .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    let incoming = json_line.len() as u64 + 1;
    let current = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
    if self.max_bytes > 0 && current > 0 && current + incoming > self.max_bytes {
      self.rotate()?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
    writeln!(file, "{json_line}")?;
    file.flush()
  }

  fn rotate(&self) -> std::io::Result<()> {
    let backup = rotated_path(&self.path);
    if backup.exists() {
      fs::remove_file(&backup)?;
    }
    fs::rename(&self.path, &backup)?;
    File::create(&self.path)?;
    Ok(())
  }

  fn entries(&self, limit: Option<usize>, level_filter: Option<&str>) -> std::io::Result<Vec<LogEntry>> {
    let mut logs = Vec::new();
    read_entries(&rotated_path(&self.path), &mut logs)?;
    read_entries(&self.path, &mut logs)?;

    logs.retain(|entry| level_filter.is_none_or(|filter| filter == "all" || entry.level == filter));

    // Keep the most recent N, returned oldest first
    logs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    if let Some(limit) = limit {
      let skip = logs.len().saturating_sub(limit);
      logs.drain(..skip);
    }

    Ok(logs)
  }
}

// Core API
// ========

impl RequestLog {
  /// Open (or create) a request log at `path` using the default rotation size
  pub fn new<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
    Self::with_options(path, DEFAULT_MAX_BYTES, false)
  }

  /// Open a request log with an explicit rotation size and console behaviour
  pub fn with_options<P: AsRef<Path>>(path: P, max_bytes: u64, silent: bool) -> std::io::Result<Self> {
    let inner = RequestLogInner::new(path.as_ref().to_path_buf(), max_bytes, silent)?;
    Ok(Self { inner: Arc::new(tokio::sync::Mutex::new(inner)) })
  }

  /// Append an entry, returning any I/O failure
  pub async fn append(
    &self,
    level: Level,
    message: &str,
    component: &str,
    context: Option<LogContext>,
  ) -> std::io::Result<()> {
    let entry = LogEntry {
      timestamp: Utc::now(),
      level: level.as_str().to_string(),
      message: message.to_string(),
      component: component.to_string(),
      context,
    };

    let mut guard = self.inner.lock().await;
    guard.append(&entry)?;
    if !guard.silent {
      crate::emit(level, message);
    }
    Ok(())
  }

  /// Append an entry (fire-and-forget, ignores errors)
  pub async fn log(&self, level: Level, message: &str, component: &str) {
    let _ = self.append(level, message, component, None).await;
  }

  /// Append an entry with request context (fire-and-forget)
  pub async fn log_with_context(&self, level: Level, message: &str, component: &str, context: LogContext) {
    let _ = self.append(level, message, component, Some(context)).await;
  }

  pub async fn info(&self, message: &str, component: &str) {
    self.log(Level::Info, message, component).await;
  }

  pub async fn warn(&self, message: &str, component: &str) {
    self.log(Level::Warn, message, component).await;
  }

  pub async fn error(&self, message: &str, component: &str) {
    self.log(Level::Error, message, component).await;
  }

  pub async fn success(&self, message: &str, component: &str) {
    self.log(Level::Success, message, component).await;
  }

  /// Most recent entries across the live and rotated file, oldest first
  pub async fn get_logs(&self, limit: Option<usize>, level_filter: Option<&str>) -> std::io::Result<Vec<LogEntry>> {
    let guard = self.inner.lock().await;
    guard.entries(limit, level_filter)
  }

  /// Get the path to the live log file
  pub async fn path(&self) -> PathBuf {
    self.inner.lock().await.path.clone()
  }
}

// Tests
// =====
