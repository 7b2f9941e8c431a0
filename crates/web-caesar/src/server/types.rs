//! REST API types with schemars annotations for schema generation

use caesar::{Alphabet, BestMatch};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// Base Response Structure
// ======================

/// Base response object for all API endpoints
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BaseResponse<T> {
  /// API versioning information
  pub versioning: VersionInfo,

  /// Transaction ID for logging correlation
  pub transaction_id: Uuid,

  /// Optional error information
  #[serde(skip_serializing_if = "Vec::is_empty", default)]
  pub errors: Vec<ApiError>,

  /// Response data, flattened into the top level object
  #[serde(flatten)]
  pub data: T,
}

/// API versioning information
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VersionInfo {
  /// The latest version of the API
  pub latest: String,

  /// The version of the API requested by the client
  pub requested: String,

  /// The version of the API that was used in producing the response
  pub resolved: String,
}

/// API error information
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ApiError {
  /// Error key, unique to the error source
  pub key: String,

  /// Human readable error message
  pub message: String,

  /// Error stack trace (if available)
  #[serde(default)]
  pub stack: Vec<String>,

  /// Additional error context
  #[serde(default)]
  pub context: serde_json::Value,
}

// Cipher Endpoints
// ================

/// Request for /encrypt
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EncryptRequest {
  /// Text to rotate
  pub text: String,

  /// Rotation offset, any integer
  pub rot: i64,

  /// Language code of the alphabet to rotate within (defaults to English)
  #[serde(default)]
  pub language: Option<String>,
}

/// Response for /encrypt
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct EncryptResponse {
  pub encrypted_text: String,
  pub rot: i64,
  pub language_code: String,
}

/// Request for /decrypt
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DecryptRequest {
  /// Ciphertext to break
  pub text: String,

  /// Minimum match percentage (0-100) the best candidate must reach
  #[serde(default)]
  pub threshold: Option<f64>,
}

/// Response for /decrypt
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DecryptResponse {
  /// Rotation that was used to produce the ciphertext
  pub rot: usize,

  /// Recovered plaintext
  pub result: String,

  /// Number of recognised words
  pub matches: usize,

  pub language: String,
  pub language_code: String,

  /// Recognised words as a percentage of all words
  pub percentage: f64,
}

impl From<BestMatch> for DecryptResponse {
  fn from(best: BestMatch) -> Self {
    Self {
      rot: best.rot,
      result: best.result,
      matches: best.matches,
      language: best.language,
      language_code: best.language_code,
      percentage: best.percentage,
    }
  }
}

// Languages Endpoint
// ==================

/// One entry of the alphabet registry
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LanguageInfo {
  pub name: String,
  pub code: String,

  /// Alphabet length, the rotation modulus
  pub size: usize,

  /// Ordered lowercase letters
  pub characters: String,
}

impl From<&Alphabet> for LanguageInfo {
  fn from(alphabet: &Alphabet) -> Self {
    Self {
      name: alphabet.name().to_string(),
      code: alphabet.code().to_string(),
      size: alphabet.len(),
      characters: alphabet.characters().iter().collect(),
    }
  }
}

/// Response for /languages
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LanguagesResponse {
  pub languages: Vec<LanguageInfo>,
}

// Dad Joke Endpoint
// =================

/// Response for /dad_joke
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DadJokeResponse {
  pub dad_joke: String,
  pub encrypted_dad_joke: String,

  /// English rotation applied to the joke
  pub rot: i64,
}

// Status/Version Endpoints
// =======================

/// Response for /status
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StatusResponse {
  pub status: String,
  pub version: String,

  /// Number of registered alphabets
  pub languages: usize,

  /// Language codes with a loaded dictionary
  pub dictionaries: Vec<String>,
}

/// Response for /version
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct VersionResponse {
  /// Current API version
  pub version: String,
}

/// Response for /api
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiInfoResponse {
  /// Latest API version
  pub latest: String,

  /// Version information
  pub versions: ApiVersions,

  /// JSON Schemas of the request bodies, keyed by endpoint
  pub schemas: BTreeMap<String, serde_json::Value>,
}

/// API version details
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiVersions {
  /// Latest version
  pub latest: String,

  /// Currently active versions
  pub active: Vec<String>,
}

// Logs Endpoint
// =============

/// Query parameters for /logs
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogsQuery {
  /// Maximum number of entries (defaults to 100)
  pub limit: Option<usize>,

  /// Only entries of this level ("all" for every level)
  pub level: Option<String>,
}

/// Response for /logs
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LogsResponse {
  /// JSON log entries
  pub logs: Vec<LogEntry>,
}

/// Individual log entry (re-exported from scribe)
pub type LogEntry = scribe::request_log::LogEntry;

// Helper Functions
// ================

impl VersionInfo {
  fn current() -> Self {
    let version = env!("CARGO_PKG_VERSION");
    Self { latest: version.to_string(), requested: version.to_string(), resolved: version.to_string() }
  }
}

impl<T> BaseResponse<T> {
  /// Create a successful response
  pub fn success(data: T, transaction_id: Uuid) -> Self {
    Self { versioning: VersionInfo::current(), transaction_id, errors: Vec::new(), data }
  }
}

impl BaseResponse<()> {
  /// Create an error response
  pub fn error(errors: Vec<ApiError>, transaction_id: Uuid) -> Self {
    Self { versioning: VersionInfo::current(), transaction_id, errors, data: () }
  }
}

impl ApiError {
  /// Create a new API error
  pub fn new(key: &str, message: &str) -> Self {
    Self { key: key.to_string(), message: message.to_string(), stack: Vec::new(), context: serde_json::Value::Null }
  }

  /// Attach structured context to the error
  pub fn with_context(mut self, context: serde_json::Value) -> Self {
    self.context = context;
    self
  }
}
