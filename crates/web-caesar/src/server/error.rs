//! Mapping of cipher failures onto HTTP responses

use axum::{
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Json, Response},
};
use caesar::CipherError;
use serde_json::json;
use uuid::Uuid;

use crate::server::types::{ApiError, BaseResponse};

/// A failed request: status code plus the error envelope sent to the client
#[derive(Debug)]
pub struct ApiFailure {
  pub status: StatusCode,
  pub error: ApiError,
  pub transaction_id: Uuid,
}

pub type ApiResult<T> = Result<Json<BaseResponse<T>>, ApiFailure>;

impl ApiFailure {
  pub fn new(status: StatusCode, error: ApiError, transaction_id: Uuid) -> Self {
    Self { status, error, transaction_id }
  }

  pub fn internal(message: &str, transaction_id: Uuid) -> Self {
    Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiError::new("internal_error", message), transaction_id)
  }

  /// Translate a cipher error into the status code and error key clients see
  pub fn from_cipher(err: &CipherError, transaction_id: Uuid) -> Self {
    let message = err.to_string();
    let (status, error) = match err {
      CipherError::InvalidInput(_) => (StatusCode::BAD_REQUEST, ApiError::new("invalid_input", &message)),
      CipherError::UnsupportedLanguage(code) => (
        StatusCode::BAD_REQUEST,
        ApiError::new("unsupported_language", &message).with_context(json!({ "language": code })),
      ),
      CipherError::CharacterNotInAlphabet { character, language } => (
        StatusCode::BAD_REQUEST,
        ApiError::new("character_not_in_alphabet", &message)
          .with_context(json!({ "character": character.to_string(), "language": language })),
      ),
      CipherError::InsufficientConfidence { threshold, percentage } => (
        StatusCode::UNPROCESSABLE_ENTITY,
        ApiError::new("insufficient_confidence", &message)
          .with_context(json!({ "threshold": threshold, "percentage": percentage })),
      ),
      CipherError::NoCandidates => (StatusCode::UNPROCESSABLE_ENTITY, ApiError::new("no_candidates", &message)),
      CipherError::EmptyAlphabet { .. } | CipherError::DictionaryUnavailable { .. } => {
        (StatusCode::INTERNAL_SERVER_ERROR, ApiError::new("cipher_unavailable", &message))
      }
    };

    Self::new(status, error, transaction_id)
  }
}

/// Malformed bodies, wrong content types and type mismatches are all client input errors
pub fn invalid_body(rejection: JsonRejection) -> CipherError {
  CipherError::InvalidInput(rejection.body_text())
}

impl IntoResponse for ApiFailure {
  fn into_response(self) -> Response {
    let body = BaseResponse::error(vec![self.error], self.transaction_id);
    (self.status, Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_codes() {
    let id = Uuid::new_v4();
    let cases = [
      (CipherError::InvalidInput("x".into()), StatusCode::BAD_REQUEST, "invalid_input"),
      (CipherError::UnsupportedLanguage("xx".into()), StatusCode::BAD_REQUEST, "unsupported_language"),
      (
        CipherError::CharacterNotInAlphabet { character: 'ж', language: "English".into() },
        StatusCode::BAD_REQUEST,
        "character_not_in_alphabet",
      ),
      (
        CipherError::InsufficientConfidence { threshold: 90.0, percentage: 50.0 },
        StatusCode::UNPROCESSABLE_ENTITY,
        "insufficient_confidence",
      ),
      (CipherError::NoCandidates, StatusCode::UNPROCESSABLE_ENTITY, "no_candidates"),
    ];

    for (err, status, key) in cases {
      let failure = ApiFailure::from_cipher(&err, id);
      assert_eq!(failure.status, status);
      assert_eq!(failure.error.key, key);
      assert_eq!(failure.transaction_id, id);
    }
  }

  #[test]
  fn test_insufficient_confidence_carries_threshold() {
    let err = CipherError::InsufficientConfidence { threshold: 101.0, percentage: 100.0 };
    let failure = ApiFailure::from_cipher(&err, Uuid::new_v4());
    assert_eq!(failure.error.context["threshold"], 101.0);
  }
}
