//! Encrypt and decrypt endpoint handlers

use axum::{
  extract::{rejection::JsonRejection, Extension, State},
  response::Json,
};
use caesar::{encrypt as encrypt_text, find, CipherError};

use crate::server::{
  error::{invalid_body, ApiFailure, ApiResult},
  middleware::RequestContext,
  state::AppState,
  types::{BaseResponse, DecryptRequest, DecryptResponse, EncryptRequest, EncryptResponse},
};

const DEFAULT_LANGUAGE: &str = "en";

/// POST /encrypt - Rotate text within one alphabet
pub async fn encrypt(
  Extension(context): Extension<RequestContext>,
  payload: Result<Json<EncryptRequest>, JsonRejection>,
) -> ApiResult<EncryptResponse> {
  let transaction_id = context.request_id;
  let fail = |err: CipherError| ApiFailure::from_cipher(&err, transaction_id);

  let Json(request) = payload.map_err(|rejection| fail(invalid_body(rejection)))?;
  let code = request.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
  let alphabet = find(code).map_err(fail)?;

  match encrypt_text(&request.text, request.rot, alphabet) {
    Ok(encrypted_text) => {
      context
        .log_info(&format!("Encrypted {} chars with rot {} ({code})", request.text.chars().count(), request.rot), "cipher-api")
        .await;
      let response = EncryptResponse { encrypted_text, rot: request.rot, language_code: alphabet.code().to_string() };
      Ok(Json(BaseResponse::success(response, transaction_id)))
    }
    Err(e) => {
      context.log_warn(&format!("Encrypt failed: {e}"), "cipher-api").await;
      Err(fail(e))
    }
  }
}

/// POST /decrypt - Brute force every rotation of every alphabet
pub async fn decrypt(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
  payload: Result<Json<DecryptRequest>, JsonRejection>,
) -> ApiResult<DecryptResponse> {
  let transaction_id = context.request_id;
  let fail = |err: CipherError| ApiFailure::from_cipher(&err, transaction_id);

  let Json(request) = payload.map_err(|rejection| fail(invalid_body(rejection)))?;
  if request.text.is_empty() {
    context.log_warn("Rejected decrypt request with empty text", "cipher-api").await;
    return Err(fail(CipherError::InvalidInput("text must be a non-empty string".to_string())));
  }

  let threshold = request.threshold.or(state.config.default_threshold);
  let dictionaries = state.dictionaries.clone();
  let text = request.text;

  // Scoring every rotation is CPU bound
  let report = tokio::task::spawn_blocking(move || caesar::search(&text, caesar::registry(), &*dictionaries))
    .await
    .map_err(|e| ApiFailure::internal(&format!("Decryption task failed: {e}"), transaction_id))?;

  for skipped in &report.skipped {
    tracing::debug!(language = %skipped.language_code, reason = %skipped.reason, "Language skipped");
    if matches!(skipped.reason, CipherError::DictionaryUnavailable { .. }) {
      context.log_warn(&format!("Skipped {}: {}", skipped.language, skipped.reason), "cipher-api").await;
    }
  }

  let trials = report.trials;
  match report.into_best_match(threshold) {
    Ok(best) => {
      tracing::debug!(language = %best.language_code, rot = best.rot, trials, "Decryption succeeded");
      context
        .log_success(
          &format!("Decrypted as {} rot {} ({:.1}%, {trials} trials)", best.language, best.rot, best.percentage),
          "cipher-api",
        )
        .await;
      Ok(Json(BaseResponse::success(DecryptResponse::from(best), transaction_id)))
    }
    Err(e) => {
      context.log_warn(&format!("Decrypt failed: {e}"), "cipher-api").await;
      Err(fail(e))
    }
  }
}
