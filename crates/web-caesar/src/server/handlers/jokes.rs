//! Dad joke endpoint

use axum::{extract::Extension, response::Json};

use crate::jokes::random_encrypted_joke;
use crate::server::{
  error::{ApiFailure, ApiResult},
  middleware::RequestContext,
  types::{BaseResponse, DadJokeResponse},
};

/// GET /dad_joke - A random joke and its English rotation
pub async fn dad_joke(Extension(context): Extension<RequestContext>) -> ApiResult<DadJokeResponse> {
  let joke = random_encrypted_joke(&mut rand::rng()).map_err(|e| ApiFailure::from_cipher(&e, context.request_id))?;

  context.log_info(&format!("Served dad joke with rot {}", joke.rot), "jokes-api").await;
  let response =
    DadJokeResponse { dad_joke: joke.joke.to_string(), encrypted_dad_joke: joke.encrypted, rot: joke.rot };
  Ok(Json(BaseResponse::success(response, context.request_id)))
}
