//! Axum router configuration for all endpoints

use axum::{
  middleware,
  routing::{get, post},
  Router,
};
use tower_http::services::ServeDir;

use crate::server::{
  handlers::{cipher, jokes, languages, logs, status},
  middleware::request_context_middleware,
  state::AppState,
};

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
  let router = Router::new()
    // Cipher endpoints
    .route("/encrypt", post(cipher::encrypt))
    .route("/decrypt", post(cipher::decrypt))
    .route("/languages", get(languages::list_languages))
    .route("/dad_joke", get(jokes::dad_joke))
    // Status and version endpoints
    .route("/status", get(status::status))
    .route("/version", get(status::version))
    .route("/api", get(status::api_info))
    // Logs endpoint
    .route("/logs", get(logs::get_logs));

  // Built UI assets for everything else
  let router = match &state.config.static_dir {
    Some(dir) => router.fallback_service(ServeDir::new(dir)),
    None => router,
  };

  router.layer(middleware::from_fn_with_state(state.clone(), request_context_middleware)).with_state(state)
}
