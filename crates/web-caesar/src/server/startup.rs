//! REST server startup and configuration

use anyhow::{Context, Result};
use axum::serve;
use caesar::Dictionaries;
use scribe::request_log::RequestLog;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::server::{routing::create_router, state::AppState};

const COMPONENT: &str = "web-caesar-server";

/// Open the request log and load dictionaries for `config`
pub async fn build_state(config: Config) -> Result<AppState> {
  let logger = RequestLog::with_options(&config.log_path, config.log_max_bytes, false)
    .with_context(|| format!("Failed to open request log {}", config.log_path.display()))?;

  let (dictionaries, failures) = Dictionaries::load(config.dictionaries_dir.as_deref(), config.dictionary_settings());
  for failure in &failures {
    tracing::warn!(%failure, "Dictionary override could not be loaded");
    logger.warn(&failure.to_string(), COMPONENT).await;
  }
  tracing::debug!(languages = ?dictionaries.codes(), "Dictionaries loaded");

  Ok(AppState::new(config, dictionaries, logger))
}

/// Start the REST server
pub async fn start_server(config: Config) -> Result<()> {
  let addr = config.bind;
  let state = build_state(config).await?;
  let logger = state.logger.clone();

  logger.info(&format!("Starting Web Caesar server on {addr}"), COMPONENT).await;

  let app = create_router(state)
    .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()));

  let listener = TcpListener::bind(addr).await.with_context(|| format!("Failed to bind {addr}"))?;
  tracing::info!(%addr, "Server listening");
  logger.success(&format!("Server listening on {addr}"), COMPONENT).await;

  match serve(listener, app).await {
    Ok(()) => {
      logger.info("Server shutdown gracefully", COMPONENT).await;
      Ok(())
    }
    Err(e) => {
      tracing::error!(error = %e, "Server stopped");
      logger.error(&format!("Server error: {e}"), COMPONENT).await;
      Err(anyhow::anyhow!("Server error: {e}"))
    }
  }
}
