//! Request context and middleware for the Web Caesar REST API
//!
//! Every request gets a [`RequestContext`] carrying its id and the shared
//! request log, injected into the request extensions by middleware.

use axum::{
  extract::{Request, State},
  http::{HeaderMap, Method, Uri},
  middleware::Next,
  response::Response,
};
use scribe::{
  request_log::{LogContext, RequestLog},
  Level,
};
use std::time::Instant;
use uuid::Uuid;

use crate::server::state::AppState;

/// Request context containing logger and request metadata
#[derive(Clone)]
pub struct RequestContext {
  /// Unique ID for this request, reused as the response transaction id
  pub request_id: Uuid,
  pub method: Method,
  pub uri: Uri,
  pub headers: HeaderMap,
  pub logger: RequestLog,
}

impl RequestContext {
  pub fn new(method: Method, uri: Uri, headers: HeaderMap, logger: RequestLog) -> Self {
    Self { request_id: Uuid::new_v4(), method, uri, headers, logger }
  }

  fn log_context(&self, status_code: Option<u16>, duration_ms: Option<f64>) -> LogContext {
    let user_agent = self
      .headers
      .get(axum::http::header::USER_AGENT)
      .map(|v| v.to_str().unwrap_or("unknown").to_string());

    LogContext {
      request_id: Some(self.request_id.to_string()),
      method: Some(self.method.to_string()),
      path: Some(self.uri.path().to_string()),
      user_agent,
      duration_ms,
      status_code,
    }
  }

  async fn log(&self, level: Level, message: &str, component: &str) {
    self.logger.log_with_context(level, message, component, self.log_context(None, None)).await;
  }

  pub async fn log_info(&self, message: &str, component: &str) {
    self.log(Level::Info, message, component).await;
  }

  pub async fn log_success(&self, message: &str, component: &str) {
    self.log(Level::Success, message, component).await;
  }

  pub async fn log_warn(&self, message: &str, component: &str) {
    self.log(Level::Warn, message, component).await;
  }

  pub async fn log_error(&self, message: &str, component: &str) {
    self.log(Level::Error, message, component).await;
  }

  pub async fn log_request_start(&self) {
    let message = format!("{} {} started", self.method, self.uri.path());
    self.log(Level::Debug, &message, "http-request").await;
  }

  pub async fn log_request_complete(&self, status_code: u16, duration_ms: f64) {
    let message = format!("{} {} -> {status_code} in {duration_ms:.2}ms", self.method, self.uri.path());
    let level = if status_code >= 500 { Level::Error } else { Level::Info };
    self
      .logger
      .log_with_context(level, &message, "http-request", self.log_context(Some(status_code), Some(duration_ms)))
      .await;
  }
}

/// Middleware to inject RequestContext into all requests
pub async fn request_context_middleware(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
  let context = RequestContext::new(
    request.method().clone(),
    request.uri().clone(),
    request.headers().clone(),
    state.logger.clone(),
  );

  let start_time = Instant::now();
  context.log_request_start().await;

  request.extensions_mut().insert(context.clone());
  let response = next.run(request).await;

  let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
  context.log_request_complete(response.status().as_u16(), duration_ms).await;

  response
}
