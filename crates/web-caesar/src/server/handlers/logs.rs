//! Logs endpoint handler

use axum::{
  extract::{Extension, Query},
  response::Json,
};

use crate::server::{
  error::{ApiFailure, ApiResult},
  middleware::RequestContext,
  types::{BaseResponse, LogsQuery, LogsResponse},
};

const DEFAULT_LIMIT: usize = 100;

/// GET /logs - Most recent request log entries
pub async fn get_logs(
  Extension(context): Extension<RequestContext>,
  Query(query): Query<LogsQuery>,
) -> ApiResult<LogsResponse> {
  let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

  match context.logger.get_logs(Some(limit), query.level.as_deref()).await {
    Ok(logs) => Ok(Json(BaseResponse::success(LogsResponse { logs }, context.request_id))),
    Err(e) => {
      context.log_error(&format!("Failed to read logs: {e}"), "logs-api").await;
      Err(ApiFailure::internal(&format!("Failed to read logs: {e}"), context.request_id))
    }
  }
}
