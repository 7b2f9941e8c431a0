//! Status and version endpoint handlers

use axum::{
  extract::{Extension, State},
  response::Json,
};
use schemars::schema_for;
use std::collections::BTreeMap;

use crate::server::{
  middleware::RequestContext,
  state::AppState,
  types::{
    ApiInfoResponse, ApiVersions, BaseResponse, DecryptRequest, EncryptRequest, StatusResponse, VersionResponse,
  },
};

/// GET /status - Health check endpoint
pub async fn status(
  State(state): State<AppState>,
  Extension(context): Extension<RequestContext>,
) -> Json<BaseResponse<StatusResponse>> {
  let response = StatusResponse {
    status: "healthy".to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    languages: caesar::registry().len(),
    dictionaries: state.dictionaries.codes(),
  };

  Json(BaseResponse::success(response, context.request_id))
}

/// GET /version - Returns current API version
pub async fn version(Extension(context): Extension<RequestContext>) -> Json<BaseResponse<VersionResponse>> {
  let response = VersionResponse { version: env!("CARGO_PKG_VERSION").to_string() };

  Json(BaseResponse::success(response, context.request_id))
}

/// GET /api - Returns API information, supported versions and request schemas
pub async fn api_info(Extension(context): Extension<RequestContext>) -> Json<BaseResponse<ApiInfoResponse>> {
  let version = env!("CARGO_PKG_VERSION");

  let mut schemas = BTreeMap::new();
  schemas.insert("/encrypt".to_string(), serde_json::to_value(schema_for!(EncryptRequest)).unwrap_or_default());
  schemas.insert("/decrypt".to_string(), serde_json::to_value(schema_for!(DecryptRequest)).unwrap_or_default());

  let response = ApiInfoResponse {
    latest: version.to_string(),
    versions: ApiVersions { latest: version.to_string(), active: vec![version.to_string()] },
    schemas,
  };

  Json(BaseResponse::success(response, context.request_id))
}
