//! Alphabet registry endpoint

use axum::{extract::Extension, response::Json};

use crate::server::{
  middleware::RequestContext,
  types::{BaseResponse, LanguageInfo, LanguagesResponse},
};

/// GET /languages - Every supported alphabet, in search order
pub async fn list_languages(Extension(context): Extension<RequestContext>) -> Json<BaseResponse<LanguagesResponse>> {
  let languages: Vec<LanguageInfo> = caesar::registry().iter().map(LanguageInfo::from).collect();

  Json(BaseResponse::success(LanguagesResponse { languages }, context.request_id))
}
