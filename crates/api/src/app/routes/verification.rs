use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::app::errors;
use crate::app::services::AppServices;

/// Always 200 on lookup: validity is carried in the body, not the status.
pub async fn verify_code(
    Extension(services): Extension<Arc<AppServices>>,
    Path(code): Path<String>,
) -> Response {
    match services.verify_authorization_code(&code, Utc::now()) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
