use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::app::errors;
use crate::app::services::AppServices;

pub async fn get_statistics(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.statistics() {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
