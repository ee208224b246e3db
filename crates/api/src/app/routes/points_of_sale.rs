use std::sync::Arc;

use axum::{extract::Extension, Json};

use crate::app::dto;
use crate::app::services::AppServices;

pub async fn list_points_of_sale(
    Extension(services): Extension<Arc<AppServices>>,
) -> Json<serde_json::Value> {
    Json(dto::points_of_sale_to_json(services.points_of_sale()))
}
