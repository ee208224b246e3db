use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use einvoice_core::{DomainError, InvoiceId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<dto::CreateInvoiceRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected invoice body");
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text());
        }
    };

    match services.create_invoice(body.into_command(Utc::now())) {
        Ok(invoice) => {
            tracing::info!(
                invoice_id = %invoice.id,
                number = %invoice.number,
                series = %invoice.series,
                total = %invoice.total,
                "invoice authorized"
            );
            (
                StatusCode::CREATED,
                Json(dto::CreateInvoiceResponse::authorized(invoice)),
            )
                .into_response()
        }
        Err(err) => {
            if let DomainError::InvalidInput(msg) = &err {
                tracing::warn!(reason = %msg, "invoice rejected");
            }
            errors::domain_error_to_response(err)
        }
    }
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListInvoicesQuery>,
) -> Response {
    let filter = match query.into_filter() {
        Ok(f) => f,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_date", e.to_string()),
    };

    match services.list_invoices(&filter) {
        Ok(invoices) => (
            StatusCode::OK,
            Json(dto::ListInvoicesResponse::from(invoices)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id: InvoiceId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id"),
    };

    match services.get_invoice(id) {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
