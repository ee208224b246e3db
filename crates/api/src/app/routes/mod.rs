use axum::{
    routing::{get, post},
    Router,
};

pub mod invoices;
pub mod points_of_sale;
pub mod statistics;
pub mod system;
pub mod verification;

/// Router for the invoicing endpoints.
pub fn router() -> Router {
    Router::new()
        .route(
            "/invoices",
            post(invoices::create_invoice).get(invoices::list_invoices),
        )
        .route("/invoices/:id", get(invoices::get_invoice))
        .route("/points-of-sale", get(points_of_sale::list_points_of_sale))
        .route("/verify-code/:code", get(verification::verify_code))
        .route("/statistics", get(statistics::get_statistics))
}

/// Same handlers under the legacy Spanish paths (mounted at `/api`).
pub fn legacy_router() -> Router {
    Router::new()
        .route(
            "/facturas",
            post(invoices::create_invoice).get(invoices::list_invoices),
        )
        .route("/facturas/:id", get(invoices::get_invoice))
        .route("/puntos-venta", get(points_of_sale::list_points_of_sale))
        .route("/verificar-cae/:code", get(verification::verify_code))
        .route("/estadisticas", get(statistics::get_statistics))
}
