use axum::{http::StatusCode, response::Html};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn index() -> Html<&'static str> {
    Html(
        r#"<h1>Electronic invoicing (simulated AFIP/ARCA)</h1>
<p>REST API for simulated electronic invoices.</p>
<h2>Endpoints</h2>
<ul>
    <li>POST /invoices - create an invoice</li>
    <li>GET /invoices?type=&amp;from=&amp;to= - list invoices</li>
    <li>GET /invoices/:id - get an invoice by id</li>
    <li>GET /points-of-sale - list points of sale</li>
    <li>GET /verify-code/:code - verify an authorization code (CAE)</li>
    <li>GET /statistics - aggregate statistics</li>
</ul>
<p>The same endpoints are served under <code>/api</code> with their legacy names:
<code>/api/facturas</code>, <code>/api/puntos-venta</code>,
<code>/api/verificar-cae/:cae</code>, <code>/api/estadisticas</code>.</p>
"#,
    )
}
