use std::sync::Arc;

use anyhow::Context;

use einvoice_api::{app::services::AppServices, config::ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    einvoice_observability::init();

    let app = einvoice_api::app::build_app(Arc::new(AppServices::new()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
