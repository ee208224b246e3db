//! Process configuration, read from the environment (and `.env` if present).

use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const BIND_ADDR_VAR: &str = "EINVOICE_BIND_ADDR";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let raw = std::env::var(BIND_ADDR_VAR).unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        Self::from_bind_addr(&raw)
    }

    pub fn from_bind_addr(raw: &str) -> Result<Self> {
        let bind_addr = raw
            .trim()
            .parse::<SocketAddr>()
            .with_context(|| format!("{BIND_ADDR_VAR} is invalid: {raw:?}"))?;
        Ok(Self { bind_addr })
    }
}
