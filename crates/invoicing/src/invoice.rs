use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use einvoice_core::{InvoiceId, PointOfSaleId};

use crate::authorization::AuthorizationCode;
use crate::numbering::InvoiceNumber;
use crate::series::InvoiceSeries;
use crate::items::LineItem;

/// Invoice status. Every stored invoice is authorized at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvoiceStatus {
    Authorized,
}

/// Authorized invoice record (immutable once stored in the ledger).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    #[serde(rename = "type")]
    pub series: InvoiceSeries,
    pub number: InvoiceNumber,
    pub point_of_sale: PointOfSaleId,
    pub authorization_code: AuthorizationCode,
    pub issued_at: DateTime<Utc>,
    pub authorization_expires_at: DateTime<Utc>,
    /// Opaque customer payload, stored and echoed as received.
    pub customer: serde_json::Value,
    pub items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Expired strictly after the expiry instant; valid up to and including it.
    pub fn is_authorization_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.authorization_expires_at
    }
}

/// Command: CreateInvoice.
///
/// Fields are carried as received so the ledger can apply its validation
/// order (series, point of sale, items) and report the first failure. Items
/// stay raw JSON until the series and point of sale have been accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInvoice {
    pub series: Option<String>,
    pub point_of_sale: Option<i64>,
    pub customer: serde_json::Value,
    pub items: Option<serde_json::Value>,
    pub issued_at: DateTime<Utc>,
}
