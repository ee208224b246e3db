use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use einvoice_core::{DomainResult, PointOfSaleId};
use einvoice_invoicing::{CreateInvoice, Invoice, InvoiceFilter, parse_filter_timestamp};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /invoices`.
///
/// `type`, `pointOfSale` and `items` are read loosely so that a wrong JSON
/// type is reported as the matching validation error rather than a body
/// error. Items are decoded by the ledger after the series and point of sale
/// are accepted.
/// Spanish field names from the legacy API are accepted as aliases.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    #[serde(default, rename = "type", alias = "tipo")]
    pub series: Option<serde_json::Value>,
    #[serde(default, alias = "puntoVenta")]
    pub point_of_sale: Option<serde_json::Value>,
    #[serde(default, alias = "cliente")]
    pub customer: Option<serde_json::Value>,
    #[serde(default)]
    pub items: Option<serde_json::Value>,
}

impl CreateInvoiceRequest {
    pub fn into_command(self, issued_at: DateTime<Utc>) -> CreateInvoice {
        CreateInvoice {
            series: self
                .series
                .as_ref()
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned),
            point_of_sale: self.point_of_sale.as_ref().and_then(integral_json_number),
            customer: self.customer.unwrap_or(serde_json::Value::Null),
            items: self.items,
            issued_at,
        }
    }
}

/// `1` and `1.0` are both point of sale 1; anything else is not a number.
fn integral_json_number(value: &serde_json::Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

/// Query string of `GET /invoices`. Empty values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct ListInvoicesQuery {
    #[serde(default, rename = "type", alias = "tipo")]
    pub series: Option<String>,
    #[serde(default, alias = "desde")]
    pub from: Option<String>,
    #[serde(default, alias = "hasta")]
    pub to: Option<String>,
}

impl ListInvoicesQuery {
    pub fn into_filter(self) -> DomainResult<InvoiceFilter> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());

        Ok(InvoiceFilter {
            series: non_empty(self.series),
            from: non_empty(self.from)
                .map(|s| parse_filter_timestamp(&s))
                .transpose()?,
            to: non_empty(self.to)
                .map(|s| parse_filter_timestamp(&s))
                .transpose()?,
        })
    }
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct CreateInvoiceResponse {
    pub success: bool,
    pub message: &'static str,
    pub invoice: Invoice,
}

impl CreateInvoiceResponse {
    pub fn authorized(invoice: Invoice) -> Self {
        Self {
            success: true,
            message: "invoice authorized",
            invoice,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
    pub total: usize,
    pub invoices: Vec<Invoice>,
}

impl From<Vec<Invoice>> for ListInvoicesResponse {
    fn from(invoices: Vec<Invoice>) -> Self {
        Self {
            total: invoices.len(),
            invoices,
        }
    }
}

pub fn points_of_sale_to_json(points: &[PointOfSaleId]) -> serde_json::Value {
    serde_json::json!(points.iter().map(|p| p.get()).collect::<Vec<_>>())
}
