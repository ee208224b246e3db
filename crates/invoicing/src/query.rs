//! Read-side shapes: list filters, code verification and statistics.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use einvoice_core::{DomainError, DomainResult};

use crate::invoice::Invoice;

/// Optional list filters; all present filters must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilter {
    /// Exact, case-sensitive match on the series letter.
    pub series: Option<String>,
    /// Issued on or after.
    pub from: Option<DateTime<Utc>>,
    /// Issued on or before.
    pub to: Option<DateTime<Utc>>,
}

impl InvoiceFilter {
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let Some(series) = &self.series {
            if invoice.series.as_str() != series {
                return false;
            }
        }
        if let Some(from) = self.from {
            if invoice.issued_at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if invoice.issued_at > to {
                return false;
            }
        }
        true
    }
}

/// Parse an ISO-8601 filter timestamp.
///
/// Accepts RFC 3339, naive date-times (read as UTC) and bare dates (midnight UTC).
pub fn parse_filter_timestamp(raw: &str) -> DomainResult<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DomainError::invalid_input(format!("invalid ISO-8601 date: {raw}")))
}

/// Result of looking up an authorization code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeVerification {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<Invoice>,
}

impl CodeVerification {
    pub fn not_found() -> Self {
        Self {
            valid: false,
            message: "code not found".to_string(),
            invoice: None,
        }
    }

    pub fn for_invoice(invoice: Invoice, now: DateTime<Utc>) -> Self {
        let expired = invoice.is_authorization_expired(now);
        Self {
            valid: !expired,
            message: if expired { "code expired" } else { "code valid" }.to_string(),
            invoice: Some(invoice),
        }
    }
}

/// Aggregate counts over the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LedgerStatistics {
    #[serde(rename = "totalInvoices")]
    pub total_invoices: usize,
    #[serde(rename = "facturasA")]
    pub series_a: usize,
    #[serde(rename = "facturasB")]
    pub series_b: usize,
    /// Sum of invoice totals, rounded to 2 decimals.
    #[serde(rename = "totalFacturado", with = "rust_decimal::serde::float")]
    pub total_billed: Decimal,
}
