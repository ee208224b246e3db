//! Sequential invoice numbering (`PPPPP-NNNNNNNN`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use einvoice_core::PointOfSaleId;

use crate::series::InvoiceSeries;

/// Formatted invoice number: 5-digit point of sale, dash, 8-digit sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    /// Zero-pads both parts; values wider than the field are kept intact.
    pub fn format(point_of_sale: PointOfSaleId, sequence: u64) -> Self {
        Self(format!("{:05}-{:08}", point_of_sale.get(), sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sequence part of the number, if well-formed.
    pub fn sequence(&self) -> Option<u64> {
        self.0.split_once('-')?.1.parse().ok()
    }
}

impl core::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Next sequence number per series.
///
/// One counter per series, shared by every point of sale: two invoices from
/// different points of sale never reuse a sequence value within a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesCounters {
    next: BTreeMap<InvoiceSeries, u64>,
}

impl SeriesCounters {
    pub fn new() -> Self {
        Self {
            next: InvoiceSeries::ALL.iter().map(|s| (*s, 1)).collect(),
        }
    }

    /// Sequence value the next call to [`Self::next_invoice_number`] will use.
    pub fn peek(&self, series: InvoiceSeries) -> u64 {
        self.next.get(&series).copied().unwrap_or(1)
    }

    /// Format the next number for `series` and consume its sequence value.
    pub fn next_invoice_number(
        &mut self,
        series: InvoiceSeries,
        point_of_sale: PointOfSaleId,
    ) -> InvoiceNumber {
        let counter = self.next.entry(series).or_insert(1);
        let number = InvoiceNumber::format(point_of_sale, *counter);
        *counter += 1;
        number
    }
}

impl Default for SeriesCounters {
    fn default() -> Self {
        Self::new()
    }
}
