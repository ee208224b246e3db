use core::str::FromStr;

use serde::{Deserialize, Serialize};

use einvoice_core::DomainError;

/// Invoice series (AFIP "tipo de comprobante").
///
/// - `A`: VAT itemized separately.
/// - `B`: prices are VAT-inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InvoiceSeries {
    A,
    B,
}

impl InvoiceSeries {
    pub const ALL: [InvoiceSeries; 2] = [InvoiceSeries::A, InvoiceSeries::B];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceSeries::A => "A",
            InvoiceSeries::B => "B",
        }
    }
}

impl core::fmt::Display for InvoiceSeries {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceSeries {
    type Err = DomainError;

    /// Exact, case-sensitive match: `"a"` is not a valid series.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(InvoiceSeries::A),
            "B" => Ok(InvoiceSeries::B),
            _ => Err(DomainError::invalid_input("invalid invoice type")),
        }
    }
}
