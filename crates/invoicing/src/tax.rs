//! VAT (IVA) calculation for invoice line items.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use einvoice_core::{DomainError, DomainResult};

use crate::items::LineItem;
use crate::series::InvoiceSeries;

/// Flat VAT rate applied to every invoice (21%).
pub const VAT_RATE: Decimal = Decimal::from_parts(21, 0, 0, false, 2);

/// Derived invoice amounts, each rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Round to 2 decimals, halves away from zero (half-up for non-negative amounts).
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn out_of_range() -> DomainError {
    DomainError::invalid_input("item amounts out of range")
}

/// Compute subtotal, tax and total for `items` under `series`.
///
/// Series B reports tax-inclusive prices: `subtotal` equals `total` and `tax`
/// is therefore always zero.
pub fn calculate_totals(items: &[LineItem], series: InvoiceSeries) -> DomainResult<Totals> {
    let subtotal = items.iter().try_fold(Decimal::ZERO, |acc, item| {
        item.amount().and_then(|amount| acc.checked_add(amount))
    });
    let subtotal = subtotal.ok_or_else(out_of_range)?;
    let tax = subtotal.checked_mul(VAT_RATE).ok_or_else(out_of_range)?;
    let total = subtotal.checked_add(tax).ok_or_else(out_of_range)?;

    let totals = match series {
        InvoiceSeries::A => Totals {
            subtotal: round_half_up(subtotal),
            tax: round_half_up(tax),
            total: round_half_up(total),
        },
        InvoiceSeries::B => {
            let inclusive_subtotal = total;
            Totals {
                subtotal: round_half_up(inclusive_subtotal),
                tax: round_half_up(total - inclusive_subtotal),
                total: round_half_up(total),
            }
        }
    };
    Ok(totals)
}
