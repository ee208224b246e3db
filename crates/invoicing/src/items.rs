//! Invoice line items and their decoding from request JSON.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use einvoice_core::{DomainError, DomainResult};

const QUANTITY_KEYS: [&str; 2] = ["quantity", "cantidad"];
const UNIT_PRICE_KEYS: [&str; 2] = ["unitPrice", "precioUnitario"];

/// One invoice line: quantity times unit price.
///
/// Fields other than quantity and unit price are kept in `extra` and echoed
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LineItem {
    pub fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            quantity,
            unit_price,
            extra: Map::new(),
        }
    }

    /// `None` when the product does not fit in a `Decimal`.
    pub fn amount(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.unit_price)
    }

    pub fn is_negative(&self) -> bool {
        self.quantity < Decimal::ZERO || self.unit_price < Decimal::ZERO
    }

    /// Decode the item at `position` (1-based, for error messages).
    ///
    /// Accepts `quantity`/`unitPrice` and the legacy `cantidad`/`precioUnitario`.
    pub fn from_json(position: usize, value: &Value) -> DomainResult<Self> {
        let object = value.as_object().ok_or_else(|| {
            DomainError::invalid_input(format!("item {position} must be an object"))
        })?;

        let quantity = decimal_field(object, &QUANTITY_KEYS)
            .ok_or_else(|| {
                DomainError::invalid_input(format!("item {position} needs a numeric quantity"))
            })?
            .ok_or_else(out_of_range)?;
        let unit_price = decimal_field(object, &UNIT_PRICE_KEYS)
            .ok_or_else(|| {
                DomainError::invalid_input(format!("item {position} needs a numeric unitPrice"))
            })?
            .ok_or_else(out_of_range)?;

        let extra = object
            .iter()
            .filter(|(k, _)| {
                !QUANTITY_KEYS.contains(&k.as_str()) && !UNIT_PRICE_KEYS.contains(&k.as_str())
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            quantity,
            unit_price,
            extra,
        })
    }
}

/// Decode a JSON array of items; anything else is invalid input.
pub fn decode_items(value: &Value) -> DomainResult<Vec<LineItem>> {
    let array = value
        .as_array()
        .ok_or_else(|| DomainError::invalid_input("items must be a list"))?;

    array
        .iter()
        .enumerate()
        .map(|(i, item)| LineItem::from_json(i + 1, item))
        .collect()
}

/// Outer `None`: no numeric field. Inner `None`: a number `Decimal` cannot hold.
fn decimal_field(object: &Map<String, Value>, keys: &[&str]) -> Option<Option<Decimal>> {
    keys.iter()
        .find_map(|k| object.get(*k))
        .and_then(Value::as_number)
        .map(json_number_to_decimal)
}

fn out_of_range() -> DomainError {
    DomainError::invalid_input("item amounts out of range")
}

/// Exact conversion through the number's shortest decimal text, so `21.5`
/// becomes 21.5 rather than its nearest binary approximation.
fn json_number_to_decimal(n: &serde_json::Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}
