//! In-memory invoice ledger: ordered invoices plus per-series counters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use einvoice_core::{DomainError, DomainResult, InvoiceId, PointOfSaleId};

use crate::authorization::{AuthorizationCodeSource, RandomCodeSource, authorization_expiry};
use crate::invoice::{CreateInvoice, Invoice, InvoiceStatus};
use crate::numbering::SeriesCounters;
use crate::query::{CodeVerification, InvoiceFilter, LedgerStatistics};
use crate::series::InvoiceSeries;
use crate::items::decode_items;
use crate::tax::{calculate_totals, round_half_up};

/// Points of sale allowed to issue invoices.
pub const REGISTERED_POINTS_OF_SALE: [PointOfSaleId; 5] = [
    PointOfSaleId::new(1),
    PointOfSaleId::new(2),
    PointOfSaleId::new(3),
    PointOfSaleId::new(4),
    PointOfSaleId::new(5),
];

/// The ledger owns all mutable invoicing state.
///
/// It is not synchronized itself: callers sharing it across threads must hold
/// a single lock for the whole of [`InvoiceLedger::create`], since creation
/// reads and writes both the invoice list and the counters.
pub struct InvoiceLedger {
    invoices: Vec<Invoice>,
    counters: SeriesCounters,
    codes: Box<dyn AuthorizationCodeSource>,
}

impl core::fmt::Debug for InvoiceLedger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InvoiceLedger")
            .field("invoices", &self.invoices.len())
            .field("counters", &self.counters)
            .finish_non_exhaustive()
    }
}

impl Default for InvoiceLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceLedger {
    pub fn new() -> Self {
        Self::with_code_source(Box::new(RandomCodeSource))
    }

    pub fn with_code_source(codes: Box<dyn AuthorizationCodeSource>) -> Self {
        Self {
            invoices: Vec::new(),
            counters: SeriesCounters::new(),
            codes,
        }
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    pub fn counters(&self) -> &SeriesCounters {
        &self.counters
    }

    pub fn points_of_sale(&self) -> &'static [PointOfSaleId] {
        &REGISTERED_POINTS_OF_SALE
    }

    /// Validate, number, authorize and store a new invoice.
    ///
    /// Validation order is fixed and the first failure wins: series, point of
    /// sale, items. Items are only decoded once the first two checks pass, so a
    /// bad series is reported even when the items are malformed. Nothing is
    /// consumed (id, sequence, code) on failure.
    pub fn create(&mut self, cmd: CreateInvoice) -> DomainResult<Invoice> {
        let series: InvoiceSeries = cmd
            .series
            .as_deref()
            .ok_or_else(|| DomainError::invalid_input("invalid invoice type"))?
            .parse()?;

        let point_of_sale = cmd
            .point_of_sale
            .and_then(|p| u32::try_from(p).ok())
            .map(PointOfSaleId::new)
            .filter(|p| REGISTERED_POINTS_OF_SALE.contains(p))
            .ok_or_else(|| DomainError::invalid_input("invalid point of sale"))?;

        let items = match cmd.items {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(raw) => decode_items(&raw)?,
        };
        if items.is_empty() {
            return Err(DomainError::invalid_input("must include at least one item"));
        }
        if items.iter().any(|item| item.is_negative()) {
            return Err(DomainError::invalid_input(
                "item quantity and unit price must not be negative",
            ));
        }

        let totals = calculate_totals(&items, series)?;

        let id = InvoiceId::new(self.invoices.len() as u64 + 1);
        let number = self.counters.next_invoice_number(series, point_of_sale);
        let authorization_code = self.codes.next_code();

        let invoice = Invoice {
            id,
            series,
            number,
            point_of_sale,
            authorization_code,
            issued_at: cmd.issued_at,
            authorization_expires_at: authorization_expiry(cmd.issued_at),
            customer: cmd.customer,
            items,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            status: InvoiceStatus::Authorized,
        };

        tracing::debug!(invoice_id = %invoice.id, number = %invoice.number, "invoice stored");
        self.invoices.push(invoice.clone());
        Ok(invoice)
    }

    /// Invoices matching `filter`, in insertion order.
    pub fn list(&self, filter: &InvoiceFilter) -> Vec<Invoice> {
        self.invoices
            .iter()
            .filter(|inv| filter.matches(inv))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: InvoiceId) -> DomainResult<&Invoice> {
        self.invoices
            .iter()
            .find(|inv| inv.id == id)
            .ok_or_else(|| DomainError::not_found("invoice not found"))
    }

    /// Check the first invoice carrying `code` against `now`.
    pub fn verify_authorization_code(&self, code: &str, now: DateTime<Utc>) -> CodeVerification {
        match self
            .invoices
            .iter()
            .find(|inv| inv.authorization_code.as_str() == code)
        {
            Some(invoice) => CodeVerification::for_invoice(invoice.clone(), now),
            None => CodeVerification::not_found(),
        }
    }

    pub fn statistics(&self) -> LedgerStatistics {
        let count = |series: InvoiceSeries| {
            self.invoices
                .iter()
                .filter(|inv| inv.series == series)
                .count()
        };

        LedgerStatistics {
            total_invoices: self.invoices.len(),
            series_a: count(InvoiceSeries::A),
            series_b: count(InvoiceSeries::B),
            total_billed: round_half_up(
                self.invoices
                    .iter()
                    .fold(Decimal::ZERO, |acc, inv| acc.saturating_add(inv.total)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorization::SequentialCodeSource;
    use chrono::Duration;
    use core::str::FromStr;
    use proptest::prelude::*;
    use serde_json::{Value, json};

    fn test_ledger() -> InvoiceLedger {
        InvoiceLedger::with_code_source(Box::new(SequentialCodeSource::default()))
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(quantity: f64, unit_price: f64) -> Value {
        json!({ "quantity": quantity, "unitPrice": unit_price })
    }

    fn create_cmd(series: &str, point_of_sale: i64, items: Vec<Value>) -> CreateInvoice {
        CreateInvoice {
            series: Some(series.to_string()),
            point_of_sale: Some(point_of_sale),
            customer: json!({ "name": "ACME SA", "cuit": "30-12345678-9" }),
            items: Some(Value::Array(items)),
            issued_at: test_time(),
        }
    }

    fn single_item() -> Vec<Value> {
        vec![line(2.0, 100.0)]
    }

    #[test]
    fn create_assigns_sequential_ids_and_numbers() {
        let mut ledger = test_ledger();

        let first = ledger.create(create_cmd("A", 1, single_item())).unwrap();
        let second = ledger.create(create_cmd("A", 1, single_item())).unwrap();

        assert_eq!(first.id, InvoiceId::new(1));
        assert_eq!(second.id, InvoiceId::new(2));
        assert_eq!(first.number.as_str(), "00001-00000001");
        assert_eq!(second.number.as_str(), "00001-00000002");
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn create_fills_derived_fields() {
        let mut ledger = test_ledger();
        let cmd = create_cmd("A", 3, single_item());
        let issued_at = cmd.issued_at;

        let invoice = ledger.create(cmd).unwrap();

        assert_eq!(invoice.series, InvoiceSeries::A);
        assert_eq!(invoice.point_of_sale, PointOfSaleId::new(3));
        assert_eq!(invoice.authorization_code.as_str(), "10000000000000");
        assert_eq!(invoice.issued_at, issued_at);
        assert_eq!(invoice.authorization_expires_at, issued_at + Duration::days(10));
        assert_eq!(invoice.subtotal, d("200"));
        assert_eq!(invoice.tax, d("42"));
        assert_eq!(invoice.total, d("242"));
        assert_eq!(invoice.items[0].quantity, d("2"));
        assert_eq!(invoice.items[0].unit_price, d("100"));
        assert_eq!(invoice.status, InvoiceStatus::Authorized);
        assert_eq!(invoice.customer["name"], "ACME SA");
    }

    #[test]
    fn invalid_series_is_rejected_without_side_effects() {
        let mut ledger = test_ledger();

        let err = ledger.create(create_cmd("C", 1, single_item())).unwrap_err();

        assert_eq!(err, DomainError::invalid_input("invalid invoice type"));
        assert!(ledger.is_empty());
        assert_eq!(ledger.counters().peek(InvoiceSeries::A), 1);
        assert_eq!(ledger.counters().peek(InvoiceSeries::B), 1);
    }

    #[test]
    fn missing_series_is_rejected() {
        let mut ledger = test_ledger();
        let mut cmd = create_cmd("A", 1, single_item());
        cmd.series = None;

        let err = ledger.create(cmd).unwrap_err();
        assert_eq!(err, DomainError::invalid_input("invalid invoice type"));
    }

    #[test]
    fn unregistered_point_of_sale_is_rejected() {
        let mut ledger = test_ledger();

        for pos in [0, 6, -1, i64::MAX] {
            let err = ledger.create(create_cmd("B", pos, single_item())).unwrap_err();
            assert_eq!(err, DomainError::invalid_input("invalid point of sale"));
        }

        let mut cmd = create_cmd("B", 1, single_item());
        cmd.point_of_sale = None;
        let err = ledger.create(cmd).unwrap_err();
        assert_eq!(err, DomainError::invalid_input("invalid point of sale"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn empty_or_missing_items_consume_no_id() {
        let mut ledger = test_ledger();

        let err = ledger.create(create_cmd("A", 1, vec![])).unwrap_err();
        assert_eq!(err, DomainError::invalid_input("must include at least one item"));

        for missing in [None, Some(Value::Null)] {
            let mut cmd = create_cmd("A", 1, vec![]);
            cmd.items = missing;
            let err = ledger.create(cmd).unwrap_err();
            assert_eq!(err, DomainError::invalid_input("must include at least one item"));
        }

        let invoice = ledger.create(create_cmd("A", 1, single_item())).unwrap();
        assert_eq!(invoice.id, InvoiceId::new(1));
        assert_eq!(invoice.number.as_str(), "00001-00000001");
    }

    #[test]
    fn first_validation_failure_wins() {
        let mut ledger = test_ledger();

        let err = ledger.create(create_cmd("X", 99, vec![])).unwrap_err();
        assert_eq!(err, DomainError::invalid_input("invalid invoice type"));

        let err = ledger.create(create_cmd("A", 99, vec![])).unwrap_err();
        assert_eq!(err, DomainError::invalid_input("invalid point of sale"));
    }

    #[test]
    fn series_is_checked_before_items_are_decoded() {
        let mut ledger = test_ledger();
        let mut cmd = create_cmd("C", 1, vec![]);
        cmd.items = Some(json!([{ "quantity": "2", "unitPrice": 1 }]));

        let err = ledger.create(cmd).unwrap_err();
        assert_eq!(err, DomainError::invalid_input("invalid invoice type"));

        let mut cmd = create_cmd("A", 9, vec![]);
        cmd.items = Some(json!("not a list"));
        let err = ledger.create(cmd).unwrap_err();
        assert_eq!(err, DomainError::invalid_input("invalid point of sale"));
    }

    #[test]
    fn malformed_items_are_rejected_after_series_and_point_of_sale() {
        let mut ledger = test_ledger();
        let mut cmd = create_cmd("A", 1, vec![]);
        cmd.items = Some(json!([{ "quantity": "2", "unitPrice": 1 }]));

        let err = ledger.create(cmd).unwrap_err();
        assert_eq!(err, DomainError::invalid_input("item 1 needs a numeric quantity"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn negative_quantity_or_price_is_rejected() {
        let mut ledger = test_ledger();

        for items in [vec![line(-1.0, 100.0)], vec![line(2.0, 100.0), line(1.0, -5.0)]] {
            let err = ledger.create(create_cmd("A", 1, items)).unwrap_err();
            assert_eq!(
                err,
                DomainError::invalid_input("item quantity and unit price must not be negative")
            );
        }
        assert!(ledger.is_empty());
        assert_eq!(ledger.counters().peek(InvoiceSeries::A), 1);

        let free = ledger.create(create_cmd("A", 1, vec![line(0.0, 100.0)])).unwrap();
        assert_eq!(free.total, Decimal::ZERO);
    }

    #[test]
    fn half_cent_tax_rounds_up() {
        let mut ledger = test_ledger();
        let invoice = ledger.create(create_cmd("A", 1, vec![line(1.0, 21.5)])).unwrap();

        assert_eq!(invoice.subtotal, d("21.50"));
        assert_eq!(invoice.tax, d("4.52"));
        assert_eq!(invoice.total, d("26.02"));
    }

    #[test]
    fn extra_item_fields_are_kept() {
        let mut ledger = test_ledger();
        let items = vec![json!({ "quantity": 1, "unitPrice": 10, "description": "Widget" })];

        let invoice = ledger.create(create_cmd("B", 1, items)).unwrap();
        assert_eq!(invoice.items[0].extra.get("description"), Some(&json!("Widget")));
    }

    #[test]
    fn overflowing_amounts_are_rejected() {
        let mut ledger = test_ledger();
        let items = vec![line(1e28, 1e28)];

        let err = ledger.create(create_cmd("A", 1, items)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(ledger.is_empty());
        assert_eq!(ledger.counters().peek(InvoiceSeries::A), 1);
    }

    #[test]
    fn sequence_is_shared_across_points_of_sale() {
        let mut ledger = test_ledger();

        let first = ledger.create(create_cmd("B", 1, single_item())).unwrap();
        let second = ledger.create(create_cmd("B", 4, single_item())).unwrap();
        let other_series = ledger.create(create_cmd("A", 4, single_item())).unwrap();

        assert_eq!(first.number.as_str(), "00001-00000001");
        assert_eq!(second.number.as_str(), "00004-00000002");
        assert_eq!(other_series.number.as_str(), "00004-00000001");
    }

    #[test]
    fn list_filters_by_series_and_dates() {
        let mut ledger = test_ledger();
        let base = test_time();

        for (i, series) in ["A", "B", "A"].iter().enumerate() {
            let mut cmd = create_cmd(series, 1, single_item());
            cmd.issued_at = base + Duration::days(i as i64);
            ledger.create(cmd).unwrap();
        }

        let all = ledger.list(&InvoiceFilter::default());
        assert_eq!(
            all.iter().map(|i| i.id.get()).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let only_a = ledger.list(&InvoiceFilter {
            series: Some("A".to_string()),
            ..InvoiceFilter::default()
        });
        assert_eq!(
            only_a.iter().map(|i| i.id.get()).collect::<Vec<_>>(),
            vec![1, 3]
        );

        let unknown = ledger.list(&InvoiceFilter {
            series: Some("C".to_string()),
            ..InvoiceFilter::default()
        });
        assert!(unknown.is_empty());

        let window = ledger.list(&InvoiceFilter {
            series: None,
            from: Some(base + Duration::days(1)),
            to: Some(base + Duration::days(2)),
        });
        assert_eq!(
            window.iter().map(|i| i.id.get()).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn get_returns_not_found_for_unknown_id() {
        let mut ledger = test_ledger();
        ledger.create(create_cmd("A", 1, single_item())).unwrap();

        assert_eq!(ledger.get(InvoiceId::new(1)).unwrap().id, InvoiceId::new(1));
        assert_eq!(
            ledger.get(InvoiceId::new(2)).unwrap_err(),
            DomainError::not_found("invoice not found")
        );
    }

    #[test]
    fn verify_code_reports_validity_window() {
        let mut ledger = test_ledger();
        let invoice = ledger.create(create_cmd("A", 1, single_item())).unwrap();
        let code = invoice.authorization_code.as_str().to_string();

        let fresh = ledger.verify_authorization_code(&code, invoice.issued_at);
        assert!(fresh.valid);
        assert_eq!(fresh.message, "code valid");
        assert_eq!(fresh.invoice.as_ref().map(|i| i.id), Some(invoice.id));

        let at_expiry = ledger.verify_authorization_code(&code, invoice.authorization_expires_at);
        assert!(at_expiry.valid);

        let later = invoice.authorization_expires_at + Duration::seconds(1);
        let expired = ledger.verify_authorization_code(&code, later);
        assert!(!expired.valid);
        assert_eq!(expired.message, "code expired");
        assert!(expired.invoice.is_some());
    }

    #[test]
    fn verify_unknown_code_is_not_an_error() {
        let ledger = test_ledger();
        let result = ledger.verify_authorization_code("12345678901234", test_time());
        assert_eq!(result, CodeVerification::not_found());
        assert_eq!(result.message, "code not found");
    }

    #[test]
    fn statistics_count_by_series_and_sum_totals() {
        let mut ledger = test_ledger();
        ledger.create(create_cmd("A", 1, single_item())).unwrap();
        ledger.create(create_cmd("A", 2, single_item())).unwrap();
        ledger
            .create(create_cmd("B", 1, vec![line(1.0, 121.0)]))
            .unwrap();

        let stats = ledger.statistics();
        assert_eq!(stats.total_invoices, 3);
        assert_eq!(stats.series_a, 2);
        assert_eq!(stats.series_b, 1);
        assert_eq!(stats.total_billed, d("630.41"));
    }

    #[test]
    fn statistics_on_empty_ledger_are_zero() {
        let stats = test_ledger().statistics();
        assert_eq!(stats.total_invoices, 0);
        assert_eq!(
            serde_json::to_value(stats).unwrap(),
            serde_json::json!({
                "totalInvoices": 0,
                "facturasA": 0,
                "facturasB": 0,
                "totalFacturado": 0.0,
            })
        );
    }

    #[test]
    fn points_of_sale_registry_is_fixed() {
        let ledger = test_ledger();
        let ids: Vec<u32> = ledger.points_of_sale().iter().map(|p| p.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: across any mix of valid and invalid requests, successful
        /// creations get ids 1, 2, 3, ... and per-series sequences 1, 2, 3, ...
        #[test]
        fn ids_and_sequences_increase_by_one(
            requests in prop::collection::vec((0u8..3u8, 0i64..8i64, 0usize..3usize), 1..40)
        ) {
            let mut ledger = test_ledger();
            let mut expected_id = 1u64;
            let mut expected_seq = [1u64, 1u64];

            for (series_idx, pos, n_items) in requests {
                let series = ["A", "B", "C"][series_idx as usize];
                let items = vec![line(1.0, 10.0); n_items];

                match ledger.create(create_cmd(series, pos, items)) {
                    Ok(invoice) => {
                        prop_assert_eq!(invoice.id.get(), expected_id);
                        expected_id += 1;

                        let slot = match invoice.series {
                            InvoiceSeries::A => 0,
                            InvoiceSeries::B => 1,
                        };
                        prop_assert_eq!(invoice.number.sequence(), Some(expected_seq[slot]));
                        expected_seq[slot] += 1;
                    }
                    Err(err) => {
                        prop_assert!(matches!(err, DomainError::InvalidInput(_)));
                    }
                }
            }

            prop_assert_eq!(ledger.len() as u64, expected_id - 1);
        }
    }
}
