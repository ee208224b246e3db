use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use einvoice_core::{DomainError, DomainResult, InvoiceId, PointOfSaleId};
use einvoice_invoicing::{
    CodeVerification, CreateInvoice, Invoice, InvoiceFilter, InvoiceLedger, LedgerStatistics,
    REGISTERED_POINTS_OF_SALE,
};

/// Application services shared by all handlers.
///
/// The ledger sits behind one mutex: every read and every creation takes the
/// same lock, so id and sequence assignment is serialized.
#[derive(Debug)]
pub struct AppServices {
    ledger: Mutex<InvoiceLedger>,
}

impl Default for AppServices {
    fn default() -> Self {
        Self::new()
    }
}

impl AppServices {
    pub fn new() -> Self {
        Self::with_ledger(InvoiceLedger::new())
    }

    pub fn with_ledger(ledger: InvoiceLedger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }

    fn ledger(&self) -> DomainResult<MutexGuard<'_, InvoiceLedger>> {
        self.ledger.lock().map_err(|_| {
            tracing::error!("invoice ledger lock poisoned");
            DomainError::internal("invoice ledger unavailable")
        })
    }

    pub fn create_invoice(&self, cmd: CreateInvoice) -> DomainResult<Invoice> {
        self.ledger()?.create(cmd)
    }

    pub fn list_invoices(&self, filter: &InvoiceFilter) -> DomainResult<Vec<Invoice>> {
        Ok(self.ledger()?.list(filter))
    }

    pub fn get_invoice(&self, id: InvoiceId) -> DomainResult<Invoice> {
        self.ledger()?.get(id).cloned()
    }

    pub fn points_of_sale(&self) -> &'static [PointOfSaleId] {
        &REGISTERED_POINTS_OF_SALE
    }

    pub fn verify_authorization_code(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<CodeVerification> {
        Ok(self.ledger()?.verify_authorization_code(code, now))
    }

    pub fn statistics(&self) -> DomainResult<LedgerStatistics> {
        Ok(self.ledger()?.statistics())
    }
}
