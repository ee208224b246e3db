//! Invoicing domain module.
//!
//! Business rules for simulated electronic invoices: tax totals, sequential
//! numbering, mock authorization codes (CAE) and the in-memory ledger that
//! ties them together. Pure domain logic (no IO, no HTTP).

pub mod authorization;
pub mod invoice;
pub mod items;
pub mod ledger;
pub mod numbering;
pub mod query;
pub mod series;
pub mod tax;

pub use authorization::{
    AUTHORIZATION_VALIDITY_DAYS, AuthorizationCode, AuthorizationCodeSource, RandomCodeSource,
    SequentialCodeSource, authorization_expiry, generate_authorization_code,
};
pub use invoice::{CreateInvoice, Invoice, InvoiceStatus};
pub use items::{LineItem, decode_items};
pub use ledger::{InvoiceLedger, REGISTERED_POINTS_OF_SALE};
pub use numbering::{InvoiceNumber, SeriesCounters};
pub use query::{CodeVerification, InvoiceFilter, LedgerStatistics, parse_filter_timestamp};
pub use series::InvoiceSeries;
pub use tax::{Totals, VAT_RATE, calculate_totals, round_half_up};
