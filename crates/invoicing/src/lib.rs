//! Invoicing dashboard core.
//!
//! Filtering and aggregation over already-loaded invoice collections,
//! implemented as deterministic domain logic (no IO, no HTTP, no storage).
//! The UI layer owns view state and passes it in as plain values.

pub mod config;
pub mod dashboard;
pub mod display;
pub mod filter;
pub mod invoice;
pub mod source;
pub mod stats;

pub use config::DashboardConfig;
pub use dashboard::DashboardView;
pub use filter::{AmountRange, DateField, DateRange, FilterEngine, FilterSpec, DEFAULT_AMOUNT_MAX};
pub use invoice::{
    CurrencyCode, Customer, Invoice, InvoiceId, InvoiceRecord, InvoiceStatus, PaymentMethod,
};
pub use source::{InMemoryInvoiceSource, InvoiceSource};
pub use stats::{StatsAggregator, StatsSummary};
