//! Summary statistics over invoice collections.
//!
//! Amounts are summed as raw magnitudes regardless of their currency code.
//! A mixed-currency set therefore yields a total that is not monetarily
//! meaningful; the dashboard formats it with one display currency anyway.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use billing_core::{BillingError, BillingResult, ValueObject};

use crate::invoice::{CurrencyCode, Invoice, InvoiceRecord, InvoiceStatus};

/// Aggregate counts and monetary totals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total: usize,
    pub draft: usize,
    pub sent: usize,
    pub paid: usize,
    pub overdue: usize,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub overdue_amount: Decimal,
    /// Percentage of `total_amount` that is paid, 0..=100.
    pub collection_rate: u8,
}

impl ValueObject for StatsSummary {}

impl StatsSummary {
    pub fn count(&self, status: InvoiceStatus) -> usize {
        match status {
            InvoiceStatus::Draft => self.draft,
            InvoiceStatus::Sent => self.sent,
            InvoiceStatus::Paid => self.paid,
            InvoiceStatus::Overdue => self.overdue,
        }
    }
}

/// Single-pass accumulator shared by the typed and raw entry points.
#[derive(Debug, Default)]
struct Tally {
    summary: StatsSummary,
    first_currency: Option<CurrencyCode>,
    mixed_currency: bool,
}

impl Tally {
    fn add(&mut self, status: InvoiceStatus, amount: Decimal, currency: &CurrencyCode) {
        let s = &mut self.summary;
        s.total += 1;
        match status {
            InvoiceStatus::Draft => s.draft += 1,
            InvoiceStatus::Sent => s.sent += 1,
            InvoiceStatus::Paid => {
                s.paid += 1;
                s.paid_amount = s.paid_amount.saturating_add(amount);
            }
            InvoiceStatus::Overdue => {
                s.overdue += 1;
                s.overdue_amount = s.overdue_amount.saturating_add(amount);
            }
        }
        s.total_amount = s.total_amount.saturating_add(amount);

        match &self.first_currency {
            None => self.first_currency = Some(currency.clone()),
            Some(first) if first != currency => self.mixed_currency = true,
            Some(_) => {}
        }
    }

    fn finish(mut self) -> StatsSummary {
        self.summary.collection_rate =
            collection_rate(self.summary.paid_amount, self.summary.total_amount);

        if self.mixed_currency {
            tracing::warn!(
                invoices = self.summary.total,
                "summarized invoices with mixed currencies; totals are raw sums"
            );
        }
        tracing::debug!(
            invoices = self.summary.total,
            collection_rate = self.summary.collection_rate,
            "summarized invoices"
        );
        self.summary
    }
}

/// `round(paid / total * 100)` with halves rounded up; 0 for an empty total.
///
/// The result is clamped to 0..=100. A ratio too large to represent counts
/// as 100.
pub fn collection_rate(paid_amount: Decimal, total_amount: Decimal) -> u8 {
    if total_amount <= Decimal::ZERO || paid_amount <= Decimal::ZERO {
        return 0;
    }
    let Some(ratio) = paid_amount
        .checked_div(total_amount)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
    else {
        return 100;
    };
    ratio
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u8()
        .map_or(100, |rate| rate.min(100))
}

/// Produces [`StatsSummary`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsAggregator;

impl StatsAggregator {
    pub fn summarize(invoices: &[Invoice]) -> StatsSummary {
        let mut tally = Tally::default();
        for invoice in invoices {
            tally.add(invoice.status(), invoice.amount(), invoice.currency());
        }
        tally.finish()
    }

    /// Summarize raw records whose status has not been parsed yet.
    ///
    /// A status outside the closed set fails the whole pass with
    /// `InvalidStatusValue`, and a negative amount fails it with `Validation`.
    /// No partial summary is returned.
    pub fn summarize_records(records: &[InvoiceRecord]) -> BillingResult<StatsSummary> {
        let mut tally = Tally::default();
        for record in records {
            let status = record
                .status
                .parse::<InvoiceStatus>()
                .and_then(|status| {
                    if record.amount < Decimal::ZERO {
                        return Err(BillingError::validation(format!(
                            "invoice {} amount must be non-negative (got {})",
                            record.id, record.amount
                        )));
                    }
                    Ok(status)
                })
                .inspect_err(|err| {
                    tracing::warn!(invoice_id = %record.id, error = %err, "rejected invoice record");
                })?;
            tally.add(status, record.amount, &record.currency);
        }
        Ok(tally.finish())
    }
}
