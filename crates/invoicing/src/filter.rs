//! Invoice filtering.
//!
//! A [`FilterSpec`] is plain view state owned by the caller. [`FilterEngine`]
//! applies it to an already-loaded invoice collection without mutating it.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use billing_core::ValueObject;

use crate::invoice::{Invoice, InvoiceStatus};

/// Upper amount bound of the reset filter.
pub const DEFAULT_AMOUNT_MAX: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Which invoice date a [`DateRange`] is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateField {
    #[default]
    Issue,
    Due,
}

impl DateField {
    fn of(self, invoice: &Invoice) -> Option<NaiveDate> {
        match self {
            DateField::Issue => invoice.issue_date(),
            DateField::Due => invoice.due_date(),
        }
    }
}

/// Inclusive date window. Only applied when both bounds are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    #[serde(default)]
    pub field: DateField,
}

impl ValueObject for DateRange {}

impl DateRange {
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            field: DateField::Issue,
        }
    }

    pub fn on_field(mut self, field: DateField) -> Self {
        self.field = field;
        self
    }

    /// Both bounds present; a lone bound leaves the date filter off.
    pub fn is_applied(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    fn matches(&self, invoice: &Invoice) -> bool {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return true;
        };
        match self.field.of(invoice) {
            Some(date) => start <= date && date <= end,
            None => false,
        }
    }
}

/// Inclusive amount bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl ValueObject for AmountRange {}

impl Default for AmountRange {
    fn default() -> Self {
        Self {
            min: Decimal::ZERO,
            max: DEFAULT_AMOUNT_MAX,
        }
    }
}

impl AmountRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// `[0, Decimal::MAX]`, matching every valid invoice amount.
    pub fn unbounded() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::MAX,
        }
    }

    /// Build bounds from raw form input. Text that does not parse becomes 0.
    pub fn from_input(min: &str, max: &str) -> Self {
        Self {
            min: coerce_amount(min),
            max: coerce_amount(max),
        }
    }

    pub fn contains(&self, amount: Decimal) -> bool {
        self.min <= amount && amount <= self.max
    }
}

fn coerce_amount(raw: &str) -> Decimal {
    raw.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Current filter criteria.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default)]
    pub date_range: DateRange,
    /// Empty set means every status matches.
    #[serde(default)]
    pub status: BTreeSet<InvoiceStatus>,
    /// Case-insensitive substring of the customer name; empty matches all.
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub amount_range: AmountRange,
}

impl ValueObject for FilterSpec {}

impl FilterSpec {
    /// The canonical "no filter" spec: no dates, no statuses, no customer,
    /// amounts `[0, 10000]`.
    pub fn reset() -> Self {
        Self::default()
    }

    /// Reset spec with a different upper amount bound.
    pub fn reset_with_max(max: Decimal) -> Self {
        Self {
            amount_range: AmountRange::new(Decimal::ZERO, max),
            ..Self::default()
        }
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = InvoiceStatus>) -> Self {
        self.status = statuses.into_iter().collect();
        self
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = customer.into();
        self
    }

    pub fn with_amount_range(mut self, range: AmountRange) -> Self {
        self.amount_range = range;
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Add `status` if absent, remove it if present.
    pub fn toggle_status(&mut self, status: InvoiceStatus) {
        if !self.status.remove(&status) {
            self.status.insert(status);
        }
    }

    /// Whether this spec narrows anything compared to [`FilterSpec::reset`].
    pub fn has_active_filters(&self) -> bool {
        self.is_active_against(&Self::reset())
    }

    /// Like [`FilterSpec::has_active_filters`], against a caller-chosen
    /// baseline (e.g. a configured amount ceiling).
    pub fn is_active_against(&self, baseline: &FilterSpec) -> bool {
        !self.status.is_empty()
            || !self.customer.is_empty()
            || self.amount_range.min > baseline.amount_range.min
            || self.amount_range.max < baseline.amount_range.max
            || self.date_range.is_applied()
    }

    /// Every rule must pass.
    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.matches_status(invoice)
            && self.matches_customer(invoice)
            && self.amount_range.contains(invoice.amount())
            && self.date_range.matches(invoice)
    }

    fn matches_status(&self, invoice: &Invoice) -> bool {
        self.status.is_empty() || self.status.contains(&invoice.status())
    }

    fn matches_customer(&self, invoice: &Invoice) -> bool {
        if self.customer.is_empty() {
            return true;
        }
        invoice
            .customer()
            .name
            .to_lowercase()
            .contains(&self.customer.to_lowercase())
    }
}

/// Applies a [`FilterSpec`] to invoice collections.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine;

impl FilterEngine {
    /// Matching invoices, in input order.
    pub fn apply(invoices: &[Invoice], spec: &FilterSpec) -> Vec<Invoice> {
        let matched: Vec<Invoice> = Self::iter(invoices, spec).cloned().collect();
        tracing::debug!(
            input = invoices.len(),
            matched = matched.len(),
            active = spec.has_active_filters(),
            "applied invoice filter"
        );
        matched
    }

    /// Borrowing variant of [`FilterEngine::apply`].
    pub fn iter<'a>(
        invoices: &'a [Invoice],
        spec: &'a FilterSpec,
    ) -> impl Iterator<Item = &'a Invoice> + 'a {
        invoices.iter().filter(move |invoice| spec.matches(invoice))
    }
}
