//! Invoice management page state: filtered rows plus stat cards.

use serde::Serialize;

use billing_core::BillingResult;

use crate::config::DashboardConfig;
use crate::display::format_summary_amount;
use crate::filter::{FilterEngine, FilterSpec};
use crate::invoice::Invoice;
use crate::source::InvoiceSource;
use crate::stats::{StatsAggregator, StatsSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub invoices: Vec<Invoice>,
    pub stats: StatsSummary,
    pub total_invoices: usize,
    pub filtered_count: usize,
    pub has_active_filters: bool,
}

impl DashboardView {
    /// Load from `source`, filter with `spec`, and summarize the filtered subset.
    pub fn build(
        source: &dyn InvoiceSource,
        spec: &FilterSpec,
        config: &DashboardConfig,
    ) -> BillingResult<Self> {
        let all = source.list()?;
        Ok(Self::from_invoices(&all, spec, config))
    }

    pub fn from_invoices(all: &[Invoice], spec: &FilterSpec, config: &DashboardConfig) -> Self {
        let invoices = FilterEngine::apply(all, spec);
        let stats = StatsAggregator::summarize(&invoices);
        Self {
            filtered_count: invoices.len(),
            total_invoices: all.len(),
            has_active_filters: spec.is_active_against(&config.reset_filter()),
            invoices,
            stats,
        }
    }

    /// Filter badge text (`3 of 12`), shown only while filters are active.
    pub fn filter_badge(&self) -> Option<String> {
        self.has_active_filters
            .then(|| format!("{} of {}", self.filtered_count, self.total_invoices))
    }

    /// `($paid, $total)` for the "Paid vs Total" card.
    pub fn paid_vs_total(&self, config: &DashboardConfig) -> (String, String) {
        (
            format_summary_amount(self.stats.paid_amount, config),
            format_summary_amount(self.stats.total_amount, config),
        )
    }
}
