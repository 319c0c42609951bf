//! Invoice source port.
//!
//! The UI layer loads invoices and applies status actions through this trait.
//! [`InMemoryInvoiceSource`] is the synchronous implementation used by tests
//! and mock dashboards.

use std::sync::{Arc, RwLock};

use billing_core::{BillingError, BillingResult, Entity};

use crate::invoice::{Invoice, InvoiceId, InvoiceStatus};

pub trait InvoiceSource: Send + Sync {
    /// All invoices, in source order.
    fn list(&self) -> BillingResult<Vec<Invoice>>;
    fn get(&self, id: &InvoiceId) -> BillingResult<Option<Invoice>>;
    /// Move an invoice to `status`, returning the updated invoice.
    fn update_status(&self, id: &InvoiceId, status: InvoiceStatus) -> BillingResult<Invoice>;
}

impl<S> InvoiceSource for Arc<S>
where
    S: InvoiceSource + ?Sized,
{
    fn list(&self) -> BillingResult<Vec<Invoice>> {
        (**self).list()
    }

    fn get(&self, id: &InvoiceId) -> BillingResult<Option<Invoice>> {
        (**self).get(id)
    }

    fn update_status(&self, id: &InvoiceId, status: InvoiceStatus) -> BillingResult<Invoice> {
        (**self).update_status(id, status)
    }
}

/// In-memory source for tests/dev. Keeps insertion order.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceSource {
    inner: RwLock<Vec<Invoice>>,
}

impl InMemoryInvoiceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with invoices; later duplicates of an id are rejected.
    pub fn with_invoices(invoices: impl IntoIterator<Item = Invoice>) -> BillingResult<Self> {
        let source = Self::new();
        for invoice in invoices {
            source.insert(invoice)?;
        }
        Ok(source)
    }

    pub fn insert(&self, invoice: Invoice) -> BillingResult<()> {
        let mut items = self
            .inner
            .write()
            .map_err(|_| BillingError::internal("invoice source lock poisoned"))?;
        if items.iter().any(|i| i.has_id(invoice.id())) {
            return Err(BillingError::validation(format!(
                "duplicate invoice id {}",
                invoice.id()
            )));
        }
        items.push(invoice);
        Ok(())
    }
}

impl InvoiceSource for InMemoryInvoiceSource {
    fn list(&self) -> BillingResult<Vec<Invoice>> {
        let items = self
            .inner
            .read()
            .map_err(|_| BillingError::internal("invoice source lock poisoned"))?;
        Ok(items.clone())
    }

    fn get(&self, id: &InvoiceId) -> BillingResult<Option<Invoice>> {
        let items = self
            .inner
            .read()
            .map_err(|_| BillingError::internal("invoice source lock poisoned"))?;
        Ok(items.iter().find(|i| i.has_id(id)).cloned())
    }

    fn update_status(&self, id: &InvoiceId, status: InvoiceStatus) -> BillingResult<Invoice> {
        let mut items = self
            .inner
            .write()
            .map_err(|_| BillingError::internal("invoice source lock poisoned"))?;
        let slot = items
            .iter_mut()
            .find(|i| i.has_id(id))
            .ok_or_else(|| BillingError::not_found(format!("invoice {id}")))?;

        let updated = slot.with_status(status)?;
        tracing::info!(
            invoice_id = %id,
            from = %slot.status(),
            to = %status,
            "invoice status changed"
        );
        *slot = updated.clone();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{CurrencyCode, Customer};
    use rust_decimal_macros::dec;

    fn invoice(id: &str, status: InvoiceStatus) -> Invoice {
        Invoice::new(
            InvoiceId::new(id),
            Customer::new("Acme Corp", "ap@acme.test"),
            dec!(100),
            CurrencyCode::usd(),
            status,
        )
        .unwrap()
    }

    #[test]
    fn list_keeps_insertion_order() {
        let source = InMemoryInvoiceSource::with_invoices([
            invoice("INV-2", InvoiceStatus::Sent),
            invoice("INV-1", InvoiceStatus::Draft),
        ])
        .unwrap();

        let ids: Vec<String> = source
            .list()
            .unwrap()
            .iter()
            .map(|i| i.id().to_string())
            .collect();
        assert_eq!(ids, ["INV-2", "INV-1"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = InMemoryInvoiceSource::with_invoices([
            invoice("INV-1", InvoiceStatus::Sent),
            invoice("INV-1", InvoiceStatus::Draft),
        ])
        .unwrap_err();
        assert!(matches!(err, BillingError::Validation(_)));
    }

    #[test]
    fn mark_sent_invoice_paid() {
        let source = Arc::new(
            InMemoryInvoiceSource::with_invoices([invoice("INV-1", InvoiceStatus::Sent)]).unwrap(),
        );
        let id = InvoiceId::new("INV-1");

        let updated = source.update_status(&id, InvoiceStatus::Paid).unwrap();
        assert_eq!(updated.status(), InvoiceStatus::Paid);
        assert_eq!(
            source.get(&id).unwrap().map(|i| i.status()),
            Some(InvoiceStatus::Paid)
        );
    }

    #[test]
    fn rejected_transition_leaves_invoice_untouched() {
        let source =
            InMemoryInvoiceSource::with_invoices([invoice("INV-1", InvoiceStatus::Paid)]).unwrap();
        let id = InvoiceId::new("INV-1");

        let err = source.update_status(&id, InvoiceStatus::Draft).unwrap_err();
        assert!(matches!(err, BillingError::InvalidTransition { .. }));
        assert_eq!(
            source.get(&id).unwrap().map(|i| i.status()),
            Some(InvoiceStatus::Paid)
        );
    }

    #[test]
    fn unknown_id_is_not_found() {
        let source = InMemoryInvoiceSource::new();
        let err = source
            .update_status(&InvoiceId::new("INV-404"), InvoiceStatus::Sent)
            .unwrap_err();
        assert_eq!(err, BillingError::not_found("invoice INV-404"));
        assert_eq!(source.get(&InvoiceId::new("INV-404")).unwrap(), None);
    }
}
