use core::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use billing_core::{BillingError, BillingResult, Entity};

/// Invoice identifier (e.g. `INV-2023-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

impl InvoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InvoiceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Invoice status lifecycle.
///
/// The set is closed: adding a status means touching every `match` over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::Overdue,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    /// Human-readable badge label.
    pub fn label(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
        }
    }

    /// Status changes offered to the table's action handlers.
    pub fn available_transitions(self) -> &'static [InvoiceStatus] {
        match self {
            InvoiceStatus::Draft => &[InvoiceStatus::Sent],
            InvoiceStatus::Sent | InvoiceStatus::Overdue => &[InvoiceStatus::Paid],
            InvoiceStatus::Paid => &[],
        }
    }

    pub fn can_transition_to(self, next: InvoiceStatus) -> bool {
        self.available_transitions().contains(&next)
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(InvoiceStatus::Draft),
            "sent" => Ok(InvoiceStatus::Sent),
            "paid" => Ok(InvoiceStatus::Paid),
            "overdue" => Ok(InvoiceStatus::Overdue),
            other => Err(BillingError::invalid_status(other)),
        }
    }
}

impl TryFrom<String> for InvoiceStatus {
    type Error = BillingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// ISO 4217 currency code, stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_uppercase())
    }

    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CurrencyCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for CurrencyCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

impl core::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Billed customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// How a (paid) invoice was settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard { brand: String, last4: String },
    BankTransfer,
    SepaDebit,
}

impl PaymentMethod {
    pub fn display(&self) -> String {
        match self {
            PaymentMethod::CreditCard { brand, last4 } => format!("{brand} •••• {last4}"),
            PaymentMethod::BankTransfer => "Bank Transfer".to_string(),
            PaymentMethod::SepaDebit => "SEPA Debit".to_string(),
        }
    }
}

/// Raw invoice as supplied by the UI layer, with the status still a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub id: String,
    pub customer: Customer,
    pub amount: Decimal,
    pub currency: CurrencyCode,
    pub status: String,
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

/// A billable record. Immutable input to filtering and aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "InvoiceRecord")]
pub struct Invoice {
    id: InvoiceId,
    customer: Customer,
    amount: Decimal,
    currency: CurrencyCode,
    status: InvoiceStatus,
    issue_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    payment_method: Option<PaymentMethod>,
}

impl Invoice {
    /// Create an invoice without dates or payment method.
    ///
    /// Invariants: non-empty id, non-negative amount.
    pub fn new(
        id: InvoiceId,
        customer: Customer,
        amount: Decimal,
        currency: CurrencyCode,
        status: InvoiceStatus,
    ) -> BillingResult<Self> {
        if id.as_str().trim().is_empty() {
            return Err(BillingError::validation("invoice id must not be empty"));
        }
        if amount < Decimal::ZERO {
            return Err(BillingError::validation(format!(
                "invoice {id} amount must be non-negative (got {amount})"
            )));
        }

        Ok(Self {
            id,
            customer,
            amount,
            currency,
            status,
            issue_date: None,
            due_date: None,
            payment_method: None,
        })
    }

    pub fn issued_on(mut self, date: NaiveDate) -> Self {
        self.issue_date = Some(date);
        self
    }

    pub fn due_on(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn paid_with(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    pub fn id_typed(&self) -> &InvoiceId {
        &self.id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn status(&self) -> InvoiceStatus {
        self.status
    }

    pub fn issue_date(&self) -> Option<NaiveDate> {
        self.issue_date
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn payment_method(&self) -> Option<&PaymentMethod> {
        self.payment_method.as_ref()
    }

    /// Copy of this invoice moved to `next`.
    ///
    /// Only transitions listed by [`InvoiceStatus::available_transitions`]
    /// are accepted.
    pub fn with_status(&self, next: InvoiceStatus) -> BillingResult<Self> {
        if !self.status.can_transition_to(next) {
            return Err(BillingError::invalid_transition(
                self.status.as_str(),
                next.as_str(),
            ));
        }
        Ok(Self {
            status: next,
            ..self.clone()
        })
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TryFrom<InvoiceRecord> for Invoice {
    type Error = BillingError;

    fn try_from(record: InvoiceRecord) -> Result<Self, Self::Error> {
        let status: InvoiceStatus = record.status.parse()?;
        let invoice = Invoice::new(
            InvoiceId::new(record.id),
            record.customer,
            record.amount,
            record.currency,
            status,
        )?;

        Ok(Invoice {
            issue_date: record.issue_date,
            due_date: record.due_date,
            payment_method: record.payment_method,
            ..invoice
        })
    }
}

impl From<&Invoice> for InvoiceRecord {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id.as_str().to_string(),
            customer: invoice.customer.clone(),
            amount: invoice.amount,
            currency: invoice.currency.clone(),
            status: invoice.status.as_str().to_string(),
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            payment_method: invoice.payment_method.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn acme() -> Customer {
        Customer::new("Acme Corp", "billing@acme.test")
    }

    fn test_invoice(status: InvoiceStatus) -> Invoice {
        Invoice::new(
            InvoiceId::new("INV-2023-001"),
            acme(),
            dec!(1250.00),
            CurrencyCode::usd(),
            status,
        )
        .unwrap()
    }

    #[test]
    fn status_parses_only_the_closed_set() {
        for status in InvoiceStatus::ALL {
            assert_eq!(status.as_str().parse::<InvoiceStatus>().unwrap(), status);
        }

        let err = "cancelled".parse::<InvoiceStatus>().unwrap_err();
        assert_eq!(err, BillingError::InvalidStatusValue("cancelled".to_string()));

        // Parsing is case-sensitive, like the record keys it mirrors.
        assert!("Paid".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = Invoice::new(
            InvoiceId::new("INV-1"),
            acme(),
            dec!(-0.01),
            CurrencyCode::usd(),
            InvoiceStatus::Draft,
        )
        .unwrap_err();
        assert!(matches!(err, BillingError::Validation(_)));
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = Invoice::new(
            InvoiceId::new("  "),
            acme(),
            dec!(1),
            CurrencyCode::usd(),
            InvoiceStatus::Draft,
        )
        .unwrap_err();
        assert!(matches!(err, BillingError::Validation(_)));
    }

    #[test]
    fn currency_code_is_uppercased() {
        assert_eq!(CurrencyCode::new(" eur ").as_str(), "EUR");
    }

    #[test]
    fn draft_can_only_be_sent() {
        let draft = test_invoice(InvoiceStatus::Draft);
        let sent = draft.with_status(InvoiceStatus::Sent).unwrap();
        assert_eq!(sent.status(), InvoiceStatus::Sent);
        assert_eq!(draft.status(), InvoiceStatus::Draft);

        let err = draft.with_status(InvoiceStatus::Paid).unwrap_err();
        assert_eq!(err, BillingError::invalid_transition("draft", "paid"));
    }

    #[test]
    fn sent_and_overdue_can_be_marked_paid() {
        for status in [InvoiceStatus::Sent, InvoiceStatus::Overdue] {
            let paid = test_invoice(status).with_status(InvoiceStatus::Paid).unwrap();
            assert_eq!(paid.status(), InvoiceStatus::Paid);
        }
        assert!(InvoiceStatus::Paid.available_transitions().is_empty());
    }

    #[test]
    fn deserializes_ui_json() {
        let json = r#"{
            "id": "INV-2023-004",
            "customer": { "name": "Globex", "email": "ap@globex.test" },
            "amount": 980.5,
            "currency": "eur",
            "status": "paid",
            "issueDate": "2023-06-01",
            "dueDate": "2023-07-01",
            "paymentMethod": { "type": "credit_card", "brand": "Visa", "last4": "4242" }
        }"#;

        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.id_typed().as_str(), "INV-2023-004");
        assert_eq!(invoice.amount(), dec!(980.5));
        assert_eq!(invoice.currency().as_str(), "EUR");
        assert_eq!(invoice.status(), InvoiceStatus::Paid);
        assert_eq!(invoice.issue_date(), NaiveDate::from_ymd_opt(2023, 6, 1));
        assert_eq!(
            invoice.payment_method().map(PaymentMethod::display).as_deref(),
            Some("Visa •••• 4242")
        );
    }

    #[test]
    fn deserializing_unknown_status_fails() {
        let json = r#"{
            "id": "INV-9",
            "customer": { "name": "Initech", "email": "x@initech.test" },
            "amount": 10,
            "currency": "USD",
            "status": "cancelled",
            "issueDate": null,
            "dueDate": null
        }"#;

        let err = serde_json::from_str::<Invoice>(json).unwrap_err();
        assert!(err.to_string().contains("invalid invoice status"));
    }

    #[test]
    fn record_conversion_keeps_optional_fields() {
        let invoice = test_invoice(InvoiceStatus::Paid)
            .issued_on(NaiveDate::from_ymd_opt(2023, 1, 10).unwrap())
            .paid_with(PaymentMethod::SepaDebit);

        let record = InvoiceRecord::from(&invoice);
        assert_eq!(record.status, "paid");
        assert_eq!(Invoice::try_from(record).unwrap(), invoice);
    }
}
