//! Display formatting for invoice tables and stat cards.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::DashboardConfig;
use crate::invoice::{CurrencyCode, PaymentMethod};

/// Symbol for a currency code, if it has a dedicated one.
pub fn currency_symbol(currency: &CurrencyCode) -> Option<&'static str> {
    let symbol = match currency.as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "INR" => "₹",
        "AUD" => "A$",
        "CAD" => "C$",
        "JPY" => "¥",
        "NOK" => "kr",
        "AED" => "د.إ",
        _ => return None,
    };
    Some(symbol)
}

/// `$1,250.00`, `¥12,000`, or `CHF99.90` for codes without a symbol.
///
/// JPY has no minor unit and is rounded to a whole number.
pub fn format_currency(amount: Decimal, currency: &CurrencyCode) -> String {
    let prefix = currency_symbol(currency).unwrap_or(currency.as_str());
    let decimals = if currency.as_str() == "JPY" { 0 } else { 2 };

    let rounded = amount
        .abs()
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let sign = if amount < Decimal::ZERO { "-" } else { "" };
    let mut out = format!("{sign}{prefix}{}", group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Aggregate amounts are always shown in the configured display currency.
pub fn format_summary_amount(amount: Decimal, config: &DashboardConfig) -> String {
    format_currency(amount, &config.display_currency)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `Jan 5, 2024`, or `-` when the date is missing.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => "-".to_string(),
    }
}

pub fn format_payment_method(method: Option<&PaymentMethod>) -> String {
    method.map_or_else(|| "-".to_string(), PaymentMethod::display)
}
