//! Display formatting for the Greek locale and HTML escaping for every value
//! interpolated into markup.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::TransactionKind;

/// Shown in place of a missing date or unreadable amount.
pub const MISSING_VALUE: &str = "N/A";

const MONTHS_GENITIVE: [&str; 12] = [
    "Ιανουαρίου",
    "Φεβρουαρίου",
    "Μαρτίου",
    "Απριλίου",
    "Μαΐου",
    "Ιουνίου",
    "Ιουλίου",
    "Αυγούστου",
    "Σεπτεμβρίου",
    "Οκτωβρίου",
    "Νοεμβρίου",
    "Δεκεμβρίου",
];

/// Escape text for use in HTML element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// `1234.5` → `1.234,50 €`. Rounds half away from zero to cents.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped},{frac_part} €")
}

/// Currency with the direction of the money flow in front: `+ 200,00 €` for a
/// receipt, `- 80,00 €` for a payment.
pub fn format_signed(kind: TransactionKind, amount: Decimal) -> String {
    let prefix = match kind {
        TransactionKind::Receipt => '+',
        TransactionKind::Payment => '-',
    };
    format!("{prefix} {}", format_currency(amount.abs()))
}

/// Long Greek date, e.g. `10 Ιανουαρίου 2024`.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => format!(
            "{} {} {}",
            date.day(),
            MONTHS_GENITIVE[date.month0() as usize],
            date.year()
        ),
        None => MISSING_VALUE.to_string(),
    }
}

/// Plain decimal for pre-filling form inputs, without grouping.
pub fn format_input(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}
