//! Lenient field codecs for backend JSON.
//!
//! The backend has shipped several shapes over time; a missing or odd field
//! must never fail the whole collection.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;
use std::str::FromStr;

/// Text field: null/missing become `""`, numbers are stringified.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Calendar date: `YYYY-MM-DD`, or the date part of a timestamp. Anything
/// else is treated as missing.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => {
            let parsed = parse_date(&s);
            if parsed.is_none() && !s.trim().is_empty() {
                tracing::warn!(value = %s, "Ignoring unparseable date");
            }
            Ok(parsed)
        }
        _ => Ok(None),
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        raw.get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
    })
}

/// Parse a decimal from user or backend text, accepting a decimal comma.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .or_else(|_| Decimal::from_str(&raw.replace(',', ".")))
        .ok()
}

pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Decimal as a JSON number, the wire format the backend expects.
pub mod number {
    use super::*;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value.to_f64() {
            Some(f) => serializer.serialize_f64(f),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decimal_from_value(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid decimal: {}", value)))
    }
}

/// Optional decimal as a JSON number or null; unparseable input reads as
/// `None`.
pub mod number_option {
    use super::*;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value.and_then(|d| d.to_f64()) {
            Some(f) => serializer.serialize_f64(f),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(decimal_from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn parses_plain_and_comma_decimals() {
        assert_eq!(parse_decimal("150.50"), Some(dec("150.50")));
        assert_eq!(parse_decimal(" 150,50 "), Some(dec("150.50")));
        assert_eq!(parse_decimal("1e2"), Some(dec("100")));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
    }

    #[test]
    fn parses_date_and_timestamp_prefix() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10);
        assert_eq!(parse_date("2024-01-10"), expected);
        assert_eq!(parse_date("2024-01-10T08:30:00"), expected);
        assert_eq!(parse_date("10/01/2024"), None);
    }

    #[test]
    fn decimal_from_json_number_keeps_exact_digits() {
        let value: Value = serde_json::from_str("0.1").unwrap();
        assert_eq!(decimal_from_value(&value), Some(dec("0.1")));
    }
}
