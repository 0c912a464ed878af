use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::fields::decimal_from_value;

/// A money amount exactly as the backend sent it.
///
/// Records are never rejected for a bad amount; the problem is kept so that
/// totals can count it as zero and report it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Amount {
    Value(Decimal),
    #[default]
    Missing,
    /// Unparseable or negative input, with the raw JSON for logging.
    Malformed(String),
}

impl Amount {
    /// The usable amount, if any.
    pub fn checked(&self) -> Option<Decimal> {
        match self {
            Amount::Value(d) => Some(*d),
            _ => None,
        }
    }

    /// The amount for summation: unusable amounts count as zero.
    pub fn value_or_zero(&self) -> Decimal {
        self.checked().unwrap_or(Decimal::ZERO)
    }

    pub fn is_usable(&self) -> bool {
        matches!(self, Amount::Value(_))
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::Value(value)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(match raw {
            Value::Null => Amount::Missing,
            Value::String(ref s) if s.trim().is_empty() => Amount::Missing,
            ref other => match decimal_from_value(other) {
                Some(d) if d >= Decimal::ZERO => Amount::Value(d),
                _ => Amount::Malformed(other.to_string()),
            },
        })
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.checked().and_then(|d| d.to_f64()) {
            Some(f) => serializer.serialize_f64(f),
            None => serializer.serialize_none(),
        }
    }
}
