//! # Lenient Field Coercion
//!
//! Serde helpers for backend records whose numeric fields arrive as JSON
//! numbers, numeric strings, empty strings or `null`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Wire value          lenient_money      lenient_days     lenient_flag   │
//! │  ──────────          ─────────────      ────────────     ────────────   │
//! │  50 / 50.5           Some(50 / 50.5)    Some(50)         true           │
//! │  "50,00"             Some(50)           Some(50)         false          │
//! │  "" / null / absent  None               None             false          │
//! │  "abc"               None               None             false          │
//! │  -3                  Some(-3)           None             true           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these helpers reject a value: garbage becomes `None` (or the
//! zero default) and the pricing functions treat it as missing.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::money::Money;
use crate::types::BillingPeriod;

// =============================================================================
// Value Conversions
// =============================================================================

/// Reads a decimal from a JSON number or numeric string.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Value::String(s) => Money::parse_lenient(s).map(|m| m.amount()),
        _ => None,
    }
}

/// Reads a money amount from a JSON number or numeric string.
pub fn money_from_value(value: &Value) -> Option<Money> {
    decimal_from_value(value).map(Money::new)
}

/// Reads a non-negative day count. Fractions are truncated.
pub fn days_from_value(value: &Value) -> Option<u32> {
    let amount = decimal_from_value(value)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return None;
    }
    amount.trunc().to_u32()
}

/// Reads a boolean flag from `true`/`false`, `1`/`0` or common strings.
pub fn flag_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "1" | "sim" | "s" | "yes" | "ativo"
        ),
        _ => false,
    }
}

/// Reads an identifier that may be a number or a string.
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Reads a date from `YYYY-MM-DD` or an ISO timestamp.
pub fn date_from_value(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    let day = text.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

// =============================================================================
// Serde Adapters
// =============================================================================
// Use with `#[serde(default, deserialize_with = "coerce::...")]` so that an
// absent field takes the same path as `null`.

pub fn lenient_money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(money_from_value(&value))
}

pub fn decimal_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value).unwrap_or_default())
}

pub fn lenient_days<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(days_from_value(&value))
}

pub fn days_or_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(days_from_value(&value).unwrap_or(0))
}

pub fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(flag_from_value(&value))
}

pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(id_from_value(&value))
}

pub fn id_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(id_from_value(&value).unwrap_or_default())
}

/// Unset selects arrive as `""`; unknown periods read as unset.
pub fn lenient_period<'de, D>(deserializer: D) -> Result<Option<BillingPeriod>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|s| s.parse().ok()))
}

/// Rule periods are required, but case and accents vary between the rules
/// screen and older imports (`"Diario"`, `"MENSAL"`, `"diário"`).
pub fn rule_period<'de, D>(deserializer: D) -> Result<BillingPeriod, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let text = value
        .as_str()
        .ok_or_else(|| de::Error::custom(format!("expected a billing period, got {value}")))?;
    text.parse().map_err(de::Error::custom)
}

pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(date_from_value(&value))
}

// =============================================================================
// Unit Tests
// =============================================================================
