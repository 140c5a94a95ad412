//! Lenient monetary amounts.
//!
//! The hosted store is written to by several clients and amount columns
//! occasionally arrive as strings, nulls or garbage. Sums must keep the
//! dashboard rendering, so anything that does not parse as a number
//! counts as zero. The substitution is deliberate and documented here
//! rather than hidden at each call site.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an amount column, coercing null/absent/malformed values to 0.
///
/// Combine with `#[serde(default)]` so absent fields also land on zero.
pub fn lenient<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce(&value))
}

fn coerce(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => n.to_string().parse().unwrap_or(Decimal::ZERO),
        Value::String(s) => s.trim().parse().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn numbers_parse_exactly() {
        assert_eq!(coerce(&json!(100)), dec!(100));
        assert_eq!(coerce(&json!(19.99)), dec!(19.99));
    }

    #[test]
    fn numeric_strings_parse() {
        assert_eq!(coerce(&json!("42.50")), dec!(42.50));
        assert_eq!(coerce(&json!(" 7 ")), dec!(7));
    }

    #[test]
    fn null_and_garbage_coerce_to_zero() {
        assert_eq!(coerce(&json!(null)), Decimal::ZERO);
        assert_eq!(coerce(&json!("n/a")), Decimal::ZERO);
        assert_eq!(coerce(&json!({"amount": 3})), Decimal::ZERO);
    }
}
