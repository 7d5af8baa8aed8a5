//! Parity check with a strict input contract.

use serde_json::Value;
use toolbelt_core::TypeMismatch;

/// Returns whether a JSON number is even.
///
/// `null` fails with [`TypeMismatch::Missing`]; any other non-number fails
/// with [`TypeMismatch::NotANumber`]. Fractional numbers are never even.
pub fn is_even(value: &Value) -> Result<bool, TypeMismatch> {
    let number = match value {
        Value::Null => return Err(TypeMismatch::Missing),
        Value::Number(number) => number,
        _ => return Err(TypeMismatch::NotANumber),
    };

    if let Some(integer) = number.as_i64() {
        return Ok(integer % 2 == 0);
    }

    if let Some(integer) = number.as_u64() {
        return Ok(integer % 2 == 0);
    }

    Ok(number.as_f64().is_some_and(|float| float % 2.0 == 0.0))
}
