//! Pure transforms from a stats snapshot to exposed metric states.
//!
//! Each metric has its own fallback: CPU falls back to `"unknown"`, memory
//! to `"0"`, and the running state has none (the caller keeps the previous
//! value). Keep them separate.

use crate::core::domain::{
    error::CraftyError, model::stats_payload::StatsPayload, value_object::UNKNOWN,
};
use serde_json::Value;

pub const STATE_RUNNING: &str = "running";
pub const STATE_STOPPED: &str = "stopped";

/// CPU state after a failed refresh.
pub const CPU_FALLBACK: &str = UNKNOWN;

/// Memory state after a failed refresh or an unreadable `mem` field.
pub const MEMORY_FALLBACK: &str = "0";

/// Significant digits used when rendering memory in gigabytes.
pub const MEMORY_SIGNIFICANT_DIGITS: usize = 3;

const MIB_PER_GIB: f64 = 1024.0;

/// `"running"` if the `running` flag is truthy, `"stopped"` otherwise.
pub fn normalize_running(payload: &StatsPayload) -> &'static str {
    match payload.running.as_ref() {
        Some(value) if is_truthy(value) => STATE_RUNNING,
        _ => STATE_STOPPED,
    }
}

/// Passes the raw `cpu` field through; absent becomes `"unknown"`.
///
/// Strings are exposed as-is, any other JSON value in its JSON text form.
pub fn normalize_cpu(payload: &StatsPayload) -> String {
    match payload.cpu.as_ref() {
        Some(Value::String(cpu)) => cpu.clone(),
        Some(other) => other.to_string(),
        None => CPU_FALLBACK.to_string(),
    }
}

/// Memory usage in gigabytes, rendered with three significant digits.
///
/// Unreadable values are logged as warnings and normalize to `"0"`.
pub fn normalize_memory(payload: &StatsPayload) -> String {
    match payload.mem.as_ref() {
        None => MEMORY_FALLBACK.to_string(),
        Some(raw) => parse_memory_gb(raw).unwrap_or_else(|error| {
            tracing::warn!(%error, "Unexpected memory value");
            MEMORY_FALLBACK.to_string()
        }),
    }
}

/// Classifies a raw `mem` value and converts it to gigabytes.
///
/// # Errors
/// Returns `CraftyError::MalformedField` for non-zero numbers, strings without
/// a `GB`/`MB` suffix, unparsable numbers, and any other JSON type.
pub fn parse_memory_gb(raw: &Value) -> Result<String, CraftyError> {
    match raw {
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(MEMORY_FALLBACK.to_string()),
        Value::String(s) if s.contains("GB") => {
            let gigabytes = parse_number(&s.replace("GB", ""), s)?;
            Ok(format_significant(gigabytes, MEMORY_SIGNIFICANT_DIGITS))
        }
        Value::String(s) if s.contains("MB") => {
            let megabytes = parse_number(&s.replace("MB", ""), s)?;
            Ok(format_significant(
                megabytes / MIB_PER_GIB,
                MEMORY_SIGNIFICANT_DIGITS,
            ))
        }
        Value::String(s) => Err(malformed_memory(format!(
            "Unexpected memory string format: {}",
            s
        ))),
        other => Err(malformed_memory(format!(
            "Unexpected data type for memory: {}",
            json_type_name(other)
        ))),
    }
}

fn parse_number(number: &str, original: &str) -> Result<f64, CraftyError> {
    number
        .trim()
        .parse::<f64>()
        .map_err(|e| malformed_memory(format!("Cannot parse '{}': {}", original, e)))
}

fn malformed_memory(message: String) -> CraftyError {
    CraftyError::MalformedField {
        field: "mem".to_string(),
        message,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// JSON truthiness: `null`, `false`, zero, and empty strings/arrays/objects are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Renders `value` with `digits` significant digits, `printf("%.*g")` style.
///
/// Positional notation is used when the decimal exponent `X` of the rounded
/// value satisfies `-4 <= X < digits`, otherwise `d.dde±XX`. Trailing zeros
/// and a dangling decimal point are removed.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_trailing_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
