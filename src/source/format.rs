//! Field extraction helpers shared by the provider mappings.
//!
//! A key that is missing or holds JSON `null` takes the caller's default.
//! Strings pass through untouched; other scalars are rendered as JSON text.
use serde_json::Value;

use crate::model::RawJob;

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn text_or(raw: &RawJob, key: &str, default: &str) -> String {
    match raw.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(value) => render(value),
    }
}

pub fn text(raw: &RawJob, key: &str) -> String {
    text_or(raw, key, "")
}

/// Lists are joined with `", "`, skipping `null` items; anything else is
/// read like [`text`].
pub fn joined(raw: &RawJob, key: &str) -> String {
    match raw.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(render)
            .collect::<Vec<_>>()
            .join(", "),
        _ => text(raw, key),
    }
}

/// Reads a money amount and renders it with thousands separators.
///
/// Zero, empty and non-numeric values yield `None`.
pub fn amount(raw: &RawJob, key: &str) -> Option<String> {
    let decimal = match raw.get(key)? {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                u.to_string()
            } else if let Some(i) = n.as_i64() {
                i.to_string()
            } else {
                float_text(n.as_f64()?)?
            }
        }
        Value::String(s) => {
            let s = s.trim().replace(',', "");
            if let Ok(u) = s.parse::<u64>() {
                u.to_string()
            } else {
                float_text(s.parse::<f64>().ok()?)?
            }
        }
        _ => return None,
    };
    if decimal.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        return None;
    }
    Some(group_thousands(&decimal))
}

fn float_text(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 {
        Some(format!("{:.0}", value))
    } else {
        Some(value.to_string())
    }
}

/// `"1234567.5"` -> `"1,234,567.5"`.
pub fn group_thousands(decimal: &str) -> String {
    let (sign, unsigned) = match decimal.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", decimal),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
