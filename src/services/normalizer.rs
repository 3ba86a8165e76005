//! Coercion of submitted ESG rows into canonical records.
//!
//! The rules mirror the browser's `Number(value ?? 0)` coercion so that a row
//! previewed in the form and the same row stored by the API always agree.
//! Anything that does not coerce to a finite, non-negative number becomes 0.

use serde_json::Value;

use crate::models::esg_record::{EsgRecord, RawEsgRecord, RawSubmission};

/// Normalize every row of a submission, keeping the submitted order.
pub fn normalize(submission: RawSubmission) -> Vec<EsgRecord> {
    submission
        .into_records()
        .iter()
        .map(normalize_record)
        .collect()
}

pub fn normalize_record(raw: &RawEsgRecord) -> EsgRecord {
    EsgRecord {
        financial_year: financial_year(raw),
        electricity: coerce_number(raw.electricity.as_ref()),
        renewable: coerce_number(raw.renewable.as_ref()),
        fuel: coerce_number(raw.fuel.as_ref()),
        emissions: coerce_number(raw.emissions.as_ref()),
        employees: coerce_number(raw.employees.as_ref()),
        female_employees: coerce_number(raw.female_employees.as_ref()),
        training_hours: coerce_number(raw.training_hours.as_ref()),
        community_spend: coerce_number(raw.community_spend.as_ref()),
        board_percent: coerce_number(raw.board_percent.as_ref()),
        privacy_policy: coerce_flag(raw.privacy_policy.as_ref()),
        revenue: coerce_number(raw.revenue.as_ref()),
    }
}

/// `year` wins over `financialYear` unless its text form is empty.
fn financial_year(raw: &RawEsgRecord) -> String {
    [raw.year.as_ref(), raw.financial_year.as_ref()]
        .into_iter()
        .flatten()
        .map(js_string)
        .find(|label| !label.is_empty())
        .unwrap_or_default()
}

/// The browser's `String(value)` for a JSON value.
fn js_string(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => js_number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| if item.is_null() { String::new() } else { js_string(item) })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Whole numbers print without a fractional part, so `2024.0` reads `"2024"`.
fn js_number_text(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

/// Lenient numeric coercion; the result is always finite and `>= 0`.
pub fn coerce_number(v: Option<&Value>) -> f64 {
    let n = match v {
        None | Some(Value::Null) => 0.0,
        Some(other) => js_number(other).unwrap_or(0.0),
    };
    if n.is_finite() && n > 0.0 {
        n
    } else {
        0.0
    }
}

fn js_number(v: &Value) -> Option<f64> {
    match v {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_text(s),
        // Arrays and objects go through their text form first: `[7]` is "7",
        // `[true]` is "true" and neither `[1, 2]` nor `{}` parses.
        Value::Array(_) | Value::Object(_) => parse_numeric_text(&js_string(v)),
    }
}

fn parse_numeric_text(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    let radix = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).ok().map(|n| n as f64);
    }
    // Rust accepts spellings like "inf" and "nan" that the browser rejects;
    // both end up non-finite and are zeroed by the caller anyway.
    s.parse::<f64>().ok()
}

/// `"yes"` in any case or the exact text `"true"`; booleans pass through.
pub fn coerce_flag(v: Option<&Value>) -> bool {
    match v {
        Some(Value::String(s)) => s.eq_ignore_ascii_case("yes") || s == "true",
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}
