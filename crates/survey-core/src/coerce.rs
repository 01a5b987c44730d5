//! Loose coercions over untrusted JSON values.
//!
//! Submissions arrive as JSON of unknown shape. These helpers give every field
//! access a total, non-panicking answer: a truthiness test, a stringification
//! that accepts any value, and a character-safe truncation.

use serde_json::Value;

/// Rendering used for any JSON object when it is stringified.
pub const OBJECT_REPR: &str = "[object Object]";

/// Returns whether a value counts as "set".
///
/// `null`, `false`, numeric zero and the empty string are falsy. Everything
/// else is truthy, including the string `"false"`, `[]` and `{}`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Stringifies any JSON value.
///
/// Strings pass through unchanged. Numbers use JavaScript notation (`1.0`
/// becomes `"1"`, `1e21` becomes `"1e+21"`). Arrays join their stringified elements with
/// `,`, rendering `null` elements as empty. Objects render as
/// [`OBJECT_REPR`].
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => stringify(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => OBJECT_REPR.to_string(),
    }
}

fn number_to_string(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) => format_number(f),
        None => n.to_string(),
    }
}

/// Formats a number the way a JavaScript `String(n)` call does.
///
/// Decimal notation for exponents in `[-7, 21)`, otherwise `d.ddde±x`, always
/// using the shortest digits that round-trip.
fn format_number(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if !f.is_finite() {
        return if f.is_nan() {
            "NaN".to_string()
        } else if f > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }

    let sign = if f < 0.0 { "-" } else { "" };
    // `{:e}` yields the shortest round-trip digits, e.g. "1.5e-7".
    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Decimal point position relative to the start of `digits`.
    let n = exp + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let (first, rest) = digits.split_at(1);
        let exp_sign = if n - 1 < 0 { '-' } else { '+' };
        let frac = if rest.is_empty() {
            String::new()
        } else {
            format!(".{}", rest)
        };
        format!("{}{}e{}{}", first, frac, exp_sign, (n - 1).abs())
    };

    format!("{}{}", sign, body)
}

/// Keeps at most `max` characters of `s`.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => s[..byte_idx].to_string(),
        None => s.to_string(),
    }
}
