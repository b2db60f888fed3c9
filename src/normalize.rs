//! Clamping of untrusted size and count inputs. Nothing here fails: every
//! malformed value degrades to a safe default.

use serde_json::Value;

use crate::models::ImageSize;

pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 4;
pub const DEFAULT_COUNT: u32 = 1;

pub fn normalize(raw_size: Option<&str>, raw_count: Option<&Value>) -> (ImageSize, u32) {
    let size = raw_size.map(ImageSize::parse_or_default).unwrap_or_default();
    (size, normalize_count(raw_count))
}

/// Integer-parses the raw count the way a lenient form handler would
/// (numbers truncate, strings use their leading integer), defaults to 1 when
/// there is no number, then clamps to `[1, 4]`.
pub fn normalize_count(raw: Option<&Value>) -> u32 {
    match raw.and_then(integer_value) {
        Some(n) => n.clamp(MIN_COUNT as i64, MAX_COUNT as i64) as u32,
        None => DEFAULT_COUNT,
    }
}

fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            }),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits: &str = &rest[..rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clamps_oversized_request() {
        let (size, count) = normalize(Some("9999x9999"), Some(&json!("99")));
        assert_eq!(size, ImageSize::Square512);
        assert_eq!(count, 4);
    }

    #[test]
    fn test_garbage_defaults() {
        let (size, count) = normalize(Some("banana"), Some(&json!("0")));
        assert_eq!(size, ImageSize::Square512);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_keeps_allowed_size() {
        let (size, count) = normalize(Some("256x256"), Some(&json!(3)));
        assert_eq!(size, ImageSize::Square256);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_count_parsing() {
        assert_eq!(normalize_count(None), 1);
        assert_eq!(normalize_count(Some(&json!(null))), 1);
        assert_eq!(normalize_count(Some(&json!(true))), 1);
        assert_eq!(normalize_count(Some(&json!("abc"))), 1);
        assert_eq!(normalize_count(Some(&json!(2.9))), 2);
        assert_eq!(normalize_count(Some(&json!(" 3 images"))), 3);
        assert_eq!(normalize_count(Some(&json!("-7"))), 1);
        assert_eq!(normalize_count(Some(&json!(-2))), 1);
        assert_eq!(normalize_count(Some(&json!(u64::MAX))), 4);
        assert_eq!(normalize_count(Some(&json!("123456789012345678901234"))), 4);
    }
}
