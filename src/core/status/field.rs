//! Label/unit stripping for `Label:   value unit` lines.
//!
//! Nothing here mutates its input; helpers borrow when there is nothing to
//! remove and allocate a short owned string otherwise.

use std::borrow::Cow;

/// Remove the first occurrence of `target` from `s`.
///
/// Returns `s` unchanged (borrowed) when `target` does not occur.
pub fn cut<'a>(s: &'a str, target: &str) -> Cow<'a, str> {
    if target.is_empty() {
        return Cow::Borrowed(s);
    }

    match s.find(target) {
        Some(start) => {
            let mut owned = String::with_capacity(s.len() - target.len());
            owned.push_str(&s[..start]);
            owned.push_str(&s[start + target.len()..]);
            Cow::Owned(owned)
        }
        None => Cow::Borrowed(s),
    }
}

/// Strip leading and trailing spaces.
pub fn trim_spaces(s: &str) -> &str {
    s.trim_matches(' ')
}

/// Parse a leading base-10 integer, `atoi` style.
///
/// Leading whitespace and one sign are accepted, parsing stops at the first
/// non-digit and input with no digits yields 0. Saturates instead of
/// overflowing.
pub fn parse_leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}

/// Extract the integer from a line such as `"MemFree:   8000000 kB"`.
///
/// Garbage between label and unit parses as 0 rather than failing.
pub fn extract_field(line: &str, label: &str, unit: &str) -> i64 {
    let line = line.trim_end_matches('\n');
    let without_label = cut(line, label);
    let without_unit = cut(&without_label, unit);
    parse_leading_int(trim_spaces(&without_unit))
}
