use crate::linked_list::StringLinkedList;

/// Mean of the list values read as numbers, or `0.0` for an empty list.
///
/// A value that does not read as a number contributes `NaN`, which then
/// carries through the sum.
pub fn average(list: &StringLinkedList) -> f64 {
    if list.is_empty() {
        return 0.0;
    }

    let sum: f64 = list.iter().map(to_number).sum();
    sum / list.len() as f64
}

/// Reads a value the way JavaScript's `Number(string)` does.
///
/// * surrounding whitespace is ignored and a blank string is `0`
/// * `0x`, `0o` and `0b` prefixes select base 16, 8 and 2 (no sign allowed)
/// * `Infinity` is the only spelling of infinity, optionally signed
/// * anything else that is not a decimal literal is `NaN`
pub fn to_number(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed.get(..2) {
        Some("0x") | Some("0X") => parse_radix(&trimmed[2..], 16),
        Some("0o") | Some("0O") => parse_radix(&trimmed[2..], 8),
        Some("0b") | Some("0B") => parse_radix(&trimmed[2..], 2),
        _ => parse_decimal(trimmed),
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }

    digits
        .chars()
        .try_fold(0.0, |acc: f64, c| {
            c.to_digit(radix)
                .map(|digit| acc * radix as f64 + digit as f64)
        })
        .unwrap_or(f64::NAN)
}

fn parse_decimal(text: &str) -> f64 {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);

    if unsigned == "Infinity" {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    // f64::from_str also takes "inf", "infinity" and "nan" in any case.
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}
