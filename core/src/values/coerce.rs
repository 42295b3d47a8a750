//! C-style text to number conversions.
//!
//! Triggers written for the original engine rely on `atoi`/`atof` leniency:
//! leading blanks are skipped, trailing garbage is ignored and an
//! unparseable prefix reads as zero.

/// Parses the longest integer prefix of `text`, like C `atoi`.
///
/// Out-of-range values saturate.
pub fn atoi(text: &str) -> i32 {
    let bytes = text.trim_start().as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut acc: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        acc = acc.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative {
        acc = -acc;
    }
    acc.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Parses the longest floating point prefix of `text`, like C `atof`.
pub fn atof(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end += 1;
    }
    let mantissa_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    // A lone sign or dot has no digits and reads as zero.
    if !bytes[mantissa_start..end].iter().any(u8::is_ascii_digit) {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'-' | b'+') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    trimmed[..end].parse().unwrap_or(0.0)
}

/// Optional leading `-`, then at least one digit and nothing else.
pub fn looks_like_int(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Optional leading `-`, then digits with exactly one decimal point.
pub fn looks_like_float(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    let mut points = 0;
    let mut digits = 0;
    for b in body.bytes() {
        match b {
            b'.' => points += 1,
            b'0'..=b'9' => digits += 1,
            _ => return false,
        }
    }
    points == 1 && digits > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atoi_prefix() {
        assert_eq!(atoi("42"), 42);
        assert_eq!(atoi("  -17abc"), -17);
        assert_eq!(atoi("+8"), 8);
        assert_eq!(atoi("3.9"), 3);
        assert_eq!(atoi("abc"), 0);
        assert_eq!(atoi(""), 0);
    }

    #[test]
    fn test_atoi_saturates() {
        assert_eq!(atoi("99999999999"), i32::MAX);
        assert_eq!(atoi("-99999999999"), i32::MIN);
    }

    #[test]
    fn test_atof_prefix() {
        assert_eq!(atof("1.5"), 1.5);
        assert_eq!(atof(" -0.25 , 3"), -0.25);
        assert_eq!(atof(".5"), 0.5);
        assert_eq!(atof("2e3x"), 2000.0);
        assert_eq!(atof("7e"), 7.0);
        assert_eq!(atof("-"), 0.0);
        assert_eq!(atof("."), 0.0);
        assert_eq!(atof("nope"), 0.0);
    }

    #[test]
    fn test_literal_shapes() {
        assert!(looks_like_int("12"));
        assert!(looks_like_int("-12"));
        assert!(!looks_like_int("-"));
        assert!(!looks_like_int("1.0"));

        assert!(looks_like_float("1.0"));
        assert!(looks_like_float("-.5"));
        assert!(looks_like_float("3."));
        assert!(!looks_like_float("."));
        assert!(!looks_like_float("1.2.3"));
        assert!(!looks_like_float("12"));
        assert!(!looks_like_float("1.5 , 2"));
    }
}
