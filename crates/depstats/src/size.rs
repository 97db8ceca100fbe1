//! Human-readable byte sizes.

/// Decimal units, largest last. `u64::MAX` is roughly 18.4 EB.
const UNITS: &[&str] = &["B", "kB", "MB", "GB", "TB", "PB", "EB"];

/// Significant digits kept for scaled values.
const SIGNIFICANT_DIGITS: usize = 3;

/// Format a byte count the way `pretty-bytes` does.
///
/// Units are decimal (1 kB = 1000 B). Values below 1000 print as an integer
/// count of bytes; larger values are scaled to the largest unit not exceeding
/// them, rounded to three significant digits, with trailing zeros dropped.
///
/// # Examples
///
/// ```
/// use depstats::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(999), "999 B");
/// assert_eq!(format_size(1000), "1 kB");
/// assert_eq!(format_size(2656), "2.66 kB");
/// assert_eq!(format_size(1_500_000), "1.5 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes < 1000 {
        return format!("{} {}", bytes, UNITS[0]);
    }

    let mut exponent = 0;
    let mut scale: u64 = 1;
    while exponent < UNITS.len() - 1 && bytes / scale >= 1000 {
        scale *= 1000;
        exponent += 1;
    }

    let value = bytes as f64 / scale as f64;
    format!(
        "{} {}",
        to_precision(value, SIGNIFICANT_DIGITS),
        UNITS[exponent]
    )
}

/// Round `value` (>= 1) to `significant` digits, ties away from zero, and
/// print it without trailing fractional zeros.
///
/// The rounding works on the exact decimal expansion of the `f64`, so a value
/// like `1.005` (stored as 1.00499...) rounds down.
fn to_precision(value: f64, significant: usize) -> String {
    // Exact for any f64 below 1000: at most 52 fractional binary digits.
    let exact = format!("{:.60}", value);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let decimals = significant.saturating_sub(int_part.len());
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .map(|b| b - b'0')
        .collect();
    let mut int_len = int_part.len();

    let round_up = frac_part
        .as_bytes()
        .get(decimals)
        .is_some_and(|d| *d >= b'5');

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, 1);
            int_len += 1;
        }
    }

    let (int_digits, frac_digits) = digits.split_at(int_len);
    let frac_len = frac_digits
        .iter()
        .rposition(|d| *d != 0)
        .map_or(0, |pos| pos + 1);

    let mut out: String = int_digits.iter().map(|d| char::from(b'0' + d)).collect();
    if frac_len > 0 {
        out.push('.');
        out.extend(frac_digits[..frac_len].iter().map(|d| char::from(b'0' + d)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(999), "999 B");
    }

    #[test]
    fn test_format_size_kilobytes() {
        assert_eq!(format_size(1000), "1 kB");
        assert_eq!(format_size(1500), "1.5 kB");
        assert_eq!(format_size(2656), "2.66 kB");
        assert_eq!(format_size(10_240), "10.2 kB");
        assert_eq!(format_size(123_456), "123 kB");
    }

    #[test]
    fn test_format_size_rounding_does_not_change_unit() {
        assert_eq!(format_size(999_999), "1000 kB");
        assert_eq!(format_size(9_999), "10 kB");
    }

    #[test]
    fn test_format_size_exact_ties_round_up() {
        // 1.125 is exactly representable
        assert_eq!(format_size(1125), "1.13 kB");
    }

    #[test]
    fn test_format_size_rounds_on_stored_value() {
        // 1005 / 1000 is stored as 1.00499...
        assert_eq!(format_size(1005), "1 kB");
    }

    #[test]
    fn test_format_size_larger_units() {
        assert_eq!(format_size(1_000_000), "1 MB");
        assert_eq!(format_size(1_073_741_824), "1.07 GB");
        assert_eq!(format_size(5_000_000_000_000), "5 TB");
        assert_eq!(format_size(u64::MAX), "18.4 EB");
    }
}
