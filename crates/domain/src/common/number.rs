//! Lenient numeric coercion.
//!
//! Values arriving from forms and stored documents are loosely typed. These
//! helpers turn them into integers without ever failing: anything that does
//! not read as a number resolves to the lower bound of the allowed range.

/// Reads a raw value as an integer.
///
/// Blank input reads as `0`, fractional input is floored, and anything that
/// is not a finite number yields `None`. Finite values beyond the `i64` range
/// (such as `"1e300"`) saturate to `i64::MIN` or `i64::MAX`, so callers that
/// clamp afterwards land on the matching bound.
///
/// # Examples
///
/// ```
/// use pr20_domain::common::parse_number;
///
/// assert_eq!(parse_number("12"), Some(12));
/// assert_eq!(parse_number(" 3.7 "), Some(3));
/// assert_eq!(parse_number(""), Some(0));
/// assert_eq!(parse_number("lots"), None);
/// ```
pub fn parse_number(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(|f| f.floor() as i64)
}

/// Clamps an integer of any width into `[min, max]`.
pub fn clamp_to(value: i64, min: i32, max: i32) -> i32 {
    value.clamp(i64::from(min), i64::from(max)) as i32
}

/// Reads a raw value and clamps it into `[min, max]`.
///
/// Non-numeric input is treated as `min`.
///
/// # Examples
///
/// ```
/// use pr20_domain::common::clamp_number;
///
/// assert_eq!(clamp_number("9", 0, 6), 6);
/// assert_eq!(clamp_number("-2", 0, 6), 0);
/// assert_eq!(clamp_number("abc", 1, 20), 1);
/// ```
pub fn clamp_number(raw: &str, min: i32, max: i32) -> i32 {
    match parse_number(raw) {
        Some(n) => clamp_to(n, min, max),
        None => min,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers_and_floors_fractions() {
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number("-7"), Some(-7));
        assert_eq!(parse_number("2.9"), Some(2));
        assert_eq!(parse_number("-0.5"), Some(-1));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("3d6"), None);
    }

    #[test]
    fn out_of_range_floats_saturate() {
        assert_eq!(parse_number("1e300"), Some(i64::MAX));
        assert_eq!(parse_number("-1e300"), Some(i64::MIN));
        assert_eq!(clamp_number("1e300", 0, 6), 6);
        assert_eq!(clamp_number("-1e300", 0, 6), 0);
    }

    #[test]
    fn clamp_number_falls_back_to_min() {
        assert_eq!(clamp_number("not a number", 0, i32::MAX), 0);
        assert_eq!(clamp_number("not a number", -999, 999), -999);
    }

    #[test]
    fn clamp_to_handles_wide_values() {
        assert_eq!(clamp_to(i64::MAX, 0, 6), 6);
        assert_eq!(clamp_to(i64::MIN, 0, 6), 0);
        assert_eq!(clamp_to(4, 0, 6), 4);
    }
}
