//! Rounding and display helpers for currency amounts.
//!
//! Valuation outputs are reported to the cent, composite scores to three
//! decimal places, and human-readable breakdowns as whole currency units with
//! thousands separators.

/// Round `value` to `places` decimal places.
///
/// Rounding is applied to the exact binary value of `value`, and exact ties
/// go to the even digit (banker's rounding). `0.125` is a true tie and
/// becomes `0.12`; `2.675` is stored slightly below the tie and becomes
/// `2.67`.
///
/// # Examples
///
/// ```
/// use valora_traits::rounding::round_to;
///
/// assert_eq!(round_to(1.23456, 3), 1.235);
/// assert_eq!(round_to(-2.5, 0), -2.0);
/// assert_eq!(round_to(0.375, 2), 0.38);
/// ```
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    match usize::try_from(places) {
        // Float formatting is exact and breaks ties to even.
        Ok(precision) => format!("{value:.precision$}").parse().unwrap_or(value),
        Err(_) => {
            let factor = 10f64.powi(places.saturating_neg());
            (value / factor).round_ties_even() * factor
        }
    }
}

/// Round a currency amount to cents.
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    round_to(value, 2)
}

/// Format an amount as whole units with comma thousands separators.
///
/// # Examples
///
/// ```
/// use valora_traits::rounding::format_amount;
///
/// assert_eq!(format_amount(1_234_567.4), "1,234,567");
/// assert_eq!(format_amount(-9_876.5), "-9,876");
/// assert_eq!(format_amount(12.0), "12");
/// ```
#[must_use]
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = round_to(value, 0);
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(&digits))
}

/// Format an amount to two decimal places with comma thousands separators.
///
/// # Examples
///
/// ```
/// use valora_traits::rounding::format_cents;
///
/// assert_eq!(format_cents(3_920.625), "3,920.62");
/// assert_eq!(format_cents(-1_000.0), "-1,000.00");
/// ```
#[must_use]
pub fn format_cents(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = round_cents(value);
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{}.{fraction}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a fractional weight as a whole percentage, e.g. `0.27` as `"27%"`.
#[must_use]
pub fn format_percent(weight: f64) -> String {
    format!("{:.0}%", weight * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(263_374.613_168), 263_374.61);
        assert_eq!(round_cents(0.005), 0.01);
        assert_eq!(round_cents(-1.234), -1.23);
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-0.125, 2), -0.12);
        assert_eq!(round_cents(3_920.625), 3_920.62);
    }

    #[test]
    fn test_round_uses_stored_value() {
        // 2.675 and 1.005 are stored just below the tie.
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(1.005, 2), 1.0);
    }

    #[test]
    fn test_round_negative_places() {
        assert_eq!(round_to(1_250.0, -2), 1_200.0);
        assert_eq!(round_to(1_350.0, -2), 1_400.0);
        assert_eq!(round_to(1_234.0, -1), 1_230.0);
    }

    #[test]
    fn test_round_non_finite_passthrough() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_format_amount_grouping() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(3_000_000.0), "3,000,000");
        assert_eq!(format_amount(-1_500.2), "-1,500");
        assert_eq!(format_amount(2_500.5), "2,500");
        assert_eq!(format_amount(2_501.5), "2,502");
    }

    #[test]
    fn test_format_amount_negative_rounds_to_zero() {
        assert_eq!(format_amount(-0.4), "0");
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(0.0), "0.00");
        assert_eq!(format_cents(307.5), "307.50");
        assert_eq!(format_cents(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.27), "27%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(1.0), "100%");
    }
}
