//! Currency display formatting.
//!
//! Amounts are carried at full f64 precision everywhere else; this module
//! is the only place values are rounded, and only for display. INR uses
//! Indian digit grouping, USD uses Western grouping, both with the usual
//! currency symbols.

/// Neutral display value for amounts that could not be computed.
pub const PLACEHOLDER: &str = "-";

enum Grouping {
    Indian,
    Western,
}

/// Formats an INR amount, e.g. `₹12,34,567.89`.
pub fn format_inr(amount: f64) -> String {
    format!("₹{}", format_grouped(amount, Grouping::Indian))
}

/// Formats a USD amount, e.g. `$1,234,567.89`.
pub fn format_usd(amount: f64) -> String {
    format!("${}", format_grouped(amount, Grouping::Western))
}

/// Formats a fractional fee rate as a percentage with one decimal.
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

fn format_grouped(amount: f64, grouping: Grouping) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    // Round half away from zero at two decimals, then render the already
    // rounded value.
    let rounded = (amount.abs() * 100.0).round() / 100.0;
    let fixed = format!("{rounded:.2}");
    let (int_part, frac_part) = fixed
        .split_once('.')
        .expect("fixed-point formatting always yields a decimal point");

    format!("{sign}{}.{frac_part}", group_integer(int_part, grouping))
}

fn group_integer(digits: &str, grouping: Grouping) -> String {
    let step = match grouping {
        Grouping::Indian => 2,
        Grouping::Western => 3,
    };

    // Separator positions measured from the left: one before the last three
    // digits, then every `step` digits further left.
    let mut cuts = Vec::new();
    let mut pos = digits.len() as isize - 3;
    while pos > 0 {
        cuts.push(pos as usize);
        pos -= step;
    }
    cuts.reverse();

    let mut out = String::with_capacity(digits.len() + cuts.len());
    let mut last = 0;
    for cut in cuts {
        out.push_str(&digits[last..cut]);
        out.push(',');
        last = cut;
    }
    out.push_str(&digits[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inr_uses_indian_grouping() {
        assert_eq!(format_inr(1234567.891), "₹12,34,567.89");
        assert_eq!(format_inr(123456.0), "₹1,23,456.00");
        assert_eq!(format_inr(8350.0), "₹8,350.00");
        assert_eq!(format_inr(150.0), "₹150.00");
        assert_eq!(format_inr(0.0), "₹0.00");
    }

    #[test]
    fn test_usd_uses_western_grouping() {
        assert_eq!(format_usd(1234567.5), "$1,234,567.50");
        assert_eq!(format_usd(59.880239), "$59.88");
        assert_eq!(format_usd(117.647058), "$117.65");
        assert_eq!(format_usd(1000.0), "$1,000.00");
    }

    #[test]
    fn test_display_rounding_is_half_away_from_zero() {
        assert_eq!(format_inr(0.005), "₹0.01");
        assert_eq!(format_inr(0.125), "₹0.13");
        assert_eq!(format_usd(-0.005), "$-0.01");
    }

    #[test]
    fn test_negative_amounts_keep_symbol_before_sign() {
        assert_eq!(format_inr(-1234.5), "₹-1,234.50");
    }

    #[test]
    fn test_rate_formats_with_one_decimal() {
        assert_eq!(format_rate(0.03), "3.0%");
        assert_eq!(format_rate(0.045), "4.5%");
        assert_eq!(format_rate(0.05), "5.0%");
    }
}
