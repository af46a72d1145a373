// Numeric helpers shared by the aggregator, the panel controllers, and the
// startup diagnostics.
use num_format::{Locale, ToFormattedString};

pub fn average(v: &[f64]) -> f64 {
    // Standard arithmetic mean; returns 0 for an empty slice to avoid NaNs.
    // Callers that must distinguish "no rows" check emptiness first.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Round to two decimal places, halves away from zero.
///
/// All loss percentages are non-negative, so this is plain half-up rounding
/// for every value that can occur.
pub fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Format a loss percentage for display: two decimals, trailing `%`.
///
/// Used both for per-bar labels and for the average summary line, so the two
/// always agree on rounding.
pub fn format_pct(n: f64) -> String {
    format!("{:.2}%", round2(n))
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values. This is used
    // for row counts in startup messages (e.g., `105 stage rows`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_basic() {
        assert_eq!(average(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(average(&[30.0]), 30.0);
        assert_eq!(average(&[]), 0.0);
    }

    #[test]
    fn format_pct_two_decimals() {
        assert_eq!(format_pct(8.789755), "8.79%");
        assert_eq!(format_pct(30.0), "30.00%");
        assert_eq!(format_pct(5.81), "5.81%");
    }

    #[test]
    fn format_pct_rounds_halves_up() {
        // 0.125 is exact in binary, so the tie is real and must round up.
        assert_eq!(format_pct(0.125), "0.13%");
    }
}
