//! Price quantization helpers
//!
//! Rounds prices onto a granularity grid. Used for bucketing raw bids and
//! for rounding reported support prices.

/// Round `value` to the nearest multiple of `unit`.
///
/// Half-up on the quotient with truncation toward zero:
/// `trunc(value / unit + 0.5) * unit`. This is deliberately not
/// round-half-to-even, so `2.5` units always goes to `3`.
#[inline]
#[must_use]
pub fn round_to_multiple(value: f64, unit: f64) -> f64 {
    (value / unit + 0.5).trunc() * unit
}

/// Round `value` to `decimals` decimal places (half away from zero).
#[inline]
#[must_use]
pub fn round_to_precision(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_round_to_multiple_half_goes_up() {
        assert_eq!(round_to_multiple(2.5, 1.0), 3.0);
        assert_eq!(round_to_multiple(3.5, 1.0), 4.0);
        assert_eq!(round_to_multiple(125.0, 50.0), 150.0);
    }

    #[test]
    fn test_round_to_multiple_below_half_goes_down() {
        assert_eq!(round_to_multiple(97.0, 5.0), 95.0);
        assert_eq!(round_to_multiple(99.0, 10.0), 100.0);
        assert_eq!(round_to_multiple(100.0, 500.0), 0.0);
    }

    #[test]
    fn test_round_to_multiple_exact_multiple_unchanged() {
        assert_eq!(round_to_multiple(42_000.0, 25.0), 42_000.0);
        assert_eq!(round_to_multiple(0.0, 0.5), 0.0);
    }

    #[test]
    fn test_round_to_precision_eight_decimals() {
        assert_eq!(round_to_precision(0.1 * 0.4, 8), 0.04);
        assert_eq!(round_to_precision(0.000_000_016, 8), 0.000_000_02);
        assert_eq!(round_to_precision(250.0, 8), 250.0);
    }

    proptest! {
        #[test]
        fn prop_result_is_multiple_of_unit(value in 0.0f64..1_000_000.0, unit_idx in 0usize..6) {
            let unit = [500.0, 25.0, 5.0, 0.5, 0.01, 0.0001][unit_idx];
            let rounded = round_to_multiple(value, unit);
            let quotient = rounded / unit;
            let distance = (quotient - quotient.round()).abs() * unit;
            prop_assert!(distance < 1e-8, "{} is not a multiple of {}", rounded, unit);
        }

        #[test]
        fn prop_result_within_half_unit(value in 0.0f64..1_000_000.0, unit in 0.001f64..1000.0) {
            let rounded = round_to_multiple(value, unit);
            prop_assert!((rounded - value).abs() <= unit / 2.0 + 1e-6);
        }
    }
}
