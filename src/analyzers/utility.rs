use crate::analyzers::frequency::most_common;
use crate::analyzers::types::DescriptiveStats;

/// Largest value by a left-to-right scan. Returns `None` for empty input.
pub fn max(values: &[f64]) -> Option<f64> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().fold(*first, |acc, &v| if v > acc { v } else { acc }))
}

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Middle value of the sorted input, or the average of the two middle values
/// when the count is even. Returns `None` for empty input.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Most frequent value; the first one seen wins a tie.
///
/// `-0.0` and `0.0` count together, and the winner is returned as it first
/// appeared in `values`. NaN never equals anything, so it is not counted.
/// Input made only of NaN falls back to its first element.
pub fn mode(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;

    // adding 0.0 folds -0.0 into 0.0 so both hash alike
    let key = |v: f64| (v + 0.0).to_bits();
    let counted = values.iter().filter(|v| !v.is_nan()).map(|&v| key(v));

    let Some(winner) = most_common(counted) else {
        return Some(first);
    };
    values.iter().copied().find(|&v| key(v) == winner)
}

/// Max, median, mean and mode of one column.
pub fn describe(values: &[f64]) -> DescriptiveStats {
    DescriptiveStats {
        max: max(values),
        median: median(values),
        mean: mean(values),
        mode: mode(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_undefined() {
        assert_eq!(max(&[]), None);
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(mode(&[]), None);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
        assert_eq!(median(&[1.0, 3.0, 5.0]), Some(3.0));
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
    }

    #[test]
    fn test_mode() {
        assert_eq!(mode(&[2.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mode(&[4.0, 1.0, 1.0, 4.0]), Some(4.0));
        assert_eq!(mode(&[7.5]), Some(7.5));
    }

    #[test]
    fn test_mode_treats_signed_zero_as_equal() {
        assert_eq!(mode(&[1.0, -0.0, 0.0]), Some(0.0));
        assert_eq!(mode(&[0.0, -0.0, 1.0]), Some(0.0));
    }

    #[test]
    fn test_mode_returns_first_seen_representation() {
        let negative = mode(&[-0.0, 0.0, 1.0]).unwrap();
        assert!(negative.is_sign_negative());
        assert_eq!(format!("{:.2}", negative), "-0.00");

        let positive = mode(&[0.0, -0.0, 1.0]).unwrap();
        assert!(positive.is_sign_positive());
    }

    #[test]
    fn test_mode_all_nan_falls_back_to_first() {
        assert!(mode(&[f64::NAN, f64::NAN]).unwrap().is_nan());
    }

    #[test]
    fn test_max_and_mean() {
        assert_eq!(max(&[3.0, -1.0, 4.5, 2.0]), Some(4.5));
        assert_eq!(max(&[-3.0, -1.0]), Some(-1.0));
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), Some(3.0));
    }

    #[test]
    fn test_describe() {
        let stats = describe(&[3.0, 1.0, 3.0, 5.0]);
        assert_eq!(stats.max, Some(5.0));
        assert_eq!(stats.median, Some(3.0));
        assert_eq!(stats.mean, Some(3.0));
        assert_eq!(stats.mode, Some(3.0));
    }
}
