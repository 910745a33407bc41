/// Computes the arithmetic mean of a stream of values.
///
/// Returns `NaN` for empty input. Callers treat that as "insufficient
/// data" for the cell, not as a failure.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 { f64::NAN } else { sum / count as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_nan() {
        assert!(mean(std::iter::empty()).is_nan());
    }

    #[test]
    fn test_mean_normal_values() {
        assert_eq!(mean([1.0, 2.0, 3.0]), 2.0);
        assert_eq!(mean([0.5]), 0.5);
    }

    #[test]
    fn test_mean_of_indicators_is_a_proportion() {
        assert_eq!(mean([1.0, 0.0, 0.0, 1.0]), 0.5);
    }
}
