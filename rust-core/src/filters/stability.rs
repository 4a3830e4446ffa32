//! Divergence detection for filter state

/// Zero `values` if any entry is NaN or infinite
///
/// Recovery for an all-pole filter that has blown up: the host can apply it to
/// the active coefficients or to the delay line.
///
/// # Returns
/// `true` if the array was unstable and has been cleared
pub fn check_filter(values: &mut [f32]) -> bool {
    let has_nan = values.iter().any(|v| v.is_nan());
    let has_infinite = values.iter().any(|v| v.is_infinite());

    if !(has_nan || has_infinite) {
        return false;
    }

    tracing::warn!(
        len = values.len(),
        has_nan,
        has_infinite,
        "filter is unstable, clearing state"
    );
    values.fill(0.0);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_values_untouched() {
        let mut values = [0.1, -2.0, 3.5];
        assert!(!check_filter(&mut values));
        assert_eq!(values, [0.1, -2.0, 3.5]);
    }

    #[test]
    fn test_nan_clears_array() {
        let mut values = [0.1, f32::NAN, 3.5];
        assert!(check_filter(&mut values));
        assert_eq!(values, [0.0; 3]);
    }

    #[test]
    fn test_infinity_clears_array() {
        let mut values = [f32::NEG_INFINITY, 1.0];
        assert!(check_filter(&mut values));
        assert_eq!(values, [0.0; 2]);
    }

    #[test]
    fn test_empty_is_stable() {
        let mut values: [f32; 0] = [];
        assert!(!check_filter(&mut values));
    }
}
