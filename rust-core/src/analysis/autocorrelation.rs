//! Normalized autocorrelation of an analysis block
//!
//! Basis for the LPC estimate: lag 0 is the block energy, higher lags measure
//! how much the block resembles itself shifted by `k` samples.

/// Compute normalized autocorrelation of `signal` into `acf`
///
/// `acf[k] = Σ signal[i + k] · signal[i]` for `k = 0..acf.len()`, then every
/// lag is divided by `acf[0]`. The number of lags is taken from the output
/// length and must not exceed the signal length.
///
/// A silent block (energy below `f32::MIN_POSITIVE`) yields a flat spectrum:
/// `acf[0] = 1` and every other lag `0`.
///
/// # Arguments
/// * `signal` - Analysis block of length L
/// * `acf` - Output slice of length K ≤ L
pub fn autocorrelation(signal: &[f32], acf: &mut [f32]) {
    debug_assert!(acf.len() <= signal.len(), "more lags than samples");

    for (k, value) in acf.iter_mut().enumerate() {
        *value = signal[k..]
            .iter()
            .zip(signal.iter())
            .map(|(&shifted, &x)| shifted * x)
            .sum();
    }

    let Some(&energy) = acf.first() else {
        return;
    };

    if energy < f32::MIN_POSITIVE {
        acf.fill(0.0);
        acf[0] = 1.0;
        return;
    }

    for value in acf.iter_mut() {
        *value /= energy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_block_normalizes_to_one() {
        let signal = vec![0.5; 64];
        let mut acf = vec![0.0; 5];

        autocorrelation(&signal, &mut acf);

        // Shorter overlap at higher lags, so only lag 0 is exactly 1
        assert!((acf[0] - 1.0).abs() < 1e-6);
        for (k, &r) in acf.iter().enumerate() {
            let expected = (64 - k) as f32 / 64.0;
            assert!((r - expected).abs() < 1e-5, "lag {}: {} vs {}", k, r, expected);
        }
    }

    #[test]
    fn test_silent_block_is_flat() {
        let signal = vec![0.0; 32];
        let mut acf = vec![7.0; 4];

        autocorrelation(&signal, &mut acf);

        assert_eq!(acf, vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_impulse_has_no_correlation_at_lag() {
        let mut signal = vec![0.0; 16];
        signal[3] = 2.0;
        let mut acf = vec![0.0; 4];

        autocorrelation(&signal, &mut acf);

        assert!((acf[0] - 1.0).abs() < 1e-7);
        assert!(acf[1..].iter().all(|&r| r.abs() < 1e-7));
    }

    #[test]
    fn test_alternating_signal_has_negative_first_lag() {
        let signal: Vec<f32> = (0..32).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let mut acf = vec![0.0; 3];

        autocorrelation(&signal, &mut acf);

        assert!((acf[1] + 31.0 / 32.0).abs() < 1e-6);
        assert!((acf[2] - 30.0 / 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_output_is_noop() {
        let signal = vec![1.0; 8];
        let mut acf: Vec<f32> = Vec::new();
        autocorrelation(&signal, &mut acf);
        assert!(acf.is_empty());
    }
}
