//! Levinson-Durbin recursion for all-pole (LPC) coefficients
//!
//! Solves the Toeplitz normal equations order by order. Each order yields a
//! reflection coefficient `k_i`; `|k_i| < 1` at every order is what keeps the
//! resulting all-pole filter stable, so the recursion backs off to the last
//! completed order as soon as a reflection coefficient leaves the bound.

/// Maximum LPC order the solver supports (size of its working array)
pub const MAX_ORDER: usize = 128;

/// Default reflection-coefficient bound used by the vocoder
pub const DEFAULT_K_MAX: f32 = 0.99;

/// Compute LPC coefficients from normalized autocorrelation
///
/// # Arguments
/// * `r` - Autocorrelation `r[0..=n]`, normally with `r[0] = 1`
/// * `a` - Output taps `a[0..n]`; the leading 1.0 of the polynomial is implicit
/// * `k_max` - Stability bound for the reflection coefficients, in (0, 1)
///
/// # Returns
/// Residual prediction-error power. When `|k_i| > k_max` at order `i`, the
/// recursion stops there: `a[..i]` holds the order-`i` solution, `a[i..]` stays
/// zero and the returned power is the error of that order.
///
/// The order `n` is `a.len()`. Orders above [`MAX_ORDER`] are rejected by
/// returning `0.0` with `a` left untouched.
pub fn levinson_durbin(r: &[f32], a: &mut [f32], k_max: f32) -> f32 {
    let n = a.len();

    if n > MAX_ORDER {
        return 0.0;
    }
    debug_assert!(r.len() > n, "need order + 1 autocorrelation lags");

    let mut scratch = [0.0f64; MAX_ORDER];

    a.fill(0.0);

    let mut alpha = r[0] as f64;

    for i in 0..n {
        let mut epsilon = r[i + 1] as f64;
        for j in 0..i {
            epsilon += a[j] as f64 * r[i - j] as f64;
        }

        let ki = -epsilon / alpha;

        // Written so that a NaN from a zero alpha also stops the recursion
        if !(ki.abs() <= k_max as f64) {
            return alpha as f32;
        }

        a[i] = ki as f32;
        alpha *= 1.0 - ki * ki;

        // Order update goes through scratch so a[j] and a[i-j-1] are read
        // from the same order
        for j in 0..i {
            scratch[j] = a[j] as f64 + ki * a[i - j - 1] as f64;
        }
        for j in 0..i {
            a[j] = scratch[j] as f32;
        }
    }

    alpha as f32
}

/// Reflection coefficients of a completed solution (step-down recursion)
///
/// Useful to verify that a set of taps corresponds to a stable filter: every
/// returned value has magnitude below one exactly when all poles lie inside
/// the unit circle.
pub fn reflection_coefficients(a: &[f32]) -> Vec<f32> {
    let n = a.len();
    let mut current: Vec<f64> = a.iter().map(|&x| x as f64).collect();
    let mut k = vec![0.0f32; n];

    for m in (0..n).rev() {
        let km = current[m];
        k[m] = km as f32;

        let denom = 1.0 - km * km;
        if denom.abs() < f64::EPSILON {
            break;
        }

        let previous: Vec<f64> = (0..m)
            .map(|j| (current[j] - km * current[m - 1 - j]) / denom)
            .collect();
        current.truncate(m);
        current.copy_from_slice(&previous);
    }

    k
}
