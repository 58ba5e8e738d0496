//! Definite integrals and moments over sampled data.
//!
//! All hull integrations in this library reduce to one-dimensional
//! quadrature over parallel `x`/`y` sample slices. Offset grids are usually
//! — but not always — evenly spaced, so the dispatching entry point
//! ([`integrate`]) prefers Simpson's rule where its preconditions hold and
//! falls back to the unconditionally-valid trapezoidal rule on irregular
//! data instead of failing.

use thiserror::Error;

/// Maximum spread between adjacent sample spacings still treated as equal,
/// in meters.
pub const SPACING_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Error, PartialEq)]
pub enum QuadratureError {
    #[error("Sample slices differ in length: x has {x_len}, y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },
    #[error("At least {required} samples are required, got {actual}")]
    TooFewPoints { required: usize, actual: usize },
    #[error("Sample positions must be non-decreasing (x[{index}] decreases)")]
    NonMonotonic { index: usize },
    #[error("Simpson's rule requires equally spaced samples")]
    UnevenSpacing,
    #[error("Simpson's rule requires an odd number of samples, got {actual}")]
    EvenPointCount { actual: usize },
}

/// The quadrature rule selected for a given sample layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadratureRule {
    Trapezoidal,
    Simpsons,
    CompositeSimpson,
}

fn check_samples(x: &[f64], y: &[f64], required: usize) -> Result<(), QuadratureError> {
    if x.len() != y.len() {
        return Err(QuadratureError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.len() < required {
        return Err(QuadratureError::TooFewPoints {
            required,
            actual: x.len(),
        });
    }
    for i in 1..x.len() {
        if x[i] < x[i - 1] {
            return Err(QuadratureError::NonMonotonic { index: i });
        }
    }
    Ok(())
}

fn is_equally_spaced(x: &[f64]) -> bool {
    if x.len() < 3 {
        return true;
    }
    let h = x[1] - x[0];
    x.windows(2).all(|w| ((w[1] - w[0]) - h).abs() <= SPACING_TOLERANCE)
}

/// Trapezoidal rule over arbitrarily-spaced samples.
pub fn trapezoidal(x: &[f64], y: &[f64]) -> Result<f64, QuadratureError> {
    check_samples(x, y, 2)?;
    let mut sum = 0.0;
    for i in 0..x.len() - 1 {
        sum += 0.5 * (y[i] + y[i + 1]) * (x[i + 1] - x[i]);
    }
    Ok(sum)
}

/// Simpson's 1/3 rule. Requires an odd number (≥ 3) of equally spaced samples.
pub fn simpsons(x: &[f64], y: &[f64]) -> Result<f64, QuadratureError> {
    check_samples(x, y, 3)?;
    let n = x.len();
    if n % 2 == 0 {
        return Err(QuadratureError::EvenPointCount { actual: n });
    }
    if !is_equally_spaced(x) {
        return Err(QuadratureError::UnevenSpacing);
    }
    let h = (x[n - 1] - x[0]) / (n - 1) as f64;
    let mut sum = y[0] + y[n - 1];
    for (i, &value) in y.iter().enumerate().take(n - 1).skip(1) {
        sum += if i % 2 == 1 { 4.0 * value } else { 2.0 * value };
    }
    Ok(sum * h / 3.0)
}

/// Simpson's rule extended to even sample counts.
///
/// An odd count delegates to [`simpsons`] directly. An even count applies
/// Simpson's rule to the first `n - 1` samples and closes the final interval
/// with a trapezoidal correction, so the last data point is never silently
/// discarded.
pub fn composite_simpson(x: &[f64], y: &[f64]) -> Result<f64, QuadratureError> {
    check_samples(x, y, 3)?;
    let n = x.len();
    if n % 2 == 1 {
        return simpsons(x, y);
    }
    let body = simpsons(&x[..n - 1], &y[..n - 1])?;
    let tail = 0.5 * (y[n - 2] + y[n - 1]) * (x[n - 1] - x[n - 2]);
    Ok(body + tail)
}

/// Selects the rule [`integrate`] will apply to the given sample positions.
///
/// Returns `None` when there are fewer than two samples (nothing to
/// integrate). Equally spaced layouts route to Simpson's rule — the
/// composite variant when the count is even — and anything else falls back
/// to the trapezoidal rule.
pub fn select_rule(x: &[f64]) -> Option<QuadratureRule> {
    if x.len() < 2 {
        return None;
    }
    if x.len() >= 3 && is_equally_spaced(x) {
        if x.len() % 2 == 1 {
            Some(QuadratureRule::Simpsons)
        } else {
            Some(QuadratureRule::CompositeSimpson)
        }
    } else {
        Some(QuadratureRule::Trapezoidal)
    }
}

/// Evaluates ∫y dx with adaptive rule selection.
///
/// This is the sole quadrature entry point used by the calculation engine.
/// Fewer than two samples integrate to zero; otherwise the rule chosen by
/// [`select_rule`] is applied.
pub fn integrate(x: &[f64], y: &[f64]) -> Result<f64, QuadratureError> {
    match select_rule(x) {
        None => Ok(0.0),
        Some(QuadratureRule::Simpsons) => simpsons(x, y),
        Some(QuadratureRule::CompositeSimpson) => composite_simpson(x, y),
        Some(QuadratureRule::Trapezoidal) => trapezoidal(x, y),
    }
}

/// Evaluates the first moment ∫x·y dx, always trapezoidal.
///
/// Used for centroid calculations, where higher-order accuracy is not
/// required relative to the resolution of the source data.
pub fn first_moment(x: &[f64], y: &[f64]) -> Result<f64, QuadratureError> {
    let weighted: Vec<f64> = x.iter().zip(y).map(|(xi, yi)| xi * yi).collect();
    trapezoidal(x, &weighted)
}

/// Evaluates the second moment ∫x²·y dx, always trapezoidal.
pub fn second_moment(x: &[f64], y: &[f64]) -> Result<f64, QuadratureError> {
    let weighted: Vec<f64> = x.iter().zip(y).map(|(xi, yi)| xi * xi * yi).collect();
    trapezoidal(x, &weighted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapezoidal_is_exact_for_linear_data() {
        let x = [0.0, 1.0, 2.5, 4.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();

        let result = trapezoidal(&x, &y).unwrap();
        assert!((result - 20.0).abs() < 1e-12);
    }

    #[test]
    fn trapezoidal_rejects_decreasing_positions() {
        let x = [0.0, 2.0, 1.0];
        let y = [1.0, 1.0, 1.0];

        let result = trapezoidal(&x, &y);
        assert!(matches!(result, Err(QuadratureError::NonMonotonic { index: 2 })));
    }

    #[test]
    fn trapezoidal_rejects_single_sample() {
        let result = trapezoidal(&[1.0], &[1.0]);
        assert!(matches!(
            result,
            Err(QuadratureError::TooFewPoints { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn rejects_mismatched_slice_lengths() {
        let result = trapezoidal(&[0.0, 1.0, 2.0], &[1.0, 1.0]);
        assert!(matches!(result, Err(QuadratureError::LengthMismatch { .. })));
    }

    #[test]
    fn simpsons_is_exact_for_quadratics() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();

        let result = simpsons(&x, &y).unwrap();
        assert!((result - 64.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn simpsons_rejects_even_sample_count() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 1.0, 1.0, 1.0];

        let result = simpsons(&x, &y);
        assert!(matches!(result, Err(QuadratureError::EvenPointCount { actual: 4 })));
    }

    #[test]
    fn simpsons_rejects_uneven_spacing() {
        let x = [0.0, 1.0, 3.0];
        let y = [1.0, 1.0, 1.0];

        let result = simpsons(&x, &y);
        assert!(matches!(result, Err(QuadratureError::UnevenSpacing)));
    }

    #[test]
    fn composite_simpson_keeps_the_last_sample() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();

        // Simpson over [0, 2] is exact (8/3); the final interval contributes
        // a trapezoid of (4 + 9) / 2.
        let result = composite_simpson(&x, &y).unwrap();
        assert!((result - (8.0 / 3.0 + 6.5)).abs() < 1e-12);
    }

    #[test]
    fn integrate_returns_zero_below_two_samples() {
        assert_eq!(integrate(&[], &[]).unwrap(), 0.0);
        assert_eq!(integrate(&[1.0], &[3.0]).unwrap(), 0.0);
    }

    #[test]
    fn integrate_is_exact_for_constants_on_all_rule_paths() {
        let c = 2.5;
        let cases: [&[f64]; 3] = [
            &[0.0, 1.0, 2.0],           // Simpson
            &[0.0, 1.0, 2.0, 3.0],      // composite Simpson
            &[0.0, 0.5, 2.0, 3.0],      // trapezoidal fallback
        ];

        for x in cases {
            let y = vec![c; x.len()];
            let result = integrate(x, &y).unwrap();
            let expected = c * (x[x.len() - 1] - x[0]);
            assert!((result - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn selects_rules_by_spacing_and_parity() {
        assert_eq!(select_rule(&[]), None);
        assert_eq!(select_rule(&[1.0]), None);
        assert_eq!(select_rule(&[0.0, 1.0]), Some(QuadratureRule::Trapezoidal));
        assert_eq!(select_rule(&[0.0, 1.0, 2.0]), Some(QuadratureRule::Simpsons));
        assert_eq!(
            select_rule(&[0.0, 1.0, 2.0, 3.0]),
            Some(QuadratureRule::CompositeSimpson)
        );
        assert_eq!(
            select_rule(&[0.0, 0.5, 2.0]),
            Some(QuadratureRule::Trapezoidal)
        );
    }

    #[test]
    fn rule_paths_disagree_where_expected_on_curved_data() {
        // On y = x² the trapezoidal rule overestimates while Simpson's rule
        // is exact, so the dispatcher's choice is observable numerically.
        let x = [0.0, 1.0, 2.0];
        let y: Vec<f64> = x.iter().map(|v| v * v).collect();

        let adaptive = integrate(&x, &y).unwrap();
        let trap = trapezoidal(&x, &y).unwrap();

        assert!((adaptive - 8.0 / 3.0).abs() < 1e-12);
        assert!(trap > adaptive);
    }

    #[test]
    fn first_moment_matches_closed_form_for_constant_density() {
        // ∫ x·c dx over [0, 2] = c·2²/2.
        let x = [0.0, 0.5, 1.0, 1.5, 2.0];
        let y = [3.0; 5];

        let result = first_moment(&x, &y).unwrap();
        assert!((result - 6.0).abs() < 1e-12);
    }

    #[test]
    fn second_moment_matches_trapezoidal_of_weighted_samples() {
        let x = [0.0, 1.0, 2.0];
        let y = [1.0, 2.0, 3.0];
        let weighted: Vec<f64> = x.iter().zip(&y).map(|(xi, yi)| xi * xi * yi).collect();

        let expected = trapezoidal(&x, &weighted).unwrap();
        let result = second_moment(&x, &y).unwrap();
        assert_eq!(result, expected);
    }
}
