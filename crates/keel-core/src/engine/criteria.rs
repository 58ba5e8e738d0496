use serde::Serialize;
use tracing::instrument;

use super::error::EngineError;
use crate::core::models::curves::StabilityCurve;
use crate::core::quadrature;

/// Minimum area under the GZ curve from 0° to 30°, in m·rad.
const MIN_AREA_0_30: f64 = 0.055;
/// Minimum area under the GZ curve from 0° to 40°, in m·rad.
const MIN_AREA_0_40: f64 = 0.090;
/// Minimum area under the GZ curve from 30° to 40°, in m·rad.
const MIN_AREA_30_40: f64 = 0.030;
/// Minimum heel angle of the maximum righting arm, in degrees.
const MIN_ANGLE_AT_MAX_GZ: f64 = 25.0;
/// Minimum initial transverse metacentric height, in meters.
const MIN_INITIAL_GMT: f64 = 0.15;
/// Minimum righting arm at 30° of heel, in meters.
const MIN_GZ_AT_30: f64 = 0.20;

/// The outcome of one intact-stability criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionResult {
    pub name: &'static str,
    /// The threshold the actual value must meet or exceed.
    pub required: f64,
    pub actual: f64,
    pub passed: bool,
}

/// The outcome of the full intact-stability rule set against one GZ curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriteriaResult {
    pub criteria: Vec<CriterionResult>,
    pub all_passed: bool,
}

/// Evaluates the fixed intact-stability rule set against a GZ curve.
///
/// The six rules and their thresholds are absolute constants, not
/// configurable. Areas under the curve are integrated trapezoidally in
/// m·rad over the sampled points inside the bounds, with
/// linearly-interpolated boundary points synthesized where the exact bounds
/// fall between samples.
#[instrument(skip_all, name = "stability_criteria")]
pub fn check(curve: &StabilityCurve) -> Result<CriteriaResult, EngineError> {
    let criteria = vec![
        criterion(
            "Area under GZ curve, 0° to 30°",
            MIN_AREA_0_30,
            area_under_curve(curve, 0.0, 30.0)?,
        ),
        criterion(
            "Area under GZ curve, 0° to 40°",
            MIN_AREA_0_40,
            area_under_curve(curve, 0.0, 40.0)?,
        ),
        criterion(
            "Area under GZ curve, 30° to 40°",
            MIN_AREA_30_40,
            area_under_curve(curve, 30.0, 40.0)?,
        ),
        criterion(
            "Angle of maximum GZ",
            MIN_ANGLE_AT_MAX_GZ,
            curve.angle_at_max_gz,
        ),
        criterion("Initial GMt", MIN_INITIAL_GMT, curve.initial_gmt),
        criterion("GZ at 30° heel", MIN_GZ_AT_30, curve.interpolate_gz(30.0)),
    ];
    let all_passed = criteria.iter().all(|c| c.passed);
    Ok(CriteriaResult {
        criteria,
        all_passed,
    })
}

fn criterion(name: &'static str, required: f64, actual: f64) -> CriterionResult {
    CriterionResult {
        name,
        required,
        actual,
        passed: actual >= required,
    }
}

/// Area under the GZ curve between two heel angles, in m·rad.
fn area_under_curve(curve: &StabilityCurve, from: f64, to: f64) -> Result<f64, EngineError> {
    let mut angles = vec![from];
    angles.extend(
        curve
            .points
            .iter()
            .map(|p| p.heel_angle)
            .filter(|&a| a > from && a < to),
    );
    angles.push(to);

    let radians: Vec<f64> = angles.iter().map(|a| a.to_radians()).collect();
    let gz: Vec<f64> = angles.iter().map(|&a| curve.interpolate_gz(a)).collect();
    Ok(quadrature::trapezoidal(&radians, &gz)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::curves::{StabilityMethod, StabilityPoint};

    /// A curve linear in heel angle: GZ(φ°) = slope · φ.
    fn setup_linear_curve(slope: f64, gmt: f64, angle_at_max: f64) -> StabilityCurve {
        let points: Vec<StabilityPoint> = (0..=12)
            .map(|i| {
                let heel_angle = 5.0 * i as f64;
                StabilityPoint {
                    heel_angle,
                    gz: slope * heel_angle,
                    kn: 0.0,
                }
            })
            .collect();
        StabilityCurve {
            method: StabilityMethod::WallSided,
            displacement: 1.0e6,
            kg: 5.0,
            initial_gmt: gmt,
            draft: 4.0,
            points,
            max_gz: slope * 60.0,
            angle_at_max_gz: angle_at_max,
        }
    }

    #[test]
    fn generous_curve_passes_every_criterion() {
        // GZ reaches 0.6 m at 30°: every area and level threshold clears.
        let curve = setup_linear_curve(0.02, 1.0, 60.0);

        let result = check(&curve).unwrap();
        assert!(result.all_passed);
        assert_eq!(result.criteria.len(), 6);
        for criterion in &result.criteria {
            assert!(criterion.passed, "{} failed", criterion.name);
        }
    }

    #[test]
    fn area_integration_matches_the_closed_form() {
        // For GZ = s·φ (degrees), the area from 0 to Φ in m·rad is
        // s·Φ²/2 · (π/180), and the trapezoidal rule is exact on it.
        let slope = 0.02;
        let curve = setup_linear_curve(slope, 1.0, 60.0);

        let result = check(&curve).unwrap();
        let area_0_30 = result.criteria[0].actual;
        let expected = slope * 30.0 * 30.0 / 2.0 * std::f64::consts::PI / 180.0;
        assert!((area_0_30 - expected).abs() < 1e-12);
    }

    #[test]
    fn synthesizes_boundary_points_between_samples() {
        // Keep only samples at 0°/20°/40°/60°, so the 30° bound of the area
        // rules falls between samples and must be synthesized.
        let curve = setup_linear_curve(0.02, 1.0, 60.0);
        let sparse = StabilityCurve {
            points: curve
                .points
                .iter()
                .filter(|p| p.heel_angle as u32 % 20 == 0)
                .cloned()
                .collect(),
            ..curve
        };

        let result = check(&sparse).unwrap();
        // The curve is linear, so interpolated boundaries keep it exact.
        let expected = 0.02 * 30.0 * 30.0 / 2.0 * std::f64::consts::PI / 180.0;
        assert!((result.criteria[0].actual - expected).abs() < 1e-12);
    }

    #[test]
    fn exact_threshold_values_pass() {
        let mut curve = setup_linear_curve(0.02, MIN_INITIAL_GMT, MIN_ANGLE_AT_MAX_GZ);
        curve.initial_gmt = MIN_INITIAL_GMT;

        let result = check(&curve).unwrap();
        let gmt = &result.criteria[4];
        let angle = &result.criteria[3];
        assert!(gmt.passed);
        assert!(angle.passed);
    }

    #[test]
    fn one_deficient_criterion_fails_alone() {
        // GMt just below the threshold; everything else still generous.
        let curve = setup_linear_curve(0.02, MIN_INITIAL_GMT - 0.001, 60.0);

        let result = check(&curve).unwrap();
        assert!(!result.all_passed);
        for criterion in &result.criteria {
            if criterion.name == "Initial GMt" {
                assert!(!criterion.passed);
            } else {
                assert!(criterion.passed, "{} unexpectedly failed", criterion.name);
            }
        }
    }

    #[test]
    fn weak_curve_fails_the_area_rules() {
        let curve = setup_linear_curve(0.001, 1.0, 60.0);

        let result = check(&curve).unwrap();
        assert!(!result.all_passed);
        assert!(!result.criteria[0].passed);
        assert!(!result.criteria[1].passed);
        assert!(!result.criteria[2].passed);
    }
}
