use nalgebra::{Point2, Rotation2, Vector2};
use tracing::{debug, instrument};

use super::error::EngineError;
use super::hydrostatics::HydroCalculator;
use super::progress::{CancellationToken, Progress, ProgressReporter};
use crate::core::models::curves::{StabilityCurve, StabilityMethod, StabilityPoint};
use crate::core::models::geometry::HullGeometry;
use crate::core::models::loading::LoadingCondition;
use crate::core::quadrature;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Parameters of one righting-arm curve computation.
#[derive(Debug, Clone, PartialEq)]
pub struct GzCurveRequest {
    /// First heel angle in degrees.
    pub min_angle: f64,
    /// Last heel angle in degrees (inclusive).
    pub max_angle: f64,
    /// Angle step in degrees, strictly positive.
    pub increment: f64,
    pub method: StabilityMethod,
    /// Draft to compute at; the geometry's design draft when absent.
    pub draft: Option<f64>,
}

impl GzCurveRequest {
    /// Resolves a method name, failing on anything unrecognized.
    pub fn parse_method(name: &str) -> Result<StabilityMethod, EngineError> {
        StabilityMethod::from_name(name).ok_or_else(|| EngineError::UnknownMethod {
            name: name.to_string(),
        })
    }
}

/// Accumulated submerged-section properties in the heeled frame.
struct SectionMoments {
    /// Submerged sectional area in m².
    area: f64,
    /// First moment of area about the centerline plane (m³).
    moment_y: f64,
    /// First moment of area about the keel plane (m³).
    moment_z: f64,
}

/// Produces righting-arm (GZ) curves over a heel-angle range.
pub struct StabilityCalculator<'a> {
    geometry: &'a HullGeometry,
    loading: &'a LoadingCondition,
}

impl<'a> StabilityCalculator<'a> {
    pub fn new(geometry: &'a HullGeometry, loading: &'a LoadingCondition) -> Self {
        Self { geometry, loading }
    }

    /// Computes a GZ curve per the request.
    ///
    /// One upright hydrostatics call supplies the reference GMt, BMt and
    /// displacement; the per-angle work then depends on the method. The
    /// wall-sided path is closed-form per angle; full immersion re-integrates
    /// the heeled sections for every angle. Cancellation is checked between
    /// angles.
    #[instrument(skip_all, name = "gz_curve")]
    pub fn compute_gz_curve(
        &self,
        request: &GzCurveRequest,
        reporter: &ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<StabilityCurve, EngineError> {
        if request.increment <= 0.0 {
            return Err(EngineError::NonPositive {
                what: "angle_increment",
                value: request.increment,
            });
        }
        if request.min_angle >= request.max_angle {
            return Err(EngineError::InvalidRange {
                what: "heel angle",
                min: request.min_angle,
                max: request.max_angle,
            });
        }
        let kg = self.loading.kg.ok_or(EngineError::MissingKg)?;

        let draft = request.draft.unwrap_or_else(|| self.geometry.design_draft());
        let calculator = HydroCalculator::new(self.geometry, Some(self.loading))?;
        let upright = calculator.at_draft(draft)?;
        let gmt = upright.gmt.ok_or(EngineError::MissingKg)?;
        debug!(draft, gmt, bmt = upright.bmt, "upright reference computed");

        let angles = angle_grid(request.min_angle, request.max_angle, request.increment);
        reporter.report(Progress::TaskStart {
            total_steps: angles.len() as u64,
        });

        let compute = |&angle: &f64| -> Result<StabilityPoint, EngineError> {
            if cancel.is_cancelled() {
                return Err(EngineError::Cancelled);
            }
            let phi = angle.to_radians();
            let gz = match request.method {
                StabilityMethod::WallSided => wall_sided_gz(gmt, upright.bmt, phi),
                StabilityMethod::FullImmersion => self.full_immersion_gz(draft, kg, phi)?,
            };
            reporter.report(Progress::TaskIncrement);
            Ok(StabilityPoint {
                heel_angle: angle,
                gz,
                kn: gz + kg * phi.sin(),
            })
        };

        #[cfg(not(feature = "parallel"))]
        let points: Result<Vec<_>, EngineError> = angles.iter().map(compute).collect();

        #[cfg(feature = "parallel")]
        let points: Result<Vec<_>, EngineError> = angles.par_iter().map(compute).collect();

        let points = points?;
        reporter.report(Progress::TaskFinish);

        let (max_gz, angle_at_max_gz) = points
            .iter()
            .fold((f64::NEG_INFINITY, 0.0), |(best, at), p| {
                if p.gz > best { (p.gz, p.heel_angle) } else { (best, at) }
            });

        Ok(StabilityCurve {
            method: request.method,
            displacement: upright.disp_weight,
            kg,
            initial_gmt: gmt,
            draft,
            points,
            max_gz,
            angle_at_max_gz,
        })
    }

    /// Righting arm by immersion/emersion integration of the heeled sections.
    ///
    /// Every waterline strip of every station is clipped against the heeled
    /// waterplane `z = draft + y·tan φ` and its exact area and first moments
    /// accumulated, giving the heeled volume centroid `(y_B, z_B)`. The
    /// righting arm is the earth-horizontal separation of buoyancy and
    /// gravity: `GZ = B_y − KG·sin φ` with `B_y = y_B·cos φ + z_B·sin φ`.
    fn full_immersion_gz(&self, draft: f64, kg: f64, phi: f64) -> Result<f64, EngineError> {
        let tan_phi = phi.tan();
        let xs = self.geometry.station_positions();
        let n = xs.len();

        let mut areas = Vec::with_capacity(n);
        let mut moments_y = Vec::with_capacity(n);
        let mut moments_z = Vec::with_capacity(n);
        for station in 0..n {
            let section = self.heeled_section(station, draft, tan_phi);
            areas.push(section.area);
            moments_y.push(section.moment_y);
            moments_z.push(section.moment_z);
        }

        let volume = quadrature::integrate(&xs, &areas)?;
        if volume <= 0.0 {
            return Ok(0.0);
        }
        let y_b = quadrature::integrate(&xs, &moments_y)? / volume;
        let z_b = quadrature::integrate(&xs, &moments_z)? / volume;

        let b_earth = Rotation2::new(-phi) * Vector2::new(y_b, z_b);
        Ok(b_earth.x - kg * phi.sin())
    }

    /// Submerged area and first moments of one station in the heeled frame.
    fn heeled_section(&self, station: usize, draft: f64, tan_phi: f64) -> SectionMoments {
        let waterlines = self.geometry.waterlines();
        let mut totals = SectionMoments {
            area: 0.0,
            moment_y: 0.0,
            moment_z: 0.0,
        };
        for pair in waterlines.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            let b0 = self.geometry.half_breadth(station, lower.index);
            let b1 = self.geometry.half_breadth(station, upper.index);
            for side in [1.0, -1.0] {
                let strip = [
                    Point2::new(0.0, lower.z),
                    Point2::new(side * b0, lower.z),
                    Point2::new(side * b1, upper.z),
                    Point2::new(0.0, upper.z),
                ];
                let submerged = clip_submerged(&strip, draft, tan_phi);
                let (area, moment_y, moment_z) = polygon_properties(&submerged);
                totals.area += area;
                totals.moment_y += moment_y;
                totals.moment_z += moment_z;
            }
        }
        totals
    }
}

/// The wall-sided closed-form righting arm.
fn wall_sided_gz(gmt: f64, bmt: f64, phi: f64) -> f64 {
    let tan_phi = phi.tan();
    (gmt + 0.5 * bmt * tan_phi * tan_phi) * phi.sin()
}

fn angle_grid(min: f64, max: f64, increment: f64) -> Vec<f64> {
    let mut angles = Vec::new();
    let mut angle = min;
    while angle <= max + 1e-9 {
        angles.push(angle);
        angle += increment;
    }
    angles
}

/// Clips a section strip to the submerged half-plane `z ≤ draft + y·tan φ`.
fn clip_submerged(polygon: &[Point2<f64>], draft: f64, tan_phi: f64) -> Vec<Point2<f64>> {
    let depth = |p: &Point2<f64>| draft + p.x * tan_phi - p.y;
    let mut clipped = Vec::with_capacity(polygon.len() + 1);
    for i in 0..polygon.len() {
        let current = polygon[i];
        let next = polygon[(i + 1) % polygon.len()];
        let d0 = depth(&current);
        let d1 = depth(&next);
        if d0 >= 0.0 {
            clipped.push(current);
        }
        if (d0 >= 0.0) != (d1 >= 0.0) {
            let t = d0 / (d0 - d1);
            clipped.push(current + (next - current) * t);
        }
    }
    clipped
}

/// Area and first moments of a simple polygon, orientation-normalized.
fn polygon_properties(polygon: &[Point2<f64>]) -> (f64, f64, f64) {
    if polygon.len() < 3 {
        return (0.0, 0.0, 0.0);
    }
    let mut doubled_area = 0.0;
    let mut sum_y = 0.0;
    let mut sum_z = 0.0;
    for i in 0..polygon.len() {
        let p = polygon[i];
        let q = polygon[(i + 1) % polygon.len()];
        let cross = p.x * q.y - q.x * p.y;
        doubled_area += cross;
        sum_y += (p.x + q.x) * cross;
        sum_z += (p.y + q.y) * cross;
    }
    let mut area = doubled_area / 2.0;
    let mut moment_y = sum_y / 6.0;
    let mut moment_z = sum_z / 6.0;
    if area < 0.0 {
        area = -area;
        moment_y = -moment_y;
        moment_z = -moment_z;
    }
    (area, moment_y, moment_z)
}
