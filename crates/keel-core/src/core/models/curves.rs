use itertools::Itertools;
use serde::Serialize;

/// The hydrostatic properties that can be swept into a curve over draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CurveKind {
    Displacement,
    Kb,
    Lcb,
    Gmt,
    WaterplaneArea,
}

impl CurveKind {
    /// Resolves a well-known curve name, case-insensitively.
    ///
    /// Returns `None` for names this library does not generate, which lets
    /// bulk generation skip unknown requests silently.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "displacement" => Some(Self::Displacement),
            "kb" => Some(Self::Kb),
            "lcb" => Some(Self::Lcb),
            "gmt" => Some(Self::Gmt),
            "waterplane_area" | "awp" => Some(Self::WaterplaneArea),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Displacement => "displacement",
            Self::Kb => "kb",
            Self::Lcb => "lcb",
            Self::Gmt => "gmt",
            Self::WaterplaneArea => "waterplane_area",
        }
    }
}

/// One sample of a property-vs-draft curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub draft: f64,
    pub value: f64,
}

/// A named hydrostatic property sampled over a draft range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydroCurve {
    pub kind: CurveKind,
    pub name: String,
    pub points: Vec<CurvePoint>,
}

/// One sample of a sectional-area (Bonjean) profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BonjeanPoint {
    /// Waterline height above the keel, in meters.
    pub z: f64,
    /// Full (both sides) sectional area below `z`, in m².
    pub area: f64,
}

/// The sectional-area-vs-draft profile of a single station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BonjeanCurve {
    pub station_index: usize,
    /// Longitudinal position of the station, in meters.
    pub x: f64,
    pub points: Vec<BonjeanPoint>,
}

/// How a righting-arm curve is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StabilityMethod {
    /// Closed-form small-angle approximation assuming vertical hull sides
    /// through the heel range; no geometry re-integration per angle.
    WallSided,
    /// Per-angle immersion/emersion integration of the heeled sections.
    /// Materially more expensive, valid at any sampled angle.
    FullImmersion,
}

impl StabilityMethod {
    /// Resolves a method name, case-insensitively. Returns `None` for
    /// unrecognized names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "wall-sided" | "wallsided" | "wall_sided" => Some(Self::WallSided),
            "full-immersion" | "fullimmersion" | "full_immersion" => Some(Self::FullImmersion),
            _ => None,
        }
    }
}

/// One sampled point of a righting-arm curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StabilityPoint {
    /// Heel angle in degrees.
    pub heel_angle: f64,
    /// Righting arm in meters.
    pub gz: f64,
    /// Righting arm about the keel (`GZ + KG·sin φ`), in meters.
    pub kn: f64,
}

/// A righting-arm curve over a heel-angle range, with the upright reference
/// values it was computed against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StabilityCurve {
    pub method: StabilityMethod,
    /// Displacement at the computation draft, in kg.
    pub displacement: f64,
    /// Vertical center of gravity above the keel, in meters.
    pub kg: f64,
    /// Upright transverse metacentric height, in meters.
    pub initial_gmt: f64,
    /// Draft the curve was computed at, in meters.
    pub draft: f64,
    pub points: Vec<StabilityPoint>,
    /// Greatest sampled righting arm, in meters.
    pub max_gz: f64,
    /// Heel angle of the greatest sampled righting arm, in degrees.
    pub angle_at_max_gz: f64,
}

impl StabilityCurve {
    /// Linearly interpolates GZ at an arbitrary heel angle.
    ///
    /// Outside the sampled range the value clamps to the first/last sampled
    /// point. An empty curve interpolates to zero.
    pub fn interpolate_gz(&self, angle: f64) -> f64 {
        let points = &self.points;
        let Some(first) = points.first() else {
            return 0.0;
        };
        if angle <= first.heel_angle {
            return first.gz;
        }
        let last = points.last().unwrap();
        if angle >= last.heel_angle {
            return last.gz;
        }
        for (a, b) in points.iter().tuple_windows() {
            if angle >= a.heel_angle && angle <= b.heel_angle {
                let span = b.heel_angle - a.heel_angle;
                if span <= 0.0 {
                    return a.gz;
                }
                let t = (angle - a.heel_angle) / span;
                return a.gz + t * (b.gz - a.gz);
            }
        }
        last.gz
    }

    /// The sampled point with the greatest GZ, with no sub-sample refinement.
    pub fn max_point(&self) -> Option<&StabilityPoint> {
        self.points
            .iter()
            .max_by(|a, b| a.gz.partial_cmp(&b.gz).unwrap_or(std::cmp::Ordering::Equal))
    }
}
