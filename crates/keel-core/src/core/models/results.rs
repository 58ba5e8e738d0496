use serde::Serialize;

/// The full set of hydrostatic properties of a hull at one draft.
///
/// Produced by the hydrostatic calculator and owned by the caller; the core
/// never retains or persists results. All values are SI (meters, cubic
/// meters, kilograms). `gmt`/`gml` are present only when the loading
/// condition supplied a vertical center of gravity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydrostaticResult {
    /// Draft the result was computed at, in meters.
    pub draft: f64,
    /// Displaced volume in m³.
    pub disp_volume: f64,
    /// Displacement in kg (`disp_volume · rho`).
    pub disp_weight: f64,
    /// Vertical center of buoyancy above the keel.
    pub kb: f64,
    /// Longitudinal center of buoyancy from the aft perpendicular.
    pub lcb: f64,
    /// Transverse center of buoyancy. Identically zero for the symmetric
    /// hulls this library models; stated, not derived.
    pub tcb: f64,
    /// Transverse metacentric radius (I_t / volume).
    pub bmt: f64,
    /// Longitudinal metacentric radius (I_l / volume).
    pub bml: f64,
    /// Transverse metacentric height, when KG is known.
    pub gmt: Option<f64>,
    /// Longitudinal metacentric height, when KG is known.
    pub gml: Option<f64>,
    /// Waterplane area in m².
    pub awp: f64,
    /// Transverse second moment of the waterplane in m⁴.
    pub iwp: f64,
    /// Block coefficient.
    pub cb: f64,
    /// Prismatic coefficient.
    pub cp: f64,
    /// Midship section coefficient.
    pub cm: f64,
    /// Waterplane area coefficient.
    pub cwp: f64,
}

/// The outcome of an equilibrium-trim search for a target displacement.
///
/// Non-convergence is reported, not thrown: after the iteration budget is
/// exhausted the best estimate is returned with `converged = false`, and
/// callers must inspect the flag before trusting the drafts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrimSolution {
    /// The displacement the solver was asked to match, in kg.
    pub target_displacement: f64,
    /// Draft at the forward perpendicular, in meters.
    pub draft_fp: f64,
    /// Draft at the aft perpendicular, in meters.
    pub draft_ap: f64,
    /// Mean draft, in meters.
    pub mean_draft: f64,
    /// Trim angle in degrees, positive by the stern.
    pub trim_angle: f64,
    /// Longitudinal center of floatation, approximated by LCB.
    pub lcf: f64,
    /// Moment to change trim one centimeter, in kg·m/cm.
    pub mtc: f64,
    /// Whether the displacement residual fell within tolerance.
    pub converged: bool,
    /// Number of Newton-Raphson iterations performed.
    pub iterations: usize,
}
