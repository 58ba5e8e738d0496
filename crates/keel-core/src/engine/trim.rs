use tracing::{debug, instrument};

use super::error::EngineError;
use super::hydrostatics::HydroCalculator;
use crate::core::models::geometry::HullGeometry;
use crate::core::models::loading::LoadingCondition;
use crate::core::models::results::{HydrostaticResult, TrimSolution};

/// Iteration budget of the Newton-Raphson search.
const MAX_ITERATIONS: usize = 20;
/// Acceptable displacement residual, in kg.
const TOLERANCE_KG: f64 = 100.0;
/// Finite-difference step for the displacement derivative, in meters.
const DRAFT_STEP: f64 = 0.01;
/// Derivative magnitudes below this are treated as degenerate, in kg/m.
const MIN_DERIVATIVE: f64 = 1e-6;
/// Fallback slope used when the finite difference degenerates, in kg/m.
const FALLBACK_DERIVATIVE: f64 = 1e7;
/// Smallest mean draft the search will visit, in meters.
const MIN_DRAFT: f64 = 0.1;

/// Newton-Raphson search over mean draft for a target displacement.
///
/// Trim (the difference between aft and forward draft) is held fixed at its
/// initial value throughout the search; only the mean draft moves. This is a
/// deliberate one-dimensional simplification — the solver matches
/// displacement, not simultaneous displacement and trim-moment equilibrium.
pub struct TrimSolver<'a> {
    geometry: &'a HullGeometry,
    loading: Option<&'a LoadingCondition>,
}

impl<'a> TrimSolver<'a> {
    pub fn new(geometry: &'a HullGeometry, loading: Option<&'a LoadingCondition>) -> Self {
        Self { geometry, loading }
    }

    /// Finds the mean draft at which displacement matches the target.
    ///
    /// Non-convergence after the iteration budget is a reported outcome,
    /// not an error: the best estimate comes back with `converged = false`
    /// and callers must check the flag.
    #[instrument(skip_all, name = "trim_solve")]
    pub fn solve_for_displacement(
        &self,
        target_displacement: f64,
        initial_draft_fwd: f64,
        initial_draft_aft: f64,
    ) -> Result<TrimSolution, EngineError> {
        if target_displacement <= 0.0 {
            return Err(EngineError::NonPositive {
                what: "target_displacement",
                value: target_displacement,
            });
        }
        if initial_draft_fwd <= 0.0 {
            return Err(EngineError::NonPositive {
                what: "initial_draft_fwd",
                value: initial_draft_fwd,
            });
        }
        if initial_draft_aft <= 0.0 {
            return Err(EngineError::NonPositive {
                what: "initial_draft_aft",
                value: initial_draft_aft,
            });
        }

        let calculator = HydroCalculator::new(self.geometry, self.loading)?;
        let trim = initial_draft_aft - initial_draft_fwd;
        let max_draft = 2.0 * self.geometry.design_draft();
        let mut mean_draft =
            (0.5 * (initial_draft_fwd + initial_draft_aft)).clamp(MIN_DRAFT, max_draft);

        let mut best: Option<(f64, TrimSolution)> = None;
        for iteration in 1..=MAX_ITERATIONS {
            let hydro = calculator.at_draft(mean_draft)?;
            let error = hydro.disp_weight - target_displacement;
            debug!(iteration, mean_draft, error, "trim iteration");

            let solution = self.build_solution(
                target_displacement,
                mean_draft,
                trim,
                max_draft,
                &hydro,
                iteration,
                error.abs() < TOLERANCE_KG,
            );
            if error.abs() < TOLERANCE_KG {
                return Ok(solution);
            }
            if best.as_ref().is_none_or(|(e, _)| error.abs() < *e) {
                best = Some((error.abs(), solution));
            }

            let perturbed = calculator.at_draft(mean_draft + DRAFT_STEP)?;
            let mut derivative = (perturbed.disp_weight - hydro.disp_weight) / DRAFT_STEP;
            if derivative.abs() < MIN_DERIVATIVE {
                derivative = FALLBACK_DERIVATIVE;
            }
            mean_draft = (mean_draft - error / derivative).clamp(MIN_DRAFT, max_draft);
        }

        // Exhausted the budget: report the closest visit.
        let (_, mut solution) = best.expect("at least one iteration ran");
        solution.iterations = MAX_ITERATIONS;
        Ok(solution)
    }

    /// Whether a displacement is reachable at all below the design draft.
    pub fn is_displacement_achievable(&self, target_displacement: f64) -> Result<bool, EngineError> {
        let calculator = HydroCalculator::new(self.geometry, self.loading)?;
        let at_design = calculator.at_draft(self.geometry.design_draft())?;
        Ok(target_displacement <= at_design.disp_weight)
    }

    #[allow(clippy::too_many_arguments)]
    fn build_solution(
        &self,
        target_displacement: f64,
        mean_draft: f64,
        trim: f64,
        max_draft: f64,
        hydro: &HydrostaticResult,
        iterations: usize,
        converged: bool,
    ) -> TrimSolution {
        let draft_fp = (mean_draft - 0.5 * trim).clamp(MIN_DRAFT, max_draft);
        let draft_ap = (mean_draft + 0.5 * trim).clamp(MIN_DRAFT, max_draft);
        let lpp = self.geometry.lpp();
        let trim_angle = if lpp > 0.0 {
            ((draft_ap - draft_fp) / lpp).atan().to_degrees()
        } else {
            0.0
        };
        let mtc = if lpp > 0.0 {
            hydro.disp_weight * hydro.bml / (100.0 * lpp)
        } else {
            0.0
        };
        TrimSolution {
            target_displacement,
            draft_fp,
            draft_ap,
            mean_draft,
            trim_angle,
            lcf: hydro.lcb,
            mtc,
            converged,
            iterations,
        }
    }
}
