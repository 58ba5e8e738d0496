use serde::Serialize;
use tracing::{info, instrument};

use crate::core::models::curves::{StabilityCurve, StabilityMethod};
use crate::core::models::results::HydrostaticResult;
use crate::core::provider::{GeometrySource, LoadingSource};
use crate::engine::criteria::{self, CriteriaResult};
use crate::engine::error::EngineError;
use crate::engine::hydrostatics::HydroCalculator;
use crate::engine::progress::{CancellationToken, Progress, ProgressReporter};
use crate::engine::stability::{GzCurveRequest, StabilityCalculator};

/// Parameters of a full intact-stability assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentConfig {
    /// Draft to assess at; the vessel's design draft when absent.
    pub draft: Option<f64>,
    /// First heel angle of the GZ sweep, in degrees.
    pub min_angle: f64,
    /// Last heel angle of the GZ sweep, in degrees.
    pub max_angle: f64,
    /// Heel angle step, in degrees.
    pub increment: f64,
    pub method: StabilityMethod,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            draft: None,
            min_angle: 0.0,
            max_angle: 60.0,
            increment: 5.0,
            method: StabilityMethod::FullImmersion,
        }
    }
}

/// The combined outcome of an assessment: upright hydrostatics, the GZ
/// curve, and the criteria verdict it implies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StabilityAssessment {
    pub hydrostatics: HydrostaticResult,
    pub curve: StabilityCurve,
    pub criteria: CriteriaResult,
}

/// Runs a complete intact-stability assessment for a stored vessel and
/// loadcase.
///
/// Inputs resolve through the provider boundary; a missing vessel or
/// loadcase surfaces as the corresponding not-found error. The loading
/// condition must carry a KG, since both the GZ curve and the criteria
/// depend on it.
#[instrument(skip_all, name = "stability_assessment", fields(vessel = %vessel, loadcase = %loadcase))]
pub fn run<S>(
    store: &S,
    vessel: &str,
    loadcase: &str,
    config: &AssessmentConfig,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<StabilityAssessment, EngineError>
where
    S: GeometrySource + LoadingSource,
{
    reporter.report(Progress::PhaseStart { name: "Resolution" });
    let geometry = store
        .hull_geometry(vessel)
        .ok_or_else(|| EngineError::VesselNotFound {
            vessel: vessel.to_string(),
        })?;
    let loading = store
        .loading_condition(loadcase)
        .ok_or_else(|| EngineError::LoadcaseNotFound {
            loadcase: loadcase.to_string(),
        })?;
    info!(
        vessel = geometry.name(),
        loadcase = loading.name,
        "assessment inputs resolved"
    );
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Upright hydrostatics",
    });
    let draft = config.draft.unwrap_or_else(|| geometry.design_draft());
    let calculator = HydroCalculator::new(&geometry, Some(&loading))?;
    let hydrostatics = calculator.at_draft(draft)?;
    reporter.report(Progress::PhaseFinish);

    if cancel.is_cancelled() {
        return Err(EngineError::Cancelled);
    }

    reporter.report(Progress::PhaseStart {
        name: "Righting arms",
    });
    let request = GzCurveRequest {
        min_angle: config.min_angle,
        max_angle: config.max_angle,
        increment: config.increment,
        method: config.method,
        draft: Some(draft),
    };
    let stability = StabilityCalculator::new(&geometry, &loading);
    let curve = stability.compute_gz_curve(&request, reporter, cancel)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart { name: "Criteria" });
    let criteria = criteria::check(&curve)?;
    reporter.report(Progress::PhaseFinish);

    info!(
        passed = criteria.all_passed,
        max_gz = curve.max_gz,
        "assessment complete"
    );
    Ok(StabilityAssessment {
        hydrostatics,
        curve,
        criteria,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures;
    use crate::core::models::loading::LoadingCondition;
    use crate::core::provider::InMemoryStore;

    fn setup_store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store.insert_geometry(
            "barge",
            fixtures::rectangular_barge(100.0, 20.0, 8.0, 11, 17),
        );
        store.insert_loading("departure", LoadingCondition::seawater("departure", 3.0));
        store
    }

    #[test]
    fn assesses_a_stored_vessel_end_to_end() {
        let store = setup_store();

        let assessment = run(
            &store,
            "barge",
            "departure",
            &AssessmentConfig::default(),
            &ProgressReporter::new(),
            &CancellationToken::new(),
        )
        .unwrap();

        // The stiff box barge clears the whole rule set at design draft.
        assert!(assessment.criteria.all_passed);
        assert_eq!(assessment.curve.points.len(), 13);
        assert!((assessment.hydrostatics.draft - 4.0).abs() < 1e-12);
    }

    #[test]
    fn missing_vessel_surfaces_as_not_found() {
        let store = setup_store();

        let result = run(
            &store,
            "ghost",
            "departure",
            &AssessmentConfig::default(),
            &ProgressReporter::new(),
            &CancellationToken::new(),
        );
        assert!(matches!(result, Err(EngineError::VesselNotFound { .. })));
    }

    #[test]
    fn missing_loadcase_surfaces_as_not_found() {
        let store = setup_store();

        let result = run(
            &store,
            "barge",
            "ballast",
            &AssessmentConfig::default(),
            &ProgressReporter::new(),
            &CancellationToken::new(),
        );
        assert!(matches!(result, Err(EngineError::LoadcaseNotFound { .. })));
    }

    #[test]
    fn reports_phases_in_order() {
        let store = setup_store();
        let phases = std::sync::Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { name } = event {
                phases.lock().unwrap().push(name);
            }
        }));

        run(
            &store,
            "barge",
            "departure",
            &AssessmentConfig::default(),
            &reporter,
            &CancellationToken::new(),
        )
        .unwrap();

        assert_eq!(
            *phases.lock().unwrap(),
            vec![
                "Resolution",
                "Upright hydrostatics",
                "Righting arms",
                "Criteria"
            ]
        );
    }
}
