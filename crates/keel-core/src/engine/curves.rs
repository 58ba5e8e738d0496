use std::collections::BTreeMap;

use tracing::instrument;

use super::error::EngineError;
use super::hydrostatics::HydroCalculator;
use super::progress::{CancellationToken, ProgressReporter};
use crate::core::models::curves::{BonjeanCurve, BonjeanPoint, CurveKind, CurvePoint, HydroCurve};
use crate::core::models::geometry::HullGeometry;
use crate::core::models::loading::LoadingCondition;
use crate::core::models::results::HydrostaticResult;
use crate::core::quadrature;

/// Sweeps the hydrostatic calculator over a draft range to produce named
/// property curves and per-station sectional-area (Bonjean) profiles.
pub struct CurveGenerator<'a> {
    geometry: &'a HullGeometry,
    loading: Option<&'a LoadingCondition>,
}

impl<'a> CurveGenerator<'a> {
    pub fn new(geometry: &'a HullGeometry, loading: Option<&'a LoadingCondition>) -> Self {
        Self { geometry, loading }
    }

    /// A linearly spaced draft sequence, inclusive of both bounds.
    pub fn draft_range(
        min_draft: f64,
        max_draft: f64,
        points: usize,
    ) -> Result<Vec<f64>, EngineError> {
        if points < 2 {
            return Err(EngineError::NonPositive {
                what: "points",
                value: points as f64,
            });
        }
        if max_draft <= min_draft {
            return Err(EngineError::InvalidRange {
                what: "draft",
                min: min_draft,
                max: max_draft,
            });
        }
        let step = (max_draft - min_draft) / (points - 1) as f64;
        Ok((0..points).map(|i| min_draft + i as f64 * step).collect())
    }

    /// Generates one property curve over a draft range.
    ///
    /// `CurveKind::Gmt` requires a loading condition with a known KG.
    #[instrument(skip_all, name = "hydro_curve", fields(kind = kind.name()))]
    pub fn generate(
        &self,
        kind: CurveKind,
        min_draft: f64,
        max_draft: f64,
        points: usize,
        reporter: &ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<HydroCurve, EngineError> {
        if kind == CurveKind::Gmt && self.loading.and_then(|l| l.kg).is_none() {
            return Err(EngineError::MissingKg);
        }
        let drafts = Self::draft_range(min_draft, max_draft, points)?;
        let calculator = HydroCalculator::new(self.geometry, self.loading)?;
        let table = calculator.table(&drafts, reporter, cancel)?;

        let points = table
            .iter()
            .map(|row| CurvePoint {
                draft: row.draft,
                value: extract(kind, row),
            })
            .collect();
        Ok(HydroCurve {
            kind,
            name: kind.name().to_string(),
            points,
        })
    }

    /// Generates several curves over one shared hydrostatic sweep.
    ///
    /// Unknown curve names are skipped silently; the sweep itself runs once
    /// regardless of how many curves it feeds.
    #[instrument(skip_all, name = "hydro_curves")]
    pub fn generate_multiple(
        &self,
        names: &[&str],
        min_draft: f64,
        max_draft: f64,
        points: usize,
        reporter: &ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<BTreeMap<String, HydroCurve>, EngineError> {
        let kinds: Vec<CurveKind> = names.iter().filter_map(|n| CurveKind::from_name(n)).collect();
        let mut curves = BTreeMap::new();
        if kinds.is_empty() {
            return Ok(curves);
        }
        if kinds.contains(&CurveKind::Gmt) && self.loading.and_then(|l| l.kg).is_none() {
            return Err(EngineError::MissingKg);
        }

        let drafts = Self::draft_range(min_draft, max_draft, points)?;
        let calculator = HydroCalculator::new(self.geometry, self.loading)?;
        let table = calculator.table(&drafts, reporter, cancel)?;

        for kind in kinds {
            let points = table
                .iter()
                .map(|row| CurvePoint {
                    draft: row.draft,
                    value: extract(kind, row),
                })
                .collect();
            curves.insert(
                kind.name().to_string(),
                HydroCurve {
                    kind,
                    name: kind.name().to_string(),
                    points,
                },
            );
        }
        Ok(curves)
    }

    /// Computes the sectional-area profile of every station.
    ///
    /// For each station the area at waterline `j` integrates the half-breadth
    /// samples of waterlines `0..=j`, doubled for both sides — a full
    /// area-vs-draft profile that needs no target draft.
    #[instrument(skip_all, name = "bonjean_curves")]
    pub fn bonjean(&self) -> Result<Vec<BonjeanCurve>, EngineError> {
        if self.geometry.stations().is_empty() || self.geometry.waterlines().is_empty() {
            return Err(EngineError::EmptyGeometry {
                reason: "no stations or waterlines",
            });
        }
        let heights = self.geometry.waterline_heights();
        let mut curves = Vec::with_capacity(self.geometry.stations().len());
        for station in self.geometry.stations() {
            let breadths: Vec<f64> = (0..heights.len())
                .map(|waterline| self.geometry.half_breadth(station.index, waterline))
                .collect();
            let mut points = Vec::with_capacity(heights.len());
            for (j, &z) in heights.iter().enumerate() {
                let area = 2.0 * quadrature::integrate(&heights[..=j], &breadths[..=j])?;
                points.push(BonjeanPoint { z, area });
            }
            curves.push(BonjeanCurve {
                station_index: station.index,
                x: station.x,
                points,
            });
        }
        Ok(curves)
    }
}

fn extract(kind: CurveKind, row: &HydrostaticResult) -> f64 {
    match kind {
        CurveKind::Displacement => row.disp_weight,
        CurveKind::Kb => row.kb,
        CurveKind::Lcb => row.lcb,
        CurveKind::Gmt => row.gmt.unwrap_or(0.0),
        CurveKind::WaterplaneArea => row.awp,
    }
}
