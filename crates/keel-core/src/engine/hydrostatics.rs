use tracing::{debug, instrument};

use super::error::EngineError;
use super::progress::{CancellationToken, Progress, ProgressReporter};
use crate::core::models::geometry::HullGeometry;
use crate::core::models::loading::{LoadingCondition, SEAWATER_DENSITY};
use crate::core::models::results::HydrostaticResult;
use crate::core::quadrature;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Tolerance for treating a draft as coinciding with a waterline, in meters.
const WATERLINE_TOLERANCE: f64 = 1e-6;

/// Submerged properties of one transverse section.
struct Section {
    /// Full (both sides) sectional area in m².
    area: f64,
    /// Vertical centroid of the section above the keel.
    centroid_z: f64,
}

/// Computes hydrostatic properties of a hull at prescribed drafts.
///
/// The calculator borrows its geometry and loading snapshot once at
/// construction and reuses them across every draft it is asked about —
/// multi-draft tables pay the validation cost a single time.
pub struct HydroCalculator<'a> {
    geometry: &'a HullGeometry,
    loading: Option<&'a LoadingCondition>,
}

impl<'a> HydroCalculator<'a> {
    pub fn new(
        geometry: &'a HullGeometry,
        loading: Option<&'a LoadingCondition>,
    ) -> Result<Self, EngineError> {
        if geometry.stations().is_empty() {
            return Err(EngineError::EmptyGeometry {
                reason: "no stations",
            });
        }
        if geometry.waterlines().is_empty() {
            return Err(EngineError::EmptyGeometry {
                reason: "no waterlines",
            });
        }
        if geometry.offsets().is_empty() {
            return Err(EngineError::EmptyGeometry {
                reason: "no offsets",
            });
        }
        Ok(Self { geometry, loading })
    }

    pub fn geometry(&self) -> &HullGeometry {
        self.geometry
    }

    pub fn rho(&self) -> f64 {
        self.loading.map_or(SEAWATER_DENSITY, |l| l.rho)
    }

    fn kg(&self) -> Option<f64> {
        self.loading.and_then(|l| l.kg)
    }

    /// Number of waterlines at or below the draft. Integration needs at
    /// least two.
    fn active_waterlines(&self, draft: f64) -> Result<usize, EngineError> {
        let waterlines = self.geometry.waterlines();
        let count = waterlines.iter().take_while(|w| w.z <= draft).count();
        if count < 2 {
            let min_z = waterlines.get(1).unwrap_or(&waterlines[0]).z;
            return Err(EngineError::DraftBelowRange { draft, min_z });
        }
        Ok(count)
    }

    /// Integrates one station's submerged section over the active waterlines.
    fn section(&self, station: usize, active: usize) -> Result<Section, EngineError> {
        let zs: Vec<f64> = self.geometry.waterlines()[..active]
            .iter()
            .map(|w| w.z)
            .collect();
        let breadths: Vec<f64> = (0..active)
            .map(|waterline| self.geometry.half_breadth(station, waterline))
            .collect();

        let half_area = quadrature::integrate(&zs, &breadths)?;
        let centroid_z = if half_area > 0.0 {
            quadrature::first_moment(&zs, &breadths)? / half_area
        } else {
            0.0
        };
        Ok(Section {
            area: 2.0 * half_area,
            centroid_z,
        })
    }

    /// Half-breadth of the waterplane at a station, at the exact draft.
    ///
    /// A draft coinciding with a waterline uses that waterline's offset
    /// directly; otherwise the bracketing waterlines are interpolated
    /// linearly, falling back to the nearest sampled waterline when the
    /// draft lies outside the sampled band.
    fn waterplane_half_breadth(&self, station: usize, draft: f64) -> f64 {
        let waterlines = self.geometry.waterlines();
        for waterline in waterlines {
            if (waterline.z - draft).abs() <= WATERLINE_TOLERANCE {
                return self.geometry.half_breadth(station, waterline.index);
            }
        }
        if draft < waterlines[0].z {
            return self.geometry.half_breadth(station, 0);
        }
        let last = waterlines.len() - 1;
        if draft > waterlines[last].z {
            return self.geometry.half_breadth(station, last);
        }
        for pair in waterlines.windows(2) {
            let (below, above) = (&pair[0], &pair[1]);
            if below.z < draft && draft < above.z {
                let t = (draft - below.z) / (above.z - below.z);
                let lower = self.geometry.half_breadth(station, below.index);
                let upper = self.geometry.half_breadth(station, above.index);
                return lower + t * (upper - lower);
            }
        }
        0.0
    }

    /// Computes the full hydrostatic state of the hull at one draft.
    pub fn at_draft(&self, draft: f64) -> Result<HydrostaticResult, EngineError> {
        let active = self.active_waterlines(draft)?;
        let geometry = self.geometry;
        let xs = geometry.station_positions();
        let n_stations = xs.len();

        let mut areas = Vec::with_capacity(n_stations);
        let mut vertical_moments = Vec::with_capacity(n_stations);
        for station in 0..n_stations {
            let section = self.section(station, active)?;
            vertical_moments.push(section.centroid_z * section.area);
            areas.push(section.area);
        }

        let volume = quadrature::integrate(&xs, &areas)?;
        let rho = self.rho();
        let weight = volume * rho;

        let kb = if volume > 0.0 {
            quadrature::integrate(&xs, &vertical_moments)? / volume
        } else {
            0.0
        };
        let lcb = if volume > 0.0 {
            quadrature::first_moment(&xs, &areas)? / volume
        } else {
            0.0
        };

        let wp_breadths: Vec<f64> = (0..n_stations)
            .map(|station| self.waterplane_half_breadth(station, draft))
            .collect();
        let awp = 2.0 * quadrature::integrate(&xs, &wp_breadths)?;

        let cubed: Vec<f64> = wp_breadths
            .iter()
            .map(|y| (2.0 / 3.0) * y.powi(3))
            .collect();
        let iwp_t = quadrature::integrate(&xs, &cubed)?;
        let iwp_l = 2.0 * quadrature::second_moment(&xs, &wp_breadths)?;

        let bmt = if volume > 0.0 { iwp_t / volume } else { 0.0 };
        let bml = if volume > 0.0 { iwp_l / volume } else { 0.0 };
        let gmt = self.kg().map(|kg| kb + bmt - kg);
        let gml = self.kg().map(|kg| kb + bml - kg);

        let midship_area = areas[n_stations / 2];
        let lpp = geometry.lpp();
        let beam = geometry.beam();
        let cb = coefficient(volume, lpp * beam * draft);
        let cp = coefficient(volume, midship_area * lpp);
        let cm = coefficient(midship_area, beam * draft);
        let cwp = coefficient(awp, lpp * beam);

        debug!(draft, volume, weight, "hydrostatics computed");

        Ok(HydrostaticResult {
            draft,
            disp_volume: volume,
            disp_weight: weight,
            kb,
            lcb,
            tcb: 0.0,
            bmt,
            bml,
            gmt,
            gml,
            awp,
            iwp: iwp_t,
            cb,
            cp,
            cm,
            cwp,
        })
    }

    /// Computes a hydrostatic table over many drafts with one geometry load.
    ///
    /// Cancellation is checked between drafts; a cancelled sweep returns
    /// [`EngineError::Cancelled`] and never a truncated table.
    #[instrument(skip_all, name = "hydrostatic_table")]
    pub fn table(
        &self,
        drafts: &[f64],
        reporter: &ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<Vec<HydrostaticResult>, EngineError> {
        reporter.report(Progress::TaskStart {
            total_steps: drafts.len() as u64,
        });

        let compute = |&draft: &f64| -> Result<HydrostaticResult, EngineError> {
            if cancel.is_cancelled() {
                return Err(EngineError::Cancelled);
            }
            let result = self.at_draft(draft)?;
            reporter.report(Progress::TaskIncrement);
            Ok(result)
        };

        #[cfg(not(feature = "parallel"))]
        let results: Result<Vec<_>, EngineError> = drafts.iter().map(compute).collect();

        #[cfg(feature = "parallel")]
        let results: Result<Vec<_>, EngineError> = drafts.par_iter().map(compute).collect();

        let results = results?;
        reporter.report(Progress::TaskFinish);
        Ok(results)
    }
}

/// A form coefficient, or zero when its denominator degenerates.
fn coefficient(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
