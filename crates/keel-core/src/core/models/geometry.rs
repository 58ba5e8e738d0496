use serde::{Deserialize, Serialize};

/// Represents a transverse cut of the hull at a fixed longitudinal position.
///
/// Stations for one hull form a sequence strictly increasing in `x`, indexed
/// contiguously from zero at the aft perpendicular.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Position of the station in the ordered station sequence.
    pub index: usize,
    /// Longitudinal position in meters, measured from the aft perpendicular.
    pub x: f64,
}

/// Represents a horizontal cut of the hull at a fixed height above the keel.
///
/// Waterlines for one hull form a sequence strictly increasing in `z`, indexed
/// contiguously from zero at the lowest sampled height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waterline {
    /// Position of the waterline in the ordered waterline sequence.
    pub index: usize,
    /// Height above the keel in meters.
    pub z: f64,
}

/// A half-breadth sample at one station/waterline intersection.
///
/// The half-breadth is the distance from the centerline to the hull surface;
/// the hull is assumed port/starboard symmetric, so one value describes both
/// sides. A complete hull has exactly one offset per (station, waterline)
/// pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    /// Index of the station this sample belongs to.
    pub station: usize,
    /// Index of the waterline this sample belongs to.
    pub waterline: usize,
    /// Half-breadth in meters, non-negative.
    pub half_breadth: f64,
}

/// An immutable snapshot of a hull's discretized geometry.
///
/// This is the sole geometric input to every calculation in the library. It is
/// constructed once from validated provider data and never mutated; a dense
/// half-breadth lookup is built at construction so that missing grid
/// intersections read as zero without per-access searching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HullGeometry {
    name: String,
    lpp: f64,
    beam: f64,
    design_draft: f64,
    stations: Vec<Station>,
    waterlines: Vec<Waterline>,
    offsets: Vec<Offset>,
    #[serde(skip)]
    grid: Vec<f64>,
}

impl HullGeometry {
    pub fn new(
        name: impl Into<String>,
        lpp: f64,
        beam: f64,
        design_draft: f64,
        stations: Vec<Station>,
        waterlines: Vec<Waterline>,
        offsets: Vec<Offset>,
    ) -> Self {
        let mut geometry = Self {
            name: name.into(),
            lpp,
            beam,
            design_draft,
            stations,
            waterlines,
            offsets,
            grid: Vec::new(),
        };
        geometry.rebuild_grid();
        geometry
    }

    fn rebuild_grid(&mut self) {
        let m = self.waterlines.len();
        self.grid = vec![0.0; self.stations.len() * m];
        for offset in &self.offsets {
            if offset.station < self.stations.len() && offset.waterline < m {
                self.grid[offset.station * m + offset.waterline] = offset.half_breadth;
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length between perpendiculars in meters.
    pub fn lpp(&self) -> f64 {
        self.lpp
    }

    /// Maximum molded beam in meters.
    pub fn beam(&self) -> f64 {
        self.beam
    }

    /// Design draft in meters, used as the fallback draft for stability
    /// calculations and as the trim solver's clamping reference.
    pub fn design_draft(&self) -> f64 {
        self.design_draft
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn waterlines(&self) -> &[Waterline] {
        &self.waterlines
    }

    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    /// Returns the half-breadth at a station/waterline intersection.
    ///
    /// Missing intersections (and out-of-range indices) read as `0.0`, which
    /// keeps integration well-defined on incomplete grids.
    pub fn half_breadth(&self, station: usize, waterline: usize) -> f64 {
        let m = self.waterlines.len();
        if station < self.stations.len() && waterline < m {
            self.grid[station * m + waterline]
        } else {
            0.0
        }
    }

    /// Longitudinal positions of all stations, in station order.
    pub fn station_positions(&self) -> Vec<f64> {
        self.stations.iter().map(|s| s.x).collect()
    }

    /// Heights of all waterlines, in waterline order.
    pub fn waterline_heights(&self) -> Vec<f64> {
        self.waterlines.iter().map(|w| w.z).collect()
    }
}
