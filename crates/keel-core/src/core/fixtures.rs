//! Analytic sample-hull generators.
//!
//! These build complete offset grids from closed-form hull equations. They
//! exist to seed example data and to give tests geometry with known exact
//! properties; nothing in the calculation engine depends on them.

use super::models::geometry::{HullGeometry, Offset, Station, Waterline};

fn axis(count: usize, max: f64) -> Vec<f64> {
    let step = max / (count - 1) as f64;
    (0..count).map(|i| i as f64 * step).collect()
}

/// A rectangular prism "hull": constant half-breadth at every station and
/// waterline.
///
/// The waterline grid spans `[0, depth]`; the design draft is set at half
/// the depth. A barge of length `L`, half-breadth `b`, floating at draft
/// `T`, has closed-form hydrostatics: volume `L·2b·T`, `KB = T/2`,
/// `LCB = L/2`, `Cb = 1`.
pub fn rectangular_barge(
    lpp: f64,
    beam: f64,
    depth: f64,
    n_stations: usize,
    n_waterlines: usize,
) -> HullGeometry {
    let stations: Vec<Station> = axis(n_stations, lpp)
        .into_iter()
        .enumerate()
        .map(|(index, x)| Station { index, x })
        .collect();
    let waterlines: Vec<Waterline> = axis(n_waterlines, depth)
        .into_iter()
        .enumerate()
        .map(|(index, z)| Waterline { index, z })
        .collect();

    let mut offsets = Vec::with_capacity(n_stations * n_waterlines);
    for station in &stations {
        for waterline in &waterlines {
            offsets.push(Offset {
                station: station.index,
                waterline: waterline.index,
                half_breadth: beam / 2.0,
            });
        }
    }

    HullGeometry::new(
        "rectangular-barge",
        lpp,
        beam,
        depth / 2.0,
        stations,
        waterlines,
        offsets,
    )
}

/// The classic Wigley parabolic hull form.
///
/// Half-breadth follows `y(x, z) = (B/2)·(1 − ξ²)·(1 − (d/T)²)` with
/// `ξ = (x − L/2)/(L/2)` and `d = T − z` the depth below the design
/// waterline; sides are held vertical above the design draft. The waterline
/// grid spans `[0, 1.25·T]` so that stability sweeps have reserve freeboard
/// to integrate over.
pub fn wigley_hull(
    lpp: f64,
    beam: f64,
    design_draft: f64,
    n_stations: usize,
    n_waterlines: usize,
) -> HullGeometry {
    let stations: Vec<Station> = axis(n_stations, lpp)
        .into_iter()
        .enumerate()
        .map(|(index, x)| Station { index, x })
        .collect();
    let waterlines: Vec<Waterline> = axis(n_waterlines, 1.25 * design_draft)
        .into_iter()
        .enumerate()
        .map(|(index, z)| Waterline { index, z })
        .collect();

    let half = lpp / 2.0;
    let mut offsets = Vec::with_capacity(n_stations * n_waterlines);
    for station in &stations {
        let xi = (station.x - half) / half;
        let longitudinal = (1.0 - xi * xi).max(0.0);
        for waterline in &waterlines {
            let depth_below = (design_draft - waterline.z).max(0.0) / design_draft;
            let vertical = 1.0 - depth_below * depth_below;
            offsets.push(Offset {
                station: station.index,
                waterline: waterline.index,
                half_breadth: (beam / 2.0) * longitudinal * vertical,
            });
        }
    }

    HullGeometry::new(
        "wigley",
        lpp,
        beam,
        design_draft,
        stations,
        waterlines,
        offsets,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barge_grid_is_complete_and_constant() {
        let geometry = rectangular_barge(100.0, 20.0, 8.0, 11, 9);

        assert_eq!(geometry.stations().len(), 11);
        assert_eq!(geometry.waterlines().len(), 9);
        assert_eq!(geometry.offsets().len(), 99);
        assert_eq!(geometry.design_draft(), 4.0);
        for station in 0..11 {
            for waterline in 0..9 {
                assert_eq!(geometry.half_breadth(station, waterline), 10.0);
            }
        }
    }

    #[test]
    fn wigley_is_finest_at_the_ends_and_fullest_amidships() {
        let geometry = wigley_hull(100.0, 10.0, 4.0, 21, 11);
        let top = geometry.waterlines().len() - 1;

        assert_eq!(geometry.half_breadth(0, top), 0.0);
        assert_eq!(geometry.half_breadth(20, top), 0.0);
        assert!((geometry.half_breadth(10, top) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn wigley_narrows_toward_the_keel() {
        let geometry = wigley_hull(100.0, 10.0, 4.0, 21, 11);

        assert_eq!(geometry.half_breadth(10, 0), 0.0);
        let mut previous = 0.0;
        for waterline in 0..geometry.waterlines().len() {
            let breadth = geometry.half_breadth(10, waterline);
            assert!(breadth >= previous);
            previous = breadth;
        }
    }

    #[test]
    fn wigley_is_fore_aft_symmetric() {
        let geometry = wigley_hull(100.0, 10.0, 4.0, 21, 11);

        for waterline in 0..geometry.waterlines().len() {
            let fore = geometry.half_breadth(3, waterline);
            let aft = geometry.half_breadth(17, waterline);
            assert!((fore - aft).abs() < 1e-12);
        }
    }
}
