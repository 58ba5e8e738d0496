use serde::{Deserialize, Serialize};

/// Density of seawater in kg/m³, the default fluid for all calculations.
pub const SEAWATER_DENSITY: f64 = 1025.0;

/// A loading condition: the mass-distribution input to a calculation.
///
/// Only two quantities matter to the hydrostatic core: the density of the
/// water the vessel floats in, and the height of the center of gravity above
/// the keel. The latter is optional — without it, metacentric heights (GMt,
/// GMl) and righting arms cannot be computed and are reported absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingCondition {
    pub name: String,
    /// Water density in kg/m³.
    pub rho: f64,
    /// Vertical center of gravity above the keel in meters, if known.
    pub kg: Option<f64>,
}

impl LoadingCondition {
    /// A seawater condition with a known vertical center of gravity.
    pub fn seawater(name: impl Into<String>, kg: f64) -> Self {
        Self {
            name: name.into(),
            rho: SEAWATER_DENSITY,
            kg: Some(kg),
        }
    }
}

impl Default for LoadingCondition {
    fn default() -> Self {
        Self {
            name: String::new(),
            rho: SEAWATER_DENSITY,
            kg: None,
        }
    }
}
