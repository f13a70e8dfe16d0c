use serde::Serialize;
use thiserror::Error;

use super::fuel_burn::LandingProjection;
use super::load_path::LoadPathPoint;
use super::mass::MassProperties;
use crate::aircraft::CgMargins;

// ---------------------------------------------------------------------------
// Findings
// ---------------------------------------------------------------------------

/// Non-blocking finding: the numbers stand, the loading deserves a look.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    #[error("{station} is over its limit ({weight_lbs:.1} lb > {max_lbs:.1} lb)")]
    StationOverweight { station: String, weight_lbs: f64, max_lbs: f64 },
    #[error("combined baggage is over its limit ({weight_lbs:.1} lb > {max_lbs:.1} lb)")]
    CombinedBaggageOverweight { weight_lbs: f64, max_lbs: f64 },
    #[error("pilot weight {weight_lbs:.1} lb looks implausibly low (< {min_lbs:.0} lb)")]
    ImplausiblePilotWeight { weight_lbs: f64, min_lbs: f64 },
    #[error("projected landing weight {weight_lbs:.1} lb exceeds MLW {max_lbs:.1} lb")]
    LandingOverweight { weight_lbs: f64, max_lbs: f64 },
}

/// Blocking finding: the aircraft is out of limits.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LimitError {
    #[error("total weight {weight_lbs:.1} lb exceeds MTOW {max_lbs:.1} lb")]
    MaxTakeoffExceeded { weight_lbs: f64, max_lbs: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    WithinLimits,
    Caution,
    OutOfLimits,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::WithinLimits => "WITHIN LIMITS",
            Status::Caution => "CAUTION",
            Status::OutOfLimits => "OUT OF LIMITS",
        }
    }
}

// ---------------------------------------------------------------------------
// Calculation result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Landing {
    #[serde(flatten)]
    pub projection: LandingProjection,
    pub mac_percent: f64,
    pub within_envelope: bool,
}

/// Everything derived from one (profile, loading) pair. Rebuilt on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub total_weight_lbs: f64,
    pub total_moment_kg_mm: f64,
    pub cg_mm: f64,
    pub mac_percent: f64,
    pub within_envelope: bool,
    pub weight_margin_lbs: f64, // MTOW - total, negative when over
    pub cg_margins: CgMargins,
    pub warnings: Vec<Warning>,
    pub errors: Vec<LimitError>,
    pub fuel_lbs: f64,
    pub zero_fuel: MassProperties,
    pub load_path: Vec<LoadPathPoint>,
    pub landing: Option<Landing>,
}

impl CalculationResult {
    /// Out of limits on any error or an out-of-envelope takeoff point,
    /// caution on any warning.
    pub fn status(&self) -> Status {
        if !self.errors.is_empty() || !self.within_envelope {
            Status::OutOfLimits
        } else if !self.warnings.is_empty() {
            Status::Caution
        } else {
            Status::WithinLimits
        }
    }

    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}
