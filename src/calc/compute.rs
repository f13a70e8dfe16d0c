use log::debug;
use serde::{Deserialize, Serialize};

use super::fuel_burn::project;
use super::load_path::load_path;
use super::mass::aggregate;
use super::result::{CalculationResult, Landing, LimitError, Warning};
use crate::aircraft::{AircraftProfile, StationCategory};
use crate::loading::LoadingInput;

/// Weight comparisons ignore float noise below this.
const WEIGHT_TOLERANCE_LBS: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Check configuration
// ---------------------------------------------------------------------------

/// Data-entry sanity thresholds that are not part of the aircraft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    pub min_plausible_pilot_lbs: f64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            min_plausible_pilot_lbs: 90.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Compute weight, CG, envelope compliance, load path and (when a flight is
/// planned) the landing projection, with the default checks.
pub fn compute(profile: &AircraftProfile, input: &LoadingInput) -> CalculationResult {
    compute_with(profile, input, &CheckConfig::default())
}

/// As [`compute`], with explicit check thresholds. Never fails: limit
/// violations come back as `errors` and `warnings`.
pub fn compute_with(
    profile: &AircraftProfile,
    input: &LoadingInput,
    checks: &CheckConfig,
) -> CalculationResult {
    let weights = input.station_weights_lbs(profile);
    let agg = aggregate(profile, &weights);
    let total = agg.total;
    let envelope = &profile.envelope;

    let landing = project(
        &agg.zero_fuel,
        agg.fuel_lbs,
        &input.flight,
        profile.fuel_arm_mm(),
        &profile.fuel_density,
        input.units.volume,
    )
    .map(|projection| Landing {
        mac_percent: profile.mac.percent(projection.landing.cg_mm),
        within_envelope: envelope.contains(projection.landing.weight_lbs, projection.landing.cg_mm),
        projection,
    });

    let mut warnings = station_warnings(profile, &weights, checks);
    if let Some(l) = &landing {
        let w = l.projection.landing.weight_lbs;
        if w > profile.max_landing_weight_lbs + WEIGHT_TOLERANCE_LBS {
            warnings.push(Warning::LandingOverweight { weight_lbs: w, max_lbs: profile.max_landing_weight_lbs });
        }
    }

    let mut errors = Vec::new();
    if total.weight_lbs > profile.max_takeoff_weight_lbs + WEIGHT_TOLERANCE_LBS {
        errors.push(LimitError::MaxTakeoffExceeded {
            weight_lbs: total.weight_lbs,
            max_lbs: profile.max_takeoff_weight_lbs,
        });
    }

    let result = CalculationResult {
        total_weight_lbs: total.weight_lbs,
        total_moment_kg_mm: total.moment_kg_mm,
        cg_mm: total.cg_mm,
        mac_percent: profile.mac.percent(total.cg_mm),
        within_envelope: envelope.contains(total.weight_lbs, total.cg_mm),
        weight_margin_lbs: profile.max_takeoff_weight_lbs - total.weight_lbs,
        cg_margins: envelope.margins(total.weight_lbs, total.cg_mm),
        warnings,
        errors,
        fuel_lbs: agg.fuel_lbs,
        zero_fuel: agg.zero_fuel,
        load_path: load_path(profile, &weights).collect(),
        landing,
    };

    debug!(
        "{}: {:.1} lb, CG {:.1} mm ({:.1}% MAC), {} warnings, {} errors, {} path points",
        profile.name,
        result.total_weight_lbs,
        result.cg_mm,
        result.mac_percent,
        result.warnings.len(),
        result.errors.len(),
        result.load_path.len(),
    );
    result
}

/// Per-station limits, the combined baggage limit and the pilot sanity check.
fn station_warnings(profile: &AircraftProfile, weights: &[f64], checks: &CheckConfig) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let mut baggage_lbs = 0.0;

    for (station, &w) in profile.stations.iter().zip(weights) {
        if w > station.max_weight_lbs + WEIGHT_TOLERANCE_LBS {
            warnings.push(Warning::StationOverweight {
                station: station.name.clone(),
                weight_lbs: w,
                max_lbs: station.max_weight_lbs,
            });
        }
        match station.category {
            StationCategory::Baggage => baggage_lbs += w,
            StationCategory::Pilot if w > 0.0 && w < checks.min_plausible_pilot_lbs => {
                warnings.push(Warning::ImplausiblePilotWeight {
                    weight_lbs: w,
                    min_lbs: checks.min_plausible_pilot_lbs,
                });
            }
            _ => {}
        }
    }

    if baggage_lbs > profile.max_combined_baggage_lbs + WEIGHT_TOLERANCE_LBS {
        warnings.push(Warning::CombinedBaggageOverweight {
            weight_lbs: baggage_lbs,
            max_lbs: profile.max_combined_baggage_lbs,
        });
    }
    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
