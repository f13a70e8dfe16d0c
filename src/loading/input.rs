use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::aircraft::AircraftProfile;
use crate::units::{convert_mass, MassUnit, UnitPreference};

// ---------------------------------------------------------------------------
// Flight plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlightPlan {
    pub burn_rate_gph: f64, // US gal/h
    pub duration_hours: f64,
}

impl FlightPlan {
    pub fn new(burn_rate_gph: f64, duration_hours: f64) -> Self {
        Self { burn_rate_gph, duration_hours }
    }

    /// A projection is only meaningful with a positive rate and duration.
    pub fn is_planned(&self) -> bool {
        self.burn_rate_gph > 0.0 && self.duration_hours > 0.0
    }
}

// ---------------------------------------------------------------------------
// Loading input
// ---------------------------------------------------------------------------

/// Snapshot of what the caller has entered, one value per station id.
///
/// Weight stations are in `units.mass`, fuel stations in `units.volume`.
/// Stations without an entry count as empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadingInput {
    pub values: BTreeMap<String, f64>,
    pub units: UnitPreference,
    pub flight: FlightPlan,
}

impl LoadingInput {
    pub fn new(units: UnitPreference) -> Self {
        Self { units, ..Default::default() }
    }

    pub fn with(mut self, id: impl Into<String>, value: f64) -> Self {
        self.values.insert(id.into(), sanitize(value));
        self
    }

    pub fn with_flight(mut self, flight: FlightPlan) -> Self {
        self.flight = flight;
        self
    }

    pub fn value(&self, id: &str) -> f64 {
        self.values.get(id).copied().map_or(0.0, sanitize)
    }

    /// Station weights in pounds, index-aligned with `profile.stations`.
    /// Fuel volumes go through the profile's fuel density.
    pub fn station_weights_lbs(&self, profile: &AircraftProfile) -> Vec<f64> {
        for id in self.values.keys() {
            if profile.station(id).is_none() {
                debug!("ignoring load for unknown station '{id}'");
            }
        }
        profile
            .stations
            .iter()
            .map(|s| {
                let v = self.value(&s.id);
                if s.is_fuel() {
                    profile.fuel_density.volume_to_lbs(v, self.units.volume)
                } else {
                    convert_mass(v, self.units.mass, MassUnit::Pounds)
                }
            })
            .collect()
    }
}

/// Loads are non-negative; anything else counts as empty.
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
