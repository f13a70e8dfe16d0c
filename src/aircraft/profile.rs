use serde::{Deserialize, Serialize};

use super::envelope::{CgEnvelope, MacReference};
use crate::error::ConfigError;
use crate::units::{gallons_to_litres, FuelDensity};

// ---------------------------------------------------------------------------
// Loading stations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationCategory {
    Pilot,
    Passenger,
    Baggage,
    Fuel,
}

/// A fixed place a load can go, at a fixed arm aft of datum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingStation {
    pub id: String,
    pub name: String,
    pub arm_mm: f64,
    pub max_weight_lbs: f64,
    /// Descriptive only: lets a form mark the station as mandatory. The
    /// calculation does not check it.
    pub required: bool,
    pub category: StationCategory,
}

impl LoadingStation {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: StationCategory,
        arm_mm: f64,
        max_weight_lbs: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arm_mm,
            max_weight_lbs,
            required: category == StationCategory::Pilot,
            category,
        }
    }

    pub fn is_fuel(&self) -> bool {
        self.category == StationCategory::Fuel
    }
}

// ---------------------------------------------------------------------------
// Aircraft profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelCapacity {
    pub gallons: f64,
    pub litres: f64,
}

impl FuelCapacity {
    pub fn from_gallons(gallons: f64) -> Self {
        Self { gallons, litres: gallons_to_litres(gallons) }
    }
}

/// Read-only description of one airframe. Built once, shared by reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AircraftProfile {
    pub name: String,
    pub empty_weight_lbs: f64,
    pub empty_cg_mm: f64,
    pub max_takeoff_weight_lbs: f64,
    pub max_landing_weight_lbs: f64,
    pub max_ramp_weight_lbs: f64,
    pub max_combined_baggage_lbs: f64,
    pub fuel_capacity: FuelCapacity,
    pub fuel_density: FuelDensity,
    pub mac: MacReference,
    pub stations: Vec<LoadingStation>,
    pub envelope: CgEnvelope,
}

impl AircraftProfile {
    pub fn station(&self, id: &str) -> Option<&LoadingStation> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn fuel_stations(&self) -> impl Iterator<Item = &LoadingStation> + '_ {
        self.stations.iter().filter(|s| s.is_fuel())
    }

    /// Arm shared by all fuel tanks (validation rejects tanks that differ).
    pub fn fuel_arm_mm(&self) -> f64 {
        self.fuel_stations().next().map_or(0.0, |s| s.arm_mm)
    }

    pub fn fuel_capacity_lbs(&self) -> f64 {
        self.fuel_capacity.gallons * self.fuel_density.lbs_per_gallon
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let numbers = [
            self.empty_weight_lbs,
            self.empty_cg_mm,
            self.max_takeoff_weight_lbs,
            self.max_landing_weight_lbs,
            self.max_ramp_weight_lbs,
            self.fuel_capacity.gallons,
            self.fuel_capacity.litres,
            self.fuel_density.lbs_per_gallon,
        ];
        // combined baggage limit may be infinite (no limit)
        let baggage_ok = self.max_combined_baggage_lbs >= 0.0;
        if !baggage_ok || numbers.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::invalid(format!(
                "{}: weights, capacities and density must be finite and non-negative",
                self.name
            )));
        }

        let expected_litres = gallons_to_litres(self.fuel_capacity.gallons);
        let tolerance = 0.005 * expected_litres.max(1.0);
        if (self.fuel_capacity.litres - expected_litres).abs() > tolerance {
            return Err(ConfigError::invalid(format!(
                "fuel capacity {} gal does not match {} L (expected {:.1} L)",
                self.fuel_capacity.gallons, self.fuel_capacity.litres, expected_litres
            )));
        }

        self.envelope.validate()?;

        if !(self.mac.length_mm > 0.0) {
            return Err(ConfigError::invalid("MAC length must be positive"));
        }

        for (i, s) in self.stations.iter().enumerate() {
            if !s.arm_mm.is_finite() || !s.max_weight_lbs.is_finite() || s.max_weight_lbs < 0.0 {
                return Err(ConfigError::invalid(format!("station '{}' has invalid arm or limit", s.id)));
            }
            if self.stations[..i].iter().any(|o| o.id == s.id) {
                return Err(ConfigError::invalid(format!("duplicate station id '{}'", s.id)));
            }
        }

        let fuel_arm = self.fuel_arm_mm();
        if let Some(s) = self.fuel_stations().find(|s| (s.arm_mm - fuel_arm).abs() > 1e-9) {
            return Err(ConfigError::invalid(format!(
                "fuel tank '{}' arm {} mm differs from the shared fuel arm {} mm",
                s.id, s.arm_mm, fuel_arm
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Profile builder
// ---------------------------------------------------------------------------

pub struct AircraftProfileBuilder {
    name: String,
    empty_weight_lbs: f64,
    empty_cg_mm: f64,
    max_takeoff_weight_lbs: f64,
    max_landing_weight_lbs: Option<f64>,
    max_ramp_weight_lbs: Option<f64>,
    max_combined_baggage_lbs: f64,
    fuel_capacity: FuelCapacity,
    fuel_density: FuelDensity,
    mac: MacReference,
    stations: Vec<LoadingStation>,
    envelope: Option<CgEnvelope>,
}

impl AircraftProfileBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            empty_weight_lbs: 0.0,
            empty_cg_mm: 0.0,
            max_takeoff_weight_lbs: 0.0,
            max_landing_weight_lbs: None,
            max_ramp_weight_lbs: None,
            max_combined_baggage_lbs: f64::INFINITY,
            fuel_capacity: FuelCapacity::from_gallons(0.0),
            fuel_density: FuelDensity::default(),
            mac: MacReference { start_mm: 0.0, length_mm: 1.0 },
            stations: vec![],
            envelope: None,
        }
    }

    pub fn empty(mut self, weight_lbs: f64, cg_mm: f64) -> Self {
        self.empty_weight_lbs = weight_lbs;
        self.empty_cg_mm = cg_mm;
        self
    }

    pub fn max_takeoff_weight(mut self, v: f64) -> Self { self.max_takeoff_weight_lbs = v; self }
    pub fn max_landing_weight(mut self, v: f64) -> Self { self.max_landing_weight_lbs = Some(v); self }
    pub fn max_ramp_weight(mut self, v: f64) -> Self { self.max_ramp_weight_lbs = Some(v); self }
    pub fn max_combined_baggage(mut self, v: f64) -> Self { self.max_combined_baggage_lbs = v; self }
    pub fn fuel_capacity(mut self, v: FuelCapacity) -> Self { self.fuel_capacity = v; self }
    pub fn fuel_density(mut self, v: FuelDensity) -> Self { self.fuel_density = v; self }
    pub fn mac(mut self, start_mm: f64, length_mm: f64) -> Self { self.mac = MacReference { start_mm, length_mm }; self }
    pub fn envelope(mut self, v: CgEnvelope) -> Self { self.envelope = Some(v); self }

    pub fn station(mut self, station: LoadingStation) -> Self {
        self.stations.push(station);
        self
    }

    pub fn build(self) -> Result<AircraftProfile, ConfigError> {
        let envelope = self
            .envelope
            .ok_or_else(|| ConfigError::invalid(format!("{}: no CG envelope", self.name)))?;
        let profile = AircraftProfile {
            name: self.name,
            empty_weight_lbs: self.empty_weight_lbs,
            empty_cg_mm: self.empty_cg_mm,
            max_takeoff_weight_lbs: self.max_takeoff_weight_lbs,
            max_landing_weight_lbs: self.max_landing_weight_lbs.unwrap_or(self.max_takeoff_weight_lbs),
            max_ramp_weight_lbs: self.max_ramp_weight_lbs.unwrap_or(self.max_takeoff_weight_lbs),
            max_combined_baggage_lbs: self.max_combined_baggage_lbs,
            fuel_capacity: self.fuel_capacity,
            fuel_density: self.fuel_density,
            mac: self.mac,
            stations: self.stations,
            envelope,
        };
        profile.validate()?;
        Ok(profile)
    }
}

// ---------------------------------------------------------------------------
// Preset aircraft
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    pub const PILOT: &str = "pilot";
    pub const FRONT_PASSENGER: &str = "front_passenger";
    pub const REAR_PASSENGER_1: &str = "rear_passenger_1";
    pub const REAR_PASSENGER_2: &str = "rear_passenger_2";
    pub const BAGGAGE_A: &str = "baggage_a";
    pub const BAGGAGE_B: &str = "baggage_b";
    pub const BAGGAGE_C: &str = "baggage_c";
    pub const FUEL_LEFT: &str = "fuel_left";
    pub const FUEL_RIGHT: &str = "fuel_right";

    /// Four-seat high-wing single with 87 gal usable in two wing tanks.
    pub fn reference_single() -> AircraftProfile {
        let tank_gal = 43.5;
        let tank_lbs = tank_gal * crate::units::AVGAS_LBS_PER_GALLON;
        let envelope = CgEnvelope {
            min_weight_lbs: 1800.0,
            breakpoint_weight_lbs: 2250.0,
            max_weight_lbs: 2950.0,
            forward_flat_cg_mm: 900.0,
            forward_max_weight_cg_mm: 1000.0,
            aft_cg_mm: 1200.0,
        };
        AircraftProfile {
            name: "Reference Single".into(),
            empty_weight_lbs: 2007.0,
            empty_cg_mm: 975.0,
            max_takeoff_weight_lbs: 2950.0,
            max_landing_weight_lbs: 2950.0,
            max_ramp_weight_lbs: 2960.0,
            max_combined_baggage_lbs: 200.0,
            fuel_capacity: FuelCapacity::from_gallons(2.0 * tank_gal),
            fuel_density: FuelDensity::default(),
            mac: MacReference { start_mm: 700.0, length_mm: 1500.0 },
            stations: vec![
                LoadingStation::new(PILOT, "Pilot", StationCategory::Pilot, 940.0, 300.0),
                LoadingStation::new(FRONT_PASSENGER, "Front passenger", StationCategory::Passenger, 940.0, 300.0),
                LoadingStation::new(REAR_PASSENGER_1, "Rear passenger 1", StationCategory::Passenger, 1850.0, 300.0),
                LoadingStation::new(REAR_PASSENGER_2, "Rear passenger 2", StationCategory::Passenger, 1850.0, 300.0),
                LoadingStation::new(BAGGAGE_A, "Baggage A", StationCategory::Baggage, 2410.0, 120.0),
                LoadingStation::new(BAGGAGE_B, "Baggage B", StationCategory::Baggage, 2870.0, 120.0),
                LoadingStation::new(BAGGAGE_C, "Baggage C", StationCategory::Baggage, 3250.0, 50.0),
                LoadingStation::new(FUEL_LEFT, "Left wing tank", StationCategory::Fuel, 1181.0, tank_lbs),
                LoadingStation::new(FUEL_RIGHT, "Right wing tank", StationCategory::Fuel, 1181.0, tank_lbs),
            ],
            envelope,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> AircraftProfileBuilder {
        let env = presets::reference_single().envelope;
        AircraftProfileBuilder::new("Test")
            .empty(1500.0, 950.0)
            .max_takeoff_weight(2400.0)
            .fuel_capacity(FuelCapacity::from_gallons(40.0))
            .mac(700.0, 1400.0)
            .envelope(env)
            .station(LoadingStation::new("pilot", "Pilot", StationCategory::Pilot, 940.0, 300.0))
            .station(LoadingStation::new("fuel", "Fuel", StationCategory::Fuel, 1100.0, 240.0))
    }

    #[test]
    fn builder_defaults_landing_and_ramp_to_mtow() {
        let p = builder().build().unwrap();
        assert_eq!(p.max_landing_weight_lbs, 2400.0);
        assert_eq!(p.max_ramp_weight_lbs, 2400.0);
        assert!(p.station("pilot").unwrap().required);
        assert_eq!(p.fuel_arm_mm(), 1100.0);
    }

    #[test]
    fn rejects_inconsistent_fuel_capacity() {
        let bad = FuelCapacity { gallons: 40.0, litres: 160.0 };
        let err = builder().fuel_capacity(bad).build().unwrap_err();
        assert!(err.to_string().contains("does not match"), "{err}");
    }

    #[test]
    fn rejects_duplicate_station_ids() {
        let dup = LoadingStation::new("pilot", "Copy", StationCategory::Passenger, 900.0, 200.0);
        assert!(builder().station(dup).build().is_err());
    }

    #[test]
    fn rejects_fuel_tanks_with_different_arms() {
        let aft_tank = LoadingStation::new("fuel_aft", "Aft tank", StationCategory::Fuel, 1500.0, 120.0);
        let err = builder().station(aft_tank).build().unwrap_err();
        assert!(err.to_string().contains("shared fuel arm"), "{err}");

        let twin = LoadingStation::new("fuel_2", "Second tank", StationCategory::Fuel, 1100.0, 120.0);
        assert!(builder().station(twin).build().is_ok());
    }

    #[test]
    fn rejects_missing_envelope() {
        let b = AircraftProfileBuilder::new("No envelope").max_takeoff_weight(2000.0);
        assert!(b.build().is_err());
    }

    #[test]
    fn reference_single_is_valid() {
        let p = presets::reference_single();
        assert!(p.validate().is_ok());
        assert_eq!(p.fuel_stations().count(), 2);
        assert!((p.fuel_capacity_lbs() - 522.0).abs() < 1e-9);
        assert!((p.fuel_capacity.litres - 329.33).abs() < 0.01);
    }
}
