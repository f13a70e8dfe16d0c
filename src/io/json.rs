use std::io::{Read, Write};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::aircraft::{
    AircraftProfile, AircraftProfileBuilder, CgEnvelope, EnvelopePoint, FuelCapacity,
    LoadingStation, StationCategory,
};
use crate::calc::CalculationResult;
use crate::error::ConfigError;
use crate::units::{convert_length, convert_mass, gallons_to_litres, FuelDensity, LengthUnit, MassUnit, AVGAS_LBS_PER_GALLON};

// ---------------------------------------------------------------------------
// Aircraft profile documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStation {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub arm: f64,
    pub max_weight: f64,
    #[serde(default)]
    pub required: Option<bool>,
    pub category: StationCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFuelCapacity {
    pub gallons: f64,
    #[serde(default)]
    pub litres: Option<f64>,
}

/// On-disk aircraft description. Arms, CGs and MAC figures are in
/// `arm_unit`, weights in `weight_unit`; both are normalized on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAircraftProfile {
    pub name: String,
    #[serde(default)]
    pub weight_unit: MassUnit,
    #[serde(default)]
    pub arm_unit: LengthUnit,

    pub empty_weight: f64,
    pub empty_cg: f64,
    pub max_takeoff_weight: f64,
    #[serde(default)]
    pub max_landing_weight: Option<f64>,
    #[serde(default)]
    pub max_ramp_weight: Option<f64>,
    #[serde(default)]
    pub max_combined_baggage: Option<f64>,

    pub fuel_capacity: RawFuelCapacity,
    #[serde(default = "default_density")]
    pub fuel_density_lbs_per_gallon: f64,

    pub mac_start: f64,
    pub mac_length: f64,

    pub stations: Vec<RawStation>,
    /// Chart polyline as `[weight, cg]` pairs.
    pub envelope: Vec<[f64; 2]>,
}

fn default_density() -> f64 {
    AVGAS_LBS_PER_GALLON
}

impl AircraftProfile {
    pub fn from_raw(raw: &RawAircraftProfile) -> Result<Self, ConfigError> {
        let lbs = |v: f64| convert_mass(v, raw.weight_unit, MassUnit::Pounds);
        let mm = |v: f64| convert_length(v, raw.arm_unit, LengthUnit::Millimeters);

        let polyline: Vec<EnvelopePoint> = raw
            .envelope
            .iter()
            .map(|[w, cg]| EnvelopePoint::new(lbs(*w), mm(*cg)))
            .collect();
        let envelope = CgEnvelope::from_polyline(&polyline)?;

        let litres = raw.fuel_capacity.litres.unwrap_or_else(|| {
            warn!("{}: no litre capacity given, deriving from gallons", raw.name);
            gallons_to_litres(raw.fuel_capacity.gallons)
        });

        let mut builder = AircraftProfileBuilder::new(raw.name.clone())
            .empty(lbs(raw.empty_weight), mm(raw.empty_cg))
            .max_takeoff_weight(lbs(raw.max_takeoff_weight))
            .fuel_capacity(FuelCapacity { gallons: raw.fuel_capacity.gallons, litres })
            .fuel_density(FuelDensity::new(raw.fuel_density_lbs_per_gallon))
            .mac(mm(raw.mac_start), mm(raw.mac_length))
            .envelope(envelope);
        if let Some(v) = raw.max_landing_weight {
            builder = builder.max_landing_weight(lbs(v));
        }
        if let Some(v) = raw.max_ramp_weight {
            builder = builder.max_ramp_weight(lbs(v));
        }
        if let Some(v) = raw.max_combined_baggage {
            builder = builder.max_combined_baggage(lbs(v));
        }

        for s in &raw.stations {
            let mut station = LoadingStation::new(
                s.id.clone(),
                s.name.clone().unwrap_or_else(|| s.id.clone()),
                s.category,
                mm(s.arm),
                lbs(s.max_weight),
            );
            if let Some(required) = s.required {
                station.required = required;
            }
            builder = builder.station(station);
        }

        builder.build()
    }
}

/// Read and validate an aircraft profile from JSON.
pub fn read_profile<R: Read>(reader: R) -> Result<AircraftProfile, ConfigError> {
    let raw: RawAircraftProfile = serde_json::from_reader(reader)?;
    AircraftProfile::from_raw(&raw)
}

pub fn parse_profile(json: &str) -> Result<AircraftProfile, ConfigError> {
    let raw: RawAircraftProfile = serde_json::from_str(json)?;
    AircraftProfile::from_raw(&raw)
}

/// Read a profile from a file path.
pub fn read_profile_file(path: &str) -> Result<AircraftProfile, ConfigError> {
    let file = std::fs::File::open(path)?;
    read_profile(std::io::BufReader::new(file))
}

// ---------------------------------------------------------------------------
// Result export
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ResultDocument<'a> {
    aircraft: &'a str,
    status: crate::calc::Status,
    warning_messages: Vec<String>,
    error_messages: Vec<String>,
    #[serde(flatten)]
    result: &'a CalculationResult,
}

/// Write a calculation result as pretty JSON, with status and the
/// human-readable findings alongside the structured ones.
pub fn write_result<W: Write>(
    writer: &mut W,
    profile: &AircraftProfile,
    result: &CalculationResult,
) -> serde_json::Result<()> {
    let doc = ResultDocument {
        aircraft: &profile.name,
        status: result.status(),
        warning_messages: result.warning_messages(),
        error_messages: result.error_messages(),
        result,
    };
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer).map_err(serde_json::Error::io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::presets;
    use crate::calc::compute;
    use crate::loading::LoadingInput;
    use approx::assert_relative_eq;

    const INCH_PROFILE: &str = r#"{
        "name": "Inch Single",
        "arm_unit": "in",
        "empty_weight": 1500,
        "empty_cg": 38.0,
        "max_takeoff_weight": 2300,
        "max_combined_baggage": 120,
        "fuel_capacity": { "gallons": 40, "litres": 151.4 },
        "mac_start": 30.0,
        "mac_length": 58.0,
        "stations": [
            { "id": "pilot", "arm": 37.0, "max_weight": 300, "category": "pilot" },
            { "id": "bags", "name": "Baggage", "arm": 95.0, "max_weight": 120, "category": "baggage" },
            { "id": "fuel", "arm": 48.0, "max_weight": 240, "category": "fuel" }
        ],
        "envelope": [[1500, 35.0], [1950, 35.0], [2300, 39.5], [2300, 47.3], [1500, 47.3]]
    }"#;

    #[test]
    fn inch_profile_is_normalized_to_mm() {
        let p = parse_profile(INCH_PROFILE).unwrap();
        assert_relative_eq!(p.empty_cg_mm, 965.2, epsilon = 1e-9);
        assert_relative_eq!(p.station("pilot").unwrap().arm_mm, 939.8, epsilon = 1e-9);
        assert_relative_eq!(p.envelope.forward_flat_cg_mm, 889.0, epsilon = 1e-9);
        assert_relative_eq!(p.envelope.aft_limit(), 1201.42, epsilon = 1e-9);
        assert_eq!(p.envelope.breakpoint_weight_lbs, 1950.0);
        assert_eq!(p.max_landing_weight_lbs, 2300.0);
        assert_eq!(p.station("bags").unwrap().name, "Baggage");
        assert!(p.station("pilot").unwrap().required);
    }

    #[test]
    fn bad_documents_are_rejected() {
        assert!(matches!(parse_profile("{ not json"), Err(ConfigError::Json(_))));
        let short = INCH_PROFILE.replace(", [1500, 47.3]]", "]");
        assert!(matches!(parse_profile(&short), Err(ConfigError::InvalidProfile(_))));
    }

    #[test]
    fn result_json_has_status_and_messages() {
        let p = presets::reference_single();
        let input = LoadingInput::default().with(presets::PILOT, 40.0);
        let r = compute(&p, &input);

        let mut buf = Vec::new();
        write_result(&mut buf, &p, &r).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(v["aircraft"], "Reference Single");
        assert_eq!(v["status"], "caution");
        assert_eq!(v["warnings"][0]["kind"], "implausible_pilot_weight");
        assert!(v["warning_messages"][0].as_str().unwrap().contains("implausibly low"));
        assert!(v["landing"].is_null());
    }
}
