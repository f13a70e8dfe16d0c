use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Conversion factors
// ---------------------------------------------------------------------------

pub const KG_PER_LB: f64 = 0.453_592;
pub const LITRES_PER_GALLON: f64 = 3.785_41; // US gallon
pub const MM_PER_INCH: f64 = 25.4;

/// Standard AVGAS 100LL density, lb per US gallon.
pub const AVGAS_LBS_PER_GALLON: f64 = 6.0;

// ---------------------------------------------------------------------------
// Unit tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    #[default]
    #[serde(alias = "lb", alias = "lbs")]
    Pounds,
    #[serde(alias = "kg")]
    Kilograms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeUnit {
    #[default]
    #[serde(alias = "gal")]
    Gallons,
    #[serde(alias = "l")]
    Litres,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "in")]
    Inches,
}

impl MassUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            MassUnit::Pounds => "lb",
            MassUnit::Kilograms => "kg",
        }
    }
}

impl VolumeUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            VolumeUnit::Gallons => "gal",
            VolumeUnit::Litres => "L",
        }
    }
}

/// Units the caller supplies loads in and wants volumes reported in.
/// Internal computation never looks at this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitPreference {
    pub mass: MassUnit,
    pub volume: VolumeUnit,
}

// ---------------------------------------------------------------------------
// Scalar conversions
// ---------------------------------------------------------------------------

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs * KG_PER_LB
}

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg / KG_PER_LB
}

pub fn gallons_to_litres(gal: f64) -> f64 {
    gal * LITRES_PER_GALLON
}

pub fn litres_to_gallons(litres: f64) -> f64 {
    litres / LITRES_PER_GALLON
}

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

pub fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

pub fn convert_mass(value: f64, from: MassUnit, to: MassUnit) -> f64 {
    match (from, to) {
        (MassUnit::Pounds, MassUnit::Kilograms) => lbs_to_kg(value),
        (MassUnit::Kilograms, MassUnit::Pounds) => kg_to_lbs(value),
        _ => value,
    }
}

pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    match (from, to) {
        (VolumeUnit::Gallons, VolumeUnit::Litres) => gallons_to_litres(value),
        (VolumeUnit::Litres, VolumeUnit::Gallons) => litres_to_gallons(value),
        _ => value,
    }
}

pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    match (from, to) {
        (LengthUnit::Inches, LengthUnit::Millimeters) => inches_to_mm(value),
        (LengthUnit::Millimeters, LengthUnit::Inches) => mm_to_inches(value),
        _ => value,
    }
}

// ---------------------------------------------------------------------------
// Fuel density
// ---------------------------------------------------------------------------

/// Fuel density with a single canonical value (lb per US gallon).
///
/// Every other density (lb/L, kg/L) is derived from it, so a quantity
/// entered in litres weighs exactly what the same quantity in gallons does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelDensity {
    pub lbs_per_gallon: f64,
}

impl Default for FuelDensity {
    fn default() -> Self {
        Self { lbs_per_gallon: AVGAS_LBS_PER_GALLON }
    }
}

impl FuelDensity {
    pub fn new(lbs_per_gallon: f64) -> Self {
        Self { lbs_per_gallon }
    }

    pub fn lbs_per_litre(&self) -> f64 {
        self.lbs_per_gallon / LITRES_PER_GALLON
    }

    pub fn kg_per_litre(&self) -> f64 {
        lbs_to_kg(self.lbs_per_litre())
    }

    /// Fuel volume in `unit` to weight in pounds.
    pub fn volume_to_lbs(&self, volume: f64, unit: VolumeUnit) -> f64 {
        convert_volume(volume, unit, VolumeUnit::Gallons) * self.lbs_per_gallon
    }

    /// Fuel weight in pounds to volume in `unit`.
    pub fn lbs_to_volume(&self, lbs: f64, unit: VolumeUnit) -> f64 {
        if self.lbs_per_gallon <= 0.0 {
            return 0.0;
        }
        convert_volume(lbs / self.lbs_per_gallon, VolumeUnit::Gallons, unit)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
