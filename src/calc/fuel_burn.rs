use serde::Serialize;

use super::mass::{station_moment, MassProperties};
use crate::loading::FlightPlan;
use crate::units::{FuelDensity, VolumeUnit};

// ---------------------------------------------------------------------------
// Landing projection after an in-flight fuel burn
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LandingProjection {
    pub fuel_burned_lbs: f64,
    pub remaining_fuel_lbs: f64,
    pub remaining_fuel_volume: f64, // in `volume_unit`
    pub volume_unit: VolumeUnit,
    pub landing: MassProperties,
}

/// Project weight and CG at landing.
///
/// All tanks share `fuel_arm_mm`. Burn is clamped so remaining fuel never
/// goes negative; once the tanks are dry the landing point is exactly the
/// zero-fuel point. Returns `None` unless the plan has a positive burn rate
/// and duration.
pub fn project(
    zero_fuel: &MassProperties,
    current_fuel_lbs: f64,
    plan: &FlightPlan,
    fuel_arm_mm: f64,
    density: &FuelDensity,
    volume_unit: VolumeUnit,
) -> Option<LandingProjection> {
    if !plan.is_planned() {
        return None;
    }

    let fuel_burned_lbs = plan.burn_rate_gph * plan.duration_hours * density.lbs_per_gallon;
    let remaining_fuel_lbs = (current_fuel_lbs - fuel_burned_lbs).max(0.0);

    let landing = MassProperties::from_moment(
        zero_fuel.weight_lbs + remaining_fuel_lbs,
        zero_fuel.moment_kg_mm + station_moment(remaining_fuel_lbs, fuel_arm_mm),
    );

    Some(LandingProjection {
        fuel_burned_lbs,
        remaining_fuel_lbs,
        remaining_fuel_volume: density.lbs_to_volume(remaining_fuel_lbs, volume_unit),
        volume_unit,
        landing,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn zero_fuel() -> MassProperties {
        MassProperties::from_moment(2177.0, station_moment(2177.0, 970.0))
    }

    #[test]
    fn no_projection_without_a_plan() {
        let d = FuelDensity::default();
        let zf = zero_fuel();
        assert!(project(&zf, 300.0, &FlightPlan::new(0.0, 2.0), 1181.0, &d, VolumeUnit::Gallons).is_none());
        assert!(project(&zf, 300.0, &FlightPlan::new(9.0, -1.0), 1181.0, &d, VolumeUnit::Gallons).is_none());
    }

    #[test]
    fn partial_burn() {
        let d = FuelDensity::default();
        let zf = zero_fuel();
        let p = project(&zf, 522.0, &FlightPlan::new(10.0, 2.5), 1181.0, &d, VolumeUnit::Gallons).unwrap();

        assert_relative_eq!(p.fuel_burned_lbs, 150.0);
        assert_relative_eq!(p.remaining_fuel_lbs, 372.0);
        assert_relative_eq!(p.remaining_fuel_volume, 62.0, max_relative = 1e-12);
        assert_relative_eq!(p.landing.weight_lbs, 2549.0);

        let expected = zf.moment_kg_mm + 372.0 * 0.453592 * 1181.0;
        assert_relative_eq!(p.landing.moment_kg_mm, expected, max_relative = 1e-12);
        assert_relative_eq!(p.landing.cg_mm, expected / (2549.0 * 0.453592), max_relative = 1e-12);
    }

    #[test]
    fn burn_is_clamped_at_empty_tanks() {
        let d = FuelDensity::default();
        let zf = zero_fuel();
        let p = project(&zf, 120.0, &FlightPlan::new(12.0, 6.0), 1181.0, &d, VolumeUnit::Litres).unwrap();

        assert_eq!(p.remaining_fuel_lbs, 0.0);
        assert_eq!(p.remaining_fuel_volume, 0.0);
        assert_eq!(p.landing.weight_lbs, zf.weight_lbs);
        assert_eq!(p.landing.cg_mm, zf.cg_mm);
    }

    #[test]
    fn remaining_volume_in_litres() {
        let d = FuelDensity::default();
        let p = project(&zero_fuel(), 522.0, &FlightPlan::new(10.0, 1.0), 1181.0, &d, VolumeUnit::Litres).unwrap();
        assert_relative_eq!(p.remaining_fuel_volume, 77.0 * 3.78541, max_relative = 1e-9);
    }
}
