use log::debug;

use super::input::{sanitize, LoadingInput};
use crate::aircraft::AircraftProfile;
use crate::units::{convert_mass, convert_volume, MassUnit, VolumeUnit};

// ---------------------------------------------------------------------------
// Loading commands
// ---------------------------------------------------------------------------

/// One discrete edit a form makes to the loading input.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadingCommand {
    SetStation { id: String, value: f64 },
    ClearStation(String),
    /// Fill every fuel tank to its maximum.
    FillFuel,
    /// Switch the mass unit; entered weights are converted, not reinterpreted.
    SetMassUnit(MassUnit),
    /// Switch the fuel volume unit; entered volumes are converted.
    SetFuelUnit(VolumeUnit),
    SetBurnRate(f64),
    SetFlightHours(f64),
    Reset,
}

/// Apply `command` to `input`, returning the next input. `input` is untouched.
pub fn reduce(profile: &AircraftProfile, input: &LoadingInput, command: LoadingCommand) -> LoadingInput {
    let mut next = input.clone();
    match command {
        LoadingCommand::SetStation { id, value } => {
            if profile.station(&id).is_some() {
                next.values.insert(id, sanitize(value));
            } else {
                debug!("SetStation for unknown station '{id}' ignored");
            }
        }
        LoadingCommand::ClearStation(id) => {
            next.values.remove(&id);
        }
        LoadingCommand::FillFuel => {
            for tank in profile.fuel_stations() {
                let full = profile.fuel_density.lbs_to_volume(tank.max_weight_lbs, next.units.volume);
                next.values.insert(tank.id.clone(), full);
            }
        }
        LoadingCommand::SetMassUnit(unit) => {
            let from = next.units.mass;
            for (id, v) in next.values.iter_mut() {
                if profile.station(id).is_some_and(|s| !s.is_fuel()) {
                    *v = convert_mass(*v, from, unit);
                }
            }
            next.units.mass = unit;
        }
        LoadingCommand::SetFuelUnit(unit) => {
            let from = next.units.volume;
            for (id, v) in next.values.iter_mut() {
                if profile.station(id).is_some_and(|s| s.is_fuel()) {
                    *v = convert_volume(*v, from, unit);
                }
            }
            next.units.volume = unit;
        }
        LoadingCommand::SetBurnRate(rate) => next.flight.burn_rate_gph = sanitize(rate),
        LoadingCommand::SetFlightHours(hours) => next.flight.duration_hours = sanitize(hours),
        LoadingCommand::Reset => next = LoadingInput::new(input.units),
    }
    next
}

/// Fold a sequence of commands from an initial input.
pub fn replay(
    profile: &AircraftProfile,
    initial: &LoadingInput,
    commands: impl IntoIterator<Item = LoadingCommand>,
) -> LoadingInput {
    commands
        .into_iter()
        .fold(initial.clone(), |acc, cmd| reduce(profile, &acc, cmd))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::presets::{self, FUEL_LEFT, FUEL_RIGHT, PILOT};
    use approx::assert_relative_eq;

    fn set(id: &str, value: f64) -> LoadingCommand {
        LoadingCommand::SetStation { id: id.into(), value }
    }

    #[test]
    fn reduce_does_not_mutate_input() {
        let p = presets::reference_single();
        let before = LoadingInput::default();
        let after = reduce(&p, &before, set(PILOT, 170.0));
        assert_eq!(before.value(PILOT), 0.0);
        assert_eq!(after.value(PILOT), 170.0);
    }

    #[test]
    fn unknown_station_and_negative_values() {
        let p = presets::reference_single();
        let input = replay(&p, &LoadingInput::default(), [set("cargo_pod", 50.0), set(PILOT, -5.0)]);
        assert!(!input.values.contains_key("cargo_pod"));
        assert_eq!(input.value(PILOT), 0.0);
    }

    #[test]
    fn fill_fuel_uses_selected_unit() {
        let p = presets::reference_single();
        let input = replay(
            &p,
            &LoadingInput::default(),
            [LoadingCommand::SetFuelUnit(VolumeUnit::Litres), LoadingCommand::FillFuel],
        );
        assert_relative_eq!(input.value(FUEL_LEFT), 164.665, epsilon = 1e-3);
        assert_relative_eq!(input.value(FUEL_RIGHT), input.value(FUEL_LEFT));
    }

    #[test]
    fn unit_switch_preserves_quantities() {
        let p = presets::reference_single();
        let start = LoadingInput::default().with(PILOT, 170.0).with(FUEL_LEFT, 20.0);
        let before = start.station_weights_lbs(&p);
        let switched = replay(
            &p,
            &start,
            [
                LoadingCommand::SetMassUnit(MassUnit::Kilograms),
                LoadingCommand::SetFuelUnit(VolumeUnit::Litres),
            ],
        );
        let after = switched.station_weights_lbs(&p);
        for (a, b) in before.iter().zip(&after) {
            assert_relative_eq!(*a, *b, max_relative = 1e-9);
        }
        assert_relative_eq!(switched.value(PILOT), 77.11064, epsilon = 1e-5);
    }

    #[test]
    fn reset_keeps_units_only() {
        let p = presets::reference_single();
        let input = replay(
            &p,
            &LoadingInput::default(),
            [
                LoadingCommand::SetMassUnit(MassUnit::Kilograms),
                set(PILOT, 80.0),
                LoadingCommand::SetBurnRate(9.0),
                LoadingCommand::SetFlightHours(2.0),
                LoadingCommand::ClearStation(PILOT.into()),
                LoadingCommand::Reset,
            ],
        );
        assert!(input.values.is_empty());
        assert_eq!(input.units.mass, MassUnit::Kilograms);
        assert!(!input.flight.is_planned());
    }
}
