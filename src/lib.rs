pub mod units;
pub mod error;
pub mod aircraft;
pub mod loading;
pub mod calc;
pub mod io;

// Flat re-exports for the common entry points
pub use aircraft::{presets, AircraftProfile, AircraftProfileBuilder, CgEnvelope};
pub use calc::{compute, compute_with, CalculationResult, CheckConfig, Status};
pub use error::ConfigError;
pub use loading::{reduce, FlightPlan, LoadingCommand, LoadingInput};

pub mod types {
    pub use crate::aircraft::{EnvelopePoint, FuelCapacity, LoadingStation, MacReference, StationCategory};
    pub use crate::calc::{Landing, LandingProjection, LimitError, LoadPathPoint, MassProperties, Warning};
    pub use crate::units::{FuelDensity, LengthUnit, MassUnit, UnitPreference, VolumeUnit};
}
