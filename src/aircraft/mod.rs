pub mod envelope;
pub mod profile;

pub use envelope::{CgEnvelope, CgMargins, EnvelopePoint, MacReference};
pub use profile::{
    presets, AircraftProfile, AircraftProfileBuilder, FuelCapacity, LoadingStation, StationCategory,
};
