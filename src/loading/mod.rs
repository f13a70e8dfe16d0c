pub mod command;
pub mod input;

pub use command::{reduce, replay, LoadingCommand};
pub use input::{FlightPlan, LoadingInput};
