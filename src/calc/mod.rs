pub mod compute;
pub mod fuel_burn;
pub mod load_path;
pub mod mass;
pub mod result;

pub use compute::{compute, compute_with, CheckConfig};
pub use fuel_burn::{project, LandingProjection};
pub use load_path::{load_path, LoadPathPoint};
pub use mass::{aggregate, Aggregate, MassProperties};
pub use result::{CalculationResult, Landing, LimitError, Status, Warning};
