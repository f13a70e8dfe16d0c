use serde::Serialize;

use super::mass::MassProperties;
use crate::aircraft::{AircraftProfile, StationCategory};

// ---------------------------------------------------------------------------
// Load path: cumulative (weight, CG) as stations are loaded in order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadPathPoint {
    pub weight_lbs: f64,
    pub cg_mm: f64,
    pub label: String,
}

impl LoadPathPoint {
    fn at(props: &MassProperties, label: &str) -> Self {
        Self { weight_lbs: props.weight_lbs, cg_mm: props.cg_mm, label: label.to_string() }
    }
}

pub const EMPTY_LABEL: &str = "Empty";

fn loading_rank(category: StationCategory) -> Option<u8> {
    match category {
        StationCategory::Pilot => Some(0),
        StationCategory::Passenger => Some(1),
        StationCategory::Baggage => Some(2),
        StationCategory::Fuel => None,
    }
}

/// Lazily walk the load path.
///
/// Starts at the empty aircraft, then adds pilot, passengers and baggage in
/// that order (declaration order within a category), skipping empty
/// stations. Fuel is not part of the path, so the last point is the
/// zero-fuel point. The iterator is `Clone`, so it can be restarted.
pub fn load_path<'a>(
    profile: &'a AircraftProfile,
    weights_lbs: &'a [f64],
) -> impl Iterator<Item = LoadPathPoint> + Clone + 'a {
    let mut order: Vec<(u8, usize)> = profile
        .stations
        .iter()
        .enumerate()
        .filter_map(|(i, s)| loading_rank(s.category).map(|rank| (rank, i)))
        .collect();
    order.sort_unstable();

    let base = MassProperties::empty(profile);
    let steps = order
        .into_iter()
        .map(move |(_, i)| (&profile.stations[i], weights_lbs.get(i).copied().unwrap_or(0.0)))
        .filter(|(_, w)| *w > 0.0)
        .scan(base, |acc, (station, w)| {
            *acc = acc.add(w, station.arm_mm);
            Some(LoadPathPoint::at(acc, &station.name))
        });

    std::iter::once(LoadPathPoint::at(&base, EMPTY_LABEL)).chain(steps)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
