use nalgebra::DVector;
use serde::Serialize;

use crate::aircraft::AircraftProfile;
use crate::units::lbs_to_kg;

// ---------------------------------------------------------------------------
// Mass properties: weight, moment and CG of a loaded configuration
// ---------------------------------------------------------------------------

/// Weight in lb, moment in kg·mm, CG in mm aft of datum.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MassProperties {
    pub weight_lbs: f64,
    pub moment_kg_mm: f64,
    pub cg_mm: f64,
}

impl MassProperties {
    pub fn from_moment(weight_lbs: f64, moment_kg_mm: f64) -> Self {
        Self { weight_lbs, moment_kg_mm, cg_mm: cg_from_moment(moment_kg_mm, weight_lbs) }
    }

    /// Baseline: the empty aircraft.
    pub fn empty(profile: &AircraftProfile) -> Self {
        Self::from_moment(
            profile.empty_weight_lbs,
            station_moment(profile.empty_weight_lbs, profile.empty_cg_mm),
        )
    }

    /// Add `weight_lbs` at `arm_mm`.
    pub fn add(&self, weight_lbs: f64, arm_mm: f64) -> Self {
        Self::from_moment(
            self.weight_lbs + weight_lbs,
            self.moment_kg_mm + station_moment(weight_lbs, arm_mm),
        )
    }
}

/// Moment of `weight_lbs` at `arm_mm`, in kg·mm.
pub fn station_moment(weight_lbs: f64, arm_mm: f64) -> f64 {
    lbs_to_kg(weight_lbs) * arm_mm
}

/// CG from moment and weight. Zero weight gives 0 rather than NaN.
pub fn cg_from_moment(moment_kg_mm: f64, weight_lbs: f64) -> f64 {
    let weight_kg = lbs_to_kg(weight_lbs);
    if weight_kg <= 0.0 {
        return 0.0;
    }
    moment_kg_mm / weight_kg
}

// ---------------------------------------------------------------------------
// Aggregation over all stations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    pub total: MassProperties,
    pub zero_fuel: MassProperties,
    pub fuel_lbs: f64,
}

/// Sum the empty aircraft and every station load.
///
/// `weights_lbs` is index-aligned with `profile.stations`; missing entries
/// count as zero. The zero-fuel figures are the same sum with every fuel
/// station masked out.
pub fn aggregate(profile: &AircraftProfile, weights_lbs: &[f64]) -> Aggregate {
    let n = profile.stations.len();
    let weights = DVector::from_iterator(
        n,
        (0..n).map(|i| weights_lbs.get(i).copied().unwrap_or(0.0)),
    );
    let arms = DVector::from_iterator(n, profile.stations.iter().map(|s| s.arm_mm));
    let dry_mask = DVector::from_iterator(
        n,
        profile.stations.iter().map(|s| if s.is_fuel() { 0.0 } else { 1.0 }),
    );

    let dry = weights.component_mul(&dry_mask);
    let fuel_lbs = weights.sum() - dry.sum();

    let base = MassProperties::empty(profile);
    let station_moments = weights.map(lbs_to_kg).dot(&arms);
    let dry_moments = dry.map(lbs_to_kg).dot(&arms);

    Aggregate {
        total: MassProperties::from_moment(
            base.weight_lbs + weights.sum(),
            base.moment_kg_mm + station_moments,
        ),
        zero_fuel: MassProperties::from_moment(
            base.weight_lbs + dry.sum(),
            base.moment_kg_mm + dry_moments,
        ),
        fuel_lbs,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aircraft::presets;
    use approx::assert_relative_eq;

    #[test]
    fn zero_weight_gives_zero_cg() {
        let m = MassProperties::from_moment(0.0, 0.0);
        assert_eq!(m.cg_mm, 0.0);
        assert!(cg_from_moment(12_345.0, 0.0).is_finite());
    }

    #[test]
    fn moment_identity() {
        let p = presets::reference_single();
        let weights: Vec<f64> = (0..p.stations.len()).map(|i| 10.0 + 7.5 * i as f64).collect();
        let agg = aggregate(&p, &weights);

        let expected_moment: f64 = p
            .stations
            .iter()
            .zip(&weights)
            .map(|(s, w)| w * 0.453592 * s.arm_mm)
            .sum::<f64>()
            + p.empty_weight_lbs * 0.453592 * p.empty_cg_mm;
        let expected_weight = p.empty_weight_lbs + weights.iter().sum::<f64>();

        assert_relative_eq!(agg.total.moment_kg_mm, expected_moment, max_relative = 1e-12);
        assert_relative_eq!(agg.total.weight_lbs, expected_weight, max_relative = 1e-12);
        assert_relative_eq!(
            agg.total.cg_mm,
            expected_moment / (expected_weight * 0.453592),
            max_relative = 1e-12
        );
    }

    #[test]
    fn zero_fuel_excludes_tanks() {
        let p = presets::reference_single();
        let mut weights = vec![0.0; p.stations.len()];
        weights[0] = 170.0;
        let dry = aggregate(&p, &weights);
        for (w, s) in weights.iter_mut().zip(&p.stations) {
            if s.is_fuel() {
                *w = 200.0;
            }
        }
        let fuelled = aggregate(&p, &weights);

        assert_eq!(fuelled.fuel_lbs, 400.0);
        assert_eq!(fuelled.zero_fuel, dry.total);
        assert_eq!(fuelled.total.weight_lbs, dry.total.weight_lbs + 400.0);
    }

    #[test]
    fn empty_input_is_the_empty_aircraft() {
        let p = presets::reference_single();
        let agg = aggregate(&p, &[]);
        assert_eq!(agg.total, MassProperties::empty(&p));
        assert_relative_eq!(agg.total.cg_mm, 975.0, max_relative = 1e-12);
    }

    #[test]
    fn incremental_add_matches_aggregate() {
        let p = presets::reference_single();
        let base = MassProperties::empty(&p).add(170.0, 940.0);
        let mut weights = vec![0.0; p.stations.len()];
        weights[0] = 170.0;
        let agg = aggregate(&p, &weights);
        assert_relative_eq!(base.cg_mm, agg.total.cg_mm, max_relative = 1e-12);
    }
}
