use log::warn;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// CG envelope: one piecewise-linear descriptor
// ---------------------------------------------------------------------------

/// Certified (weight, CG) region of a light single.
///
/// Forward limit is flat up to `breakpoint_weight_lbs`, then tapers linearly
/// to `forward_max_weight_cg_mm` at `max_weight_lbs`. Aft limit is constant.
/// The chart polyline is derived from these six numbers, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgEnvelope {
    pub min_weight_lbs: f64,
    pub breakpoint_weight_lbs: f64,
    pub max_weight_lbs: f64,
    pub forward_flat_cg_mm: f64,
    pub forward_max_weight_cg_mm: f64,
    pub aft_cg_mm: f64,
}

/// Vertex of the envelope polyline, as drawn on a W&B chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopePoint {
    pub weight_lbs: f64,
    pub cg_mm: f64,
}

impl EnvelopePoint {
    pub fn new(weight_lbs: f64, cg_mm: f64) -> Self {
        Self { weight_lbs, cg_mm }
    }
}

/// Signed distance to each limit; negative means that side is violated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CgMargins {
    pub forward_mm: f64,
    pub aft_mm: f64,
}

impl CgEnvelope {
    pub fn new(
        min_weight_lbs: f64,
        breakpoint_weight_lbs: f64,
        max_weight_lbs: f64,
        forward_flat_cg_mm: f64,
        forward_max_weight_cg_mm: f64,
        aft_cg_mm: f64,
    ) -> Result<Self, ConfigError> {
        let env = Self {
            min_weight_lbs,
            breakpoint_weight_lbs,
            max_weight_lbs,
            forward_flat_cg_mm,
            forward_max_weight_cg_mm,
            aft_cg_mm,
        };
        env.validate()?;
        Ok(env)
    }

    /// Build from a chart polyline: three forward points in ascending weight
    /// (the first two sharing a CG, the third at the heaviest weight of the
    /// outline), followed by the aft points.
    pub fn from_polyline(points: &[EnvelopePoint]) -> Result<Self, ConfigError> {
        if points.len() < 5 {
            return Err(ConfigError::invalid(format!(
                "envelope needs at least 5 points, got {}",
                points.len()
            )));
        }
        let [p0, p1, p2] = [points[0], points[1], points[2]];
        if !(p0.weight_lbs <= p1.weight_lbs && p1.weight_lbs <= p2.weight_lbs) {
            return Err(ConfigError::invalid("forward limit points must ascend in weight"));
        }
        if (p0.cg_mm - p1.cg_mm).abs() > 1e-9 {
            return Err(ConfigError::invalid(format!(
                "forward limit must be flat below the breakpoint ({} mm vs {} mm)",
                p0.cg_mm, p1.cg_mm
            )));
        }

        let aft = &points[3..];
        let aft_cg = aft.iter().map(|p| p.cg_mm).fold(f64::INFINITY, f64::min);
        if aft.iter().any(|p| (p.cg_mm - aft_cg).abs() > 1e-9) {
            warn!("aft limit is not constant, using the most forward value {aft_cg} mm");
        }

        let min_weight = points.iter().map(|p| p.weight_lbs).fold(f64::INFINITY, f64::min);
        let max_weight = points.iter().map(|p| p.weight_lbs).fold(f64::NEG_INFINITY, f64::max);
        if (p2.weight_lbs - max_weight).abs() > 1e-9 {
            return Err(ConfigError::invalid(format!(
                "forward taper must end at the max weight {max_weight} lb, not {} lb",
                p2.weight_lbs
            )));
        }

        Self::new(min_weight, p1.weight_lbs, max_weight, p0.cg_mm, p2.cg_mm, aft_cg)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            self.min_weight_lbs,
            self.breakpoint_weight_lbs,
            self.max_weight_lbs,
            self.forward_flat_cg_mm,
            self.forward_max_weight_cg_mm,
            self.aft_cg_mm,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::invalid("envelope contains a non-finite value"));
        }
        if !(self.min_weight_lbs <= self.breakpoint_weight_lbs
            && self.breakpoint_weight_lbs <= self.max_weight_lbs
            && self.min_weight_lbs < self.max_weight_lbs)
        {
            return Err(ConfigError::invalid(format!(
                "envelope weights out of order: min {} / breakpoint {} / max {}",
                self.min_weight_lbs, self.breakpoint_weight_lbs, self.max_weight_lbs
            )));
        }
        if self.aft_cg_mm <= self.forward_flat_cg_mm.max(self.forward_max_weight_cg_mm) {
            return Err(ConfigError::invalid("aft limit must lie behind the forward limit"));
        }
        Ok(())
    }

    pub fn min_weight(&self) -> f64 {
        self.min_weight_lbs
    }

    pub fn max_weight(&self) -> f64 {
        self.max_weight_lbs
    }

    /// Forward CG limit (mm) at `weight_lbs`. Above the max weight the
    /// max-weight value is held.
    pub fn forward_limit(&self, weight_lbs: f64) -> f64 {
        if weight_lbs <= self.breakpoint_weight_lbs {
            return self.forward_flat_cg_mm;
        }
        self.taper(weight_lbs)
    }

    /// Tapered segment from the breakpoint to the max weight, held beyond it.
    fn taper(&self, weight_lbs: f64) -> f64 {
        let span = self.max_weight_lbs - self.breakpoint_weight_lbs;
        if span <= 0.0 {
            return self.forward_max_weight_cg_mm;
        }
        let a = Point2::new(self.breakpoint_weight_lbs, self.forward_flat_cg_mm);
        let b = Point2::new(self.max_weight_lbs, self.forward_max_weight_cg_mm);
        let t = ((weight_lbs - a.x) / span).min(1.0);
        a.coords.lerp(&b.coords, t).y
    }

    pub fn aft_limit(&self) -> f64 {
        self.aft_cg_mm
    }

    pub fn contains(&self, weight_lbs: f64, cg_mm: f64) -> bool {
        (self.min_weight_lbs..=self.max_weight_lbs).contains(&weight_lbs)
            && self.forward_limit(weight_lbs) <= cg_mm
            && cg_mm <= self.aft_cg_mm
    }

    pub fn margins(&self, weight_lbs: f64, cg_mm: f64) -> CgMargins {
        CgMargins {
            forward_mm: cg_mm - self.forward_limit(weight_lbs),
            aft_mm: self.aft_cg_mm - cg_mm,
        }
    }

    /// Closed chart outline: forward limit bottom to top, then aft limit
    /// top to bottom.
    pub fn polyline(&self) -> Vec<EnvelopePoint> {
        vec![
            EnvelopePoint::new(self.min_weight_lbs, self.forward_flat_cg_mm),
            EnvelopePoint::new(self.breakpoint_weight_lbs, self.forward_flat_cg_mm),
            EnvelopePoint::new(self.max_weight_lbs, self.forward_max_weight_cg_mm),
            EnvelopePoint::new(self.max_weight_lbs, self.aft_cg_mm),
            EnvelopePoint::new(self.min_weight_lbs, self.aft_cg_mm),
        ]
    }
}

// ---------------------------------------------------------------------------
// Mean aerodynamic chord reference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacReference {
    pub start_mm: f64,  // leading edge of the MAC aft of datum
    pub length_mm: f64,
}

impl MacReference {
    pub fn percent(&self, cg_mm: f64) -> f64 {
        (cg_mm - self.start_mm) / self.length_mm * 100.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
