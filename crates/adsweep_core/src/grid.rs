//! Parameter grid expansion.
//!
//! Each knob expands an inclusive range by repeated addition of its step;
//! the grid is the Cartesian product of the knob sequences in
//! [`PacingParams`] field order. That order is a contract: run indices in
//! the result store follow it.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::strategy::PacingParams;

/// Tolerance for floating-point drift when closing an inclusive range.
pub const GRID_EPSILON: f64 = 1e-9;

/// Decimal places knob values are rounded to, so that repeated expansion is
/// exactly reproducible and values deduplicate stably across runs.
const KNOB_DECIMALS: i32 = 2;

/// Inclusive numeric range with a step, for one knob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnobRange {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl KnobRange {
    pub const fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    /// A range containing exactly one value.
    pub const fn fixed(value: f64) -> Self {
        Self {
            start: value,
            stop: value,
            step: 1.0,
        }
    }

    /// Expand into the ordered value sequence.
    pub fn values(&self, knob: &'static str) -> Result<Vec<f64>, GridError> {
        if self.step <= 0.0 {
            return Err(GridError::NonPositiveStep {
                knob,
                step: self.step,
            });
        }
        if self.stop + GRID_EPSILON < self.start {
            return Err(GridError::EmptyRange {
                knob,
                start: self.start,
                stop: self.stop,
            });
        }

        let scale = 10f64.powi(KNOB_DECIMALS);
        let mut values = Vec::new();
        let mut current = self.start;
        while current <= self.stop + GRID_EPSILON {
            values.push((current * scale).round() / scale);
            current += self.step;
        }
        Ok(values)
    }
}

/// One range per tunable knob, in knob order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub pacing_rate: KnobRange,
    pub base_lift: KnobRange,
    pub steepness: KnobRange,
    pub peak_multiplier: KnobRange,
}

impl GridSpec {
    /// Expand the full Cartesian product in lexicographic product order,
    /// `pacing_rate` outermost.
    pub fn expand(&self) -> Result<Vec<PacingParams>, GridError> {
        let rates = self.pacing_rate.values("pacing_rate")?;
        let lifts = self.base_lift.values("base_lift")?;
        let steeps = self.steepness.values("steepness")?;
        let peaks = self.peak_multiplier.values("peak_multiplier")?;

        let mut grid = Vec::with_capacity(rates.len() * lifts.len() * steeps.len() * peaks.len());
        for &pacing_rate in &rates {
            for &base_lift in &lifts {
                for &steepness in &steeps {
                    for &peak_multiplier in &peaks {
                        grid.push(PacingParams {
                            pacing_rate,
                            base_lift,
                            steepness,
                            peak_multiplier,
                        });
                    }
                }
            }
        }
        Ok(grid)
    }
}
