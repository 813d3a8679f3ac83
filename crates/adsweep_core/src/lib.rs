//! Grid-search tuning harness for auction pacing strategies.
//!
//! The harness enumerates a Cartesian grid of pacing parameters, evaluates
//! each point by running a black-box simulator for a batch of independent
//! stochastic trials, extracts the tuned agent's mean outcome from the
//! simulator's textual report, and appends one durable CSV record per
//! combination. A failing combination is recorded and skipped; it never
//! halts the sweep.
//!
//! ```ignore
//! use adsweep_core::{
//!     arena::{ArenaConfig, AuctionArena},
//!     Evaluator, GridSpec, KnobRange, run_sweep,
//! };
//!
//! let grid = GridSpec {
//!     pacing_rate: KnobRange::new(0.8, 1.0, 0.05),
//!     base_lift: KnobRange::new(0.1, 0.3, 0.05),
//!     steepness: KnobRange::new(4.0, 12.0, 2.0),
//!     peak_multiplier: KnobRange::fixed(3.0),
//! };
//! let mut evaluator = Evaluator::new(AuctionArena::new(ArenaConfig::default()), 50, 9);
//! let summary = run_sweep(&grid, &mut evaluator, "experiment_logs".as_ref())?;
//! ```

#![warn(clippy::all)]

pub mod agent;
pub mod arena;
pub mod error;
pub mod evaluate;
pub mod grid;
pub mod model;
pub mod report;
pub mod store;
pub mod strategy;
pub mod sweep;

#[cfg(test)]
mod tests;

pub use error::{GridError, SimulatorError, SweepError};
pub use evaluate::{Evaluator, Simulator, TrialResult};
pub use grid::{GridSpec, KnobRange};
pub use report::{SENTINEL_FITNESS, parse_fitness};
pub use store::ResultLog;
pub use strategy::{PacingParams, PacingStrategy};
pub use sweep::{RunStatus, SweepRecord, SweepSummary, run_sweep};
