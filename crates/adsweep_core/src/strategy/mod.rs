//! Pacing strategies: campaign state in, at most one bid out.
//!
//! Two variants implement the same contract. [`LogisticPacing`] is the one
//! the grid harness tunes; [`LinearPacing`] is the simpler hand-tuned
//! baseline the opponent roster runs.

mod linear;
mod logistic;

use serde::{Deserialize, Serialize};

use crate::model::{BidBundle, CampaignSnapshot};

pub use linear::LinearPacing;
pub use logistic::LogisticPacing;

/// Smallest per-impression bid a strategy will place.
pub const MIN_BID: f64 = 0.01;

/// Smallest daily spend ceiling a strategy will set.
pub const MIN_DAILY_SPEND: f64 = 1.0;

/// One point in the tuning space.
///
/// Field order is the knob order everywhere: grid expansion, result-store
/// columns, and progress lines all follow it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PacingParams {
    /// Fraction of remaining budget released per day, in (0, 1].
    pub pacing_rate: f64,
    /// Baseline urgency multiplier applied at any progress.
    pub base_lift: f64,
    /// Width of the urgency bell around 50% progress.
    pub steepness: f64,
    /// Scale of the urgency bell's peak.
    pub peak_multiplier: f64,
}

impl std::fmt::Display for PacingParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rate={:.2} lift={:.2} steep={:.2} peak={:.2}",
            self.pacing_rate, self.base_lift, self.steepness, self.peak_multiplier
        )
    }
}

/// Maps one campaign's daily state to at most one bid.
///
/// Dormant campaigns (no remaining reach or no remaining budget) produce
/// nothing for the day.
pub trait PacingStrategy: Send + Sync {
    fn daily_bid(&self, snapshot: &CampaignSnapshot) -> Option<BidBundle>;
}
