//! Logistic-derivative pacing.
//!
//! Linear urgency (bid hardest when furthest behind) overspends on the
//! diminishing-returns tail of an S-shaped delivery curve. This variant
//! instead concentrates aggressive bidding in the steep middle of the
//! progress curve: the urgency multiplier follows the derivative of the
//! logistic function, peaking at 50% progress and falling toward `base_lift`
//! at both extremes.

use serde::{Deserialize, Serialize};

use crate::model::{BidBundle, CampaignSnapshot};

use super::{MIN_BID, MIN_DAILY_SPEND, PacingParams, PacingStrategy};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogisticPacing {
    params: PacingParams,
}

impl LogisticPacing {
    pub fn new(params: PacingParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PacingParams {
        &self.params
    }

    /// Urgency multiplier at the given progress fraction.
    ///
    /// Maximum `base_lift + 0.25 * peak_multiplier` at 50% progress.
    pub fn urgency_multiplier(&self, progress: f64) -> f64 {
        let x = (progress - 0.5) * self.params.steepness;
        self.params.base_lift + logistic_deriv(x) * self.params.peak_multiplier
    }
}

/// Derivative of the logistic function, `e^-x / (1 + e^-x)^2`.
///
/// Maximum 0.25 at x = 0, decaying toward 0 at the extremes. Exponential
/// overflow for very negative x is clamped to 0 rather than propagating a
/// non-finite value into the bid.
fn logistic_deriv(x: f64) -> f64 {
    let e = (-x).exp();
    if !e.is_finite() {
        return 0.0;
    }
    e / ((1.0 + e) * (1.0 + e))
}

impl PacingStrategy for LogisticPacing {
    fn daily_bid(&self, snapshot: &CampaignSnapshot) -> Option<BidBundle> {
        let remaining_reach = snapshot.remaining_reach();
        let remaining_budget = snapshot.remaining_budget();
        if snapshot.campaign.reach == 0 || remaining_reach == 0 || remaining_budget <= 0.0 {
            return None;
        }

        // Average price that would exactly exhaust the remaining budget
        // against the remaining reach.
        let base_price = remaining_budget / f64::from(remaining_reach);
        let bid_per_item = (base_price * self.urgency_multiplier(snapshot.progress())).max(MIN_BID);
        let daily_limit = (remaining_budget * self.params.pacing_rate).max(MIN_DAILY_SPEND);

        Some(BidBundle {
            campaign_id: snapshot.campaign.id,
            segment: snapshot.campaign.target,
            bid_per_item,
            daily_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AgeGroup, Campaign, CampaignId, Gender, Income, MarketSegment};

    fn params() -> PacingParams {
        PacingParams {
            pacing_rate: 0.5,
            base_lift: 0.2,
            steepness: 10.0,
            peak_multiplier: 3.0,
        }
    }

    fn snapshot(reach: u32, achieved: u32, budget: f64, spend: f64) -> CampaignSnapshot {
        CampaignSnapshot {
            campaign: Campaign {
                id: CampaignId(7),
                reach,
                budget,
                start_day: 1,
                end_day: 5,
                target: MarketSegment::atomic(Gender::Female, AgeGroup::Young, Income::High),
            },
            reach_achieved: achieved,
            spend,
            today: 3,
        }
    }

    #[test]
    fn multiplier_peaks_at_half_progress() {
        let pacing = LogisticPacing::new(params());
        let peak = pacing.urgency_multiplier(0.5);
        assert!((peak - (0.2 + 0.25 * 3.0)).abs() < 1e-12);
        assert!(pacing.urgency_multiplier(0.3) < peak);
        assert!(pacing.urgency_multiplier(0.7) < peak);
    }

    #[test]
    fn multiplier_approaches_base_lift_at_extremes() {
        let pacing = LogisticPacing::new(params());
        for progress in [0.0, 1.0] {
            let m = pacing.urgency_multiplier(progress);
            assert!(m > 0.2, "multiplier stays above base_lift, got {m}");
            assert!(m - 0.2 < 0.05, "multiplier decays toward base_lift, got {m}");
        }
    }

    #[test]
    fn extreme_steepness_does_not_overflow() {
        let pacing = LogisticPacing::new(PacingParams {
            steepness: 1e6,
            ..params()
        });
        // x = -5e5 overflows e^-x; the derivative clamps to zero.
        let m = pacing.urgency_multiplier(0.0);
        assert!(m.is_finite());
        assert!((m - 0.2).abs() < 1e-12);
    }

    #[test]
    fn dormant_campaigns_produce_no_bid() {
        let pacing = LogisticPacing::new(params());
        assert!(pacing.daily_bid(&snapshot(100, 100, 50.0, 10.0)).is_none());
        assert!(pacing.daily_bid(&snapshot(100, 10, 50.0, 50.0)).is_none());
        assert!(pacing.daily_bid(&snapshot(0, 0, 50.0, 0.0)).is_none());
    }

    #[test]
    fn bid_never_drops_below_floor() {
        let pacing = LogisticPacing::new(params());
        // Tiny remaining budget spread over a large remaining reach.
        let bid = pacing
            .daily_bid(&snapshot(1_000_000, 0, 0.5, 0.0))
            .expect("active campaign bids");
        assert!(bid.bid_per_item >= MIN_BID);
        assert!(bid.daily_limit >= MIN_DAILY_SPEND);
    }

    #[test]
    fn daily_limit_follows_pacing_rate() {
        let pacing = LogisticPacing::new(params());
        let bid = pacing
            .daily_bid(&snapshot(1000, 200, 900.0, 100.0))
            .expect("active campaign bids");
        assert!((bid.daily_limit - 400.0).abs() < 1e-9);
    }
}
