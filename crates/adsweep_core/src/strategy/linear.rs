//! Linear-urgency pacing, the hand-tuned baseline variant.

use serde::{Deserialize, Serialize};

use crate::model::{BidBundle, CampaignSnapshot};

use super::{MIN_BID, MIN_DAILY_SPEND, PacingStrategy};

/// Bids a fixed base plus a slope term that grows with delivered progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LinearPacing {
    pub daily_budget_rate: f64,
    pub base_bid: f64,
    pub slope: f64,
}

impl LinearPacing {
    /// The baseline opponent's constants.
    pub fn baseline() -> Self {
        Self {
            daily_budget_rate: 0.35,
            base_bid: 0.3,
            slope: 0.7,
        }
    }
}

impl PacingStrategy for LinearPacing {
    fn daily_bid(&self, snapshot: &CampaignSnapshot) -> Option<BidBundle> {
        let remaining_reach = snapshot.remaining_reach();
        let remaining_budget = snapshot.remaining_budget();
        if snapshot.campaign.reach == 0 || remaining_reach == 0 || remaining_budget <= 0.0 {
            return None;
        }

        let urgency = snapshot.progress();
        let bid_per_item = (self.base_bid + self.slope * urgency).max(MIN_BID);
        let daily_limit = (remaining_budget * self.daily_budget_rate).max(MIN_DAILY_SPEND);

        Some(BidBundle {
            campaign_id: snapshot.campaign.id,
            segment: snapshot.campaign.target,
            bid_per_item,
            daily_limit,
        })
    }
}
