use serde::{Deserialize, Serialize};

use super::ids::CampaignId;
use super::segments::MarketSegment;

/// One day's bid for a single campaign's auction lane.
///
/// Produced fresh each simulated day and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BidBundle {
    pub campaign_id: CampaignId,
    /// Auction lane the bid applies to (the campaign's target segment).
    pub segment: MarketSegment,
    /// Price offered per impression.
    pub bid_per_item: f64,
    /// Spend ceiling for the day.
    pub daily_limit: f64,
}
