//! Agents as the simulator sees them.
//!
//! An agent exposes a stable display name (the fitness extractor's match
//! key), a per-day bid entry point driven by a pacing strategy, and a
//! per-auction campaign-valuation entry point. The valuation rule is a fixed
//! collaborator shared by every roster member; only the pacing side is
//! tuned.

use crate::model::{BidBundle, Campaign, CampaignSnapshot};
use crate::strategy::{LinearPacing, LogisticPacing, PacingParams, PacingStrategy};

/// Display name of the agent under tuning.
pub const TUNED_AGENT_NAME: &str = "OptimizationBot";

pub trait Agent: Send + Sync {
    /// Stable display name used as the report match key.
    fn name(&self) -> &str;

    /// Today's bids, at most one per active campaign.
    fn ad_bids(&self, active: &[CampaignSnapshot]) -> Vec<BidBundle>;

    /// Valuation bid for a campaign up for auction, given the agent's
    /// current quality score.
    fn campaign_bid(&self, campaign: &Campaign, quality: f64) -> f64;
}

/// The agent under tuning: logistic pacing bound to one parameter vector.
pub struct TunableAgent {
    name: String,
    pacing: LogisticPacing,
}

impl TunableAgent {
    pub fn new(name: impl Into<String>, params: PacingParams) -> Self {
        Self {
            name: name.into(),
            pacing: LogisticPacing::new(params),
        }
    }
}

impl Agent for TunableAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn ad_bids(&self, active: &[CampaignSnapshot]) -> Vec<BidBundle> {
        active.iter().filter_map(|s| self.pacing.daily_bid(s)).collect()
    }

    fn campaign_bid(&self, campaign: &Campaign, quality: f64) -> f64 {
        campaign_valuation(campaign, quality)
    }
}

/// Reference opponent running the hand-tuned linear variant.
pub struct BaselineAgent {
    name: String,
    pacing: LinearPacing,
}

impl BaselineAgent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pacing: LinearPacing::baseline(),
        }
    }
}

impl Agent for BaselineAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn ad_bids(&self, active: &[CampaignSnapshot]) -> Vec<BidBundle> {
        active.iter().filter_map(|s| self.pacing.daily_bid(s)).collect()
    }

    fn campaign_bid(&self, campaign: &Campaign, quality: f64) -> f64 {
        campaign_valuation(campaign, quality)
    }
}

/// Fixed campaign-valuation rule.
///
/// Discounts campaigns whose reach outstrips the expected user supply,
/// prefers small campaigns, anchors on the budget when one exists, and
/// divides by quality so the effective bid stays competitive as quality
/// drops. Always clipped to the legal bid band.
pub fn campaign_valuation(campaign: &Campaign, quality: f64) -> f64 {
    let quality = quality.max(0.05);
    let reach = f64::from(campaign.reach);
    let duration = f64::from(campaign.duration());

    let daily_supply = f64::from(campaign.target.daily_population());
    let expected_total = daily_supply * duration;

    // Oversized campaigns get a token bid only.
    if reach > expected_total * 1.5 {
        return clip_campaign_bid(campaign, (0.02 * reach).max(0.1));
    }

    let difficulty = (reach / expected_total.max(1.0)).min(1.0);
    let size_boost = if campaign.reach <= 300 { 1.2 } else { 1.0 };
    let value_anchor = if campaign.budget > 0.0 {
        campaign.budget
    } else {
        reach
    };

    let raw_bid = value_anchor * (1.0 - 0.4 * (1.0 - difficulty)) * size_boost;
    clip_campaign_bid(campaign, raw_bid / quality)
}

/// Legal campaign bids sit in `[0.1 * reach, reach]`.
fn clip_campaign_bid(campaign: &Campaign, bid: f64) -> f64 {
    let reach = f64::from(campaign.reach);
    bid.clamp(0.1 * reach, reach)
}
