use serde::{Deserialize, Serialize};

use super::ids::CampaignId;
use super::segments::MarketSegment;

/// A commitment to deliver `reach` impressions to `target` between
/// `start_day` and `end_day` (inclusive) in exchange for `budget`.
///
/// A zero budget means the campaign has not been priced yet; valuation then
/// falls back to the reach target as its value anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub reach: u32,
    pub budget: f64,
    pub start_day: u32,
    pub end_day: u32,
    pub target: MarketSegment,
}

impl Campaign {
    /// Number of days the campaign is live, at least one.
    pub fn duration(&self) -> u32 {
        self.end_day.saturating_sub(self.start_day).saturating_add(1)
    }
}

/// Read-only view of one campaign's state on a given day.
///
/// Strategies derive everything they need from this snapshot; nothing here
/// is ever mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CampaignSnapshot {
    pub campaign: Campaign,
    /// Impressions delivered so far.
    pub reach_achieved: u32,
    /// Budget spent so far.
    pub spend: f64,
    /// Current simulated day.
    pub today: u32,
}

impl CampaignSnapshot {
    pub fn remaining_reach(&self) -> u32 {
        self.campaign.reach.saturating_sub(self.reach_achieved)
    }

    pub fn remaining_budget(&self) -> f64 {
        (self.campaign.budget - self.spend).max(0.0)
    }

    /// Fraction of the reach target delivered so far, zero for an empty target.
    pub fn progress(&self) -> f64 {
        if self.campaign.reach == 0 {
            0.0
        } else {
            f64::from(self.reach_achieved) / f64::from(self.campaign.reach)
        }
    }

    /// Days remaining including today, at least one while the campaign runs.
    pub fn days_left(&self) -> u32 {
        self.campaign
            .end_day
            .saturating_sub(self.today)
            .saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AgeGroup, Gender, Income};

    fn snapshot(reach: u32, achieved: u32, budget: f64, spend: f64) -> CampaignSnapshot {
        CampaignSnapshot {
            campaign: Campaign {
                id: CampaignId(1),
                reach,
                budget,
                start_day: 1,
                end_day: 3,
                target: MarketSegment::atomic(Gender::Male, AgeGroup::Young, Income::Low),
            },
            reach_achieved: achieved,
            spend,
            today: 2,
        }
    }

    #[test]
    fn derived_quantities() {
        let s = snapshot(1000, 250, 800.0, 100.0);
        assert_eq!(s.remaining_reach(), 750);
        assert!((s.remaining_budget() - 700.0).abs() < 1e-12);
        assert!((s.progress() - 0.25).abs() < 1e-12);
        assert_eq!(s.days_left(), 2);
    }

    #[test]
    fn overdelivery_and_overspend_saturate() {
        let s = snapshot(100, 150, 50.0, 80.0);
        assert_eq!(s.remaining_reach(), 0);
        assert_eq!(s.remaining_budget(), 0.0);
    }

    #[test]
    fn zero_reach_has_zero_progress() {
        let s = snapshot(0, 0, 10.0, 0.0);
        assert_eq!(s.progress(), 0.0);
    }
}
