//! Reference auction arena: a compact stochastic simulator behind the
//! [`Simulator`] trait so the harness runs end-to-end out of the box.
//!
//! Each trial plays a fixed number of days. New campaigns go to the lowest
//! quality-adjusted valuation bid (reverse second-price); impressions clear
//! second-price among matching bids under each bid's daily spend ceiling.
//! A campaign pays out `budget * min(delivered/reach, 1)` at its end day,
//! and delivery ratios feed each agent's quality score.
//!
//! The tuning harness never looks inside: it only sees the report text this
//! arena writes to the per-invocation sink.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::agent::Agent;
use crate::error::SimulatorError;
use crate::evaluate::Simulator;
use crate::model::{
    ATOMIC_SEGMENTS, BidBundle, Campaign, CampaignId, CampaignSnapshot, MarketSegment,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Days per trial.
    pub days: u32,
    /// Campaigns auctioned each day after the first.
    pub campaigns_per_day: usize,
    /// Base seed; trial t runs on `seed + t`.
    pub seed: u64,
    /// Relative std-dev of daily user arrivals around the segment table.
    pub arrival_noise: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            days: 10,
            campaigns_per_day: 5,
            seed: 1,
            arrival_noise: 0.1,
        }
    }
}

pub struct AuctionArena {
    config: ArenaConfig,
}

impl AuctionArena {
    pub fn new(config: ArenaConfig) -> Self {
        Self { config }
    }
}

impl Simulator for AuctionArena {
    fn run_simulation(
        &mut self,
        agents: &[Box<dyn Agent>],
        trials: u32,
        report: &mut String,
    ) -> Result<(), SimulatorError> {
        if agents.is_empty() {
            return Err(SimulatorError::NoAgents);
        }
        if trials == 0 {
            return Err(SimulatorError::NoTrials);
        }

        let config = self.config;

        // Per-trial profit vectors are collected in trial order and summed
        // sequentially, so the report is identical however the trials were
        // scheduled.
        #[cfg(feature = "parallel")]
        let per_trial: Vec<Vec<f64>> = (0..trials)
            .into_par_iter()
            .map(|t| run_trial(agents, &config, config.seed.wrapping_add(u64::from(t))))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let per_trial: Vec<Vec<f64>> = (0..trials)
            .map(|t| run_trial(agents, &config, config.seed.wrapping_add(u64::from(t))))
            .collect();

        let mut totals = vec![0.0f64; agents.len()];
        for profits in &per_trial {
            for (total, profit) in totals.iter_mut().zip(profits) {
                *total += profit;
            }
        }

        debug!(trials, agents = agents.len(), "arena run complete");
        for (agent, total) in agents.iter().zip(&totals) {
            let mean = total / f64::from(trials);
            report.push_str(&format!("### {} # {:.2}\n", agent.name(), mean));
        }
        Ok(())
    }
}

struct CampaignTracker {
    campaign: Campaign,
    achieved: u32,
    spend: f64,
    owner: usize,
}

fn run_trial(agents: &[Box<dyn Agent>], config: &ArenaConfig, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut quality = vec![1.0f64; agents.len()];
    let mut profit = vec![0.0f64; agents.len()];
    let mut trackers: Vec<CampaignTracker> = Vec::new();
    let mut next_id = 0u32;

    // Every agent starts day one with a campaign priced at its reach.
    for owner in 0..agents.len() {
        let campaign = random_campaign(&mut rng, &mut next_id, 1, config.days);
        trackers.push(CampaignTracker {
            campaign,
            achieved: 0,
            spend: 0.0,
            owner,
        });
    }

    for day in 1..=config.days {
        if day > 1 {
            auction_campaigns(agents, config, &mut rng, &mut next_id, &quality, &mut trackers, day);
        }
        run_ad_auctions(agents, config, &mut rng, &mut trackers, day);
        settle_ending_campaigns(&mut trackers, &mut quality, &mut profit, day);
    }

    profit
}

/// Reverse second-price campaign auction: the lowest quality-adjusted
/// valuation wins, and the second-lowest (scaled back by the winner's
/// quality) becomes the campaign budget.
fn auction_campaigns(
    agents: &[Box<dyn Agent>],
    config: &ArenaConfig,
    rng: &mut StdRng,
    next_id: &mut u32,
    quality: &[f64],
    trackers: &mut Vec<CampaignTracker>,
    day: u32,
) {
    for _ in 0..config.campaigns_per_day {
        let campaign = random_campaign(rng, next_id, day, config.days);
        let mut offers: Vec<(usize, f64)> = agents
            .iter()
            .enumerate()
            .map(|(idx, agent)| {
                let q = quality[idx].max(0.05);
                (idx, agent.campaign_bid(&campaign, quality[idx]) / q)
            })
            .filter(|(_, effective)| effective.is_finite() && *effective > 0.0)
            .collect();
        offers.sort_by(|a, b| a.1.total_cmp(&b.1));

        if let Some(&(winner, lowest)) = offers.first() {
            let second = offers.get(1).map_or(lowest, |&(_, e)| e);
            let mut won = campaign;
            won.budget = second * quality[winner].max(0.05);
            trackers.push(CampaignTracker {
                campaign: won,
                achieved: 0,
                spend: 0.0,
                owner: winner,
            });
        }
    }
}

/// Clear one day of impression auctions, second-price per user.
fn run_ad_auctions(
    agents: &[Box<dyn Agent>],
    config: &ArenaConfig,
    rng: &mut StdRng,
    trackers: &mut [CampaignTracker],
    day: u32,
) {
    let mut bundles: Vec<BidBundle> = Vec::new();
    for (idx, agent) in agents.iter().enumerate() {
        let snapshots: Vec<CampaignSnapshot> = trackers
            .iter()
            .filter(|t| {
                t.owner == idx && t.campaign.start_day <= day && day <= t.campaign.end_day
            })
            .map(|t| CampaignSnapshot {
                campaign: t.campaign,
                reach_achieved: t.achieved,
                spend: t.spend,
                today: day,
            })
            .collect();
        bundles.extend(agent.ad_bids(&snapshots));
    }

    let mut day_spend = vec![0.0f64; bundles.len()];

    for (gender, age, income, population) in ATOMIC_SEGMENTS {
        let arrivals = sample_arrivals(rng, population, config.arrival_noise);
        for _ in 0..arrivals {
            let mut best: Option<(usize, f64)> = None;
            let mut runner_up = 0.0f64;
            for (slot, bundle) in bundles.iter().enumerate() {
                if !bundle.segment.matches(gender, age, income) {
                    continue;
                }
                // A bid stays live while its ceiling could cover it.
                if day_spend[slot] + bundle.bid_per_item > bundle.daily_limit {
                    continue;
                }
                match best {
                    Some((_, top)) if bundle.bid_per_item <= top => {
                        if bundle.bid_per_item > runner_up {
                            runner_up = bundle.bid_per_item;
                        }
                    }
                    _ => {
                        if let Some((_, top)) = best {
                            runner_up = top;
                        }
                        best = Some((slot, bundle.bid_per_item));
                    }
                }
            }

            if let Some((slot, _)) = best {
                let price = runner_up;
                day_spend[slot] += price;
                let id = bundles[slot].campaign_id;
                if let Some(tracker) = trackers.iter_mut().find(|t| t.campaign.id == id) {
                    tracker.achieved += 1;
                    tracker.spend += price;
                }
            }
        }
    }
}

fn settle_ending_campaigns(
    trackers: &mut Vec<CampaignTracker>,
    quality: &mut [f64],
    profit: &mut [f64],
    day: u32,
) {
    for tracker in trackers.iter().filter(|t| t.campaign.end_day == day) {
        let reach = f64::from(tracker.campaign.reach.max(1));
        let delivery = (f64::from(tracker.achieved) / reach).min(1.0);
        profit[tracker.owner] += tracker.campaign.budget * delivery - tracker.spend;
        quality[tracker.owner] = (0.5 * quality[tracker.owner] + 0.5 * delivery).max(0.05);
    }
    trackers.retain(|t| t.campaign.end_day > day);
}

fn random_campaign(rng: &mut StdRng, next_id: &mut u32, today: u32, horizon: u32) -> Campaign {
    let id = CampaignId(*next_id);
    *next_id += 1;

    let target = random_segment(rng);
    let max_duration = horizon.saturating_sub(today).saturating_add(1).min(3);
    let duration = rng.random_range(1..=max_duration.max(1));

    // Reach is a fraction of the segment's expected supply over the run.
    let supply = f64::from(target.daily_population()) * f64::from(duration);
    let reach = (supply * rng.random_range(0.2..0.8)).round().max(50.0) as u32;

    Campaign {
        id,
        reach,
        // Starter price; auctioned campaigns get re-priced by the winner.
        budget: f64::from(reach),
        start_day: today,
        end_day: today + duration - 1,
        target,
    }
}

fn random_segment(rng: &mut StdRng) -> MarketSegment {
    let (gender, age, income, _) = ATOMIC_SEGMENTS[rng.random_range(0..ATOMIC_SEGMENTS.len())];
    let mut segment = MarketSegment::atomic(gender, age, income);
    // Roughly half the campaigns target a broader two-attribute segment.
    match rng.random_range(0..6) {
        0 => segment.gender = None,
        1 => segment.age = None,
        2 => segment.income = None,
        _ => {}
    }
    segment
}

fn sample_arrivals(rng: &mut StdRng, population: u32, noise: f64) -> u32 {
    if noise <= 0.0 {
        return population;
    }
    let mean = f64::from(population);
    match Normal::new(mean, mean * noise) {
        Ok(dist) => dist.sample(rng).round().clamp(0.0, mean * 2.0) as u32,
        Err(_) => population,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{BaselineAgent, TUNED_AGENT_NAME, TunableAgent};
    use crate::report::parse_fitness;
    use crate::strategy::PacingParams;

    fn roster() -> Vec<Box<dyn Agent>> {
        let params = PacingParams {
            pacing_rate: 0.9,
            base_lift: 0.15,
            steepness: 10.0,
            peak_multiplier: 3.0,
        };
        vec![
            Box::new(TunableAgent::new(TUNED_AGENT_NAME, params)) as Box<dyn Agent>,
            Box::new(BaselineAgent::new("Opponent 1")),
            Box::new(BaselineAgent::new("Opponent 2")),
        ]
    }

    fn config() -> ArenaConfig {
        ArenaConfig {
            days: 4,
            campaigns_per_day: 2,
            seed: 7,
            arrival_noise: 0.1,
        }
    }

    #[test]
    fn report_holds_one_line_per_agent() {
        let agents = roster();
        let mut arena = AuctionArena::new(config());
        let mut report = String::new();
        arena.run_simulation(&agents, 3, &mut report).unwrap();

        assert_eq!(report.lines().count(), 3);
        assert!(parse_fitness(&report, TUNED_AGENT_NAME).is_some());
        assert!(parse_fitness(&report, "Opponent 2").is_some());
    }

    #[test]
    fn same_seed_same_report() {
        let agents = roster();
        let mut first = String::new();
        let mut second = String::new();
        AuctionArena::new(config())
            .run_simulation(&agents, 5, &mut first)
            .unwrap();
        AuctionArena::new(config())
            .run_simulation(&agents, 5, &mut second)
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_degenerate_invocations() {
        let mut arena = AuctionArena::new(config());
        let mut report = String::new();
        assert!(matches!(
            arena.run_simulation(&[], 3, &mut report),
            Err(SimulatorError::NoAgents)
        ));
        let agents = roster();
        assert!(matches!(
            arena.run_simulation(&agents, 0, &mut report),
            Err(SimulatorError::NoTrials)
        ));
    }
}
