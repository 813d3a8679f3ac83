//! Domain types shared by the strategies, the evaluator, and the arena.

mod bids;
mod campaign;
mod ids;
mod segments;

pub use bids::BidBundle;
pub use campaign::{Campaign, CampaignSnapshot};
pub use ids::CampaignId;
pub use segments::{ATOMIC_SEGMENTS, AgeGroup, Gender, Income, MarketSegment};
