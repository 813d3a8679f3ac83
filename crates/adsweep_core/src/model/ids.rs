use serde::{Deserialize, Serialize};

/// Unique identifier for a campaign within one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CampaignId(pub u32);
