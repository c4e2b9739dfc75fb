// Frequency tiers and the tier-shaped payload sum type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{HighTierData, LowTierData, MediumTierData};

/// Collection cadence of a submission; decides which subsystems are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::High, Tier::Medium, Tier::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::High => "high",
            Tier::Medium => "medium",
            Tier::Low => "low",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTier(pub String);

impl fmt::Display for UnknownTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown frequency tier {:?}", self.0)
    }
}

impl std::error::Error for UnknownTier {}

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Tier::High),
            "medium" => Ok(Tier::Medium),
            "low" => Ok(Tier::Low),
            other => Err(UnknownTier(other.to_string())),
        }
    }
}

/// The `data` object of a submission, already decoded into the shape its tier demands.
#[derive(Debug, Clone)]
pub enum TierData {
    High(Box<HighTierData>),
    Medium(Box<MediumTierData>),
    Low(Box<LowTierData>),
}

impl TierData {
    /// Decode `data` according to `tier`.
    pub fn from_json(tier: Tier, data: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match tier {
            Tier::High => TierData::High(Box::new(serde_json::from_value(data)?)),
            Tier::Medium => TierData::Medium(Box::new(serde_json::from_value(data)?)),
            Tier::Low => TierData::Low(Box::new(serde_json::from_value(data)?)),
        })
    }

    pub fn tier(&self) -> Tier {
        match self {
            TierData::High(_) => Tier::High,
            TierData::Medium(_) => Tier::Medium,
            TierData::Low(_) => Tier::Low,
        }
    }
}
