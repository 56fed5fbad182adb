//! Type-safe enumerations for the pipeline's fixed vocabularies.
//!
//! The six dataset domains and the device categories used for ownership
//! reporting are closed sets, so they are modelled as enums rather than
//! free-form strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// One of the six fixed IoT verticals.
///
/// The declaration order is the Orchestrator's processing order and the
/// order in which device catalog entries are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Air quality and water quality monitoring, fused per location.
    Environmental,
    /// Plant research plots turned into a synthetic time series.
    Agricultural,
    /// Fitness trackers with location data removed.
    Health,
    /// 5G quality-of-service measurements per cell tower.
    Network,
    /// Retail store transactions mapped onto named neighborhoods.
    Retail,
    /// Weather stations with Fahrenheit readings converted to Celsius.
    Weather,
}

impl Domain {
    /// All domains in processing order.
    pub const ALL: [Domain; 6] = [
        Domain::Environmental,
        Domain::Agricultural,
        Domain::Health,
        Domain::Network,
        Domain::Retail,
        Domain::Weather,
    ];

    /// Returns the lowercase tag used in records, configuration and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Environmental => "environmental",
            Domain::Agricultural => "agricultural",
            Domain::Health => "health",
            Domain::Network => "network",
            Domain::Retail => "retail",
            Domain::Weather => "weather",
        }
    }

    /// Human-readable description for summaries.
    pub fn description(&self) -> &'static str {
        match self {
            Domain::Environmental => "Air + water quality fusion",
            Domain::Agricultural => "Plant research time series",
            Domain::Health => "Fitness trackers, location removed",
            Domain::Network => "5G QoS string parsing",
            Domain::Retail => "Store sales, PII anonymized",
            Domain::Weather => "Weather stations, F to C",
        }
    }

    /// Category used for ownership reporting.
    pub fn category(&self) -> Category {
        match self {
            Domain::Environmental => Category::Environmental,
            Domain::Agricultural => Category::Agricultural,
            Domain::Health => Category::Health,
            Domain::Network => Category::Network,
            Domain::Retail => Category::Retail,
            Domain::Weather => Category::Weather,
        }
    }

    /// Position in the processing order.
    pub fn order(&self) -> usize {
        Domain::ALL
            .iter()
            .position(|domain| domain == self)
            .unwrap_or(Domain::ALL.len())
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Domain::ALL
            .into_iter()
            .find(|domain| domain.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownDomain(s.to_string()))
    }
}

/// Coarse device category for ownership summaries.
///
/// Categories are coarser than sensor kinds: air and water sensors both
/// fall under [`Category::Environmental`]. Ordering is alphabetical, which is
/// the column order of the per-wallet summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Agricultural,
    Environmental,
    Health,
    Network,
    Retail,
    Weather,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Agricultural,
        Category::Environmental,
        Category::Health,
        Category::Network,
        Category::Retail,
        Category::Weather,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Agricultural => "agricultural",
            Category::Environmental => "environmental",
            Category::Health => "health",
            Category::Network => "network",
            Category::Retail => "retail",
            Category::Weather => "weather",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}
