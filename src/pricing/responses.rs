//! Response DTOs for the estimate display.

use serde::Serialize;

use super::calculators::{Estimate, ROOMMATE_SCENARIOS};

/// Which presentation the form should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    OnlyCost,
    RoommateCosts,
}

/// Formatted estimate ready for the display sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EstimateDisplay {
    OnlyCost { cost: String },
    RoommateCosts { costs: [String; ROOMMATE_SCENARIOS] },
}

impl EstimateDisplay {
    pub fn mode(&self) -> DisplayMode {
        match self {
            EstimateDisplay::OnlyCost { .. } => DisplayMode::OnlyCost,
            EstimateDisplay::RoommateCosts { .. } => DisplayMode::RoommateCosts,
        }
    }
}

impl From<Estimate> for EstimateDisplay {
    fn from(estimate: Estimate) -> Self {
        match estimate {
            Estimate::SingleWithSplits(costs) => EstimateDisplay::RoommateCosts {
                costs: costs.map(format_dollars),
            },
            Estimate::Flat(cost) => EstimateDisplay::OnlyCost {
                cost: format_dollars(cost),
            },
        }
    }
}

/// Format whole dollars the way the form shows them.
pub fn format_dollars(amount: u64) -> String {
    format!("${}", amount)
}
