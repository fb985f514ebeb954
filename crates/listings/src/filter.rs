use core::str::FromStr;

use serde::Serialize;

use eventtier_tiers::{Tier, TierParseError};

use crate::EventRecord;

/// Listing filter chosen by the viewer ("All Tiers" or one specific tier).
///
/// Filtering happens before partitioning, so a filter on a locked tier yields
/// only locked events.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TierFilter {
    #[default]
    All,
    Only(Tier),
}

impl TierFilter {
    pub fn matches(&self, event: &EventRecord) -> bool {
        match self {
            TierFilter::All => true,
            TierFilter::Only(tier) => event.tier == *tier,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TierFilter::All => "all",
            TierFilter::Only(tier) => tier.as_str(),
        }
    }

    /// Message shown when the filtered listing is empty.
    pub fn empty_message(&self) -> String {
        match self {
            TierFilter::All => "No events are currently available.".to_string(),
            TierFilter::Only(tier) => format!("No {tier} tier events found."),
        }
    }
}

impl FromStr for TierFilter {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(TierFilter::All);
        }
        Ok(TierFilter::Only(Tier::parse_input(s)?))
    }
}

impl Serialize for TierFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
