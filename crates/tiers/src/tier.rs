use core::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use eventtier_core::ValueObject;

/// Membership tier.
///
/// Variants are declared in rank order, so the derived `Ord` agrees with
/// [`Tier::rank`]. Serialized as lowercase names (`"free"`, `"silver"`, ...).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Silver,
    Gold,
    Platinum,
}

impl ValueObject for Tier {}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown tier '{0}' (expected one of: free, silver, gold, platinum)")]
pub struct TierParseError(pub String);

impl Tier {
    /// Every tier, lowest rank first.
    pub const ALL: [Tier; 4] = [Tier::Free, Tier::Silver, Tier::Gold, Tier::Platinum];

    /// Least-privilege tier; the fallback for missing or malformed data.
    pub const LOWEST: Tier = Tier::Free;

    pub fn rank(self) -> u8 {
        match self {
            Tier::Free => 0,
            Tier::Silver => 1,
            Tier::Gold => 2,
            Tier::Platinum => 3,
        }
    }

    pub fn from_rank(rank: u8) -> Option<Tier> {
        match rank {
            0 => Some(Tier::Free),
            1 => Some(Tier::Silver),
            2 => Some(Tier::Gold),
            3 => Some(Tier::Platinum),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Free => "free",
            Tier::Silver => "silver",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
        }
    }

    /// Capitalized name for labels ("Upgrade to Gold to Access").
    pub fn label(self) -> &'static str {
        match self {
            Tier::Free => "Free",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }

    /// Coerce an optional, untrusted tier string into a tier.
    ///
    /// Absent or unrecognized values resolve to [`Tier::LOWEST`] so bad data
    /// never grants access. Rejected values are logged.
    pub fn coerce(raw: Option<&str>) -> Tier {
        let Some(raw) = raw else {
            return Tier::LOWEST;
        };

        match raw.parse() {
            Ok(tier) => tier,
            Err(err) => {
                tracing::warn!(value = raw, error = %err, "unrecognized tier; falling back to free");
                Tier::LOWEST
            }
        }
    }

    /// Resolve a tier from an untyped profile-metadata value.
    ///
    /// `None` and JSON `null` mean "never set" and quietly map to free; any
    /// other non-string value is treated like an unknown string.
    pub fn from_metadata(value: Option<&JsonValue>) -> Tier {
        match value {
            None | Some(JsonValue::Null) => Tier::LOWEST,
            Some(JsonValue::String(s)) => Tier::coerce(Some(s)),
            Some(other) => {
                tracing::warn!(value = %other, "non-string tier in profile metadata; falling back to free");
                Tier::LOWEST
            }
        }
    }
}

impl core::fmt::Display for Tier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Tier {
    /// Parse user-typed input (query strings, request bodies): surrounding
    /// whitespace and letter case are ignored. Stored data goes through the
    /// exact [`FromStr`] match instead.
    pub fn parse_input(raw: &str) -> Result<Tier, TierParseError> {
        raw.trim()
            .to_ascii_lowercase()
            .parse()
            .map_err(|_| TierParseError(raw.to_string()))
    }
}

/// Exact match on the four lowercase names, agreeing with the serde form.
impl FromStr for Tier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Tier::Free),
            "silver" => Ok(Tier::Silver),
            "gold" => Ok(Tier::Gold),
            "platinum" => Ok(Tier::Platinum),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}
