//! User profile as held by the identity provider.
//!
//! Metadata is a free-form JSON object owned by the provider; only the `tier`
//! key means anything here, and it is validated every time it is read.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use eventtier_core::{Entity, UserId};
use eventtier_tiers::Tier;

/// Metadata key holding the membership tier.
pub const TIER_KEY: &str = "tier";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileMetadata(Map<String, JsonValue>);

impl ProfileMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Effective tier; missing or malformed values read as free.
    pub fn tier(&self) -> Tier {
        Tier::from_metadata(self.get(TIER_KEY))
    }

    /// Copy of this metadata with only the tier replaced.
    pub fn with_tier(&self, tier: Tier) -> Self {
        let mut next = self.0.clone();
        next.insert(TIER_KEY.to_string(), JsonValue::String(tier.as_str().to_string()));
        Self(next)
    }

    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }
}

impl From<Map<String, JsonValue>> for ProfileMetadata {
    fn from(value: Map<String, JsonValue>) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: Option<String>,
    pub metadata: ProfileMetadata,
}

impl UserProfile {
    pub fn new(user_id: UserId, email: Option<String>) -> Self {
        Self {
            user_id,
            email,
            metadata: ProfileMetadata::new(),
        }
    }

    pub fn effective_tier(&self) -> Tier {
        self.metadata.tier()
    }
}

impl Entity for UserProfile {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.user_id
    }
}
