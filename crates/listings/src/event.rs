use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eventtier_core::{Entity, EventId};
use eventtier_tiers::{Tier, can_access};

/// An event row exactly as the row store hands it back.
///
/// `tier` is untyped at the source, so it stays a string until ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEventRow {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A listed event with its required tier resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub image_url: Option<String>,
    /// Minimum tier needed to view the event.
    pub tier: Tier,
    pub created_at: Option<DateTime<Utc>>,
}

impl EventRecord {
    /// Ingest a raw row. An absent or unknown tier becomes free.
    pub fn from_row(row: RawEventRow) -> Self {
        let tier = match row.tier.as_deref() {
            Some(raw) => Tier::coerce(Some(raw)),
            None => {
                tracing::warn!(event_id = %row.id, "event row has no tier; treating as free");
                Tier::LOWEST
            }
        };

        Self {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            event_date: row.event_date,
            image_url: row.image_url.filter(|u| !u.trim().is_empty()),
            tier,
            created_at: row.created_at,
        }
    }

    pub fn is_accessible_to(&self, viewer: Tier) -> bool {
        can_access(viewer, self.tier)
    }

    /// Call-to-action shown on a locked card.
    pub fn unlock_label(&self) -> String {
        format!("Upgrade to {} to Access", self.tier.label())
    }
}

impl From<RawEventRow> for EventRecord {
    fn from(row: RawEventRow) -> Self {
        Self::from_row(row)
    }
}

impl Entity for EventRecord {
    type Id = EventId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
