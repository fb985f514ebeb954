use serde::Deserialize;
use serde_json::json;

use eventtier_listings::EventRecord;
use eventtier_tiers::Tier;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct UpgradeRequest {
    pub tier: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListEventsQuery {
    /// `all` or a tier name; absent means all.
    pub tier: Option<String>,
}

// -------------------------
// Response helpers
// -------------------------

/// An event card as seen by `viewer_tier`. Locked cards keep their full
/// content; the lock is presentation only.
pub fn event_to_json(event: &EventRecord, viewer_tier: Tier) -> serde_json::Value {
    let locked = !event.is_accessible_to(viewer_tier);
    json!({
        "id": event.id.to_string(),
        "title": event.title,
        "description": event.description,
        "event_date": event.event_date.to_rfc3339(),
        "image_url": event.image_url,
        "tier": event.tier,
        "tier_label": event.tier.label(),
        "locked": locked,
        "unlock_label": locked.then(|| event.unlock_label()),
    })
}

pub fn events_to_json(events: &[EventRecord], viewer_tier: Tier) -> Vec<serde_json::Value> {
    events.iter().map(|e| event_to_json(e, viewer_tier)).collect()
}
