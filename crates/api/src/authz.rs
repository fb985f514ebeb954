//! API-side tier guard for single-event reads.
//!
//! Listing endpoints never reject: they partition. Opening one event is the
//! only place a lock turns into a 403.

use eventtier_auth::{AuthzError, authorize_tier};
use eventtier_listings::EventRecord;
use eventtier_tiers::Tier;

/// Check whether a viewer holding `viewer_tier` may open `event`.
pub fn authorize_event(viewer_tier: Tier, event: &EventRecord) -> Result<(), AuthzError> {
    authorize_tier(viewer_tier, event.tier)
}
