//! Split a listing into what the viewer can open and what is locked.

use serde::Serialize;

use eventtier_tiers::{Tier, TierSet, accessible_tiers};

use crate::{EventRecord, TierFilter};

/// Accessible/locked split of a listing. Every input event lands in exactly
/// one side, and input order is kept within each side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    pub accessible: Vec<EventRecord>,
    pub locked: Vec<EventRecord>,
}

impl Partition {
    pub fn total(&self) -> usize {
        self.accessible.len() + self.locked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Partition `events` for a viewer holding `user_tier`.
pub fn partition<I>(events: I, user_tier: Tier) -> Partition
where
    I: IntoIterator<Item = EventRecord>,
{
    partition_with(events, accessible_tiers(user_tier))
}

/// Partition against a precomputed accessible-tier set.
pub fn partition_with<I>(events: I, open_tiers: TierSet) -> Partition
where
    I: IntoIterator<Item = EventRecord>,
{
    let (accessible, locked): (Vec<_>, Vec<_>) = events
        .into_iter()
        .partition(|event| open_tiers.contains(event.tier));

    Partition { accessible, locked }
}

/// Apply the viewer's filter, then partition.
pub fn filter_and_partition<I>(events: I, filter: TierFilter, user_tier: Tier) -> Partition
where
    I: IntoIterator<Item = EventRecord>,
{
    partition(events.into_iter().filter(|e| filter.matches(e)), user_tier)
}

/// Listing order: soonest event first. Stable for equal dates.
pub fn sort_by_date(events: &mut [EventRecord]) {
    events.sort_by_key(|e| e.event_date);
}
