//! Demo listing used when no database is configured.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use eventtier_core::EventId;
use eventtier_listings::RawEventRow;

/// (title, description, RFC3339 start, tier)
const DEMO_EVENTS: &[(&str, &str, &str, &str)] = &[
    (
        "Community Meetup: Intro to Rust",
        "Monthly open meetup for newcomers. Lightning talks and pizza.",
        "2026-11-05T18:00:00Z",
        "free",
    ),
    (
        "Open Source Saturday",
        "Pair up and land your first contribution with maintainers on hand.",
        "2026-11-14T10:00:00Z",
        "free",
    ),
    (
        "Advanced Async Workshop",
        "Hands-on session on executors, cancellation and backpressure.",
        "2026-11-20T09:30:00Z",
        "silver",
    ),
    (
        "Systems Design Workshop",
        "Design reviews of real production services in small groups.",
        "2026-12-02T13:00:00Z",
        "silver",
    ),
    (
        "Performance Bootcamp",
        "Three days of profiling, benchmarking and tuning.",
        "2026-12-09T09:00:00Z",
        "gold",
    ),
    (
        "Industry Summit",
        "Keynotes and panels from platform teams shipping at scale.",
        "2027-01-15T08:30:00Z",
        "gold",
    ),
    (
        "Executive Forum",
        "Closed-door roundtable on engineering leadership.",
        "2027-02-03T17:00:00Z",
        "platinum",
    ),
    (
        "Innovation Conference",
        "Invite-only showcase of research prototypes, with VIP networking.",
        "2027-03-10T09:00:00Z",
        "platinum",
    ),
];

/// Stable ids so seeded events can be addressed across restarts.
pub fn demo_event_id(index: usize) -> EventId {
    EventId::from_uuid(Uuid::from_u128(0x0e7e_0000_0000_7000_8000_0000_0000_0000 + index as u128))
}

pub fn demo_rows() -> Vec<RawEventRow> {
    DEMO_EVENTS
        .iter()
        .enumerate()
        .filter_map(|(i, (title, description, start, tier))| {
            let event_date = DateTime::parse_from_rfc3339(start).ok()?.with_timezone(&Utc);
            Some(RawEventRow {
                id: demo_event_id(i),
                title: title.to_string(),
                description: Some(description.to_string()),
                event_date,
                image_url: None,
                tier: Some(tier.to_string()),
                created_at: None,
            })
        })
        .collect()
}
