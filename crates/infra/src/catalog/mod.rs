//! Row-store query client for event listings.

pub mod in_memory;
pub mod postgres;
pub mod seed;

use std::sync::Arc;

use thiserror::Error;

use eventtier_core::EventId;
use eventtier_listings::EventRecord;

pub use in_memory::InMemoryEventCatalog;
pub use postgres::PostgresEventCatalog;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("event store unavailable: {0}")]
    Unavailable(String),

    #[error("event query failed: {0}")]
    Query(String),

    #[error("malformed event row: {0}")]
    Decode(String),
}

/// Read-only access to the event collection.
///
/// Implementations coerce each row's tier at ingestion (see
/// [`EventRecord::from_row`]); callers only ever see resolved tiers.
#[async_trait::async_trait]
pub trait EventCatalog: Send + Sync {
    /// All events, soonest first.
    async fn list_events(&self) -> Result<Vec<EventRecord>, CatalogError>;

    /// Up to `limit` events, soonest first.
    async fn sample_events(&self, limit: usize) -> Result<Vec<EventRecord>, CatalogError> {
        let mut events = self.list_events().await?;
        events.truncate(limit);
        Ok(events)
    }

    async fn get_event(&self, id: EventId) -> Result<Option<EventRecord>, CatalogError>;

    /// Cheap connectivity probe.
    async fn ping(&self) -> Result<(), CatalogError>;

    /// Backend name for diagnostics.
    fn backend(&self) -> &'static str;
}

#[async_trait::async_trait]
impl<S> EventCatalog for Arc<S>
where
    S: EventCatalog + ?Sized,
{
    async fn list_events(&self) -> Result<Vec<EventRecord>, CatalogError> {
        (**self).list_events().await
    }

    async fn sample_events(&self, limit: usize) -> Result<Vec<EventRecord>, CatalogError> {
        (**self).sample_events(limit).await
    }

    async fn get_event(&self, id: EventId) -> Result<Option<EventRecord>, CatalogError> {
        (**self).get_event(id).await
    }

    async fn ping(&self) -> Result<(), CatalogError> {
        (**self).ping().await
    }

    fn backend(&self) -> &'static str {
        (**self).backend()
    }
}
