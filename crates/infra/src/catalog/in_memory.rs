use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use eventtier_core::EventId;
use eventtier_listings::{EventRecord, RawEventRow, sort_by_date};

use super::{CatalogError, EventCatalog, seed};

/// In-memory event catalog for tests/dev.
///
/// Rows are kept raw, exactly as a row store would return them, so ingestion
/// coercion runs on every read.
#[derive(Debug, Default)]
pub struct InMemoryEventCatalog {
    rows: RwLock<Vec<RawEventRow>>,
    unavailable: AtomicBool,
}

impl InMemoryEventCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<RawEventRow>) -> Self {
        Self {
            rows: RwLock::new(rows),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Catalog pre-filled with the demo listing.
    pub fn seeded() -> Self {
        Self::with_rows(seed::demo_rows())
    }

    pub fn insert_row(&self, row: RawEventRow) {
        if let Ok(mut rows) = self.rows.write() {
            rows.retain(|r| r.id != row.id);
            rows.push(row);
        }
    }

    /// Simulate an outage: every call fails with `Unavailable` until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), CatalogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CatalogError::Unavailable("in-memory catalog switched off".to_string()));
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<RawEventRow>, CatalogError> {
        self.check_available()?;
        self.rows
            .read()
            .map(|rows| rows.clone())
            .map_err(|_| CatalogError::Unavailable("catalog lock poisoned".to_string()))
    }
}

#[async_trait::async_trait]
impl EventCatalog for InMemoryEventCatalog {
    async fn list_events(&self) -> Result<Vec<EventRecord>, CatalogError> {
        let mut events: Vec<EventRecord> = self
            .snapshot()?
            .into_iter()
            .map(EventRecord::from_row)
            .collect();
        sort_by_date(&mut events);
        Ok(events)
    }

    async fn get_event(&self, id: EventId) -> Result<Option<EventRecord>, CatalogError> {
        Ok(self
            .snapshot()?
            .into_iter()
            .find(|r| r.id == id)
            .map(EventRecord::from_row))
    }

    async fn ping(&self) -> Result<(), CatalogError> {
        self.check_available()
    }

    fn backend(&self) -> &'static str {
        "in-memory"
    }
}
