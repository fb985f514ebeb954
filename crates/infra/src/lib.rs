//! Infrastructure layer: configuration, row-store and identity-provider
//! adapters, and the tier upgrade flow.

pub mod catalog;
pub mod config;
pub mod profiles;
pub mod upgrade;

pub use catalog::{CatalogError, EventCatalog, InMemoryEventCatalog, PostgresEventCatalog};
pub use config::{AppConfig, ConfigError};
pub use profiles::{InMemoryProfileStore, ProfileStore, ProfileStoreError};
pub use upgrade::{TierUpgradeService, UpgradeError, UpgradeOutcome};
