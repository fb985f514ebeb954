use std::sync::Arc;

use eventtier_auth::UserProfile;
use eventtier_infra::{
    AppConfig, EventCatalog, InMemoryEventCatalog, InMemoryProfileStore, PostgresEventCatalog,
    ProfileStore, ProfileStoreError, TierUpgradeService,
};

use crate::context::PrincipalContext;

/// Everything handlers need, shared behind an `Arc`.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: Arc<dyn EventCatalog>,
    pub profiles: Arc<dyn ProfileStore>,
    pub upgrades: TierUpgradeService,
}

impl AppServices {
    pub fn new(
        catalog: Arc<dyn EventCatalog>,
        profiles: Arc<dyn ProfileStore>,
        config: &AppConfig,
    ) -> Self {
        let upgrades = TierUpgradeService::new(profiles.clone(), config.upgrade_delay)
            .with_timeout(config.upgrade_timeout);
        Self {
            catalog,
            profiles,
            upgrades,
        }
    }

    /// In-memory stores with the demo listing.
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(InMemoryEventCatalog::seeded()),
            Arc::new(InMemoryProfileStore::new()),
            config,
        )
    }

    /// The caller's profile, created on first sight.
    pub async fn viewer(&self, principal: &PrincipalContext) -> Result<UserProfile, ProfileStoreError> {
        self.profiles
            .get_or_create(principal.user_id(), principal.email())
            .await
    }
}

/// Wire services from config: Postgres when `DATABASE_URL` is set, otherwise
/// the seeded in-memory catalog. Profiles are always in-memory (the identity
/// provider is external).
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::info!("DATABASE_URL not set; serving the in-memory demo catalog");
        return Ok(AppServices::in_memory(config));
    };

    let catalog = PostgresEventCatalog::connect(database_url).await?;
    catalog.ensure_schema().await?;
    tracing::info!("connected to postgres event catalog");

    Ok(AppServices::new(
        Arc::new(catalog),
        Arc::new(InMemoryProfileStore::new()),
        config,
    ))
}
