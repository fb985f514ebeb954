use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use eventtier_auth::{ProfileMetadata, UserProfile};
use eventtier_core::UserId;
use eventtier_tiers::Tier;

use super::{ProfileStore, ProfileStoreError};

/// In-memory profile store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    inner: RwLock<HashMap<UserId, UserProfile>>,
    fail_writes: AtomicBool,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a profile as-is (fixtures with pre-set or malformed metadata).
    pub fn insert(&self, profile: UserProfile) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(profile.user_id, profile);
        }
    }

    /// Make every metadata write fail until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

fn poisoned() -> ProfileStoreError {
    ProfileStoreError::Unavailable("profile lock poisoned".to_string())
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_or_create(
        &self,
        user_id: UserId,
        email: Option<&str>,
    ) -> Result<UserProfile, ProfileStoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let profile = map
            .entry(user_id)
            .or_insert_with(|| UserProfile::new(user_id, email.map(str::to_string)));
        if profile.email.is_none() {
            profile.email = email.map(str::to_string);
        }
        Ok(profile.clone())
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, ProfileStoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&user_id).cloned())
    }

    async fn update_metadata(
        &self,
        user_id: UserId,
        metadata: ProfileMetadata,
    ) -> Result<UserProfile, ProfileStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ProfileStoreError::Unavailable("metadata write rejected".to_string()));
        }

        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let profile = map.get_mut(&user_id).ok_or(ProfileStoreError::NotFound)?;
        profile.metadata = metadata;
        Ok(profile.clone())
    }

    async fn set_tier_if(
        &self,
        user_id: UserId,
        expected: Tier,
        target: Tier,
    ) -> Result<UserProfile, ProfileStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ProfileStoreError::Unavailable("metadata write rejected".to_string()));
        }

        // Check and write under one lock hold.
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let profile = map.get_mut(&user_id).ok_or(ProfileStoreError::NotFound)?;
        let found = profile.effective_tier();
        if found != expected {
            return Err(ProfileStoreError::TierChanged { expected, found });
        }
        profile.metadata = profile.metadata.with_tier(target);
        Ok(profile.clone())
    }
}
