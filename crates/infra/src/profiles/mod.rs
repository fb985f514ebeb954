//! Identity-provider profile access.
//!
//! The provider owns the profile; this side only reads it and writes back
//! metadata after an upgrade.

pub mod in_memory;

use std::sync::Arc;

use thiserror::Error;

use eventtier_auth::{ProfileMetadata, UserProfile};
use eventtier_core::UserId;
use eventtier_tiers::Tier;

pub use in_memory::InMemoryProfileStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProfileStoreError {
    #[error("profile not found")]
    NotFound,

    #[error("profile store unavailable: {0}")]
    Unavailable(String),

    #[error("stored tier changed: expected {expected}, found {found}")]
    TierChanged { expected: Tier, found: Tier },
}

#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the profile, creating an empty one on first sign-in.
    async fn get_or_create(
        &self,
        user_id: UserId,
        email: Option<&str>,
    ) -> Result<UserProfile, ProfileStoreError>;

    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, ProfileStoreError>;

    /// Replace the profile's metadata wholesale. Either the whole write lands
    /// or nothing changes.
    async fn update_metadata(
        &self,
        user_id: UserId,
        metadata: ProfileMetadata,
    ) -> Result<UserProfile, ProfileStoreError>;

    /// Compare-and-set on the tier key: write `target` only if the stored
    /// effective tier is still `expected`. Other metadata keys are taken from
    /// the stored profile at write time, not from an earlier read.
    async fn set_tier_if(
        &self,
        user_id: UserId,
        expected: Tier,
        target: Tier,
    ) -> Result<UserProfile, ProfileStoreError>;
}

#[async_trait::async_trait]
impl<S> ProfileStore for Arc<S>
where
    S: ProfileStore + ?Sized,
{
    async fn get_or_create(
        &self,
        user_id: UserId,
        email: Option<&str>,
    ) -> Result<UserProfile, ProfileStoreError> {
        (**self).get_or_create(user_id, email).await
    }

    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, ProfileStoreError> {
        (**self).get_profile(user_id).await
    }

    async fn update_metadata(
        &self,
        user_id: UserId,
        metadata: ProfileMetadata,
    ) -> Result<UserProfile, ProfileStoreError> {
        (**self).update_metadata(user_id, metadata).await
    }

    async fn set_tier_if(
        &self,
        user_id: UserId,
        expected: Tier,
        target: Tier,
    ) -> Result<UserProfile, ProfileStoreError> {
        (**self).set_tier_if(user_id, expected, target).await
    }
}
