//! Simulated tier upgrade.
//!
//! There is no payment step: an upgrade waits out a fixed processing delay and
//! then writes the new tier straight into profile metadata. The call finishes
//! (ok or err) before the caller refreshes any view, and a failed call never
//! leaves a half-written tier behind.
//!
//! The write is conditional on the tier read at the start. If another upgrade
//! lands during the delay, this one fails with [`UpgradeError::Superseded`]
//! instead of overwriting it.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use eventtier_core::{DomainError, UserId};
use eventtier_tiers::{Tier, check_upgrade};

use crate::profiles::{ProfileStore, ProfileStoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpgradeError {
    #[error("profile not found")]
    ProfileNotFound,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to persist new tier: {0}")]
    Store(ProfileStoreError),

    #[error("upgrade timed out after {0:?}")]
    TimedOut(Duration),

    #[error("tier changed to {found} while upgrading from {expected}")]
    Superseded { expected: Tier, found: Tier },
}

impl From<ProfileStoreError> for UpgradeError {
    fn from(value: ProfileStoreError) -> Self {
        match value {
            ProfileStoreError::NotFound => UpgradeError::ProfileNotFound,
            ProfileStoreError::TierChanged { expected, found } => {
                UpgradeError::Superseded { expected, found }
            }
            other => UpgradeError::Store(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpgradeOutcome {
    pub user_id: UserId,
    pub previous: Tier,
    pub current: Tier,
}

#[derive(Clone)]
pub struct TierUpgradeService {
    profiles: Arc<dyn ProfileStore>,
    delay: Duration,
    timeout: Option<Duration>,
}

impl TierUpgradeService {
    pub fn new(profiles: Arc<dyn ProfileStore>, delay: Duration) -> Self {
        Self {
            profiles,
            delay,
            timeout: None,
        }
    }

    /// Bound the processing + write step.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Move `user_id` to `target`, which must rank strictly above their
    /// current tier.
    pub async fn upgrade(&self, user_id: UserId, target: Tier) -> Result<UpgradeOutcome, UpgradeError> {
        let profile = self
            .profiles
            .get_profile(user_id)
            .await?
            .ok_or(UpgradeError::ProfileNotFound)?;
        let previous = profile.effective_tier();

        check_upgrade(previous, target)?;

        let work = async {
            tokio::time::sleep(self.delay).await;
            self.profiles.set_tier_if(user_id, previous, target).await
        };

        let updated = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, work)
                .await
                .map_err(|_| UpgradeError::TimedOut(limit))?,
            None => work.await,
        };

        let updated = updated.map_err(|e| {
            tracing::error!(%user_id, %target, error = %e, "tier upgrade failed");
            UpgradeError::from(e)
        })?;

        let current = updated.effective_tier();
        tracing::info!(%user_id, %previous, %current, "tier upgraded");

        Ok(UpgradeOutcome {
            user_id,
            previous,
            current,
        })
    }
}
