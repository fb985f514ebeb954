use serde::Serialize;
use thiserror::Error;

use eventtier_tiers::{Tier, TierSet, accessible_tiers, can_access};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("tier locked: requires {required}, viewer holds {held}")]
    TierLocked { required: Tier, held: Tier },
}

/// Gate a tier-restricted resource for a viewer.
///
/// - No IO
/// - No panics
/// - No direction rules (pure access check)
pub fn authorize_tier(held: Tier, required: Tier) -> Result<(), AuthzError> {
    if can_access(held, required) {
        Ok(())
    } else {
        Err(AuthzError::TierLocked { required, held })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of a tier access decision, suitable for returning
/// alongside a 403 or for the diagnostics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub required_tier: Tier,
    pub viewer_tier: Tier,
    pub granted: bool,
    pub reason: String,

    /// Tiers the viewer can currently open.
    pub accessible_tiers: TierSet,

    /// Present only on denial.
    pub suggestion: Option<String>,
}

/// Explain why access to a `required`-gated resource is granted or denied.
pub fn explain_access(viewer: Tier, required: Tier) -> AccessExplanation {
    let granted = can_access(viewer, required);

    let reason = if granted {
        format!(
            "{viewer} (rank {}) is at or above {required} (rank {})",
            viewer.rank(),
            required.rank()
        )
    } else {
        format!(
            "{viewer} (rank {}) is below {required} (rank {})",
            viewer.rank(),
            required.rank()
        )
    };

    AccessExplanation {
        required_tier: required,
        viewer_tier: viewer,
        granted,
        reason,
        accessible_tiers: accessible_tiers(viewer),
        suggestion: (!granted).then(|| format!("Upgrade to {} to Access", required.label())),
    }
}
