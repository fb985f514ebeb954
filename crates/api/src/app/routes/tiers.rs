use std::sync::Arc;

use axum::{
    extract::Extension,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use eventtier_tiers::{accessible_tiers, offers_for};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_tiers))
        .route("/upgrade", post(upgrade_tier))
}

/// Every tier with its price and features, marked against the viewer's tier.
pub async fn list_tiers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let current = match services.viewer(&principal).await {
        Ok(profile) => profile.effective_tier(),
        Err(e) => return errors::profile_error_to_response(e),
    };

    Json(json!({
        "current": current,
        "offers": offers_for(current),
    }))
    .into_response()
}

/// Simulated upgrade. Only strictly higher tiers are accepted; the response
/// is sent after the new tier is stored, so a follow-up listing sees it.
pub async fn upgrade_tier(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::UpgradeRequest>,
) -> axum::response::Response {
    let target = match errors::parse_tier(&body.tier) {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    // First sight of a user creates their profile, so upgrade never 404s for
    // a valid token.
    if let Err(e) = services.viewer(&principal).await {
        return errors::profile_error_to_response(e);
    }

    match services.upgrades.upgrade(principal.user_id(), target).await {
        Ok(outcome) => Json(json!({
            "user_id": outcome.user_id.to_string(),
            "previous": outcome.previous,
            "current": outcome.current,
            "accessible_tiers": accessible_tiers(outcome.current),
        }))
        .into_response(),
        Err(e) => errors::upgrade_error_to_response(e),
    }
}
