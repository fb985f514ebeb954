use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use eventtier_infra::AppConfig;
use eventtier_tiers::{Tier, accessible_tiers};

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

const DEBUG_SAMPLE_SIZE: usize = 5;
const DEBUG_PREVIEW: usize = 2;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    let profile = match services.viewer(&principal).await {
        Ok(p) => p,
        Err(e) => return errors::profile_error_to_response(e),
    };
    let tier = profile.effective_tier();

    Json(json!({
        "user_id": principal.user_id().to_string(),
        "email": principal.email(),
        "tier": tier,
        "tier_label": tier.label(),
        "accessible_tiers": accessible_tiers(tier),
    }))
    .into_response()
}

/// Diagnostics for the signed-in user: raw profile metadata, the resolved
/// tier, and whether the event store answers. Store failures are reported in
/// the body rather than as an error status.
pub async fn debug(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(config): Extension<AppConfig>,
    Extension(principal): Extension<PrincipalContext>,
) -> impl IntoResponse {
    let (user, viewer_tier) = match services.viewer(&principal).await {
        Ok(profile) => {
            let tier = profile.effective_tier();
            let user = json!({
                "id": profile.user_id.to_string(),
                "email": profile.email,
                "metadata": profile.metadata,
                "raw_tier": profile.metadata.get(eventtier_auth::TIER_KEY),
                "tier": tier,
            });
            (user, tier)
        }
        Err(e) => (json!({ "error": e.to_string() }), Tier::LOWEST),
    };

    let ping = match services.catalog.ping().await {
        Ok(()) => json!({ "ok": true }),
        Err(e) => json!({ "ok": false, "error": e.to_string() }),
    };

    let events = match services.catalog.sample_events(DEBUG_SAMPLE_SIZE).await {
        Ok(sample) => {
            let preview = &sample[..sample.len().min(DEBUG_PREVIEW)];
            json!({
                "count": sample.len(),
                "preview": dto::events_to_json(preview, viewer_tier),
                "error": null,
            })
        }
        Err(e) => json!({ "count": 0, "preview": [], "error": e.to_string() }),
    };

    Json(json!({
        "user": user,
        "catalog": {
            "backend": services.catalog.backend(),
            "ping": ping,
        },
        "events": events,
        "config": {
            "database_configured": config.database_url.is_some(),
            "jwt_secret_is_default": config.jwt_secret_is_default,
            "upgrade_delay_ms": config.upgrade_delay.as_millis() as u64,
            "upgrade_timeout_ms": config.upgrade_timeout.map(|t| t.as_millis() as u64),
        },
    }))
}
