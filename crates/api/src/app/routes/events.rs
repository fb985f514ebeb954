use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use eventtier_core::EventId;
use eventtier_listings::filter_and_partition;
use eventtier_tiers::accessible_tiers;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_events))
        .route("/:id", get(get_event))
}

/// The listing, split into what the viewer can open and what stays locked.
/// The viewer's tier is re-read from the profile on every call.
pub async fn list_events(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Query(query): Query<dto::ListEventsQuery>,
) -> axum::response::Response {
    let filter = match errors::parse_filter(query.tier.as_deref()) {
        Ok(f) => f,
        Err(resp) => return resp,
    };

    let viewer_tier = match services.viewer(&principal).await {
        Ok(profile) => profile.effective_tier(),
        Err(e) => return errors::profile_error_to_response(e),
    };

    // Catalogs return events soonest first.
    let events = match services.catalog.list_events().await {
        Ok(events) => events,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    let split = filter_and_partition(events, filter, viewer_tier);
    tracing::debug!(
        user_id = %principal.user_id(),
        tier = %viewer_tier,
        filter = filter.as_str(),
        accessible = split.accessible.len(),
        locked = split.locked.len(),
        "listed events"
    );

    Json(json!({
        "user_tier": viewer_tier,
        "accessible_tiers": accessible_tiers(viewer_tier),
        "filter": filter,
        "total": split.total(),
        "accessible": dto::events_to_json(&split.accessible, viewer_tier),
        "locked": dto::events_to_json(&split.locked, viewer_tier),
        "message": split.is_empty().then(|| filter.empty_message()),
    }))
    .into_response()
}

pub async fn get_event(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: EventId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", format!("{e}")),
    };

    let viewer_tier = match services.viewer(&principal).await {
        Ok(profile) => profile.effective_tier(),
        Err(e) => return errors::profile_error_to_response(e),
    };

    let event = match services.catalog.get_event(id).await {
        Ok(Some(event)) => event,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "event not found"),
        Err(e) => return errors::catalog_error_to_response(e),
    };

    if let Err(e) = crate::authz::authorize_event(viewer_tier, &event) {
        tracing::info!(user_id = %principal.user_id(), event_id = %event.id, error = %e, "event locked");
        return errors::tier_locked(e);
    }

    Json(dto::event_to_json(&event, viewer_tier)).into_response()
}
