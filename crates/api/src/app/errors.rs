use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use eventtier_auth::{AuthzError, explain_access};
use eventtier_core::DomainError;
use eventtier_infra::{CatalogError, ProfileStoreError, UpgradeError};
use eventtier_listings::TierFilter;
use eventtier_tiers::{Tier, TierParseError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    tracing::error!(error = %err, "event catalog request failed");
    match err {
        CatalogError::Unavailable(msg) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "catalog_unavailable", msg)
        }
        CatalogError::Query(msg) => json_error(StatusCode::BAD_GATEWAY, "catalog_query_failed", msg),
        CatalogError::Decode(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "catalog_decode_error", msg)
        }
    }
}

pub fn profile_error_to_response(err: ProfileStoreError) -> axum::response::Response {
    match err {
        ProfileStoreError::NotFound => json_error(StatusCode::NOT_FOUND, "profile_not_found", "profile not found"),
        ProfileStoreError::Unavailable(msg) => {
            tracing::error!(error = %msg, "profile store unavailable");
            json_error(StatusCode::BAD_GATEWAY, "profile_store_unavailable", msg)
        }
        e @ ProfileStoreError::TierChanged { .. } => {
            json_error(StatusCode::CONFLICT, "upgrade_conflict", e.to_string())
        }
    }
}

pub fn upgrade_error_to_response(err: UpgradeError) -> axum::response::Response {
    match err {
        UpgradeError::ProfileNotFound => {
            json_error(StatusCode::NOT_FOUND, "profile_not_found", "profile not found")
        }
        UpgradeError::Domain(DomainError::InvariantViolation(msg)) => {
            json_error(StatusCode::CONFLICT, "not_an_upgrade", msg)
        }
        UpgradeError::Domain(other) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", other.to_string())
        }
        UpgradeError::Store(e) => json_error(
            StatusCode::BAD_GATEWAY,
            "upgrade_failed",
            format!("Upgrade failed. Please try again. ({e})"),
        ),
        e @ UpgradeError::Superseded { .. } => {
            json_error(StatusCode::CONFLICT, "upgrade_conflict", e.to_string())
        }
        UpgradeError::TimedOut(limit) => json_error(
            StatusCode::GATEWAY_TIMEOUT,
            "upgrade_timed_out",
            format!("upgrade did not complete within {} ms", limit.as_millis()),
        ),
    }
}

/// 403 for a locked event, with the access explanation attached.
pub fn tier_locked(err: AuthzError) -> axum::response::Response {
    let AuthzError::TierLocked { required, held } = err;
    let explanation = explain_access(held, required);
    (
        StatusCode::FORBIDDEN,
        axum::Json(json!({
            "error": "tier_locked",
            "message": format!("Upgrade to {} to Access", required.label()),
            "required_tier": required,
            "viewer_tier": held,
            "explanation": explanation,
        })),
    )
        .into_response()
}

pub fn parse_tier(s: &str) -> Result<Tier, axum::response::Response> {
    Tier::parse_input(s)
        .map_err(|e: TierParseError| json_error(StatusCode::BAD_REQUEST, "invalid_tier", e.to_string()))
}

pub fn parse_filter(s: Option<&str>) -> Result<TierFilter, axum::response::Response> {
    match s {
        None => Ok(TierFilter::All),
        Some(raw) => raw.parse().map_err(|e: TierParseError| {
            json_error(
                StatusCode::BAD_REQUEST,
                "invalid_filter",
                format!("tier filter must be 'all' or a tier name: {e}"),
            )
        }),
    }
}
