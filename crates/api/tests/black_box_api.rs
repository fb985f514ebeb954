use std::sync::Arc;

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use eventtier_api::app::{AppServices, build_app_with};
use eventtier_auth::{JwtClaims, UserProfile};
use eventtier_core::{EventId, UserId};
use eventtier_infra::{AppConfig, InMemoryEventCatalog, InMemoryProfileStore};
use eventtier_listings::RawEventRow;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    profiles: Arc<InMemoryProfileStore>,
    catalog: Arc<InMemoryEventCatalog>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with_rows(fixture_rows()).await
    }

    async fn spawn_with_rows(rows: Vec<RawEventRow>) -> Self {
        let config = AppConfig::for_tests(JWT_SECRET);
        let catalog = Arc::new(InMemoryEventCatalog::with_rows(rows));
        let profiles = Arc::new(InMemoryProfileStore::new());
        let services = AppServices::new(catalog.clone(), profiles.clone(), &config);

        // Same router as prod, bound to an ephemeral port.
        let app = build_app_with(&config, Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            profiles,
            catalog,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(user_id: UserId) -> String {
    let now = Utc::now();
    let claims = JwtClaims {
        sub: user_id,
        email: Some("member@example.com".to_string()),
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn row(n: u128, title: &str, day: u32, tier: Option<&str>) -> RawEventRow {
    RawEventRow {
        id: EventId::from_uuid(uuid_from(n)),
        title: title.to_string(),
        description: Some(format!("{title} description")),
        event_date: Utc.with_ymd_and_hms(2026, 12, day, 18, 0, 0).unwrap(),
        image_url: None,
        tier: tier.map(str::to_string),
        created_at: None,
    }
}

fn uuid_from(n: u128) -> uuid::Uuid {
    uuid::Uuid::from_u128(n)
}

/// One event per tier plus a legacy row with no tier, out of date order.
fn fixture_rows() -> Vec<RawEventRow> {
    vec![
        row(4, "Platinum Gala", 20, Some("platinum")),
        row(1, "Open Meetup", 3, Some("free")),
        row(3, "Gold Tasting", 15, Some("gold")),
        row(2, "Silver Workshop", 9, Some("silver")),
        row(5, "Legacy Listing", 1, None),
    ]
}

fn event_url(n: u128) -> String {
    format!("/events/{}", uuid_from(n))
}

fn titles(list: &serde_json::Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap().to_string())
        .collect()
}

async fn get_json(client: &reqwest::Client, url: String, token: &str) -> (StatusCode, serde_json::Value) {
    let res = client.get(url).bearer_auth(token).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn upgrade(client: &reqwest::Client, srv: &TestServer, token: &str, tier: &str) -> (StatusCode, serde_json::Value) {
    let res = client
        .post(srv.url("/tiers/upgrade"))
        .bearer_auth(token)
        .json(&json!({ "tier": tier }))
        .send()
        .await
        .unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

#[tokio::test]
async fn health_is_public_and_everything_else_needs_a_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    for path in ["/whoami", "/events", "/tiers", "/debug"] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
    }

    let res = client
        .get(srv.url("/whoami"))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn new_user_defaults_to_free() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let user = UserId::new();

    let (status, body) = get_json(&client, srv.url("/whoami"), &mint_jwt(user)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], json!(user.to_string()));
    assert_eq!(body["email"], json!("member@example.com"));
    assert_eq!(body["tier"], json!("free"));
    assert_eq!(body["accessible_tiers"], json!(["free"]));
}

#[tokio::test]
async fn free_listing_is_partitioned_and_sorted_by_date() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(UserId::new());

    let (status, body) = get_json(&client, srv.url("/events"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_tier"], json!("free"));
    assert_eq!(body["filter"], json!("all"));
    assert_eq!(body["total"], json!(5));

    // The tierless legacy row is treated as free.
    assert_eq!(titles(&body["accessible"]), vec!["Legacy Listing", "Open Meetup"]);
    assert_eq!(
        titles(&body["locked"]),
        vec!["Silver Workshop", "Gold Tasting", "Platinum Gala"]
    );

    let locked = &body["locked"][0];
    assert_eq!(locked["locked"], json!(true));
    assert_eq!(locked["unlock_label"], json!("Upgrade to Silver to Access"));
    assert!(body["message"].is_null());
}

#[tokio::test]
async fn tier_filter_applies_before_partition() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(UserId::new());

    let (status, body) = get_json(&client, srv.url("/events?tier=gold"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filter"], json!("gold"));
    assert!(body["accessible"].as_array().unwrap().is_empty());
    assert_eq!(titles(&body["locked"]), vec!["Gold Tasting"]);

    let (status, body) = get_json(&client, srv.url("/events?tier=all"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!(5));

    let (status, body) = get_json(&client, srv.url("/events?tier=diamond"), &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("invalid_filter"));
}

#[tokio::test]
async fn empty_filtered_listing_carries_message() {
    let srv = TestServer::spawn_with_rows(vec![row(1, "Open Meetup", 3, Some("free"))]).await;
    let client = reqwest::Client::new();
    let token = mint_jwt(UserId::new());

    let (status, body) = get_json(&client, srv.url("/events?tier=platinum"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!(0));
    assert_eq!(body["message"], json!("No platinum tier events found."));
}

#[tokio::test]
async fn opening_a_locked_event_is_forbidden() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(UserId::new());

    let (status, body) = get_json(&client, srv.url(&event_url(1)), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], json!("Open Meetup"));
    assert_eq!(body["locked"], json!(false));

    let (status, body) = get_json(&client, srv.url(&event_url(3)), &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], json!("tier_locked"));
    assert_eq!(body["required_tier"], json!("gold"));
    assert_eq!(body["viewer_tier"], json!("free"));
    assert_eq!(body["explanation"]["granted"], json!(false));

    let (status, _) = get_json(&client, srv.url(&event_url(99)), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get_json(&client, srv.url("/events/not-a-uuid"), &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("invalid_id"));
}

#[tokio::test]
async fn upgrade_unlocks_events_on_next_listing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let user = UserId::new();
    let token = mint_jwt(user);

    let (status, body) = upgrade(&client, &srv, &token, "gold").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous"], json!("free"));
    assert_eq!(body["current"], json!("gold"));
    assert_eq!(body["accessible_tiers"], json!(["free", "silver", "gold"]));

    // Same token: the tier is read from the profile, not the claims.
    let (_, body) = get_json(&client, srv.url("/events"), &token).await;
    assert_eq!(body["user_tier"], json!("gold"));
    assert_eq!(body["accessible"].as_array().unwrap().len(), 4);
    assert_eq!(titles(&body["locked"]), vec!["Platinum Gala"]);

    let (status, _) = get_json(&client, srv.url(&event_url(3)), &token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn downgrade_and_lateral_moves_conflict() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(UserId::new());

    let (status, _) = upgrade(&client, &srv, &token, "gold").await;
    assert_eq!(status, StatusCode::OK);

    for target in ["silver", "gold", "free"] {
        let (status, body) = upgrade(&client, &srv, &token, target).await;
        assert_eq!(status, StatusCode::CONFLICT, "{target}");
        assert_eq!(body["error"], json!("not_an_upgrade"));
    }

    let (status, body) = upgrade(&client, &srv, &token, "diamond").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("invalid_tier"));

    let (_, body) = get_json(&client, srv.url("/whoami"), &token).await;
    assert_eq!(body["tier"], json!("gold"));
}

#[tokio::test]
async fn failed_write_leaves_tier_unchanged() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(UserId::new());

    let (status, _) = upgrade(&client, &srv, &token, "silver").await;
    assert_eq!(status, StatusCode::OK);

    srv.profiles.set_fail_writes(true);
    let (status, body) = upgrade(&client, &srv, &token, "platinum").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], json!("upgrade_failed"));

    srv.profiles.set_fail_writes(false);
    let (_, body) = get_json(&client, srv.url("/whoami"), &token).await;
    assert_eq!(body["tier"], json!("silver"));
}

#[tokio::test]
async fn malformed_metadata_tier_is_treated_as_free() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let user = UserId::new();

    let mut profile = UserProfile::new(user, None);
    profile.metadata = serde_json::from_value(json!({ "tier": "diamond" })).unwrap();
    srv.profiles.insert(profile);

    let token = mint_jwt(user);
    let (_, body) = get_json(&client, srv.url("/events"), &token).await;
    assert_eq!(body["user_tier"], json!("free"));
    assert_eq!(body["accessible"].as_array().unwrap().len(), 2);

    let (_, body) = get_json(&client, srv.url("/debug"), &token).await;
    assert_eq!(body["user"]["raw_tier"], json!("diamond"));
    assert_eq!(body["user"]["tier"], json!("free"));
}

#[tokio::test]
async fn tiers_endpoint_marks_offers_against_current_tier() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(UserId::new());

    upgrade(&client, &srv, &token, "silver").await;

    let (status, body) = get_json(&client, srv.url("/tiers"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current"], json!("silver"));

    let statuses: Vec<_> = body["offers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| (o["tier"].as_str().unwrap().to_string(), o["status"].as_str().unwrap().to_string()))
        .collect();
    assert_eq!(
        statuses,
        vec![
            ("free".to_string(), "downgrade_unavailable".to_string()),
            ("silver".to_string(), "current".to_string()),
            ("gold".to_string(), "upgrade".to_string()),
            ("platinum".to_string(), "upgrade".to_string()),
        ]
    );
}

#[tokio::test]
async fn debug_reports_store_failures_in_body() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = mint_jwt(UserId::new());

    let (status, body) = get_json(&client, srv.url("/debug"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["catalog"]["backend"], json!("in-memory"));
    assert_eq!(body["catalog"]["ping"]["ok"], json!(true));
    assert_eq!(body["events"]["count"], json!(5));
    assert_eq!(body["events"]["preview"].as_array().unwrap().len(), 2);

    srv.catalog.set_unavailable(true);
    let (status, body) = get_json(&client, srv.url("/debug"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["catalog"]["ping"]["ok"], json!(false));
    assert!(body["events"]["error"].is_string());

    let (status, body) = get_json(&client, srv.url("/events"), &token).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], json!("catalog_unavailable"));
}

#[tokio::test]
async fn stored_tier_must_be_canonical_but_typed_input_is_lenient() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let user = UserId::new();

    let mut profile = UserProfile::new(user, None);
    profile.metadata = serde_json::from_value(json!({ "tier": "PLATINUM" })).unwrap();
    srv.profiles.insert(profile);

    let token = mint_jwt(user);
    let (_, body) = get_json(&client, srv.url("/whoami"), &token).await;
    assert_eq!(body["tier"], json!("free"));

    let (status, body) = get_json(&client, srv.url("/events?tier=Gold"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["filter"], json!("gold"));
    assert_eq!(titles(&body["locked"]), vec!["Gold Tasting"]);

    let (status, body) = upgrade(&client, &srv, &token, " Silver ").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous"], json!("free"));
    assert_eq!(body["current"], json!("silver"));
}
