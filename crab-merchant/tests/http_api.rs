//! HTTP-level tests: the full router over the in-memory gateway

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Value, json};
use tower::ServiceExt;

use crab_merchant::api::create_router;
use crab_merchant::auth::MerchantClaims;
use crab_merchant::db::memory::MemoryGateway;
use crab_merchant::state::{AppState, seed_merchant};

const SECRET: &str = "http-api-test-secret";

struct TestApp {
    router: Router,
}

impl TestApp {
    /// Router with merchants 1 and 2 seeded
    fn new() -> Self {
        let memory = Arc::new(MemoryGateway::new());
        seed_merchant(&memory, "Merchant A");
        seed_merchant(&memory, "Merchant B");
        let state = AppState::with_gateway(memory, SECRET);
        Self {
            router: create_router(state),
        }
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}

fn token(merchant_id: Option<i64>) -> String {
    let now = chrono::Utc::now();
    let claims = MerchantClaims {
        sub: "user-1".into(),
        merchant_id,
        exp: (now + chrono::Duration::hours(1)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap()
}

async fn create_station(app: &TestApp, token: &str, name: &str) -> i64 {
    let (status, body) = app
        .call(
            Method::POST,
            "/api/kitchen-stations",
            Some(token),
            Some(json!({ "name": name })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

fn device(station_id: i64, identifier: &str) -> Value {
    json!({
        "stationId": station_id,
        "deviceIdentifier": identifier,
        "deviceName": "Grill screen",
        "deviceType": "KITCHEN_DISPLAY",
        "settings": "{\"columns\": 4}"
    })
}

#[tokio::test]
async fn test_health_reports_backend() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "memory");
}

#[tokio::test]
async fn test_missing_or_invalid_token_is_unauthorized() {
    let app = TestApp::new();
    let (status, body) = app
        .call(Method::GET, "/api/kitchen-stations", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = app
        .call(Method::GET, "/api/kitchen-stations", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_caller_without_merchant_is_forbidden() {
    let app = TestApp::new();
    let no_merchant = token(None);

    let (status, body) = app
        .call(Method::GET, "/api/qr-codes", Some(&no_merchant), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 3001);

    let (status, _) = app
        .call(
            Method::POST,
            "/api/tip-pools",
            Some(&no_merchant),
            Some(json!({ "name": "Floor", "distributionMethod": "EQUAL", "percentage": 50 })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_device_with_station_summary() {
    let app = TestApp::new();
    let merchant = token(Some(1));
    let station_id = create_station(&app, &merchant, "Grill").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/kitchen-devices",
            Some(&merchant),
            Some(device(station_id, "DEV-001")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["status"], "ACTIVE");
    assert_eq!(body["station"], json!({ "id": station_id, "name": "Grill" }));
    assert_eq!(body["settings"], json!({ "columns": 4 }));
    assert!(body["createdAt"].as_i64().unwrap() > 0);
    assert_eq!(body["createdAt"], body["updatedAt"]);
}

#[tokio::test]
async fn test_device_identifier_unique_per_merchant() {
    let app = TestApp::new();
    let merchant_a = token(Some(1));
    let merchant_b = token(Some(2));
    let station_a = create_station(&app, &merchant_a, "Grill").await;
    let station_b = create_station(&app, &merchant_b, "Grill").await;

    let (status, _) = app
        .call(
            Method::POST,
            "/api/kitchen-devices",
            Some(&merchant_a),
            Some(device(station_a, "DEV-001")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .call(
            Method::POST,
            "/api/kitchen-devices",
            Some(&merchant_a),
            Some(device(station_a, "DEV-001")),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4102);
    assert!(body["message"].as_str().unwrap().contains("already exists"));

    let (status, _) = app
        .call(
            Method::POST,
            "/api/kitchen-devices",
            Some(&merchant_b),
            Some(device(station_b, "DEV-001")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_station_of_other_merchant_is_not_found() {
    let app = TestApp::new();
    let station_a = create_station(&app, &token(Some(1)), "Grill").await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/kitchen-devices",
            Some(&token(Some(2))),
            Some(device(station_a, "DEV-009")),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn test_unknown_merchant_is_not_found() {
    let app = TestApp::new();
    let (status, body) = app
        .call(
            Method::POST,
            "/api/kitchen-stations",
            Some(&token(Some(99))),
            Some(json!({ "name": "Grill" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3002);
}

#[tokio::test]
async fn test_invalid_bodies_are_bad_requests() {
    let app = TestApp::new();
    let merchant = token(Some(1));

    // Unknown enum value
    let (status, _) = app
        .call(
            Method::POST,
            "/api/tip-pools",
            Some(&merchant),
            Some(json!({ "name": "Floor", "distributionMethod": "RANDOM", "percentage": 10 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Out of range
    let (status, body) = app
        .call(
            Method::POST,
            "/api/tip-pools",
            Some(&merchant),
            Some(json!({ "name": "Floor", "distributionMethod": "EQUAL", "percentage": 101 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8);

    // Malformed embedded JSON
    let (status, body) = app
        .call(
            Method::POST,
            "/api/marketing-automations",
            Some(&merchant),
            Some(json!({ "name": "Welcome", "triggerType": "SIGN_UP", "triggerConfig": "{nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6);
}

#[tokio::test]
async fn test_empty_page_metadata() {
    let app = TestApp::new();
    let (status, body) = app
        .call(
            Method::GET,
            "/api/online-orders?page=1&limit=10",
            Some(&token(Some(2))),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "data": [],
            "page": 1,
            "limit": 10,
            "total": 0,
            "totalPages": 0,
            "hasNext": false,
            "hasPrev": false
        })
    );
}

#[tokio::test]
async fn test_pagination_filters_and_sorting() {
    let app = TestApp::new();
    let merchant = token(Some(1));
    for name in ["Grill", "Fryer", "Salad", "Grill Two", "Pass"] {
        create_station(&app, &merchant, name).await;
    }

    let (status, body) = app
        .call(
            Method::GET,
            "/api/kitchen-stations?page=2&limit=2&sortBy=name&sortOrder=asc",
            Some(&merchant),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["hasNext"], true);
    assert_eq!(body["hasPrev"], true);
    let names: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Grill Two", "Pass"]);

    let (_, body) = app
        .call(
            Method::GET,
            "/api/kitchen-stations?name=grill",
            Some(&merchant),
            None,
        )
        .await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn test_bad_pagination_and_ids() {
    let app = TestApp::new();
    let merchant = token(Some(1));

    for uri in [
        "/api/qr-codes?page=0",
        "/api/qr-codes?limit=101",
        "/api/qr-codes?limit=abc",
    ] {
        let (status, body) = app.call(Method::GET, uri, Some(&merchant), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], 10, "{uri}");
    }

    for uri in ["/api/qr-codes/abc", "/api/qr-codes/0", "/api/qr-codes/-3"] {
        let (status, body) = app.call(Method::GET, uri, Some(&merchant), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], 9, "{uri}");
    }

    let (status, _) = app
        .call(
            Method::GET,
            "/api/online-orders?createdFrom=yesterday",
            Some(&merchant),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_lifecycle() {
    let app = TestApp::new();
    let merchant = token(Some(1));
    let id = create_station(&app, &merchant, "Grill").await;
    let uri = format!("/api/kitchen-stations/{id}");

    let (status, body) = app.call(Method::DELETE, &uri, Some(&merchant), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "DELETED");

    let (status, body) = app.call(Method::DELETE, &uri, Some(&merchant), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 11);
    assert!(body["message"].as_str().unwrap().contains("already deleted"));

    let (status, _) = app
        .call(
            Method::PUT,
            &uri,
            Some(&merchant),
            Some(json!({ "name": "Renamed" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.call(Method::GET, &uri, Some(&merchant), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app
        .call(Method::GET, "/api/kitchen-stations", Some(&merchant), None)
        .await;
    assert_eq!(body["total"], 0);

    // The name is free again once the old station is deleted
    create_station(&app, &merchant, "Grill").await;
}

#[tokio::test]
async fn test_tenant_isolation() {
    let app = TestApp::new();
    let owner = token(Some(1));
    let other = token(Some(2));
    let id = create_station(&app, &owner, "Grill").await;
    let uri = format!("/api/kitchen-stations/{id}");

    let (status, _) = app.call(Method::GET, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .call(Method::PUT, &uri, Some(&other), Some(json!({ "name": "Mine" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.call(Method::DELETE, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app
        .call(Method::GET, "/api/kitchen-stations", Some(&other), None)
        .await;
    assert_eq!(body["total"], 0);

    let (status, body) = app.call(Method::GET, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Grill");
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = TestApp::new();
    let merchant = token(Some(1));
    let (status, created) = app
        .call(
            Method::POST,
            "/api/qr-codes",
            Some(&merchant),
            Some(json!({
                "code": "T12",
                "label": "Table 12",
                "targetUrl": "https://order.example.com/t/12"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/qr-codes/{}", created["id"]);

    let (status, updated) = app
        .call(Method::PUT, &uri, Some(&merchant), Some(json!({ "scanCount": 7 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["scanCount"], 7);
    assert_eq!(updated["code"], "T12");
    assert_eq!(updated["label"], "Table 12");
    assert!(updated["updatedAt"].as_i64() >= created["updatedAt"].as_i64());
}
