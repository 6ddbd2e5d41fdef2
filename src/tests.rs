//! Integration tests for the Crime Connect backend.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::api::Metrics;
use crate::config::Config;
use crate::db::{init_database, DocumentStore};
use crate::errors::ErrorBody;
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let store = Arc::new(DocumentStore::new(pool));

        // Create config
        let config = Config {
            db_path,
            db_path_from_env: false,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
        };

        let state = AppState {
            store,
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> Value {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), 200, "GET {} failed", path);
        resp.json().await.unwrap()
    }
}

#[tokio::test]
async fn test_root_message() {
    let fixture = TestFixture::new().await;

    // Both spellings of the root path answer 200
    for path in ["/api/", "/api"] {
        let body = fixture.get_json(path).await;
        assert_eq!(body["message"], "Hello World");
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let body = fixture.get_json("/api/health").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "crimeconnect-backend");
    assert_eq!(body["database_configured"], false);
}

#[tokio::test]
async fn test_status_check_roundtrip() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/status"))
        .json(&json!({ "client_name": "dashboard-e2e" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["client_name"], "dashboard-e2e");
    assert!(!created["id"].as_str().unwrap().is_empty());
    assert!(created["timestamp"].is_string());

    let list = fixture.get_json("/api/status").await;
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["client_name"], "dashboard-e2e");
}

#[tokio::test]
async fn test_intel_list_seeds_fixtures() {
    let fixture = TestFixture::new().await;

    let list = fixture.get_json("/api/intel").await;
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 5);

    let plate = rows
        .iter()
        .find(|r| r["title"] == "License plate match near Sector 7")
        .expect("fixture row missing");
    assert_eq!(plate["severity"], "high");
    assert_eq!(plate["tags"], json!(["ANPR", "vehicle"]));
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let fixture = TestFixture::new().await;

    let first = fixture.get_json("/api/intel").await;
    let second = fixture.get_json("/api/intel").await;

    assert_eq!(first.as_array().unwrap().len(), 5);
    assert_eq!(second.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_create_intel() {
    let fixture = TestFixture::new().await;

    let before = Utc::now();
    let resp = fixture
        .client
        .post(fixture.url("/api/intel"))
        .json(&json!({
            "title": "Drone sighting over docks",
            "severity": "medium",
            "tags": ["aerial", "docks"]
        }))
        .send()
        .await
        .unwrap();
    let after = Utc::now();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["title"], "Drone sighting over docks");
    assert_eq!(body["severity"], "medium");
    assert_eq!(body["tags"], json!(["aerial", "docks"]));
    assert!(!body["id"].as_str().unwrap().is_empty());

    // Timestamp falls within the request's execution window
    let created_at: DateTime<Utc> = body["created_at"].as_str().unwrap().parse().unwrap();
    assert!(before <= created_at && created_at <= after);
}

#[tokio::test]
async fn test_create_intel_defaults_tags_empty() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/intel"))
        .json(&json!({ "title": "Tip line call", "severity": "low" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["tags"], json!([]));
}

#[tokio::test]
async fn test_create_intel_missing_severity_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/intel"))
        .json(&json!({ "title": "No severity given" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 422);
}

#[tokio::test]
async fn test_create_intel_blank_title_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/intel"))
        .json(&json!({ "title": "   ", "severity": "low" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_create_case_blank_required_fields_rejected() {
    let fixture = TestFixture::new().await;

    // Every required string field is checked, not just title/owner
    for body in [
        json!({ "title": " ", "status": "active", "priority": "P1", "owner": "QA" }),
        json!({ "title": "Blank status", "status": "", "priority": "P1", "owner": "QA" }),
        json!({ "title": "Blank priority", "status": "active", "priority": " ", "owner": "QA" }),
        json!({ "title": "Blank owner", "status": "active", "priority": "P1", "owner": "" }),
    ] {
        let resp = fixture
            .client
            .post(fixture.url("/api/cases"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 422, "body accepted: {}", body);
    }
}

#[tokio::test]
async fn test_create_command_blank_required_fields_rejected() {
    let fixture = TestFixture::new().await;

    for body in [
        json!({ "codename": "", "agent": "K-7", "channel": "secure-1", "message": "hi" }),
        json!({ "codename": "OP-1", "agent": " ", "channel": "secure-1", "message": "hi" }),
        json!({ "codename": "OP-1", "agent": "K-7", "channel": "", "message": "hi" }),
        json!({ "codename": "OP-1", "agent": "K-7", "channel": "secure-1", "message": " " }),
    ] {
        let resp = fixture
            .client
            .post(fixture.url("/api/command"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 422, "body accepted: {}", body);
    }
}

#[tokio::test]
async fn test_cases_list_seeds_and_filters() {
    let fixture = TestFixture::new().await;

    let all = fixture.get_json("/api/cases").await;
    assert_eq!(all.as_array().unwrap().len(), 5);

    let active = fixture.get_json("/api/cases?status=active").await;
    let rows = active.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["status"], "active");
    }

    // Zero-match filter returns an empty list, not an error
    let none = fixture.get_json("/api/cases?status=closed").await;
    assert_eq!(none.as_array().unwrap().len(), 0);

    // Empty filter value behaves like no filter
    let unfiltered = fixture.get_json("/api/cases?status=").await;
    assert_eq!(unfiltered.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_create_case_defaults_notes_zero() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/cases"))
        .json(&json!({
            "title": "Night Market",
            "status": "active",
            "priority": "P2",
            "owner": "L. Moreau"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["notes"], 0);
    assert_eq!(body["owner"], "L. Moreau");
}

#[tokio::test]
async fn test_case_patch_lifecycle() {
    let fixture = TestFixture::new().await;

    // Create a case to mutate
    let create_resp = fixture
        .client
        .post(fixture.url("/api/cases"))
        .json(&json!({
            "title": "Harbor Watch",
            "status": "active",
            "priority": "P3",
            "owner": "M. Okafor",
            "notes": 4
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(create_resp.status(), 201);
    let created: Value = create_resp.json().await.unwrap();
    let case_id = created["id"].as_str().unwrap();
    let updated_before: DateTime<Utc> =
        created["updated_at"].as_str().unwrap().parse().unwrap();

    // Empty patch is rejected before touching the store
    let empty_resp = fixture
        .client
        .patch(fixture.url(&format!("/api/cases/{}", case_id)))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(empty_resp.status(), 400);
    let empty_body: ErrorBody = empty_resp.json().await.unwrap();
    assert_eq!(empty_body.detail, "No fields to update");

    // Unknown id gives 404
    let missing_resp = fixture
        .client
        .patch(fixture.url("/api/cases/no-such-id"))
        .json(&json!({ "status": "archived" }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_resp.status(), 404);

    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

    // Valid partial update re-stamps updated_at
    let patch_resp = fixture
        .client
        .patch(fixture.url(&format!("/api/cases/{}", case_id)))
        .json(&json!({ "status": "archived" }))
        .send()
        .await
        .unwrap();
    assert_eq!(patch_resp.status(), 200);
    let patched: Value = patch_resp.json().await.unwrap();
    assert_eq!(patched["status"], "archived");
    assert_eq!(patched["title"], "Harbor Watch");
    assert_eq!(patched["notes"], 4);

    let updated_after: DateTime<Utc> =
        patched["updated_at"].as_str().unwrap().parse().unwrap();
    assert!(updated_after > updated_before);
}

#[tokio::test]
async fn test_timeline_list_and_create() {
    let fixture = TestFixture::new().await;

    let list = fixture.get_json("/api/timeline").await;
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows
        .iter()
        .any(|r| r["type"] == "dispatch" && r["text"] == "Team BRAVO dispatched to perimeter."));

    let resp = fixture
        .client
        .post(fixture.url("/api/timeline"))
        .json(&json!({ "type": "secure", "text": "Evidence locker sealed." }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["type"], "secure");

    let after = fixture.get_json("/api/timeline").await;
    assert_eq!(after.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_command_starts_empty_and_is_never_seeded() {
    let fixture = TestFixture::new().await;

    let list = fixture.get_json("/api/command").await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    let resp = fixture
        .client
        .post(fixture.url("/api/command"))
        .json(&json!({
            "codename": "NIGHTJAR",
            "agent": "K-7",
            "channel": "secure-3",
            "message": "Package in transit."
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["codename"], "NIGHTJAR");

    let after = fixture.get_json("/api/command").await;
    let rows = after.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["agent"], "K-7");
}

#[tokio::test]
async fn test_intel_list_sorted_newest_first() {
    let fixture = TestFixture::new().await;

    // Seed, then add two events with distinct timestamps
    fixture.get_json("/api/intel").await;

    for title in ["Older event", "Newer event"] {
        let resp = fixture
            .client
            .post(fixture.url("/api/intel"))
            .json(&json!({ "title": title, "severity": "low" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
    }

    let list = fixture.get_json("/api/intel").await;
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0]["title"], "Newer event");
    assert_eq!(rows[1]["title"], "Older event");
}

#[tokio::test]
async fn test_ids_are_unique_per_create() {
    let fixture = TestFixture::new().await;

    let mut ids = std::collections::HashSet::new();
    for i in 0..5 {
        let resp = fixture
            .client
            .post(fixture.url("/api/command"))
            .json(&json!({
                "codename": format!("OP-{}", i),
                "agent": "K-7",
                "channel": "secure-1",
                "message": "check-in"
            }))
            .send()
            .await
            .unwrap();
        let body: Value = resp.json().await.unwrap();
        assert!(ids.insert(body["id"].as_str().unwrap().to_string()));
    }
}

#[tokio::test]
async fn test_metrics_on_seeded_data() {
    let fixture = TestFixture::new().await;

    // Metrics seeds first: 2 active, 2 backlog, 1 archived out of 5
    let resp = fixture
        .client
        .get(fixture.url("/api/metrics"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Metrics = resp.json().await.unwrap();
    assert_eq!(body.open_cases, 4);
    assert_eq!(body.active_ops, 2);
    assert_eq!(body.resolution_rate, 20);
    assert_eq!(body.alerts_today, 5);
}

#[tokio::test]
async fn test_metrics_computed_from_live_counts() {
    let fixture = TestFixture::new().await;

    // POST does not seed, so these four cases are the whole collection
    for status in ["active", "active", "backlog", "archived"] {
        let resp = fixture
            .client
            .post(fixture.url("/api/cases"))
            .json(&json!({
                "title": "Synthetic case",
                "status": status,
                "priority": "P2",
                "owner": "QA"
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
    }

    let body = fixture.get_json("/api/metrics").await;
    assert_eq!(body["open_cases"], 3);
    assert_eq!(body["active_ops"], 2);
    assert_eq!(body["resolution_rate"], 25);
    // Intel was still empty, so the metrics call seeded it
    assert_eq!(body["alerts_today"], 5);
}
