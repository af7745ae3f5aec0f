//! End-to-end relay tests against a fake JIRA server.
//!
//! The fake tracker is a minimal axum app on a random 127.0.0.1 port. It
//! issues sequential keys for created issues, can be told to reject
//! specific summaries, and counts every request it sees (so tests can
//! assert that validation failures never reach the network).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use issueforge_core::dispatch::PlanDefaults;
use issueforge_jira::{JiraClient, JiraConfig};
use issueforge_relay::{build_router, AppState};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Default)]
struct TrackerState {
    requests_seen: usize,
    created: Vec<Value>,
    reject_summaries: HashSet<String>,
}

struct FakeTracker {
    addr: SocketAddr,
    state: Arc<Mutex<TrackerState>>,
}

impl FakeTracker {
    async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(TrackerState::default()));

        let app = Router::new()
            .route("/rest/api/2/issue", post(create_issue))
            .route("/rest/api/2/issue/{key}", get(lookup_issue))
            .route("/rest/api/2/search", get(search))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    async fn reject_summary(&self, summary: &str) {
        let mut state = self.state.lock().await;
        state.reject_summaries.insert(summary.to_string());
    }

    async fn requests_seen(&self) -> usize {
        self.state.lock().await.requests_seen
    }

    async fn created_summaries(&self) -> Vec<String> {
        let state = self.state.lock().await;
        state
            .created
            .iter()
            .map(|body| {
                body["fields"]["summary"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    async fn created_bodies(&self) -> Vec<Value> {
        self.state.lock().await.created.clone()
    }
}

async fn create_issue(
    State(state): State<Arc<Mutex<TrackerState>>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.requests_seen += 1;

    let summary = body["fields"]["summary"].as_str().unwrap_or_default();
    if state.reject_summaries.contains(summary) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "errorMessages": ["field 'customfield' is required"] })),
        );
    }

    state.created.push(body);
    let key = format!("PROJ-{}", state.created.len());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": format!("1000{}", state.created.len()),
            "key": key,
            "self": format!("http://tracker/rest/api/2/issue/1000{}", state.created.len()),
        })),
    )
}

async fn lookup_issue(
    State(state): State<Arc<Mutex<TrackerState>>>,
    Path(key): Path<String>,
) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.requests_seen += 1;
    (
        StatusCode::OK,
        Json(json!({ "key": key, "fields": { "summary": "stored summary" } })),
    )
}

async fn search(State(state): State<Arc<Mutex<TrackerState>>>) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.requests_seen += 1;
    (
        StatusCode::OK,
        Json(json!({ "total": 1, "issues": [{ "key": "PROJ-1" }] })),
    )
}

/// Spin up the relay wired to the given fake tracker; returns its base URL.
async fn start_relay(tracker: &FakeTracker) -> String {
    let config = JiraConfig {
        base_url: tracker.base_url(),
        email: "user@example.com".to_string(),
        api_token: "token".to_string(),
        default_project_key: "PROJ".to_string(),
    };
    let client = JiraClient::new(&config).unwrap();
    let state = AppState::new(client, PlanDefaults::new("PROJ"));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_create_bug_single_path() {
    let tracker = FakeTracker::start().await.unwrap();
    let relay = start_relay(&tracker).await;

    let response = reqwest::Client::new()
        .post(format!("{}/create_issue", relay))
        .json(&json!({
            "summary": "Login fails",
            "issuetype": "Bug",
            "steps_to_reproduce": ["Open app", "Tap login"],
            "actual_result": "Crash",
            "expected_result": "User logs in",
            "labels": "Bug, Automation, "
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Issue Created");
    assert_eq!(body["key"], "PROJ-1");

    let created = tracker.created_bodies().await;
    assert_eq!(created.len(), 1);
    let fields = &created[0]["fields"];
    assert_eq!(fields["project"]["key"], "PROJ");
    assert_eq!(fields["issuetype"]["name"], "Bug");
    assert_eq!(fields["labels"], json!(["Bug", "Automation"]));
    let description = fields["description"].as_str().unwrap();
    assert!(description.contains("- Open app"));
    assert!(description.contains("*Actual Result:*\nCrash"));
}

#[tokio::test]
async fn test_validation_failure_never_hits_tracker() {
    let tracker = FakeTracker::start().await.unwrap();
    let relay = start_relay(&tracker).await;

    for body in [
        json!({ "issuetype": "Bug", "description": "x" }),
        json!({ "summary": "no type" }),
        json!({ "summary": "bad type", "issuetype": "Subtask" }),
        json!({ "summary": "empty bug", "issuetype": "Bug" }),
    ] {
        let response = reqwest::Client::new()
            .post(format!("{}/create_issue", relay))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    assert_eq!(tracker.requests_seen().await, 0);
}

#[tokio::test]
async fn test_tracker_failure_propagates_status_and_body() {
    let tracker = FakeTracker::start().await.unwrap();
    tracker.reject_summary("Doomed issue").await;
    let relay = start_relay(&tracker).await;

    let response = reqwest::Client::new()
        .post(format!("{}/create_issue", relay))
        .json(&json!({
            "summary": "Doomed issue",
            "issuetype": "Task"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to create issue");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .contains("customfield"));
}

#[tokio::test]
async fn test_batch_isolated_failure_keeps_order() {
    let tracker = FakeTracker::start().await.unwrap();
    tracker.reject_summary("Case B").await;
    let relay = start_relay(&tracker).await;

    let response = reqwest::Client::new()
        .post(format!("{}/create_issue", relay))
        .json(&json!({
            "summary": "Suite",
            "issuetype": "Test",
            "labels": ["qa"],
            "test_cases": [
                { "title": "Case A", "test_steps": ["Open | N/A | Loads"] },
                { "title": "Case B", "test_steps": ["Save | data | Saved"] },
                { "title": "Case C", "test_steps": ["Close | N/A | Closed"] }
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 207);
    let body: Value = response.json().await.unwrap();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["key"], "PROJ-1");
    assert_eq!(results[1]["error"], "Failed to create issue");
    assert_eq!(results[1]["summary"], "Case B");
    assert_eq!(results[2]["key"], "PROJ-2");

    // Siblings of the failed entry were still submitted, in order.
    assert_eq!(
        tracker.created_summaries().await,
        vec!["Case A", "Case C"]
    );
}

#[tokio::test]
async fn test_batch_all_created_returns_201() {
    let tracker = FakeTracker::start().await.unwrap();
    let relay = start_relay(&tracker).await;

    let response = reqwest::Client::new()
        .post(format!("{}/create_issue", relay))
        .json(&json!({
            "summary": "Suite",
            "issuetype": "Test",
            "test_cases": [
                { "title": "Case A", "test_steps": ["Open | N/A | Loads"] },
                { "title": "Case B", "test_steps": ["Save | data | Saved"] }
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["results"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_batch_malformed_entry_fails_without_submission() {
    let tracker = FakeTracker::start().await.unwrap();
    let relay = start_relay(&tracker).await;

    let response = reqwest::Client::new()
        .post(format!("{}/create_issue", relay))
        .json(&json!({
            "summary": "Suite",
            "issuetype": "Test",
            "test_cases": [
                { "title": "Good", "test_steps": ["a | b | c"] },
                { "title": "Malformed", "test_steps": ["only | two"] }
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 207);
    let body: Value = response.json().await.unwrap();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results[0]["key"], "PROJ-1");
    assert!(results[1]["details"]
        .as_str()
        .unwrap()
        .contains("Malformed test step"));
    // Only the well-formed entry reached the tracker.
    assert_eq!(tracker.requests_seen().await, 1);
}

#[tokio::test]
async fn test_search_and_lookup_passthrough() {
    let tracker = FakeTracker::start().await.unwrap();
    let relay = start_relay(&tracker).await;
    let http = reqwest::Client::new();

    let search: Value = http
        .get(format!("{}/search", relay))
        .query(&[("jql", "project = PROJ")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(search["total"], 1);
    assert_eq!(search["issues"][0]["key"], "PROJ-1");

    let issue: Value = http
        .get(format!("{}/issue/PROJ-1", relay))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(issue["key"], "PROJ-1");
    assert_eq!(issue["fields"]["summary"], "stored summary");
}
