//! Relay routes

use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use issueforge_core::dispatch;
use issueforge_core::models::IssueRequest;
use issueforge_jira::{Error as JiraError, Outcome};
use serde::Deserialize;
use serde_json::{json, Value};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/create_issue", post(create_issue))
        .route("/search", get(search))
        .route("/issue/{key}", get(get_issue))
        .with_state(state)
}

async fn create_issue(State(state): State<AppState>, Json(request): Json<IssueRequest>) -> Response {
    tracing::info!(
        issuetype = request.issuetype.as_deref().unwrap_or("<missing>"),
        "Create issue request received"
    );

    let batch = request.issuetype.as_deref() == Some("Test")
        && request.test_cases.as_ref().is_some_and(|b| !b.is_empty());

    let plan = match dispatch::plan(request, &state.defaults) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::warn!(error = %e, "Request rejected before submission");
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
                .into_response();
        }
    };
    let mut outcomes = state.client.submit_plan(plan).await;

    if batch {
        return batch_response(outcomes);
    }

    // Single submission: the original relay's shape, status propagated.
    // A valid non-batch plan holds exactly one item.
    match outcomes.pop() {
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Empty submission plan" })),
        )
            .into_response(),
        Some(Outcome::Created { issue, .. }) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Issue Created", "key": issue.key })),
        )
            .into_response(),
        Some(Outcome::Failed {
            status, details, ..
        }) => {
            let code = propagated_status(status);
            (
                code,
                Json(json!({ "error": "Failed to create issue", "details": details })),
            )
                .into_response()
        }
    }
}

fn batch_response(outcomes: Vec<Outcome>) -> Response {
    let all_created = outcomes
        .iter()
        .all(|o| matches!(o, Outcome::Created { .. }));
    let results: Vec<Value> = outcomes
        .into_iter()
        .map(|outcome| match outcome {
            Outcome::Created { summary, issue } => json!({
                "message": "Issue Created",
                "summary": summary,
                "key": issue.key,
            }),
            Outcome::Failed {
                summary,
                status,
                details,
            } => json!({
                "error": "Failed to create issue",
                "summary": summary,
                "status": status,
                "details": details,
            }),
        })
        .collect();

    let code = if all_created {
        StatusCode::CREATED
    } else {
        StatusCode::MULTI_STATUS
    };
    (code, Json(json!({ "results": results }))).into_response()
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    jql: String,
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    match state.client.search(&params.jql).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => upstream_error(e),
    }
}

async fn get_issue(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    match state.client.get_issue(&key).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => upstream_error(e),
    }
}

fn upstream_error(error: JiraError) -> Response {
    match error {
        JiraError::Api { status, body } => (
            propagated_status(Some(status)),
            Json(json!({ "error": "JIRA request failed", "details": body })),
        )
            .into_response(),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "JIRA connection failed", "details": other.to_string() })),
        )
            .into_response(),
    }
}

/// Propagate the tracker's status where we have one; a transport-level
/// failure maps to 500 with no acknowledgment to forward.
fn propagated_status(status: Option<u16>) -> StatusCode {
    status
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}
