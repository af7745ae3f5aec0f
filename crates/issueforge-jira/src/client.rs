//! JIRA REST client
//!
//! One narrow contract: submit a payload, get back a key or the raw error
//! body. No retry, no backoff; interpretation of failures stays with the
//! caller.

use crate::auth::JiraAuth;
use crate::config::JiraConfig;
use crate::types::{CreateIssueBody, CreatedIssue};
use crate::{Error, Result};
use issueforge_core::dispatch::Planned;
use issueforge_core::models::IssuePayload;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::Value;

/// Prevents XSRF rejections on some JIRA deployments.
const ATLASSIAN_TOKEN_HEADER: &str = "X-Atlassian-Token";

pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
}

/// Per-item result of submitting a plan. Ordered to match the input plan.
#[derive(Debug)]
pub enum Outcome {
    Created { summary: String, issue: CreatedIssue },
    Failed {
        summary: String,
        status: Option<u16>,
        details: String,
    },
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let auth = JiraAuth::new(config.email.clone(), config.api_token.clone());
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth.authorization_header()?);
        headers.insert(ATLASSIAN_TOKEN_HEADER, HeaderValue::from_static("no-check"));

        let http = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            base_url: config.trimmed_base_url().to_string(),
        })
    }

    /// Create one issue. 201 yields the new issue's key; any other
    /// acknowledgment is surfaced as [`Error::Api`] with the raw body.
    pub async fn create_issue(&self, payload: &IssuePayload) -> Result<CreatedIssue> {
        let body = CreateIssueBody::from(payload);
        let response = self
            .http
            .post(format!("{}/rest/api/2/issue", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::CREATED {
            Ok(response.json::<CreatedIssue>().await?)
        } else {
            Err(Error::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            })
        }
    }

    /// Submit a plan item by item, in order. A failing item never aborts its
    /// siblings and already-created issues are not rolled back.
    pub async fn submit_plan(&self, plan: Vec<Planned>) -> Vec<Outcome> {
        let mut outcomes = Vec::with_capacity(plan.len());
        for item in plan {
            match item {
                Planned::Ready(payload) => {
                    let summary = payload.summary.clone();
                    match self.create_issue(&payload).await {
                        Ok(issue) => {
                            tracing::info!(key = %issue.key, "Issue created");
                            outcomes.push(Outcome::Created { summary, issue });
                        }
                        Err(Error::Api { status, body }) => {
                            tracing::warn!(status, "JIRA rejected issue creation");
                            outcomes.push(Outcome::Failed {
                                summary,
                                status: Some(status),
                                details: body,
                            });
                        }
                        Err(other) => {
                            tracing::warn!(error = %other, "JIRA request failed");
                            outcomes.push(Outcome::Failed {
                                summary,
                                status: None,
                                details: other.to_string(),
                            });
                        }
                    }
                }
                Planned::Rejected { summary, reason } => {
                    outcomes.push(Outcome::Failed {
                        summary,
                        status: None,
                        details: reason.to_string(),
                    });
                }
            }
        }
        outcomes
    }

    /// Raw search passthrough: the tracker's own result body, unmodified.
    pub async fn search(&self, jql: &str) -> Result<Value> {
        let response = self
            .http
            .get(format!("{}/rest/api/2/search", self.base_url))
            .query(&[("jql", jql)])
            .send()
            .await?;
        Self::raw_json(response).await
    }

    /// Raw issue lookup passthrough by key.
    pub async fn get_issue(&self, key: &str) -> Result<Value> {
        let response = self
            .http
            .get(format!("{}/rest/api/2/issue/{}", self.base_url, key))
            .send()
            .await?;
        Self::raw_json(response).await
    }

    /// Human-facing link to an issue.
    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url, key)
    }

    async fn raw_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<Value>().await?)
        } else {
            Err(Error::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            })
        }
    }
}
