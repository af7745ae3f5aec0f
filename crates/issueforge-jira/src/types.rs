//! JIRA API types

use issueforge_core::models::IssuePayload;
use serde::{Deserialize, Serialize};

/// Body of a create-issue POST.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateIssueBody {
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueFields {
    pub project: ProjectRef,
    pub summary: String,
    pub description: String,
    pub issuetype: IssueTypeRef,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRef {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTypeRef {
    pub name: String,
}

/// Response body of a successful issue creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
}

impl From<&IssuePayload> for CreateIssueBody {
    fn from(payload: &IssuePayload) -> Self {
        Self {
            fields: IssueFields {
                project: ProjectRef {
                    key: payload.project_key.clone(),
                },
                summary: payload.summary.clone(),
                description: payload.description.clone(),
                issuetype: IssueTypeRef {
                    name: payload.issuetype.as_str().to_string(),
                },
                labels: payload.labels.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use issueforge_core::models::IssueType;

    #[test]
    fn test_payload_maps_to_fields_body() {
        let payload = IssuePayload {
            project_key: "PROJ".to_string(),
            summary: "Login fails".to_string(),
            description: "details".to_string(),
            issuetype: IssueType::Bug,
            labels: vec!["Bug".to_string()],
        };
        let body = CreateIssueBody::from(&payload);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["fields"]["project"]["key"], "PROJ");
        assert_eq!(value["fields"]["summary"], "Login fails");
        assert_eq!(value["fields"]["issuetype"]["name"], "Bug");
        assert_eq!(value["fields"]["labels"][0], "Bug");
    }

    #[test]
    fn test_created_issue_parses_self_field() {
        let created: CreatedIssue = serde_json::from_str(
            r#"{"id": "10001", "key": "PROJ-42", "self": "https://x/rest/api/2/issue/10001"}"#,
        )
        .unwrap();
        assert_eq!(created.key, "PROJ-42");
        assert!(created.self_url.ends_with("10001"));
    }
}
