//! Tracker connection configuration
//!
//! Loaded once at process start. A missing value is a startup failure; the
//! config is then passed into constructors rather than read ambiently.

use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Base URL of the JIRA instance, e.g. `https://yourcompany.atlassian.net`.
    pub base_url: String,
    pub email: String,
    pub api_token: String,
    /// Project issues land in unless a request names its own.
    pub default_project_key: String,
}

impl JiraConfig {
    /// Read configuration from `JIRA_URL`, `JIRA_EMAIL`, `JIRA_API_TOKEN`
    /// and `JIRA_PROJECT_KEY`.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            base_url: require_env("JIRA_URL")?,
            email: require_env("JIRA_EMAIL")?,
            api_token: require_env("JIRA_API_TOKEN")?,
            default_project_key: require_env("JIRA_PROJECT_KEY")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(Error::Config(
                "JIRA_URL must start with http:// or https://".to_string(),
            ));
        }
        if self.default_project_key.trim().is_empty() {
            return Err(Error::Config("JIRA_PROJECT_KEY cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Base URL with any trailing slash removed, for joining REST paths.
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!(
            "Missing required environment variable {}",
            name
        ))),
    }
}
