//! Shared relay state
//!
//! Built once at startup from environment configuration and cloned into
//! handlers. Nothing here is mutable after construction; concurrent
//! requests share only this read-only state.

use issueforge_core::dispatch::PlanDefaults;
use issueforge_core::render::{BugRenderMode, TestStepStyle};
use issueforge_jira::{JiraClient, JiraConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<JiraClient>,
    pub defaults: Arc<PlanDefaults>,
}

impl AppState {
    pub fn new(client: JiraClient, defaults: PlanDefaults) -> Self {
        Self {
            client: Arc::new(client),
            defaults: Arc::new(defaults),
        }
    }

    /// Assemble state from a loaded tracker config, honoring the optional
    /// rendering overrides `ISSUEFORGE_BUG_STYLE` (static|record) and
    /// `ISSUEFORGE_TEST_STYLE` (flat|table).
    pub fn from_config(config: &JiraConfig) -> issueforge_jira::Result<Self> {
        let client = JiraClient::new(config)?;
        let mut defaults = PlanDefaults::new(config.default_project_key.clone());
        if let Ok(value) = std::env::var("ISSUEFORGE_BUG_STYLE") {
            defaults.bug_mode = BugRenderMode::parse(&value).ok_or_else(|| {
                issueforge_jira::Error::Config(format!(
                    "Invalid ISSUEFORGE_BUG_STYLE '{}' (use 'static' or 'record')",
                    value
                ))
            })?;
        }
        if let Ok(value) = std::env::var("ISSUEFORGE_TEST_STYLE") {
            defaults.test_style = TestStepStyle::parse(&value).ok_or_else(|| {
                issueforge_jira::Error::Config(format!(
                    "Invalid ISSUEFORGE_TEST_STYLE '{}' (use 'flat' or 'table')",
                    value
                ))
            })?;
        }
        Ok(Self::new(client, defaults))
    }
}
