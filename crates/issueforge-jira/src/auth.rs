//! JIRA authentication
//!
//! Atlassian cloud authenticates REST calls with basic auth over
//! `email:api_token`.

use crate::{Error, Result};
use reqwest::header::HeaderValue;

pub struct JiraAuth {
    email: String,
    api_token: String,
}

impl JiraAuth {
    pub fn new(email: String, api_token: String) -> Self {
        Self { email, api_token }
    }

    /// Ready-to-insert `Authorization` header value, marked sensitive so
    /// the credential never appears in debug or log output.
    pub fn authorization_header(&self) -> Result<HeaderValue> {
        use base64::Engine;
        let credentials = format!("{}:{}", self.email, self.api_token);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
        let mut value = HeaderValue::from_str(&format!("Basic {}", encoded))
            .map_err(|e| Error::Config(format!("Invalid credentials: {}", e)))?;
        value.set_sensitive(true);
        Ok(value)
    }
}
