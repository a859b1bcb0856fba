//! Client for the remote preview/deploy service.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const BASE_URL_ENV: &str = "PAGECRAFT_API_URL";

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Everything that can go wrong talking to the service, flattened to a
/// message the wizard can show as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a failure, or with something unreadable.
    #[error("{0}")]
    Service(String),

    /// The request never produced a usable response.
    #[error("could not reach the deployment service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The payload was rejected before sending.
    #[error("{0}")]
    Invalid(String),
}

/// Body shared by the preview and deploy endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PageRequest<'a> {
    pub title: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<&'a str>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub html: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeployResponse {
    pub success: bool,
    pub site_id: String,
    pub deploy_id: String,
    pub url: String,
    #[serde(default)]
    pub admin_url: Option<String>,
    pub title: String,
    pub description: String,
    pub deployed_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    /// Base URL comes from `PAGECRAFT_API_URL` when set.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn preview(
        &self,
        title: &str,
        description: &str,
        theme: Option<&str>,
    ) -> Result<PreviewResponse, ApiError> {
        self.post_json(
            "/api/preview",
            &PageRequest {
                title,
                description,
                theme,
            },
        )
    }

    pub fn deploy(
        &self,
        title: &str,
        description: &str,
        theme: Option<&str>,
    ) -> Result<DeployResponse, ApiError> {
        validate_page_request(title, description)?;
        self.post_json(
            "/api/deploy",
            &PageRequest {
                title,
                description,
                theme,
            },
        )
    }

    /// Liveness probe. Never on the critical path of a wizard step.
    pub fn health(&self) -> Result<Health, ApiError> {
        let resp = self.http.get(format!("{}/health", self.base_url)).send()?;
        if !resp.status().is_success() {
            return Err(ApiError::Service(format!(
                "health check failed with status {}",
                resp.status()
            )));
        }
        Ok(resp.json()?)
    }

    fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()?;
        let status = resp.status();
        let payload: Value = resp.json()?;
        let success = payload.get("success").and_then(Value::as_bool) == Some(true);
        if !status.is_success() || !success {
            return Err(ApiError::Service(service_message(&payload, status.as_u16())));
        }
        serde_json::from_value(payload).map_err(|err| {
            ApiError::Service(format!(
                "unexpected response from the deployment service: {err}"
            ))
        })
    }
}

/// Prefer the service's own message; fall back to something generic.
fn service_message(payload: &Value, status: u16) -> String {
    if let Some(message) = payload.get("message").and_then(Value::as_str) {
        return message.to_string();
    }
    if !(200..300).contains(&status) {
        format!("request failed with status {status}")
    } else {
        "the deployment service reported a failure".to_string()
    }
}

/// Required-field and length checks applied before any request goes out.
pub fn validate_page_request(title: &str, description: &str) -> Result<(), ApiError> {
    if title.trim().is_empty() {
        return Err(ApiError::Invalid("Title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ApiError::Invalid(
            "Title must be 100 characters or less".to_string(),
        ));
    }
    if description.trim().is_empty() {
        return Err(ApiError::Invalid("Description is required".to_string()));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ApiError::Invalid(
            "Description must be 500 characters or less".to_string(),
        ));
    }
    Ok(())
}

/// Description sent with a deploy. An empty one gets a serviceable default.
pub fn deploy_description(project_name: &str, project_description: &str) -> String {
    let trimmed = project_description.trim();
    if trimmed.is_empty() {
        format!(
            "Landing page for {} - created with pagecraft",
            project_name.trim()
        )
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_request_omits_missing_theme() {
        let with_theme = serde_json::to_value(PageRequest {
            title: "TechFlow",
            description: "A tool. For teams.",
            theme: Some("Tech Startup"),
        })
        .unwrap();
        assert_eq!(with_theme["theme"], "Tech Startup");

        let without = serde_json::to_value(PageRequest {
            title: "TechFlow",
            description: "A tool. For teams.",
            theme: None,
        })
        .unwrap();
        assert!(without.get("theme").is_none());
    }

    #[test]
    fn validation_enforces_required_fields_and_lengths() {
        assert!(validate_page_request("TechFlow", "A tool. For teams.").is_ok());
        assert!(validate_page_request("", "A tool. For teams.").is_err());
        assert!(validate_page_request("TechFlow", "   ").is_err());

        let long_title = "t".repeat(MAX_TITLE_LEN + 1);
        assert!(validate_page_request(&long_title, "fine. really.").is_err());
        let edge_title = "t".repeat(MAX_TITLE_LEN);
        assert!(validate_page_request(&edge_title, "fine. really.").is_ok());

        let long_desc = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(validate_page_request("TechFlow", &long_desc).is_err());
    }

    #[test]
    fn deploy_description_defaults_when_empty() {
        assert_eq!(
            deploy_description("TechFlow", "  "),
            "Landing page for TechFlow - created with pagecraft"
        );
        assert_eq!(
            deploy_description("TechFlow", " A tool. For teams. "),
            "A tool. For teams."
        );
    }

    #[test]
    fn service_message_prefers_server_text() {
        let body = serde_json::json!({
            "error": "Rate limit exceeded",
            "message": "Maximum 10 deployments per hour allowed"
        });
        assert_eq!(
            service_message(&body, 429),
            "Maximum 10 deployments per hour allowed"
        );
    }

    #[test]
    fn service_message_falls_back_to_status_or_generic() {
        let empty = serde_json::json!({});
        assert_eq!(service_message(&empty, 500), "request failed with status 500");

        let unsuccessful = serde_json::json!({ "success": false });
        assert_eq!(
            service_message(&unsuccessful, 200),
            "the deployment service reported a failure"
        );
    }

    #[test]
    fn from_env_falls_back_to_localhost() {
        // Only exercises the default; the env-var path would race other tests.
        let client = ApiClient::new(DEFAULT_BASE_URL);
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
