//! Project Hub HTTP client implementation

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;

use super::types::*;
use crate::error::ApiError;
use crate::session::Session;

/// Path of the list endpoint
pub const LIST_PATH: &str = "/projects/all";
/// Path of the create endpoint
pub const CREATE_PATH: &str = "/projects/create";

/// HTTP client for the Project Hub backend
#[derive(Debug, Clone)]
pub struct ProjectHubClient {
    base_url: String,
    client: Client,
}

impl ProjectHubClient {
    /// Create a new client with the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: Client::new(),
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: normalize_base_url(base_url),
            client,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Internal HTTP Methods
    // ========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(request: RequestBuilder, session: &Session) -> RequestBuilder {
        match session.authorization() {
            Some(value) => request.header(reqwest::header::AUTHORIZATION, value),
            None => request,
        }
    }

    /// Send a request and return the body of a successful response
    async fn send(request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.text().await?)
    }

    /// Make a GET request
    async fn get(&self, path: &str, session: &Session) -> Result<String, ApiError> {
        let request = Self::authorize(self.client.get(self.url(path)), session);
        Self::send(request).await
    }

    /// Make a POST request with a JSON body
    async fn post<B: Serialize>(
        &self,
        path: &str,
        session: &Session,
        body: &B,
    ) -> Result<String, ApiError> {
        let request = Self::authorize(self.client.post(self.url(path)).json(body), session);
        Self::send(request).await
    }

    // ========================================================================
    // Project API
    // ========================================================================

    /// List all projects visible to the session
    pub async fn list_projects(&self, session: &Session) -> Result<Vec<Project>, ApiError> {
        let body = self.get(LIST_PATH, session).await?;
        decode_projects(&body)
    }

    /// Create a project
    pub async fn create_project(
        &self,
        session: &Session,
        request: &CreateProjectRequest,
    ) -> Result<Project, ApiError> {
        let body = self.post(CREATE_PATH, session, request).await?;
        decode_project(&body)
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

// ============================================================================
// Payload Decoding
// ============================================================================

/// Decode the body of `GET /projects/all`.
///
/// The body must be an object with a `projects` array; anything else is a
/// contract violation rather than an empty list.
pub fn decode_projects(body: &str) -> Result<Vec<Project>, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    match value.get("projects") {
        Some(projects) if projects.is_array() => {
            let response: ProjectsResponse = serde_json::from_value(value)?;
            Ok(response.projects)
        }
        Some(other) => Err(ApiError::UnexpectedShape(format!(
            "`projects` is not an array: {}",
            other
        ))),
        None => Err(ApiError::UnexpectedShape(
            "response has no `projects` field".to_string(),
        )),
    }
}

/// Decode the body of `POST /projects/create`
pub fn decode_project(body: &str) -> Result<Project, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::UnexpectedShape("empty response body".to_string()));
    }

    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(ApiError::UnexpectedShape(format!(
            "expected a project record, got {}",
            value
        )));
    }

    Ok(serde_json::from_value(value)?)
}
