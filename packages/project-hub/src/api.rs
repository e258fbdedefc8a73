//! HTTP access to the Project Hub backend
//!
//! The views only see the [`ProjectsApi`] trait; [`ProjectHubClient`] is the
//! reqwest implementation used in production.

pub mod client;
pub mod types;

pub use client::*;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::session::Session;
use types::{CreateProjectRequest, Project};

/// Operations the home screen needs from the backend
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// `GET /projects/all`
    async fn list_projects(&self, session: &Session) -> Result<Vec<Project>, ApiError>;

    /// `POST /projects/create`
    async fn create_project(
        &self,
        session: &Session,
        request: &CreateProjectRequest,
    ) -> Result<Project, ApiError>;
}

#[async_trait]
impl ProjectsApi for ProjectHubClient {
    async fn list_projects(&self, session: &Session) -> Result<Vec<Project>, ApiError> {
        ProjectHubClient::list_projects(self, session).await
    }

    async fn create_project(
        &self,
        session: &Session,
        request: &CreateProjectRequest,
    ) -> Result<Project, ApiError> {
        ProjectHubClient::create_project(self, session, request).await
    }
}

/// Scripted API used by unit tests
#[cfg(test)]
pub(crate) mod fake {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::ProjectsApi;
    use crate::api::types::{CreateProjectRequest, Project};
    use crate::error::ApiError;
    use crate::session::Session;

    #[derive(Default)]
    pub struct FakeApi {
        lists: Mutex<VecDeque<(Result<Vec<Project>, ApiError>, Option<Arc<Notify>>)>>,
        creates: Mutex<VecDeque<Result<Project, ApiError>>>,
        pub list_calls: AtomicUsize,
        pub create_calls: AtomicUsize,
        pub created_names: Mutex<Vec<String>>,
        pub sessions: Mutex<Vec<Session>>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeApi {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every call without a gate of its own waits for `gate` before answering
        pub fn gated(gate: Arc<Notify>) -> Self {
            Self {
                gate: Some(gate),
                ..Self::default()
            }
        }

        pub fn push_list(self, result: Result<Vec<Project>, ApiError>) -> Self {
            self.lists.lock().unwrap().push_back((result, None));
            self
        }

        /// Queue a list response that is held back until `gate` is notified
        pub fn push_list_gated(self, result: Result<Vec<Project>, ApiError>, gate: Arc<Notify>) -> Self {
            self.lists.lock().unwrap().push_back((result, Some(gate)));
            self
        }

        pub fn push_create(self, result: Result<Project, ApiError>) -> Self {
            self.creates.lock().unwrap().push_back(result);
            self
        }

        pub fn server_error(status: u16) -> ApiError {
            ApiError::Status {
                status,
                body: "scripted failure".to_string(),
            }
        }

        async fn wait(&self, own: Option<Arc<Notify>>) {
            if let Some(gate) = own.as_ref().or(self.gate.as_ref()) {
                gate.notified().await;
            }
        }
    }

    #[async_trait]
    impl ProjectsApi for FakeApi {
        async fn list_projects(&self, session: &Session) -> Result<Vec<Project>, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.sessions.lock().unwrap().push(session.clone());
            let (result, gate) = self
                .lists
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| (Ok(Vec::new()), None));
            self.wait(gate).await;
            result
        }

        async fn create_project(
            &self,
            session: &Session,
            request: &CreateProjectRequest,
        ) -> Result<Project, ApiError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.sessions.lock().unwrap().push(session.clone());
            self.created_names.lock().unwrap().push(request.name.clone());
            let result = self
                .creates
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(FakeApi::server_error(500)));
            self.wait(None).await;
            result
        }
    }
}
