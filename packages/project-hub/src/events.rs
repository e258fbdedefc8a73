//! Completions of background requests
//!
//! Each request started by the home view runs as its own task and finishes
//! with a [`HomeEvent`]. Events are applied to the view in the order the
//! requests complete.

use std::sync::Arc;

use uuid::Uuid;

use crate::api::types::{CreateProjectRequest, Project};
use crate::api::ProjectsApi;
use crate::error::{CreateError, FetchError};
use crate::retry::RetryPolicy;
use crate::session::Session;

#[derive(Debug)]
pub enum HomeEvent {
    /// `GET /projects/all` finished; `generation` orders it against other loads
    ProjectsLoaded {
        generation: u64,
        result: Result<Vec<Project>, FetchError>,
    },
    /// `POST /projects/create` finished
    ProjectCreated {
        submission: Uuid,
        result: Result<Project, CreateError>,
    },
}

/// Fetch the full project list
pub async fn load_projects(
    api: Arc<dyn ProjectsApi>,
    session: Session,
    retry: RetryPolicy,
) -> Result<Vec<Project>, FetchError> {
    tracing::debug!("Loading projects");
    let (api, session) = (&api, &session);
    let projects = retry
        .run("GET /projects/all", move || api.list_projects(session))
        .await?;
    Ok(projects)
}

/// Create one project
pub async fn create_project(
    api: Arc<dyn ProjectsApi>,
    session: Session,
    retry: RetryPolicy,
    request: CreateProjectRequest,
) -> Result<Project, CreateError> {
    tracing::debug!("Creating project {:?}", request.name);
    let (api, session, request) = (&api, &session, &request);
    let project = retry
        .run("POST /projects/create", move || {
            api.create_project(session, request)
        })
        .await?;
    Ok(project)
}
