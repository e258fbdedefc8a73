//! Project dialog
//!
//! Modal form for creating a project.

use crate::api::types::{CreateProjectRequest, Project};
use crate::error::CreateError;

/// Progress of the most recent submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Project creation dialog
#[derive(Debug, Clone, Default)]
pub struct ProjectDialog {
    visible: bool,
    name: String,
    submit_state: SubmitState,
}

impl ProjectDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn submit_state(&self) -> SubmitState {
        self.submit_state
    }

    pub fn is_submitting(&self) -> bool {
        self.submit_state == SubmitState::Submitting
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the dialog; the typed name is kept for the next time it opens
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Start a submission with the current name.
    ///
    /// Refused while another submission is in flight, and when the name is
    /// empty (the input is a required field).
    pub fn begin_submit(&mut self) -> Result<CreateProjectRequest, CreateError> {
        if self.is_submitting() {
            return Err(CreateError::InFlight);
        }
        if self.name.is_empty() {
            return Err(CreateError::NameRequired);
        }

        self.submit_state = SubmitState::Submitting;
        Ok(CreateProjectRequest::new(self.name.clone()))
    }

    /// The backend created `project`; close the dialog
    pub fn finish_success(&mut self, project: &Project) {
        tracing::debug!("Project dialog closing after creating {}", project.id);
        self.submit_state = SubmitState::Succeeded;
        self.hide();
    }

    /// The request failed; visibility and name stay as they are
    pub fn finish_failure(&mut self) {
        self.submit_state = SubmitState::Failed;
    }
}
