//! Home screen
//!
//! Lists the user's projects, opens the creation dialog and hands a selected
//! project to the detail screen.
//!
//! Requests started with [`HomeView::mount`] and [`HomeView::spawn_submit`]
//! run as tokio tasks owned by the view. Their results are applied by
//! [`HomeView::process_next`] / [`HomeView::settle`] in completion order, so
//! all state changes happen on the view's owner. [`HomeView::teardown`] aborts
//! whatever is still running and makes the view ignore late completions.

use std::fmt::Write as _;
use std::sync::Arc;

use tokio::task::JoinSet;
use uuid::Uuid;

use crate::api::types::Project;
use crate::api::ProjectsApi;
use crate::config::Config;
use crate::dialogs::project::ProjectDialog;
use crate::error::{CreateError, FetchError};
use crate::events::{self, HomeEvent};
use crate::navigation::Route;
use crate::retry::RetryPolicy;
use crate::session::Session;
use crate::state::{LoadStatus, Notice, NoticeKind, ProjectList};

pub const EMPTY_TITLE: &str = "No Projects Available";
pub const EMPTY_HINT: &str = "Start by creating a new project!";
pub const NEW_PROJECT_LABEL: &str = "New Project";

/// One entry in the project grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile<'a> {
    /// Opens the creation dialog
    NewProject,
    Project(&'a Project),
}

/// What the area below the "New Project" tile shows.
///
/// A list that failed to load and a list that loaded empty look the same;
/// use [`HomeView::load_status`] to tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeBody<'a> {
    Projects(&'a [Project]),
    Empty,
}

/// Home screen view-model
pub struct HomeView {
    api: Arc<dyn ProjectsApi>,
    session: Session,
    load_retry: RetryPolicy,
    create_retry: RetryPolicy,
    list: ProjectList,
    dialog: ProjectDialog,
    tasks: JoinSet<HomeEvent>,
    /// Generation of the most recently started load
    load_generation: u64,
    /// Generation of the most recent load whose list was applied
    applied_generation: u64,
    /// Projects created while a load was outstanding, tagged with the newest
    /// generation at the time; that load may not include them
    created_during_load: Vec<(u64, Project)>,
    mounted: bool,
    detached: bool,
}

impl HomeView {
    pub fn new(api: Arc<dyn ProjectsApi>, session: Session) -> Self {
        Self {
            api,
            session,
            load_retry: RetryPolicy::default(),
            create_retry: RetryPolicy::none(),
            list: ProjectList::new(),
            dialog: ProjectDialog::new(),
            tasks: JoinSet::new(),
            load_generation: 0,
            applied_generation: 0,
            created_during_load: Vec::new(),
            mounted: false,
            detached: false,
        }
    }

    /// View using the session and retry settings from `config`
    pub fn from_config(api: Arc<dyn ProjectsApi>, config: &Config) -> Self {
        Self::new(api, config.session.clone())
            .with_retry(config.retry.load_policy(), config.retry.create_policy())
    }

    pub fn with_retry(mut self, load: RetryPolicy, create: RetryPolicy) -> Self {
        self.load_retry = load;
        self.create_retry = create;
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn projects(&self) -> &[Project] {
        self.list.projects()
    }

    pub fn list(&self) -> &ProjectList {
        &self.list
    }

    pub fn dialog(&self) -> &ProjectDialog {
        &self.dialog
    }

    pub fn load_status(&self) -> LoadStatus {
        self.list.status()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.list.notice()
    }

    pub fn dismiss_notice(&mut self) {
        self.list.dismiss_notice();
    }

    /// Number of requests that have not been applied yet
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Start the initial load in the background.
    ///
    /// Only the first call per view does anything; returns whether a request
    /// was started.
    pub fn mount(&mut self) -> bool {
        if self.mounted || self.detached {
            tracing::trace!("Home view already mounted, not reloading");
            return false;
        }
        self.mounted = true;
        let generation = self.begin_load();

        let load = events::load_projects(
            self.api.clone(),
            self.session.clone(),
            self.load_retry.clone(),
        );
        self.tasks.spawn(async move {
            HomeEvent::ProjectsLoaded {
                generation,
                result: load.await,
            }
        });
        true
    }

    /// Fetch all projects and replace the list with the result.
    ///
    /// On failure the current list is kept.
    pub async fn load_all(&mut self) -> Result<&[Project], FetchError> {
        if self.detached {
            return Err(FetchError::Detached);
        }
        let generation = self.begin_load();

        let result = events::load_projects(
            self.api.clone(),
            self.session.clone(),
            self.load_retry.clone(),
        )
        .await;
        self.apply_loaded(generation, result)?;
        Ok(self.list.projects())
    }

    fn begin_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.list.mark_loading();
        self.load_generation
    }

    /// Apply the result of load `generation`.
    ///
    /// A result older than the list already shown is dropped. Projects
    /// created after the load was started are kept on top of its list.
    fn apply_loaded(
        &mut self,
        generation: u64,
        result: Result<Vec<Project>, FetchError>,
    ) -> Result<(), FetchError> {
        if generation < self.applied_generation {
            tracing::debug!(
                "Dropping load {} superseded by load {}",
                generation,
                self.applied_generation
            );
            return result.map(|_| ());
        }

        match result {
            Ok(mut projects) => {
                tracing::info!("Loaded {} projects (load {})", projects.len(), generation);
                for (tag, created) in &self.created_during_load {
                    if *tag >= generation && !projects.iter().any(|p| p.id == created.id) {
                        projects.push(created.clone());
                    }
                }
                self.created_during_load.retain(|(tag, _)| *tag > generation);
                self.applied_generation = generation;
                self.list.set_projects(projects);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load projects: {}", e);
                self.list.mark_load_failed(e.to_string());
                Err(e)
            }
        }
    }

    // ========================================================================
    // Creation Dialog
    // ========================================================================

    pub fn open_dialog(&mut self) {
        self.dialog.show();
    }

    pub fn close_dialog(&mut self) {
        self.dialog.hide();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.dialog.set_name(name);
    }

    /// Create a project from the dialog and wait for the result.
    ///
    /// On success the project is appended and the dialog closes. On failure
    /// the dialog stays as it was and a notice is recorded.
    pub async fn submit(&mut self) -> Result<Project, CreateError> {
        if self.detached {
            return Err(CreateError::Detached);
        }
        let request = self.dialog.begin_submit()?;
        let submission = Uuid::new_v4();

        let result = events::create_project(
            self.api.clone(),
            self.session.clone(),
            self.create_retry.clone(),
            request,
        )
        .await;
        self.apply_created(submission, result)
    }

    /// Create a project in the background.
    ///
    /// Refused while a previous submission is still running.
    pub fn spawn_submit(&mut self) -> Result<Uuid, CreateError> {
        if self.detached {
            return Err(CreateError::Detached);
        }
        let request = self.dialog.begin_submit()?;
        let submission = Uuid::new_v4();

        let create = events::create_project(
            self.api.clone(),
            self.session.clone(),
            self.create_retry.clone(),
            request,
        );
        self.tasks.spawn(async move {
            HomeEvent::ProjectCreated {
                submission,
                result: create.await,
            }
        });
        Ok(submission)
    }

    fn apply_created(
        &mut self,
        submission: Uuid,
        result: Result<Project, CreateError>,
    ) -> Result<Project, CreateError> {
        match result {
            Ok(project) => {
                tracing::info!("Created project {} ({}) [{}]", project.name, project.id, submission);
                if self.load_generation > self.applied_generation {
                    self.created_during_load
                        .push((self.load_generation, project.clone()));
                }
                self.list.add_project(project.clone());
                self.dialog.finish_success(&project);
                Ok(project)
            }
            Err(e) => {
                tracing::warn!("Failed to create project [{}]: {}", submission, e);
                self.list.set_notice(NoticeKind::Create, e.to_string());
                self.dialog.finish_failure();
                Err(e)
            }
        }
    }

    // ========================================================================
    // Background Completions
    // ========================================================================

    /// Wait for the next background request and apply its result.
    ///
    /// Returns `false` once nothing is left in flight.
    pub async fn process_next(&mut self) -> bool {
        match self.tasks.join_next().await {
            Some(Ok(event)) => {
                self.apply(event);
                true
            }
            Some(Err(e)) if e.is_cancelled() => {
                tracing::trace!("Background request cancelled");
                true
            }
            Some(Err(e)) => {
                tracing::error!("Background request failed: {}", e);
                true
            }
            None => false,
        }
    }

    /// Apply every outstanding background request
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }

    fn apply(&mut self, event: HomeEvent) {
        if self.detached {
            tracing::debug!("Ignoring completion after teardown: {:?}", event);
            return;
        }

        match event {
            HomeEvent::ProjectsLoaded { generation, result } => {
                let _ = self.apply_loaded(generation, result);
            }
            HomeEvent::ProjectCreated { submission, result } => {
                let _ = self.apply_created(submission, result);
            }
        }
    }

    /// Abort outstanding requests and stop applying results
    pub fn teardown(&mut self) {
        if self.detached {
            return;
        }
        self.detached = true;
        tracing::debug!("Home view torn down with {} request(s) in flight", self.tasks.len());
        self.tasks.abort_all();
    }

    // ========================================================================
    // Rendering & Navigation
    // ========================================================================

    /// "New Project" followed by one tile per project, in list order
    pub fn tiles(&self) -> Vec<Tile<'_>> {
        std::iter::once(Tile::NewProject)
            .chain(self.list.projects().iter().map(Tile::Project))
            .collect()
    }

    pub fn body(&self) -> HomeBody<'_> {
        if self.list.is_empty() {
            HomeBody::Empty
        } else {
            HomeBody::Projects(self.list.projects())
        }
    }

    /// The "New Project" tile was clicked
    pub fn activate_new_project(&mut self) {
        self.open_dialog();
    }

    /// Route to the detail screen for the project at `index`
    pub fn select(&self, index: usize) -> Option<Route> {
        self.list.get(index).map(|project| Route::ProjectDetail {
            project: project.clone(),
        })
    }

    /// Route to the detail screen for the first project with `id`
    pub fn select_by_id(&self, id: &str) -> Option<Route> {
        self.list.find(id).map(|project| Route::ProjectDetail {
            project: project.clone(),
        })
    }

    /// Plain-text rendering of the screen
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        if let Some(notice) = self.notice() {
            let _ = writeln!(out, "! {}", notice.message);
        }

        let _ = writeln!(out, "[+] {}", NEW_PROJECT_LABEL);
        match self.body() {
            HomeBody::Projects(projects) => {
                for (index, project) in projects.iter().enumerate() {
                    let _ = writeln!(
                        out,
                        "[{}] {}  (Collaborators: {})",
                        index + 1,
                        project.name,
                        project.collaborator_count
                    );
                }
            }
            HomeBody::Empty => {
                let _ = writeln!(out, "{}", EMPTY_TITLE);
                let _ = writeln!(out, "{}", EMPTY_HINT);
            }
        }

        if self.dialog.is_open() {
            let _ = writeln!(out, "--- Create New Project ---");
            let _ = writeln!(out, "Project Name: {}", self.dialog.name());
            if self.dialog.is_submitting() {
                let _ = writeln!(out, "(creating...)");
            }
        }

        out
    }
}
