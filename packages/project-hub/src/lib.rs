//! Project Hub - client-side project list and creation workflow.
//!
//! This crate provides the pieces behind the Project Hub home screen:
//!
//! - **API client**: typed access to `GET /projects/all` and `POST /projects/create`
//! - **Project list state**: ordered collection with load status and notices
//! - **Creation dialog**: modal form with a guarded submission state machine
//! - **Home view**: the view-model tying it together, with background requests,
//!   retry, teardown and a framework-independent rendering model
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use project_hub::{HomeView, ProjectHubClient, Session};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = ProjectHubClient::new("http://127.0.0.1:3000");
//! let mut home = HomeView::new(Arc::new(client), Session::anonymous());
//!
//! home.load_all().await?;
//! home.open_dialog();
//! home.set_name("Alpha");
//! let project = home.submit().await?;
//! println!("created {} ({})", project.name, project.id);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod events;
pub mod navigation;
pub mod retry;
pub mod session;
pub mod state;
pub mod views;

pub use api::types::{CreateProjectRequest, Project, ProjectsResponse};
pub use api::{ProjectHubClient, ProjectsApi};
pub use config::Config;
pub use dialogs::project::{ProjectDialog, SubmitState};
pub use error::{ApiError, CreateError, FetchError};
pub use events::HomeEvent;
pub use navigation::Route;
pub use retry::RetryPolicy;
pub use session::Session;
pub use state::{LoadStatus, Notice, NoticeKind, ProjectList};
pub use views::home::{HomeBody, HomeView, Tile};
