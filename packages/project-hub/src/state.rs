//! Project list state
//!
//! The ordered collection shown on the home screen, together with how it was
//! last loaded and any error the user should see.

use chrono::{DateTime, Utc};

use crate::api::types::Project;

// ============================================================================
// Supporting Types
// ============================================================================

/// Where the list is in its load lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Load,
    Create,
}

/// User-visible error message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

// ============================================================================
// Project List
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ProjectList {
    projects: Vec<Project>,
    status: LoadStatus,
    last_loaded_at: Option<DateTime<Utc>>,
    notice: Option<Notice>,
}

impl ProjectList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }

    /// First project with the given id
    pub fn find(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn last_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.last_loaded_at
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    // ========================================================================
    // State Actions
    // ========================================================================

    pub fn mark_loading(&mut self) {
        self.status = LoadStatus::Loading;
    }

    /// Replace the whole collection with a freshly loaded list
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.status = LoadStatus::Loaded;
        self.last_loaded_at = Some(Utc::now());
        self.clear_notice(NoticeKind::Load);
    }

    /// Record a failed load; the collection is left as it was
    pub fn mark_load_failed(&mut self, message: impl Into<String>) {
        self.status = LoadStatus::Failed;
        self.set_notice(NoticeKind::Load, message);
    }

    /// Append a newly created project at the end
    pub fn add_project(&mut self, project: Project) {
        self.projects.push(project);
        self.clear_notice(NoticeKind::Create);
    }

    pub fn set_notice(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            message: message.into(),
            at: Utc::now(),
        });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn clear_notice(&mut self, kind: NoticeKind) {
        if self.notice.as_ref().map(|n| n.kind) == Some(kind) {
            self.notice = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str) -> Project {
        Project::new(id, id.to_uppercase(), 0)
    }

    #[test]
    fn test_starts_empty_and_not_loaded() {
        let list = ProjectList::new();
        assert!(list.is_empty());
        assert_eq!(list.status(), LoadStatus::NotLoaded);
        assert!(list.last_loaded_at().is_none());
    }

    #[test]
    fn test_set_projects_replaces_wholesale() {
        let mut list = ProjectList::new();
        list.add_project(project("old"));

        list.set_projects(vec![project("a"), project("b")]);

        assert_eq!(list.projects(), &[project("a"), project("b")]);
        assert_eq!(list.status(), LoadStatus::Loaded);
        assert!(list.last_loaded_at().is_some());
    }

    #[test]
    fn test_add_project_appends_without_dedup() {
        let mut list = ProjectList::new();
        list.set_projects(vec![project("b"), project("a")]);

        list.add_project(project("a"));

        let ids: Vec<_> = list.projects().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "a"]);
    }

    #[test]
    fn test_failed_load_keeps_projects() {
        let mut list = ProjectList::new();
        list.set_projects(vec![project("a")]);

        list.mark_load_failed("connection refused");

        assert_eq!(list.projects(), &[project("a")]);
        assert_eq!(list.status(), LoadStatus::Failed);
        assert_eq!(list.notice().map(|n| n.kind), Some(NoticeKind::Load));
    }

    #[test]
    fn test_notice_cleared_by_matching_success() {
        let mut list = ProjectList::new();
        list.set_notice(NoticeKind::Create, "boom");

        list.set_projects(Vec::new());
        assert!(list.notice().is_some());

        list.add_project(project("a"));
        assert!(list.notice().is_none());
    }

    #[test]
    fn test_find_and_get() {
        let mut list = ProjectList::new();
        list.set_projects(vec![project("a"), project("b")]);

        assert_eq!(list.find("b").map(|p| p.name.as_str()), Some("B"));
        assert_eq!(list.get(0).map(|p| p.id.as_str()), Some("a"));
        assert!(list.find("zzz").is_none());
        assert!(list.get(2).is_none());
    }
}
