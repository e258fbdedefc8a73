//! API types for the Project Hub backend

use serde::{Deserialize, Serialize};

// ============================================================================
// Project Types
// ============================================================================

/// A project as shown on the home screen.
///
/// The backend stores `_id` and the list of member `users`; only the member
/// count is kept here since the home screen never shows who they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ProjectRecord")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub collaborator_count: usize,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>, collaborator_count: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            collaborator_count,
        }
    }
}

/// Project record as sent by the backend.
///
/// Mongo documents carry `_id`, and also `id` when virtuals are serialized.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectRecord {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    name: String,
    #[serde(default)]
    collaborator_count: Option<usize>,
    #[serde(default)]
    users: Vec<serde_json::Value>,
}

impl TryFrom<ProjectRecord> for Project {
    type Error = String;

    fn try_from(record: ProjectRecord) -> Result<Self, Self::Error> {
        let id = record
            .object_id
            .or(record.id)
            .ok_or_else(|| format!("project {:?} has neither `_id` nor `id`", record.name))?;
        let collaborator_count = record.collaborator_count.unwrap_or(record.users.len());
        Ok(Self {
            id,
            name: record.name,
            collaborator_count,
        })
    }
}

/// Response of `GET /projects/all`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

/// Body of `POST /projects/create`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

impl CreateProjectRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_record_counts_users() {
        let json = r#"{"_id":"64f0","name":"Alpha","users":["u1","u2"],"__v":0}"#;
        let project: Project = serde_json::from_str(json).unwrap();

        assert_eq!(project, Project::new("64f0", "Alpha", 2));
    }

    #[test]
    fn test_explicit_collaborator_count_wins() {
        let json = r#"{"id":"p1","name":"Alpha","collaboratorCount":0}"#;
        let project: Project = serde_json::from_str(json).unwrap();

        assert_eq!(project, Project::new("p1", "Alpha", 0));
    }

    #[test]
    fn test_missing_users_means_no_collaborators() {
        let project: Project = serde_json::from_str(r#"{"_id":"p2","name":"Beta"}"#).unwrap();
        assert_eq!(project.collaborator_count, 0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(Project::new("p1", "Alpha", 3)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "p1", "name": "Alpha", "collaboratorCount": 3})
        );
    }

    #[test]
    fn test_both_ids_prefer_object_id() {
        let json = r#"{"_id":"64f0","id":"virtual","name":"Alpha","users":[]}"#;
        let project: Project = serde_json::from_str(json).unwrap();

        assert_eq!(project, Project::new("64f0", "Alpha", 0));
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let err = serde_json::from_str::<Project>(r#"{"name":"Alpha"}"#).unwrap_err();
        assert!(err.to_string().contains("neither `_id` nor `id`"));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        assert!(serde_json::from_str::<Project>(r#"{"_id":"p3"}"#).is_err());
    }
}
