//! Navigation between screens

use serde::Serialize;

use crate::api::types::Project;

/// Screen to show next.
///
/// The detail route carries a copy of the selected project; the detail view
/// does not fetch it again and does not see later changes to the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", content = "state", rename_all = "snake_case")]
pub enum Route {
    Home,
    ProjectDetail { project: Project },
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::ProjectDetail { .. } => "/project",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_route_serializes_snapshot() {
        let route = Route::ProjectDetail {
            project: Project::new("p1", "Alpha", 2),
        };

        assert_eq!(route.path(), "/project");
        assert_eq!(
            serde_json::to_value(&route).unwrap(),
            serde_json::json!({
                "route": "project_detail",
                "state": {"project": {"id": "p1", "name": "Alpha", "collaboratorCount": 2}}
            })
        );
    }
}
