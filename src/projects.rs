//! Project resource service and wire types
//!
//! Typed CRUD facade over the transport core. Each operation is exactly one
//! round trip against `{prefix}/projects`; the server is authoritative on
//! key legality, so the only client-side check is that keys are non-empty.

// Bitbucket Server REST documentation:
// https://developer.atlassian.com/server/bitbucket/rest/
use compact_str::{format_compact, CompactString};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    api::StashApi,
    error::{ClientError, Result},
    id::ProjectId,
};

/// A project as represented by the server
///
/// Not authoritative locally: every read and write round-trips through the
/// server, and the value held is whatever the server most recently sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: CompactString,
    pub key: CompactString,
    pub id: ProjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CompactString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<CompactString>,
    #[serde(rename = "type")]
    pub project_type: CompactString,
    pub public: bool,
}

/// Specification for creating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: CompactString,
    pub key: CompactString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<CompactString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

/// Mutable fields for updating a project
///
/// Partial-merge semantics: only fields set to `Some` are serialized, so an
/// absent field keeps its server-side value.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<CompactString>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

/// Paged envelope the server wraps collection listings in
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPage {
    pub size: u32,
    pub limit: u32,
    pub is_last_page: bool,
    pub start: u32,
    #[serde(default)]
    pub next_page_start: Option<u32>,
    pub values: Vec<Project>,
}

/// Typed CRUD operations for the projects resource
///
/// Borrowed from a [`Client`](crate::Client), so a service handle can never
/// outlive the client it belongs to. Holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct ProjectService<'a> {
    api: &'a StashApi,
}

impl<'a> ProjectService<'a> {
    pub(crate) fn new(api: &'a StashApi) -> Self {
        Self { api }
    }

    /// List projects visible to the authenticated user
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<ProjectPage> {
        let request = self.api.build_request(Method::GET, "projects", None::<&()>)?;
        let page: ProjectPage = self.require_body(self.api.execute(request).await?, "projects")?;
        debug!(project_count = page.values.len(), "fetched project listing");
        Ok(page)
    }

    /// Fetch one project by key
    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> Result<Project> {
        let path = self.project_path(key)?;
        let request = self.api.build_request(Method::GET, &path, None::<&()>)?;
        self.require_body(self.api.execute(request).await?, &path)
    }

    /// Create a project and return the server's representation of it
    ///
    /// Not idempotent: retrying after a transport failure may create a
    /// duplicate or fail on key uniqueness, since no idempotency key is
    /// passed. Retry policy belongs to the caller.
    #[instrument(skip(self, spec), fields(key = %spec.key))]
    pub async fn create(&self, spec: &CreateProject) -> Result<Project> {
        if spec.key.is_empty() {
            return Err(ClientError::InvalidKey);
        }

        let request = self.api.build_request(Method::POST, "projects", Some(spec))?;
        let project = self.require_body(self.api.execute(request).await?, "projects")?;
        debug!(key = %spec.key, "created project");
        Ok(project)
    }

    /// Update the mutable fields of a project, returning the new state
    #[instrument(skip(self, update))]
    pub async fn update(&self, key: &str, update: &UpdateProject) -> Result<Project> {
        let path = self.project_path(key)?;
        let request = self.api.build_request(Method::PUT, &path, Some(update))?;
        self.require_body(self.api.execute(request).await?, &path)
    }

    /// Delete a project; the server responds 204 with no body
    #[instrument(skip(self))]
    pub async fn delete(&self, key: &str) -> Result<()> {
        let path = self.project_path(key)?;
        let request = self.api.build_request(Method::DELETE, &path, None::<&()>)?;
        self.api.execute_unit(request).await?;
        debug!(key, "deleted project");
        Ok(())
    }

    fn project_path(&self, key: &str) -> Result<CompactString> {
        if key.is_empty() {
            return Err(ClientError::InvalidKey);
        }
        Ok(format_compact!("projects/{key}"))
    }

    /// Operations with a decode target expect a body; a 204 here means the
    /// server broke its contract and is reported as a malformed response
    fn require_body<T>(&self, value: Option<T>, endpoint: &str) -> Result<T> {
        value.ok_or_else(|| ClientError::missing_body(endpoint))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_project_deserialization() {
        let project: Project = serde_json::from_value(json!({
            "name": "Demo",
            "key": "DEMO",
            "id": 7,
            "type": "NORMAL",
            "public": false
        }))
        .unwrap();

        assert_eq!(project.name, "Demo");
        assert_eq!(project.key, "DEMO");
        assert_eq!(project.id, ProjectId::new(7));
        assert_eq!(project.project_type, "NORMAL");
        assert!(!project.public);
        assert_eq!(project.description, None);
        assert_eq!(project.scope, None);
    }

    #[test]
    fn test_create_spec_round_trip() {
        let spec = CreateProject {
            name: "Demo".into(),
            key: "DEMO".into(),
            description: Some("demo project".into()),
            public: Some(true),
        };

        let wire = serde_json::to_string(&spec).unwrap();
        let back: CreateProject = serde_json::from_str(&wire).unwrap();

        assert_eq!(back.name, spec.name);
        assert_eq!(back.key, spec.key);
        assert_eq!(back.description, spec.description);
        assert_eq!(back.public, spec.public);
    }

    #[test]
    fn test_create_spec_skips_absent_fields() {
        let spec = CreateProject {
            name: "Demo".into(),
            key: "DEMO".into(),
            description: None,
            public: None,
        };

        let wire = serde_json::to_value(&spec).unwrap();
        assert_eq!(wire, json!({"name": "Demo", "key": "DEMO"}));
    }

    #[test]
    fn test_update_serializes_only_provided_fields() {
        let update = UpdateProject {
            description: Some("new description".into()),
            public: None,
        };

        let wire = serde_json::to_value(&update).unwrap();
        assert_eq!(wire, json!({"description": "new description"}));

        let empty = UpdateProject::default();
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({}));
    }

    #[test]
    fn test_project_page_deserialization() {
        let page: ProjectPage = serde_json::from_value(json!({
            "size": 1,
            "limit": 25,
            "isLastPage": true,
            "start": 0,
            "values": [{
                "name": "Demo",
                "key": "DEMO",
                "id": 7,
                "type": "NORMAL",
                "public": false
            }]
        }))
        .unwrap();

        assert_eq!(page.size, 1);
        assert!(page.is_last_page);
        assert_eq!(page.next_page_start, None);
        assert_eq!(page.values.len(), 1);
        assert_eq!(page.values[0].key, "DEMO");
    }
}
