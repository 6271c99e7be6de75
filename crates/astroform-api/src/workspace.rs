//! Workspace endpoints

use crate::client::{ApiClient, require_id};
use crate::user::SubjectProfile;
use astroform_cloud::{ErrorContext, Operation, ResourceApi, ResourceKind, Result, StatusReport};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Workspace handle for one organization
#[derive(Debug, Clone)]
pub struct WorkspaceApi {
    client: ApiClient,
}

impl WorkspaceApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceApi for WorkspaceApi {
    type CreateRequest = WorkspaceRequest;
    type UpdateRequest = WorkspaceRequest;
    type Response = WorkspaceResponse;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Workspace
    }

    fn organization_id(&self) -> &str {
        self.client.organization_id()
    }

    async fn get(&self, id: &str) -> Result<WorkspaceResponse> {
        self.client.get_resource(ResourceKind::Workspace, id).await
    }

    async fn create(&self, request: &WorkspaceRequest) -> Result<WorkspaceResponse> {
        tracing::info!("Creating workspace {}", request.name);
        let workspace: WorkspaceResponse = self
            .client
            .create_resource(ResourceKind::Workspace, request)
            .await?;
        require_id(
            &ErrorContext::new(Operation::Create, ResourceKind::Workspace),
            &workspace.id,
        )?;
        Ok(workspace)
    }

    async fn update(&self, id: &str, request: &WorkspaceRequest) -> Result<WorkspaceResponse> {
        tracing::info!("Updating workspace {}", id);
        self.client
            .update_resource(ResourceKind::Workspace, id, request)
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!("Deleting workspace {}", id);
        self.client
            .delete_resource(ResourceKind::Workspace, id)
            .await
    }
}

// ============ API Types ============

/// Body for both create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRequest {
    pub cicd_enforced_default: bool,
    pub description: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkspaceResponse {
    pub cicd_enforced_default: bool,
    pub created_at: String,
    pub created_by: Option<SubjectProfile>,
    pub description: String,
    pub id: String,
    pub name: String,
    pub organization_id: String,
    pub organization_name: String,
    pub updated_at: String,
    pub updated_by: Option<SubjectProfile>,
}

impl StatusReport for WorkspaceResponse {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        None
    }
}
