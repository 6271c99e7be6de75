//! Deployment endpoints

use crate::client::{ApiClient, nullable, require_id};
use crate::user::SubjectProfile;
use astroform_cloud::{ErrorContext, Operation, ResourceApi, ResourceKind, Result, StatusReport};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const SCHEDULER_SIZE_SMALL: &str = "SMALL";
pub const SCHEDULER_SIZE_MEDIUM: &str = "MEDIUM";
pub const SCHEDULER_SIZE_LARGE: &str = "LARGE";

pub const DEPLOYMENT_TYPE_DEDICATED: &str = "DEDICATED";
pub const DEPLOYMENT_TYPE_HYBRID: &str = "HYBRID";
pub const DEPLOYMENT_TYPE_STANDARD: &str = "STANDARD";

pub const EXECUTOR_CELERY: &str = "CELERY";
pub const EXECUTOR_KUBERNETES: &str = "KUBERNETES";

/// Deployment handle for one organization
#[derive(Debug, Clone)]
pub struct DeploymentApi {
    client: ApiClient,
}

impl DeploymentApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceApi for DeploymentApi {
    type CreateRequest = DeploymentCreateRequest;
    type UpdateRequest = DeploymentUpdateRequest;
    type Response = DeploymentResponse;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Deployment
    }

    fn organization_id(&self) -> &str {
        self.client.organization_id()
    }

    async fn get(&self, id: &str) -> Result<DeploymentResponse> {
        self.client.get_resource(ResourceKind::Deployment, id).await
    }

    async fn create(&self, request: &DeploymentCreateRequest) -> Result<DeploymentResponse> {
        tracing::info!(
            "Creating deployment {} in workspace {}",
            request.name,
            request.workspace_id
        );
        let deployment: DeploymentResponse = self
            .client
            .create_resource(ResourceKind::Deployment, request)
            .await?;
        require_id(
            &ErrorContext::new(Operation::Create, ResourceKind::Deployment),
            &deployment.id,
        )?;
        Ok(deployment)
    }

    async fn update(
        &self,
        id: &str,
        request: &DeploymentUpdateRequest,
    ) -> Result<DeploymentResponse> {
        tracing::info!("Updating deployment {}", id);
        self.client
            .update_resource(ResourceKind::Deployment, id, request)
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!("Deleting deployment {}", id);
        self.client
            .delete_resource(ResourceKind::Deployment, id)
            .await
    }
}

// ============ API Types ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeploymentResponse {
    pub airflow_version: String,
    pub cloud_provider: String,
    pub cluster_id: String,
    pub cluster_name: String,
    #[serde(deserialize_with = "nullable")]
    pub contact_emails: Vec<String>,
    pub created_at: String,
    pub created_by: Option<SubjectProfile>,
    pub default_task_pod_cpu: String,
    pub default_task_pod_memory: String,
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub environment_variables: Vec<EnvironmentVariableResponse>,
    pub executor: String,
    #[serde(rename = "externalIPs", deserialize_with = "nullable")]
    pub external_ips: Vec<String>,
    pub id: String,
    pub image_repository: String,
    pub image_tag: String,
    pub is_cicd_enforced: bool,
    pub is_dag_deploy_enabled: bool,
    pub is_high_availability: bool,
    pub name: String,
    pub namespace: String,
    pub organization_id: String,
    pub region: String,
    pub resource_quota_cpu: String,
    pub resource_quota_memory: String,
    pub runtime_version: String,
    pub scheduler_au: i64,
    pub scheduler_replicas: i64,
    pub scheduler_size: String,
    pub status: String,
    pub status_reason: Option<String>,
    pub task_pod_node_pool_id: String,
    #[serde(rename = "type")]
    pub deployment_type: String,
    pub updated_at: String,
    pub updated_by: Option<SubjectProfile>,
    pub web_server_url: String,
    #[serde(deserialize_with = "nullable")]
    pub worker_queues: Vec<WorkerQueue>,
    pub workload_identity: String,
    pub workspace_id: String,
    pub workspace_name: String,
}

impl StatusReport for DeploymentResponse {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }

    fn status_reason(&self) -> Option<&str> {
        self.status_reason.as_deref().filter(|r| !r.is_empty())
    }
}

/// Worker queue, as sent and as returned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkerQueue {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub astro_machine: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub is_default: bool,
    pub max_worker_count: i64,
    pub min_worker_count: i64,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub node_pool_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pod_cpu: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub pod_memory: String,
    pub worker_concurrency: i64,
}

/// Secret values come back without a value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvironmentVariableResponse {
    pub is_secret: bool,
    pub key: String,
    pub updated_at: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentVariableRequest {
    pub is_secret: bool,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentCreateRequest {
    pub astro_runtime_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    pub contact_emails: Vec<String>,
    pub default_task_pod_cpu: String,
    pub default_task_pod_memory: String,
    pub description: String,
    pub environment_variables: Vec<EnvironmentVariableRequest>,
    pub executor: String,
    pub is_cicd_enforced: bool,
    pub is_dag_deploy_enabled: bool,
    pub is_high_availability: bool,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub resource_quota_cpu: String,
    pub resource_quota_memory: String,
    pub scheduler_size: String,
    #[serde(rename = "type")]
    pub deployment_type: String,
    pub worker_queues: Vec<WorkerQueue>,
    pub workspace_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentUpdateRequest {
    pub contact_emails: Vec<String>,
    pub default_task_pod_cpu: String,
    pub default_task_pod_memory: String,
    pub description: String,
    pub environment_variables: Vec<EnvironmentVariableRequest>,
    pub executor: String,
    pub is_cicd_enforced: bool,
    pub is_dag_deploy_enabled: bool,
    pub is_high_availability: bool,
    pub name: String,
    pub resource_quota_cpu: String,
    pub resource_quota_memory: String,
    pub scheduler_size: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub deployment_type: Option<String>,
    pub worker_queues: Vec<WorkerQueue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload_identity: Option<String>,
    pub workspace_id: String,
}
