//! Cluster endpoints

use crate::client::{ApiClient, nullable, require_id};
use astroform_cloud::{ErrorContext, Operation, ResourceApi, ResourceKind, Result, StatusReport};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const CLOUD_PROVIDER_AWS: &str = "AWS";
pub const CLOUD_PROVIDER_AZURE: &str = "AZURE";
pub const CLOUD_PROVIDER_GCP: &str = "GCP";

pub const CLUSTER_TYPE_DEDICATED: &str = "DEDICATED";
pub const CLUSTER_TYPE_HYBRID: &str = "HYBRID";

/// Cluster handle for one organization
#[derive(Debug, Clone)]
pub struct ClusterApi {
    client: ApiClient,
}

impl ClusterApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceApi for ClusterApi {
    type CreateRequest = ClusterCreateRequest;
    type UpdateRequest = ClusterUpdateRequest;
    type Response = ClusterResponse;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Cluster
    }

    fn organization_id(&self) -> &str {
        self.client.organization_id()
    }

    async fn get(&self, id: &str) -> Result<ClusterResponse> {
        self.client.get_resource(ResourceKind::Cluster, id).await
    }

    async fn create(&self, request: &ClusterCreateRequest) -> Result<ClusterResponse> {
        tracing::info!("Creating cluster {} in {}", request.name, request.region);
        let cluster: ClusterResponse = self
            .client
            .create_resource(ResourceKind::Cluster, request)
            .await?;
        require_id(
            &ErrorContext::new(Operation::Create, ResourceKind::Cluster),
            &cluster.id,
        )?;
        Ok(cluster)
    }

    async fn update(&self, id: &str, request: &ClusterUpdateRequest) -> Result<ClusterResponse> {
        tracing::info!("Updating cluster {}", id);
        self.client
            .update_resource(ResourceKind::Cluster, id, request)
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!("Deleting cluster {}", id);
        self.client.delete_resource(ResourceKind::Cluster, id).await
    }
}

// ============ API Types ============

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterResponse {
    pub cloud_provider: String,
    pub created_at: String,
    pub db_instance_type: Option<String>,
    pub id: String,
    pub is_limited: bool,
    pub metadata: Option<ClusterMetadata>,
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub node_pools: Vec<NodePoolResponse>,
    pub organization_id: String,
    pub pod_subnet_range: Option<String>,
    pub provider_account: Option<String>,
    pub region: String,
    pub service_peering_range: Option<String>,
    pub service_subnet_range: Option<String>,
    pub status: String,
    #[serde(deserialize_with = "nullable")]
    pub tags: Vec<ClusterTag>,
    pub tenant_id: Option<String>,
    #[serde(rename = "type")]
    pub cluster_type: String,
    pub updated_at: String,
    pub vpc_subnet_range: String,
    #[serde(deserialize_with = "nullable")]
    pub workspace_ids: Vec<String>,
}

impl StatusReport for ClusterResponse {
    fn id(&self) -> &str {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterMetadata {
    #[serde(rename = "externalIPs", deserialize_with = "nullable")]
    pub external_ips: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub oidc_issuer_url: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterTag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodePoolResponse {
    pub cloud_provider: String,
    pub cluster_id: String,
    pub created_at: String,
    pub id: String,
    pub is_default: bool,
    pub max_node_count: i64,
    pub name: String,
    pub node_instance_type: String,
    #[serde(deserialize_with = "nullable")]
    pub supported_astro_machines: Vec<String>,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePoolRequest {
    pub is_default: bool,
    pub max_node_count: i64,
    pub name: String,
    pub node_instance_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCreateRequest {
    pub cloud_provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_instance_type: Option<String>,
    pub k8s_tags: Vec<ClusterTag>,
    pub name: String,
    pub node_pools: Vec<NodePoolRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_account: Option<String>,
    pub region: String,
    #[serde(rename = "type")]
    pub cluster_type: String,
    pub vpc_subnet_range: String,
    pub workspace_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_instance_type: Option<String>,
    pub k8s_tags: Vec<ClusterTag>,
    pub name: String,
    pub node_pools: Vec<NodePoolRequest>,
    pub workspace_ids: Vec<String>,
}
