use super::{CloudProvider, ClusterType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub cloud_provider: CloudProvider,
    #[serde(rename = "type")]
    pub cluster_type: ClusterType,
    pub name: String,
    pub region: String,
    pub vpc_subnet_range: String,

    /// HYBRID only
    #[serde(default)]
    pub db_instance_type: Option<String>,
    /// HYBRID only
    #[serde(default)]
    pub provider_account: Option<String>,

    #[serde(default)]
    pub k8s_tags: Vec<K8sTag>,
    #[serde(default)]
    pub node_pools: Vec<NodePoolModel>,
    #[serde(default)]
    pub workspace_ids: Vec<String>,

    // Computed
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub is_limited: Option<bool>,
    #[serde(default)]
    pub metadata: Option<ClusterMetadataModel>,
    /// GCP only
    #[serde(default)]
    pub pod_subnet_range: Option<String>,
    /// GCP only
    #[serde(default)]
    pub service_peering_range: Option<String>,
    /// GCP only
    #[serde(default)]
    pub service_subnet_range: Option<String>,
    /// AZURE only
    #[serde(default)]
    pub tenant_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct K8sTag {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePoolModel {
    pub name: String,
    pub node_instance_type: String,
    pub max_node_count: i64,
    #[serde(default)]
    pub is_default: bool,

    // Computed
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub cluster_id: Option<String>,
    #[serde(default)]
    pub cloud_provider: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub supported_astro_machines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterMetadataModel {
    #[serde(default)]
    pub external_ips: Vec<String>,
    #[serde(default)]
    pub oidc_issuer_url: Vec<String>,
}
