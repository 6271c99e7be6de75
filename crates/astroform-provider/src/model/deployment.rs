use super::{CloudProvider, DeploymentType, Executor, SchedulerSize};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,
    #[serde(default)]
    pub description: String,
    pub workspace_id: String,
    pub astro_runtime_version: String,
    #[serde(rename = "type")]
    pub deployment_type: DeploymentType,
    pub executor: Executor,
    pub scheduler_size: SchedulerSize,

    /// Where the deployment runs: either on a cluster or in a cloud region
    #[serde(default)]
    pub cloud_provider: Option<CloudProvider>,
    #[serde(default)]
    pub cluster_id: Option<String>,
    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub default_task_pod_cpu: String,
    #[serde(default)]
    pub default_task_pod_memory: String,
    #[serde(default)]
    pub resource_quota_cpu: String,
    #[serde(default)]
    pub resource_quota_memory: String,

    #[serde(default)]
    pub is_cicd_enforced: bool,
    #[serde(default)]
    pub is_dag_deploy_enforced: bool,
    #[serde(default)]
    pub is_high_availability: bool,

    #[serde(default)]
    pub contact_emails: Vec<String>,
    #[serde(default)]
    pub worker_queues: Vec<WorkerQueueModel>,
    #[serde(default)]
    pub environment_variables: Vec<EnvironmentVariableModel>,

    // Computed
    #[serde(default)]
    pub workload_identity: Option<String>,
    #[serde(default)]
    pub external_ips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerQueueModel {
    pub name: String,
    #[serde(default)]
    pub astro_machine: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    pub max_worker_count: i64,
    pub min_worker_count: i64,
    pub worker_concurrency: i64,

    // Computed
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub node_pool_id: Option<String>,
    #[serde(default)]
    pub pod_cpu: Option<String>,
    #[serde(default)]
    pub pod_memory: Option<String>,
}

/// Secret values are write-only on the remote side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariableModel {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_secret: bool,

    // Computed
    #[serde(default)]
    pub updated_at: Option<String>,
}
