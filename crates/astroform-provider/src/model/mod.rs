//! Declarative models
//!
//! What the plugin host holds between operations: user-supplied settings
//! plus the remote-computed fields filled in by reconciliation. Field names
//! follow the provider's snake_case attribute names.

mod cluster;
mod deployment;
mod organization;
mod workspace;

pub use cluster::{ClusterMetadataModel, ClusterModel, K8sTag, NodePoolModel};
pub use deployment::{DeploymentModel, EnvironmentVariableModel, WorkerQueueModel};
pub use organization::{ManagedDomainModel, OrganizationModel};
pub use workspace::WorkspaceModel;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CloudProvider {
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "AZURE")]
    Azure,
    #[serde(rename = "GCP")]
    Gcp,
}

impl CloudProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "AWS",
            CloudProvider::Azure => "AZURE",
            CloudProvider::Gcp => "GCP",
        }
    }
}

impl FromStr for CloudProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AWS" => Ok(CloudProvider::Aws),
            "AZURE" => Ok(CloudProvider::Azure),
            "GCP" => Ok(CloudProvider::Gcp),
            other => Err(format!("unknown cloud provider: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClusterType {
    Dedicated,
    Hybrid,
}

impl ClusterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterType::Dedicated => "DEDICATED",
            ClusterType::Hybrid => "HYBRID",
        }
    }
}

impl FromStr for ClusterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEDICATED" => Ok(ClusterType::Dedicated),
            "HYBRID" => Ok(ClusterType::Hybrid),
            other => Err(format!("unknown cluster type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeploymentType {
    Dedicated,
    Hybrid,
    Standard,
}

impl DeploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentType::Dedicated => "DEDICATED",
            DeploymentType::Hybrid => "HYBRID",
            DeploymentType::Standard => "STANDARD",
        }
    }
}

impl FromStr for DeploymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DEDICATED" => Ok(DeploymentType::Dedicated),
            "HYBRID" => Ok(DeploymentType::Hybrid),
            "STANDARD" => Ok(DeploymentType::Standard),
            other => Err(format!("unknown deployment type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Executor {
    Celery,
    Kubernetes,
}

impl Executor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Executor::Celery => "CELERY",
            Executor::Kubernetes => "KUBERNETES",
        }
    }
}

impl FromStr for Executor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CELERY" => Ok(Executor::Celery),
            "KUBERNETES" => Ok(Executor::Kubernetes),
            other => Err(format!("unknown executor: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchedulerSize {
    Small,
    Medium,
    Large,
}

impl SchedulerSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulerSize::Small => "SMALL",
            SchedulerSize::Medium => "MEDIUM",
            SchedulerSize::Large => "LARGE",
        }
    }
}

impl FromStr for SchedulerSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SMALL" => Ok(SchedulerSize::Small),
            "MEDIUM" => Ok(SchedulerSize::Medium),
            "LARGE" => Ok(SchedulerSize::Large),
            other => Err(format!("unknown scheduler size: {}", other)),
        }
    }
}
