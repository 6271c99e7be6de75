//! Resource kinds and their status tables

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Cluster status values reported by the control plane
pub mod cluster_status {
    pub const CREATING: &str = "CREATING";
    pub const CREATED: &str = "CREATED";
    pub const CREATE_FAILED: &str = "CREATE_FAILED";
    pub const UPDATING: &str = "UPDATING";
}

/// Deployment status values reported by the control plane
pub mod deployment_status {
    pub const CREATING: &str = "CREATING";
    pub const DEPLOYING: &str = "DEPLOYING";
    pub const HEALTHY: &str = "HEALTHY";
    pub const UNHEALTHY: &str = "UNHEALTHY";
    pub const UNKNOWN: &str = "UNKNOWN";
    pub const HIBERNATING: &str = "HIBERNATING";
}

/// Kind of remote entity managed by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Organization,
    Cluster,
    Deployment,
    Workspace,
}

/// Where a status sits in a kind's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Still processing a prior mutation
    Transient,
    /// Terminal and healthy; waiting is over
    Ready,
    /// Not healthy but not failed either; may still recover on its own
    Degraded,
    /// Terminal failure; no further progress without user action
    Failed,
    /// Not in the kind's table
    Unrecognized,
}

impl ResourceKind {
    /// Path segment of the kind's collection under an organization
    pub fn collection(&self) -> Option<&'static str> {
        match self {
            ResourceKind::Organization => None,
            ResourceKind::Cluster => Some("clusters"),
            ResourceKind::Deployment => Some("deployments"),
            ResourceKind::Workspace => Some("workspaces"),
        }
    }

    /// Whether resources of this kind report a lifecycle status at all
    pub fn has_status(&self) -> bool {
        matches!(self, ResourceKind::Cluster | ResourceKind::Deployment)
    }

    /// Classify a status string against this kind's table
    pub fn classify(&self, status: &str) -> StatusClass {
        let status = status.to_ascii_uppercase();
        match self {
            ResourceKind::Cluster => match status.as_str() {
                cluster_status::CREATING | cluster_status::UPDATING => StatusClass::Transient,
                cluster_status::CREATED => StatusClass::Ready,
                cluster_status::CREATE_FAILED => StatusClass::Failed,
                _ => StatusClass::Unrecognized,
            },
            ResourceKind::Deployment => match status.as_str() {
                deployment_status::CREATING | deployment_status::DEPLOYING => {
                    StatusClass::Transient
                }
                deployment_status::HEALTHY => StatusClass::Ready,
                deployment_status::UNHEALTHY
                | deployment_status::UNKNOWN
                | deployment_status::HIBERNATING => StatusClass::Degraded,
                _ => StatusClass::Unrecognized,
            },
            ResourceKind::Organization | ResourceKind::Workspace => StatusClass::Ready,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Organization => write!(f, "organization"),
            ResourceKind::Cluster => write!(f, "cluster"),
            ResourceKind::Deployment => write!(f, "deployment"),
            ResourceKind::Workspace => write!(f, "workspace"),
        }
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "organization" | "org" => Ok(ResourceKind::Organization),
            "cluster" => Ok(ResourceKind::Cluster),
            "deployment" => Ok(ResourceKind::Deployment),
            "workspace" => Ok(ResourceKind::Workspace),
            other => Err(format!("unknown resource kind: {}", other)),
        }
    }
}

/// Identifies one remote entity
///
/// The id is assigned by the control plane when a create succeeds and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub id: String,
    pub kind: ResourceKind,
    pub organization_id: String,
}

impl ResourceDescriptor {
    pub fn new(
        id: impl Into<String>,
        kind: ResourceKind,
        organization_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            organization_id: organization_id.into(),
        }
    }
}

impl std::fmt::Display for ResourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_status_table() {
        let kind = ResourceKind::Cluster;
        assert_eq!(kind.classify("CREATING"), StatusClass::Transient);
        assert_eq!(kind.classify("UPDATING"), StatusClass::Transient);
        assert_eq!(kind.classify("CREATED"), StatusClass::Ready);
        assert_eq!(kind.classify("CREATE_FAILED"), StatusClass::Failed);
        assert_eq!(kind.classify("DELETING"), StatusClass::Unrecognized);
    }

    #[test]
    fn test_deployment_status_table() {
        let kind = ResourceKind::Deployment;
        assert_eq!(kind.classify("CREATING"), StatusClass::Transient);
        assert_eq!(kind.classify("DEPLOYING"), StatusClass::Transient);
        assert_eq!(kind.classify("HEALTHY"), StatusClass::Ready);
        assert_eq!(kind.classify("healthy"), StatusClass::Ready);
        assert_eq!(kind.classify("UNHEALTHY"), StatusClass::Degraded);
        assert_eq!(kind.classify("UNKNOWN"), StatusClass::Degraded);
        assert_eq!(kind.classify("HIBERNATING"), StatusClass::Degraded);
    }

    #[test]
    fn test_statusless_kinds_are_ready() {
        assert!(!ResourceKind::Workspace.has_status());
        assert_eq!(ResourceKind::Workspace.classify(""), StatusClass::Ready);
    }

    #[test]
    fn test_kind_round_trip_through_str() {
        for kind in [
            ResourceKind::Organization,
            ResourceKind::Cluster,
            ResourceKind::Deployment,
            ResourceKind::Workspace,
        ] {
            assert_eq!(kind.to_string().parse::<ResourceKind>(), Ok(kind));
        }
        assert!("bucket".parse::<ResourceKind>().is_err());
    }
}
