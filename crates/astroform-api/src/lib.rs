//! Astronomer platform client for astroform
//!
//! Implements the `ResourceApi` trait for clusters, deployments and
//! workspaces, plus read-only organization access, on top of the
//! `/platform/v1beta1/organizations` REST API.
//!
//! # Requirements
//!
//! - An API token (`ASTRONOMER_API_TOKEN`) with access to the organization
//!
//! # Example
//!
//! ```ignore
//! use astroform_api::{ApiClient, ApiConfig};
//! use astroform_cloud::{
//!     CancellationToken, ConvergencePolicy, ResourceApi, ResourceKind, wait_for_terminal,
//! };
//!
//! let client = ApiClient::new(ApiConfig::new(token, "org-id"))?;
//! let clusters = client.clusters();
//!
//! let created = clusters.create(&request).await?;
//! let policy = ConvergencePolicy::for_kind(ResourceKind::Cluster);
//! let ready = wait_for_terminal(&clusters, created, &policy, &CancellationToken::new()).await?;
//! ```

pub mod client;
pub mod cluster;
pub mod deployment;
pub mod organization;
pub mod user;
pub mod workspace;

pub use client::{ASTRONOMER_API_BASE, ApiClient, ApiConfig};
pub use cluster::{
    ClusterApi, ClusterCreateRequest, ClusterMetadata, ClusterResponse, ClusterTag,
    ClusterUpdateRequest, NodePoolRequest, NodePoolResponse,
};
pub use deployment::{
    DeploymentApi, DeploymentCreateRequest, DeploymentResponse, DeploymentUpdateRequest,
    EnvironmentVariableRequest, EnvironmentVariableResponse, WorkerQueue,
};
pub use organization::{ManagedDomain, OrganizationApi, OrganizationResponse};
pub use user::SubjectProfile;
pub use workspace::{WorkspaceApi, WorkspaceRequest, WorkspaceResponse};
