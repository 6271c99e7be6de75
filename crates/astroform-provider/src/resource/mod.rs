//! Resource lifecycle
//!
//! Each managed kind runs the same sequence: validate the plan, send one
//! mutation, wait for the remote status to settle, then reconcile the
//! converged representation back into the model. When convergence fails or
//! times out no model is returned and the host keeps its previous state.

mod cluster;
mod deployment;
mod organization;
mod workspace;

pub use cluster::ClusterResource;
pub use deployment::DeploymentResource;
pub use organization::OrganizationDataSource;
pub use workspace::WorkspaceResource;

use astroform_cloud::{CancellationToken, CloudError, ResourceKind, Result};
use async_trait::async_trait;

/// A declarative resource the host can create, read, update and delete
#[async_trait]
pub trait ManagedResource: Send + Sync {
    type Model: Send + Sync;

    fn kind(&self) -> ResourceKind;

    /// Create from a plan and return the converged model
    async fn create(&self, plan: &Self::Model, cancel: &CancellationToken) -> Result<Self::Model>;

    /// Refresh a held model; `None` means the resource no longer exists
    async fn read(&self, state: &Self::Model) -> Result<Option<Self::Model>>;

    /// Apply a plan carrying the id of an existing resource
    async fn update(&self, plan: &Self::Model, cancel: &CancellationToken) -> Result<Self::Model>;

    async fn delete(&self, state: &Self::Model) -> Result<()>;

    /// Adopt an existing resource by id
    async fn import(&self, id: &str) -> Result<Self::Model>;
}

/// Id of a held model, required for read/update/delete
pub(crate) fn model_id(kind: ResourceKind, id: &Option<String>) -> Result<&str> {
    match id.as_deref() {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(CloudError::Validation(format!("{} has no id", kind))),
    }
}

/// Turn a 404 on read into "gone"
pub(crate) fn gone_on_not_found<T>(
    kind: ResourceKind,
    id: &str,
    result: Result<T>,
) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => {
            tracing::warn!("{} {} not found, removing from state", kind, id);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn non_empty_option(value: &Option<String>) -> Option<String> {
    value.clone().filter(|v| !v.is_empty())
}
