//! Astronomer resources for astroform
//!
//! Declarative models for clusters, deployments, workspaces and
//! organizations, and the lifecycle that keeps them in step with the
//! platform:
//!
//! ```text
//! plan ──validate──▶ request ──ResourceApi──▶ response
//!                                               │
//!                                      wait_for_terminal
//!                                               │
//! model ◀──────────── reconcile(prior, converged)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use astroform_provider::{ClusterResource, ManagedResource, ProviderContext};
//!
//! let context = ProviderContext::from_settings(&settings)?;
//! let clusters = ClusterResource::new(&context);
//! let model = clusters.create(&plan, &CancellationToken::new()).await?;
//! ```

pub mod context;
pub mod model;
pub mod reconcile;
pub mod resource;
pub mod validate;

pub use context::ProviderContext;
pub use model::{
    CloudProvider, ClusterModel, ClusterType, DeploymentModel, DeploymentType, Executor,
    OrganizationModel, SchedulerSize, WorkspaceModel,
};
pub use resource::{
    ClusterResource, DeploymentResource, ManagedResource, OrganizationDataSource,
    WorkspaceResource,
};
