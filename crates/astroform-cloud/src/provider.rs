//! Remote resource trait and convergence policy

use crate::error::Result;
use crate::kind::{ResourceDescriptor, ResourceKind};
use async_trait::async_trait;
use std::time::Duration;

/// Anything the control plane returns for a resource with a lifecycle
pub trait StatusReport {
    /// Remote-assigned identifier
    fn id(&self) -> &str;

    /// Current lifecycle status; `None` for kinds without one
    fn status(&self) -> Option<&str>;

    /// Free-form explanation attached to the status, if any
    fn status_reason(&self) -> Option<&str> {
        None
    }
}

/// Remote resource client abstraction
///
/// One implementation per resource kind. Every method performs exactly one
/// round-trip and never retries; retrying is the caller's decision.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    type CreateRequest: Send + Sync;
    type UpdateRequest: Send + Sync;
    type Response: StatusReport + Send;

    /// Kind served by this client
    fn kind(&self) -> ResourceKind;

    /// Organization all calls are scoped to
    fn organization_id(&self) -> &str;

    /// Fetch the current representation
    async fn get(&self, id: &str) -> Result<Self::Response>;

    /// Create a resource; the response carries the assigned id
    async fn create(&self, request: &Self::CreateRequest) -> Result<Self::Response>;

    /// Update an existing resource
    async fn update(&self, id: &str, request: &Self::UpdateRequest) -> Result<Self::Response>;

    /// Delete a resource
    async fn delete(&self, id: &str) -> Result<()>;

    fn descriptor(&self, id: &str) -> ResourceDescriptor {
        ResourceDescriptor::new(id, self.kind(), self.organization_id())
    }
}

/// Bounds for waiting on a resource to reach a terminal status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvergencePolicy {
    /// Constant delay between re-fetches
    pub interval: Duration,

    /// Overall wall-clock bound for the wait
    pub timeout: Duration,

    /// Optional cap on the number of re-fetches
    pub max_attempts: Option<u32>,

    /// Consecutive transport failures tolerated while re-fetching
    pub max_fetch_errors: u32,
}

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Shortest delay the poller will wait between re-fetches
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);
pub const CLUSTER_CONVERGENCE_TIMEOUT: Duration = Duration::from_secs(90 * 60);
pub const DEPLOYMENT_CONVERGENCE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

impl Default for ConvergencePolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEPLOYMENT_CONVERGENCE_TIMEOUT,
            max_attempts: None,
            max_fetch_errors: 3,
        }
    }
}

impl ConvergencePolicy {
    /// Default policy for a resource kind
    pub fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Cluster => Self::default().with_timeout(CLUSTER_CONVERGENCE_TIMEOUT),
            ResourceKind::Deployment => Self::default(),
            // No status lifecycle: the first response is already terminal.
            ResourceKind::Organization | ResourceKind::Workspace => {
                Self::default().with_timeout(Duration::ZERO)
            }
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_max_fetch_errors(mut self, max_fetch_errors: u32) -> Self {
        self.max_fetch_errors = max_fetch_errors;
        self
    }
}
