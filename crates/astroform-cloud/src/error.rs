//! Provider error types

use crate::kind::{ResourceDescriptor, ResourceKind};
use crate::operation::Operation;
use std::time::Duration;
use thiserror::Error;

/// Boxed source error for transport failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which call an error came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    pub operation: Operation,
    pub kind: ResourceKind,
    pub id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: Operation, kind: ResourceKind) -> Self {
        Self {
            operation,
            kind,
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} {} {}", self.operation, self.kind, id),
            None => write!(f, "{} {}", self.operation, self.kind),
        }
    }
}

/// Provider errors
///
/// `Transport`, `Api` and `Decode` come from a single request.
/// `ConvergenceTimeout`, `ConvergenceFailed` and `Cancelled` mean the
/// mutation itself was accepted but the resource never settled.
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Transport error during {context}: {source}")]
    Transport {
        context: ErrorContext,
        #[source]
        source: BoxError,
    },

    #[error("API error during {context} (HTTP {status}): {message}")]
    Api {
        context: ErrorContext,
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    #[error("Unable to decode response for {context}: {source}")]
    Decode {
        context: ErrorContext,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Timed out waiting for {descriptor} to converge: last status {last_status} after {attempts} re-fetches ({elapsed:?})"
    )]
    ConvergenceTimeout {
        descriptor: ResourceDescriptor,
        last_status: String,
        attempts: u32,
        elapsed: Duration,
    },

    #[error("{descriptor} reached failure status {status}{}", reason_suffix(.reason))]
    ConvergenceFailed {
        descriptor: ResourceDescriptor,
        status: String,
        reason: Option<String>,
    },

    #[error("Wait for {descriptor} was cancelled")]
    Cancelled { descriptor: ResourceDescriptor },

    #[error("Validation error: {0}")]
    Validation(String),
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason.as_deref() {
        Some(r) if !r.is_empty() => format!(" ({})", r),
        _ => String::new(),
    }
}

impl CloudError {
    /// The remote system answered 404 for this resource
    pub fn is_not_found(&self) -> bool {
        matches!(self, CloudError::Api { status: 404, .. })
    }

    /// The mutation was accepted but the wait for a terminal status did not finish
    pub fn is_convergence(&self) -> bool {
        matches!(
            self,
            CloudError::ConvergenceTimeout { .. }
                | CloudError::ConvergenceFailed { .. }
                | CloudError::Cancelled { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let ctx = ErrorContext::new(Operation::Read, ResourceKind::Cluster).with_id("clu-1");
        assert_eq!(ctx.to_string(), "get cluster clu-1");

        let ctx = ErrorContext::new(Operation::Create, ResourceKind::Deployment);
        assert_eq!(ctx.to_string(), "create deployment");
    }

    #[test]
    fn test_not_found() {
        let err = CloudError::Api {
            context: ErrorContext::new(Operation::Read, ResourceKind::Workspace),
            status: 404,
            message: "workspace not found".to_string(),
            request_id: None,
        };
        assert!(err.is_not_found());
        assert!(!err.is_convergence());

        let err = CloudError::Transport {
            context: ErrorContext::new(Operation::Read, ResourceKind::Workspace),
            source: "connection reset".into(),
        };
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_failed_message_includes_reason() {
        let err = CloudError::ConvergenceFailed {
            descriptor: ResourceDescriptor::new("clu-1", ResourceKind::Cluster, "org-1"),
            status: "CREATE_FAILED".to_string(),
            reason: Some("quota exceeded".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "cluster clu-1 reached failure status CREATE_FAILED (quota exceeded)"
        );
        assert!(err.is_convergence());
    }
}
