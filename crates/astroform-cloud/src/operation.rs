//! Operation names used in error context and logs

use serde::{Deserialize, Serialize};

/// A single call against the control plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Create a new resource
    Create,
    /// Fetch a single resource
    Read,
    /// Update an existing resource
    Update,
    /// Delete a resource
    Delete,
    /// List resources in a collection
    List,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "get"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
            Operation::List => write!(f, "list"),
        }
    }
}
