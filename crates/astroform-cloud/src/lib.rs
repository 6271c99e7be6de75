//! astroform cloud abstraction
//!
//! Shared vocabulary for the Astronomer provider: resource kinds and their
//! status tables, the error taxonomy, the `ResourceApi` trait implemented by
//! the REST client, and the convergence poller that waits for a mutated
//! resource to settle.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │               astroform-provider                 │
//! │   validate → mutate → converge → reconcile       │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                astroform-cloud                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait ResourceApi { get/create/... }     │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │ Status table │  │    Poller    │            │
//! │  └──────────────┘  └──────────────┘            │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//!           ┌───────▼───────┐
//!           │ astroform-api │
//!           │ (reqwest)     │
//!           └───────────────┘
//! ```

pub mod error;
pub mod kind;
pub mod operation;
pub mod poller;
pub mod provider;

// Re-exports
pub use error::{BoxError, CloudError, ErrorContext, Result};
pub use kind::{ResourceDescriptor, ResourceKind, StatusClass};
pub use operation::Operation;
pub use poller::wait_for_terminal;
pub use provider::{ConvergencePolicy, ResourceApi, StatusReport};
pub use tokio_util::sync::CancellationToken;
