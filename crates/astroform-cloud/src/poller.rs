//! Status convergence
//!
//! After a create or update the control plane usually answers with a
//! transient status (`CREATING`, `DEPLOYING`, ...). The poller re-fetches the
//! resource at a constant interval until its status is terminal for the
//! kind, bounded by the policy's timeout and attempt cap. Neither the sleep
//! nor a hanging re-fetch may run past the timeout.

use crate::error::{CloudError, Result};
use crate::kind::StatusClass;
use crate::provider::{ConvergencePolicy, MIN_POLL_INTERVAL, ResourceApi, StatusReport};
use tokio::time::{Instant, sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Wait until `initial` (fresh from a create or update) reaches a terminal status
///
/// # Returns
/// * `Ok(response)` - the first response whose status is ready for the kind
/// * `Err(CloudError::ConvergenceFailed)` - a failure-terminal status was observed
/// * `Err(CloudError::ConvergenceTimeout)` - the timeout or attempt cap was hit
/// * `Err(CloudError::Cancelled)` - `cancel` fired while waiting
/// * any re-fetch error other than a tolerated transport failure
pub async fn wait_for_terminal<A>(
    api: &A,
    initial: A::Response,
    policy: &ConvergencePolicy,
    cancel: &CancellationToken,
) -> Result<A::Response>
where
    A: ResourceApi + ?Sized,
{
    let kind = api.kind();
    let descriptor = api.descriptor(initial.id());
    let id = descriptor.id.clone();
    let started = Instant::now();
    let interval = policy.interval.max(MIN_POLL_INTERVAL);
    let mut current = initial;
    let mut attempts: u32 = 0;
    let mut fetch_errors: u32 = 0;

    loop {
        let status = current.status().unwrap_or_default().to_string();
        let class = if kind.has_status() {
            kind.classify(&status)
        } else {
            StatusClass::Ready
        };

        match class {
            StatusClass::Ready => {
                if attempts > 0 {
                    info!(resource = %descriptor, %status, attempts, "Resource converged");
                }
                return Ok(current);
            }
            StatusClass::Failed => {
                warn!(resource = %descriptor, %status, "Resource reached a failure status");
                return Err(CloudError::ConvergenceFailed {
                    descriptor,
                    status,
                    reason: current.status_reason().map(str::to_string),
                });
            }
            StatusClass::Degraded => {
                debug!(resource = %descriptor, %status, "Resource degraded, still waiting");
            }
            StatusClass::Unrecognized => {
                warn!(resource = %descriptor, %status, "Unrecognized status, still waiting");
            }
            StatusClass::Transient => {
                debug!(resource = %descriptor, %status, attempts, "Waiting for resource");
            }
        }

        let elapsed = started.elapsed();
        let attempts_exhausted = policy.max_attempts.is_some_and(|max| attempts >= max);
        if elapsed >= policy.timeout || attempts_exhausted {
            return Err(CloudError::ConvergenceTimeout {
                descriptor,
                last_status: status,
                attempts,
                elapsed,
            });
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CloudError::Cancelled { descriptor }),
            _ = sleep(interval.min(policy.timeout - elapsed)) => {}
        }

        attempts += 1;
        let remaining = policy.timeout.saturating_sub(started.elapsed());
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CloudError::Cancelled { descriptor }),
            fetched = timeout(remaining, api.get(&id)) => fetched,
        };
        let Ok(fetched) = fetched else {
            warn!(resource = %descriptor, attempts, "Re-fetch still pending at the deadline");
            return Err(CloudError::ConvergenceTimeout {
                descriptor,
                last_status: status,
                attempts,
                elapsed: started.elapsed(),
            });
        };

        match fetched {
            Ok(next) => {
                fetch_errors = 0;
                current = next;
            }
            Err(e @ CloudError::Transport { .. }) if fetch_errors < policy.max_fetch_errors => {
                fetch_errors += 1;
                warn!(
                    resource = %descriptor,
                    error = %e,
                    fetch_errors,
                    "Re-fetch failed, retrying with the last known status"
                );
            }
            Err(e) => return Err(e),
        }
    }
}
