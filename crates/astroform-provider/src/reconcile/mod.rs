//! Remote representation → declarative model
//!
//! Every function here is pure: it takes the previously held model (if any)
//! and the remote response, and returns the new model. Reconciling the same
//! response into its own output again yields the same model.

mod cluster;
mod deployment;
mod organization;
mod workspace;

pub use cluster::reconcile_cluster;
pub use deployment::reconcile_deployment;
pub use organization::reconcile_organization;
pub use workspace::reconcile_workspace;

use astroform_cloud::{CloudError, ErrorContext, Operation, ResourceKind, Result};
use std::str::FromStr;

/// Rebuild a list from `remote`, matching elements to `prior` by key
///
/// Elements whose key appears in `prior` come first, in prior order; the
/// rest follow in remote order. Each element is built from its remote
/// entry and the prior entry with the same key, if any. Prior entries with
/// no remote counterpart are dropped.
pub(crate) fn rebuild_keyed<P, R, M>(
    prior: &[P],
    remote: &[R],
    prior_key: impl Fn(&P) -> &str,
    remote_key: impl Fn(&R) -> &str,
    build: impl Fn(&R, Option<&P>) -> M,
) -> Vec<M> {
    let mut used = vec![false; remote.len()];
    let mut result = Vec::with_capacity(remote.len());

    for p in prior {
        let key = prior_key(p);
        let found = remote
            .iter()
            .enumerate()
            .find(|(i, r)| !used[*i] && remote_key(r) == key);
        if let Some((i, r)) = found {
            used[i] = true;
            result.push(build(r, Some(p)));
        }
    }

    for (i, r) in remote.iter().enumerate() {
        if !used[i] {
            result.push(build(r, None));
        }
    }

    result
}

/// Rebuild a plain string list, keeping prior order for known values
pub(crate) fn rebuild_strings(prior: &[String], remote: &[String]) -> Vec<String> {
    rebuild_keyed(prior, remote, |p| p.as_str(), |r| r.as_str(), |r, _| r.clone())
}

/// Value for a conditionally tracked field
///
/// Overwritten from remote when either side carries a non-empty value;
/// otherwise the prior value (set-but-empty or unset) is kept as is.
pub(crate) fn track_conditionally(prior: Option<&str>, remote: &str) -> Option<String> {
    let prior_set = prior.is_some_and(|p| !p.is_empty());
    if prior_set || !remote.is_empty() {
        Some(remote.to_string())
    } else {
        prior.map(str::to_string)
    }
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse a remote enum value, falling back to the prior model's value
pub(crate) fn parse_or_prior<T: FromStr<Err = String>>(
    kind: ResourceKind,
    id: &str,
    field: &str,
    remote: &str,
    prior: Option<T>,
) -> Result<T> {
    match remote.parse::<T>() {
        Ok(value) => Ok(value),
        Err(e) => match prior {
            Some(value) => {
                if !remote.is_empty() {
                    tracing::warn!("Ignoring {} of {} {}: {}", field, kind, id, e);
                }
                Ok(value)
            }
            None => Err(CloudError::Decode {
                context: ErrorContext::new(Operation::Read, kind).with_id(id),
                source: serde::de::Error::custom(format!("{}: {}", field, e)),
            }),
        },
    }
}
