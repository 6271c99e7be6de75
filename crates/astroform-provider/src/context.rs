//! Shared dependencies handed to every resource

use astroform_api::{ApiClient, ApiConfig};
use astroform_cloud::{ConvergencePolicy, ResourceKind, Result};
use astroform_config::ProviderSettings;

/// API client plus per-kind convergence policies
///
/// Built once by the host and cloned into each resource; there is no global
/// provider state.
#[derive(Debug, Clone)]
pub struct ProviderContext {
    client: ApiClient,
    cluster_policy: ConvergencePolicy,
    deployment_policy: ConvergencePolicy,
    workspace_policy: ConvergencePolicy,
}

impl ProviderContext {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            cluster_policy: ConvergencePolicy::for_kind(ResourceKind::Cluster),
            deployment_policy: ConvergencePolicy::for_kind(ResourceKind::Deployment),
            workspace_policy: ConvergencePolicy::for_kind(ResourceKind::Workspace),
        }
    }

    /// Build a client from resolved settings and apply poll overrides
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self> {
        let mut config = ApiConfig::new(&settings.token, &settings.organization_id);
        if let Some(api_url) = &settings.api_url {
            config = config.with_base_url(api_url);
        }
        if let Some(timeout) = settings.request_timeout {
            config = config.with_request_timeout(timeout);
        }

        let mut context = Self::new(ApiClient::new(config)?);
        if let Some(interval) = settings.poll.interval {
            context.cluster_policy = context.cluster_policy.with_interval(interval);
            context.deployment_policy = context.deployment_policy.with_interval(interval);
        }
        if let Some(timeout) = settings.poll.cluster_timeout {
            context.cluster_policy = context.cluster_policy.with_timeout(timeout);
        }
        if let Some(timeout) = settings.poll.deployment_timeout {
            context.deployment_policy = context.deployment_policy.with_timeout(timeout);
        }

        tracing::debug!(
            organization = %settings.organization_id,
            "Provider configured: {:?}",
            context.client
        );
        Ok(context)
    }

    pub fn with_policy(mut self, kind: ResourceKind, policy: ConvergencePolicy) -> Self {
        match kind {
            ResourceKind::Cluster => self.cluster_policy = policy,
            ResourceKind::Deployment => self.deployment_policy = policy,
            ResourceKind::Workspace => self.workspace_policy = policy,
            ResourceKind::Organization => {}
        }
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn organization_id(&self) -> &str {
        self.client.organization_id()
    }

    pub fn policy(&self, kind: ResourceKind) -> &ConvergencePolicy {
        match kind {
            ResourceKind::Cluster => &self.cluster_policy,
            ResourceKind::Deployment => &self.deployment_policy,
            ResourceKind::Workspace | ResourceKind::Organization => &self.workspace_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astroform_config::PollTiming;
    use std::time::Duration;

    fn settings() -> ProviderSettings {
        ProviderSettings {
            token: "token".to_string(),
            organization_id: "org-1".to_string(),
            api_url: Some("http://localhost:9000/organizations".to_string()),
            request_timeout: Some(Duration::from_secs(5)),
            poll: PollTiming {
                interval: Some(Duration::from_secs(3)),
                cluster_timeout: None,
                deployment_timeout: Some(Duration::from_secs(120)),
            },
        }
    }

    #[test]
    fn test_from_settings_applies_poll_overrides() {
        let context = ProviderContext::from_settings(&settings()).unwrap();
        assert_eq!(context.organization_id(), "org-1");

        let cluster = context.policy(ResourceKind::Cluster);
        assert_eq!(cluster.interval, Duration::from_secs(3));
        assert_eq!(cluster.timeout, Duration::from_secs(90 * 60));

        let deployment = context.policy(ResourceKind::Deployment);
        assert_eq!(deployment.interval, Duration::from_secs(3));
        assert_eq!(deployment.timeout, Duration::from_secs(120));

        assert_eq!(context.policy(ResourceKind::Workspace).timeout, Duration::ZERO);
    }

    #[test]
    fn test_with_policy_replaces_one_kind() {
        let context = ProviderContext::from_settings(&settings())
            .unwrap()
            .with_policy(
                ResourceKind::Cluster,
                ConvergencePolicy::default().with_max_attempts(2),
            );
        assert_eq!(context.policy(ResourceKind::Cluster).max_attempts, Some(2));
        assert_eq!(context.policy(ResourceKind::Deployment).max_attempts, None);
    }
}
