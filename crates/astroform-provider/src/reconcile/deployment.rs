use super::{non_empty, parse_or_prior, rebuild_keyed, rebuild_strings, track_conditionally};
use crate::model::{CloudProvider, DeploymentModel, EnvironmentVariableModel, WorkerQueueModel};
use astroform_api::{DeploymentResponse, EnvironmentVariableResponse, WorkerQueue};
use astroform_cloud::{ResourceKind, Result};

/// Reconcile a deployment response into its model
///
/// `cluster_id` and `region` are tracked only once either side has a value;
/// an unset field stays unset while the platform reports nothing for it.
/// Secret environment variables keep their prior value, which the platform
/// never returns.
pub fn reconcile_deployment(
    prior: Option<&DeploymentModel>,
    remote: &DeploymentResponse,
) -> Result<DeploymentModel> {
    let id = remote.id.as_str();
    let kind = ResourceKind::Deployment;

    let deployment_type = parse_or_prior(
        kind,
        id,
        "type",
        &remote.deployment_type,
        prior.map(|p| p.deployment_type),
    )?;
    let executor = parse_or_prior(
        kind,
        id,
        "executor",
        &remote.executor,
        prior.map(|p| p.executor),
    )?;
    let scheduler_size = parse_or_prior(
        kind,
        id,
        "scheduler_size",
        &remote.scheduler_size,
        prior.map(|p| p.scheduler_size),
    )?;
    let cloud_provider = match remote.cloud_provider.parse::<CloudProvider>() {
        Ok(provider) => Some(provider),
        Err(_) => prior.and_then(|p| p.cloud_provider),
    };

    let astro_runtime_version = match non_empty(&remote.runtime_version) {
        Some(version) => version,
        None => prior.map(|p| p.astro_runtime_version.clone()).unwrap_or_default(),
    };

    let prior_queues = prior.map_or(&[][..], |p| &p.worker_queues[..]);
    let prior_variables = prior.map_or(&[][..], |p| &p.environment_variables[..]);
    let prior_emails = prior.map_or(&[][..], |p| &p.contact_emails[..]);

    Ok(DeploymentModel {
        id: Some(remote.id.clone()),
        name: remote.name.clone(),
        description: remote.description.clone(),
        workspace_id: remote.workspace_id.clone(),
        astro_runtime_version,
        deployment_type,
        executor,
        scheduler_size,
        cloud_provider,
        cluster_id: track_conditionally(
            prior.and_then(|p| p.cluster_id.as_deref()),
            &remote.cluster_id,
        ),
        region: track_conditionally(prior.and_then(|p| p.region.as_deref()), &remote.region),
        default_task_pod_cpu: remote.default_task_pod_cpu.clone(),
        default_task_pod_memory: remote.default_task_pod_memory.clone(),
        resource_quota_cpu: remote.resource_quota_cpu.clone(),
        resource_quota_memory: remote.resource_quota_memory.clone(),
        is_cicd_enforced: remote.is_cicd_enforced,
        is_dag_deploy_enforced: remote.is_dag_deploy_enabled,
        is_high_availability: remote.is_high_availability,
        contact_emails: rebuild_strings(prior_emails, &remote.contact_emails),
        worker_queues: rebuild_keyed(
            prior_queues,
            &remote.worker_queues,
            |p| p.name.as_str(),
            |r| r.name.as_str(),
            |r, _| worker_queue(r),
        ),
        environment_variables: rebuild_keyed(
            prior_variables,
            &remote.environment_variables,
            |p| p.key.as_str(),
            |r| r.key.as_str(),
            environment_variable,
        ),
        workload_identity: non_empty(&remote.workload_identity),
        external_ips: remote.external_ips.clone(),
    })
}

fn worker_queue(remote: &WorkerQueue) -> WorkerQueueModel {
    WorkerQueueModel {
        name: remote.name.clone(),
        astro_machine: non_empty(&remote.astro_machine),
        is_default: remote.is_default,
        max_worker_count: remote.max_worker_count,
        min_worker_count: remote.min_worker_count,
        worker_concurrency: remote.worker_concurrency,
        id: non_empty(&remote.id),
        node_pool_id: non_empty(&remote.node_pool_id),
        pod_cpu: non_empty(&remote.pod_cpu),
        pod_memory: non_empty(&remote.pod_memory),
    }
}

fn environment_variable(
    remote: &EnvironmentVariableResponse,
    prior: Option<&EnvironmentVariableModel>,
) -> EnvironmentVariableModel {
    let is_secret = remote.is_secret || prior.is_some_and(|p| p.is_secret);
    let value = match prior {
        Some(prior) if is_secret => prior.value.clone(),
        _ => remote.value.clone().unwrap_or_default(),
    };

    EnvironmentVariableModel {
        key: remote.key.clone(),
        value,
        is_secret,
        updated_at: non_empty(&remote.updated_at),
    }
}
