use super::{ManagedResource, gone_on_not_found, model_id, non_empty_option};
use crate::context::ProviderContext;
use crate::model::{DeploymentModel, EnvironmentVariableModel, WorkerQueueModel};
use crate::reconcile::reconcile_deployment;
use crate::validate::validate_deployment;
use astroform_api::{
    DeploymentApi, DeploymentCreateRequest, DeploymentUpdateRequest, EnvironmentVariableRequest,
    WorkerQueue,
};
use astroform_cloud::{
    CancellationToken, ConvergencePolicy, ResourceApi, ResourceKind, Result, wait_for_terminal,
};
use async_trait::async_trait;

pub struct DeploymentResource {
    api: DeploymentApi,
    policy: ConvergencePolicy,
}

impl DeploymentResource {
    pub fn new(context: &ProviderContext) -> Self {
        Self {
            api: context.client().deployments(),
            policy: context.policy(ResourceKind::Deployment).clone(),
        }
    }
}

#[async_trait]
impl ManagedResource for DeploymentResource {
    type Model = DeploymentModel;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Deployment
    }

    async fn create(
        &self,
        plan: &DeploymentModel,
        cancel: &CancellationToken,
    ) -> Result<DeploymentModel> {
        validate_deployment(plan)?;

        let created = self.api.create(&create_request(plan)).await?;
        tracing::info!("Created deployment {} ({})", created.id, created.status);

        let converged = wait_for_terminal(&self.api, created, &self.policy, cancel).await?;
        reconcile_deployment(Some(plan), &converged)
    }

    async fn read(&self, state: &DeploymentModel) -> Result<Option<DeploymentModel>> {
        let id = model_id(ResourceKind::Deployment, &state.id)?;
        match gone_on_not_found(ResourceKind::Deployment, id, self.api.get(id).await)? {
            Some(remote) => reconcile_deployment(Some(state), &remote).map(Some),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        plan: &DeploymentModel,
        cancel: &CancellationToken,
    ) -> Result<DeploymentModel> {
        let id = model_id(ResourceKind::Deployment, &plan.id)?;
        validate_deployment(plan)?;

        let updated = self.api.update(id, &update_request(plan)).await?;
        let converged = wait_for_terminal(&self.api, updated, &self.policy, cancel).await?;
        reconcile_deployment(Some(plan), &converged)
    }

    async fn delete(&self, state: &DeploymentModel) -> Result<()> {
        let id = model_id(ResourceKind::Deployment, &state.id)?;
        self.api.delete(id).await
    }

    async fn import(&self, id: &str) -> Result<DeploymentModel> {
        let remote = self.api.get(id).await?;
        reconcile_deployment(None, &remote)
    }
}

fn create_request(plan: &DeploymentModel) -> DeploymentCreateRequest {
    DeploymentCreateRequest {
        astro_runtime_version: plan.astro_runtime_version.clone(),
        cloud_provider: plan.cloud_provider.map(|p| p.as_str().to_string()),
        cluster_id: non_empty_option(&plan.cluster_id),
        contact_emails: plan.contact_emails.clone(),
        default_task_pod_cpu: plan.default_task_pod_cpu.clone(),
        default_task_pod_memory: plan.default_task_pod_memory.clone(),
        description: plan.description.clone(),
        environment_variables: environment_variables(&plan.environment_variables),
        executor: plan.executor.as_str().to_string(),
        is_cicd_enforced: plan.is_cicd_enforced,
        is_dag_deploy_enabled: plan.is_dag_deploy_enforced,
        is_high_availability: plan.is_high_availability,
        name: plan.name.clone(),
        region: non_empty_option(&plan.region),
        resource_quota_cpu: plan.resource_quota_cpu.clone(),
        resource_quota_memory: plan.resource_quota_memory.clone(),
        scheduler_size: plan.scheduler_size.as_str().to_string(),
        deployment_type: plan.deployment_type.as_str().to_string(),
        worker_queues: worker_queues(&plan.worker_queues),
        workspace_id: plan.workspace_id.clone(),
    }
}

fn update_request(plan: &DeploymentModel) -> DeploymentUpdateRequest {
    DeploymentUpdateRequest {
        contact_emails: plan.contact_emails.clone(),
        default_task_pod_cpu: plan.default_task_pod_cpu.clone(),
        default_task_pod_memory: plan.default_task_pod_memory.clone(),
        description: plan.description.clone(),
        environment_variables: environment_variables(&plan.environment_variables),
        executor: plan.executor.as_str().to_string(),
        is_cicd_enforced: plan.is_cicd_enforced,
        is_dag_deploy_enabled: plan.is_dag_deploy_enforced,
        is_high_availability: plan.is_high_availability,
        name: plan.name.clone(),
        resource_quota_cpu: plan.resource_quota_cpu.clone(),
        resource_quota_memory: plan.resource_quota_memory.clone(),
        scheduler_size: plan.scheduler_size.as_str().to_string(),
        deployment_type: Some(plan.deployment_type.as_str().to_string()),
        worker_queues: worker_queues(&plan.worker_queues),
        workload_identity: non_empty_option(&plan.workload_identity),
        workspace_id: plan.workspace_id.clone(),
    }
}

fn environment_variables(
    variables: &[EnvironmentVariableModel],
) -> Vec<EnvironmentVariableRequest> {
    variables
        .iter()
        .map(|v| EnvironmentVariableRequest {
            is_secret: v.is_secret,
            key: v.key.clone(),
            value: v.value.clone(),
        })
        .collect()
}

/// Existing queues are addressed by id so the platform updates them in place
fn worker_queues(queues: &[WorkerQueueModel]) -> Vec<WorkerQueue> {
    queues
        .iter()
        .map(|q| WorkerQueue {
            astro_machine: q.astro_machine.clone().unwrap_or_default(),
            id: q.id.clone().unwrap_or_default(),
            is_default: q.is_default,
            max_worker_count: q.max_worker_count,
            min_worker_count: q.min_worker_count,
            name: q.name.clone(),
            node_pool_id: q.node_pool_id.clone().unwrap_or_default(),
            worker_concurrency: q.worker_concurrency,
            ..Default::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CloudProvider, DeploymentType, Executor, SchedulerSize};

    fn plan() -> DeploymentModel {
        DeploymentModel {
            id: Some("dep-1".to_string()),
            name: "etl".to_string(),
            description: "nightly".to_string(),
            workspace_id: "ws-1".to_string(),
            astro_runtime_version: "9.1.0".to_string(),
            deployment_type: DeploymentType::Standard,
            executor: Executor::Celery,
            scheduler_size: SchedulerSize::Medium,
            cloud_provider: Some(CloudProvider::Gcp),
            cluster_id: Some(String::new()),
            region: Some("us-central1".to_string()),
            default_task_pod_cpu: "0.25".to_string(),
            default_task_pod_memory: "0.5Gi".to_string(),
            resource_quota_cpu: "10".to_string(),
            resource_quota_memory: "20Gi".to_string(),
            is_cicd_enforced: true,
            is_dag_deploy_enforced: true,
            is_high_availability: false,
            contact_emails: vec!["ops@example.com".to_string()],
            worker_queues: vec![WorkerQueueModel {
                name: "default".to_string(),
                astro_machine: Some("A5".to_string()),
                is_default: true,
                max_worker_count: 10,
                min_worker_count: 1,
                worker_concurrency: 16,
                id: Some("wq-1".to_string()),
                pod_cpu: Some("1".to_string()),
                ..Default::default()
            }],
            environment_variables: vec![EnvironmentVariableModel {
                key: "API_KEY".to_string(),
                value: "s3cret".to_string(),
                is_secret: true,
                updated_at: None,
            }],
            workload_identity: None,
            external_ips: vec![],
        }
    }

    #[test]
    fn test_create_request_from_plan() {
        let request = create_request(&plan());
        assert_eq!(request.cloud_provider.as_deref(), Some("GCP"));
        assert_eq!(request.cluster_id, None);
        assert_eq!(request.region.as_deref(), Some("us-central1"));
        assert_eq!(request.executor, "CELERY");
        assert_eq!(request.scheduler_size, "MEDIUM");
        assert_eq!(request.deployment_type, "STANDARD");
        assert!(request.is_dag_deploy_enabled);
        assert_eq!(request.environment_variables[0].value, "s3cret");
    }

    #[test]
    fn test_update_request_sends_secret_values_and_queue_ids() {
        let request = update_request(&plan());
        assert_eq!(request.environment_variables[0].value, "s3cret");
        assert!(request.environment_variables[0].is_secret);
        assert_eq!(request.worker_queues[0].id, "wq-1");
        assert_eq!(request.worker_queues[0].pod_cpu, "");
        assert_eq!(request.deployment_type.as_deref(), Some("STANDARD"));
    }

    #[test]
    fn test_requests_size_scheduler_by_name_only() {
        let create = serde_json::to_value(create_request(&plan())).unwrap();
        let update = serde_json::to_value(update_request(&plan())).unwrap();
        for body in [create, update] {
            assert_eq!(body["schedulerSize"], "MEDIUM");
            assert!(body.get("scheduler").is_none());
        }
    }
}
