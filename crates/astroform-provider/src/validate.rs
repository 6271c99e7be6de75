//! Pre-flight checks on declarative models
//!
//! Runs before any request is sent. All violations found in a model are
//! reported together in one `Validation` error.

use crate::model::{
    CloudProvider, ClusterModel, ClusterType, DeploymentModel, Executor, WorkspaceModel,
};
use astroform_cloud::{CloudError, Result};
use std::collections::HashSet;

pub fn validate_cluster(model: &ClusterModel) -> Result<()> {
    let mut errors = Vec::new();

    if model.name.trim().is_empty() {
        errors.push("name must not be empty".to_string());
    }

    let hybrid = model.cluster_type == ClusterType::Hybrid;
    for (field, value) in [
        ("db_instance_type", &model.db_instance_type),
        ("provider_account", &model.provider_account),
    ] {
        let set = value.as_deref().is_some_and(|v| !v.is_empty());
        if hybrid && !set {
            errors.push(format!("{} is required for HYBRID clusters", field));
        }
        if !hybrid && set {
            errors.push(format!("{} is only allowed for HYBRID clusters", field));
        }
    }

    if model.cloud_provider != CloudProvider::Gcp {
        for (field, value) in [
            ("pod_subnet_range", &model.pod_subnet_range),
            ("service_peering_range", &model.service_peering_range),
            ("service_subnet_range", &model.service_subnet_range),
        ] {
            if value.is_some() {
                errors.push(format!("{} is only allowed for GCP clusters", field));
            }
        }
    }
    if model.cloud_provider != CloudProvider::Azure && model.tenant_id.is_some() {
        errors.push("tenant_id is only allowed for AZURE clusters".to_string());
    }

    if let Some(name) = first_duplicate(model.node_pools.iter().map(|p| p.name.as_str())) {
        errors.push(format!("duplicate node pool name: {}", name));
    }
    if let Some(key) = first_duplicate(model.k8s_tags.iter().map(|t| t.key.as_str())) {
        errors.push(format!("duplicate k8s tag key: {}", key));
    }

    finish(errors)
}

pub fn validate_deployment(model: &DeploymentModel) -> Result<()> {
    let mut errors = Vec::new();

    if model.name.trim().is_empty() {
        errors.push("name must not be empty".to_string());
    }
    if model.workspace_id.is_empty() {
        errors.push("workspace_id must not be empty".to_string());
    }

    let has_cluster = model.cluster_id.as_deref().is_some_and(|c| !c.is_empty());
    let has_region = model.region.as_deref().is_some_and(|r| !r.is_empty());
    if !has_cluster && model.cloud_provider.is_none() {
        errors.push("cluster_id or cloud_provider must be specified".to_string());
    }
    if !has_cluster && has_region && model.cloud_provider.is_none() {
        errors.push("region requires cloud_provider when cluster_id is not set".to_string());
    }

    if model.executor == Executor::Celery {
        if model.worker_queues.is_empty() {
            errors.push(
                "must provide at least one default worker queue when using CELERY executor"
                    .to_string(),
            );
        } else if !model.worker_queues.iter().any(|q| q.is_default) {
            errors.push("exactly one worker queue must be marked is_default".to_string());
        }
    }
    if model.worker_queues.iter().filter(|q| q.is_default).count() > 1 {
        errors.push("only one worker queue may be marked is_default".to_string());
    }

    if let Some(name) = first_duplicate(model.worker_queues.iter().map(|q| q.name.as_str())) {
        errors.push(format!("duplicate worker queue name: {}", name));
    }
    if let Some(key) = first_duplicate(model.environment_variables.iter().map(|v| v.key.as_str()))
    {
        errors.push(format!("duplicate environment variable key: {}", key));
    }

    finish(errors)
}

pub fn validate_workspace(model: &WorkspaceModel) -> Result<()> {
    let mut errors = Vec::new();
    if model.name.trim().is_empty() {
        errors.push("name must not be empty".to_string());
    }
    finish(errors)
}

fn first_duplicate<'a>(keys: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    keys.into_iter().find(|key| !seen.insert(*key))
}

fn finish(errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CloudError::Validation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        DeploymentType, EnvironmentVariableModel, NodePoolModel, SchedulerSize, WorkerQueueModel,
    };

    fn cluster() -> ClusterModel {
        ClusterModel {
            id: None,
            cloud_provider: CloudProvider::Aws,
            cluster_type: ClusterType::Dedicated,
            name: "prod".to_string(),
            region: "us-east-1".to_string(),
            vpc_subnet_range: "172.20.0.0/20".to_string(),
            db_instance_type: None,
            provider_account: None,
            k8s_tags: vec![],
            node_pools: vec![],
            workspace_ids: vec![],
            organization_id: None,
            is_limited: None,
            metadata: None,
            pod_subnet_range: None,
            service_peering_range: None,
            service_subnet_range: None,
            tenant_id: None,
        }
    }

    fn deployment() -> DeploymentModel {
        DeploymentModel {
            id: None,
            name: "etl".to_string(),
            description: String::new(),
            workspace_id: "ws-1".to_string(),
            astro_runtime_version: "9.1.0".to_string(),
            deployment_type: DeploymentType::Standard,
            executor: Executor::Kubernetes,
            scheduler_size: SchedulerSize::Small,
            cloud_provider: Some(CloudProvider::Aws),
            cluster_id: None,
            region: Some("us-east-1".to_string()),
            default_task_pod_cpu: String::new(),
            default_task_pod_memory: String::new(),
            resource_quota_cpu: String::new(),
            resource_quota_memory: String::new(),
            is_cicd_enforced: false,
            is_dag_deploy_enforced: false,
            is_high_availability: false,
            contact_emails: vec![],
            worker_queues: vec![],
            environment_variables: vec![],
            workload_identity: None,
            external_ips: vec![],
        }
    }

    fn queue(name: &str, is_default: bool) -> WorkerQueueModel {
        WorkerQueueModel {
            name: name.to_string(),
            is_default,
            max_worker_count: 10,
            min_worker_count: 0,
            worker_concurrency: 16,
            ..Default::default()
        }
    }

    fn message(result: Result<()>) -> String {
        match result {
            Err(CloudError::Validation(message)) => message,
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_models_pass() {
        assert!(validate_cluster(&cluster()).is_ok());
        assert!(validate_deployment(&deployment()).is_ok());
        assert!(
            validate_workspace(&WorkspaceModel {
                name: "analytics".to_string(),
                ..Default::default()
            })
            .is_ok()
        );
    }

    #[test]
    fn test_hybrid_cluster_requires_account_fields() {
        let mut model = cluster();
        model.cluster_type = ClusterType::Hybrid;

        let message = message(validate_cluster(&model));
        assert!(message.contains("db_instance_type is required"));
        assert!(message.contains("provider_account is required"));
        assert!(message.contains("; "));
    }

    #[test]
    fn test_provider_specific_cluster_fields() {
        let mut model = cluster();
        model.pod_subnet_range = Some("172.21.0.0/19".to_string());
        model.tenant_id = Some("tenant".to_string());
        model.db_instance_type = Some("db.m6g.large".to_string());

        let message = message(validate_cluster(&model));
        assert!(message.contains("pod_subnet_range is only allowed for GCP"));
        assert!(message.contains("tenant_id is only allowed for AZURE"));
        assert!(message.contains("db_instance_type is only allowed for HYBRID"));

        model.cloud_provider = CloudProvider::Gcp;
        model.tenant_id = None;
        model.db_instance_type = None;
        assert!(validate_cluster(&model).is_ok());
    }

    #[test]
    fn test_duplicate_node_pools() {
        let mut model = cluster();
        let pool = NodePoolModel {
            name: "default".to_string(),
            node_instance_type: "m5.xlarge".to_string(),
            max_node_count: 20,
            ..Default::default()
        };
        model.node_pools = vec![pool.clone(), pool];

        assert!(message(validate_cluster(&model)).contains("duplicate node pool name: default"));
    }

    #[test]
    fn test_deployment_needs_placement() {
        let mut model = deployment();
        model.cloud_provider = None;

        let message = message(validate_deployment(&model));
        assert!(message.contains("cluster_id or cloud_provider must be specified"));
        assert!(message.contains("region requires cloud_provider"));

        let mut model = deployment();
        model.cloud_provider = None;
        model.region = None;
        model.cluster_id = Some("clu-1".to_string());
        assert!(validate_deployment(&model).is_ok());
    }

    #[test]
    fn test_celery_needs_default_queue() {
        let mut model = deployment();
        model.executor = Executor::Celery;
        assert!(
            message(validate_deployment(&model))
                .starts_with("must provide at least one default worker queue")
        );

        model.worker_queues = vec![queue("high-mem", false)];
        assert!(message(validate_deployment(&model)).contains("must be marked is_default"));

        model.worker_queues = vec![queue("default", true), queue("high-mem", false)];
        assert!(validate_deployment(&model).is_ok());
    }

    #[test]
    fn test_duplicate_keys_in_deployment() {
        let mut model = deployment();
        model.worker_queues = vec![queue("default", true), queue("default", false)];
        model.environment_variables = vec![
            EnvironmentVariableModel {
                key: "MODE".to_string(),
                value: "a".to_string(),
                ..Default::default()
            },
            EnvironmentVariableModel {
                key: "MODE".to_string(),
                value: "b".to_string(),
                ..Default::default()
            },
        ];

        let message = message(validate_deployment(&model));
        assert!(message.contains("duplicate worker queue name: default"));
        assert!(message.contains("duplicate environment variable key: MODE"));
    }

    #[test]
    fn test_workspace_needs_name() {
        let message = message(validate_workspace(&WorkspaceModel::default()));
        assert_eq!(message, "name must not be empty");
    }
}
