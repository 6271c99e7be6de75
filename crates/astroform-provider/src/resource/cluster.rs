use super::{ManagedResource, gone_on_not_found, model_id, non_empty_option};
use crate::context::ProviderContext;
use crate::model::{ClusterModel, ClusterType, K8sTag, NodePoolModel};
use crate::reconcile::reconcile_cluster;
use crate::validate::validate_cluster;
use astroform_api::{
    ClusterApi, ClusterCreateRequest, ClusterTag, ClusterUpdateRequest, NodePoolRequest,
};
use astroform_cloud::{
    CancellationToken, ConvergencePolicy, ResourceApi, ResourceKind, Result, wait_for_terminal,
};
use async_trait::async_trait;

pub struct ClusterResource {
    api: ClusterApi,
    policy: ConvergencePolicy,
}

impl ClusterResource {
    pub fn new(context: &ProviderContext) -> Self {
        Self {
            api: context.client().clusters(),
            policy: context.policy(ResourceKind::Cluster).clone(),
        }
    }
}

#[async_trait]
impl ManagedResource for ClusterResource {
    type Model = ClusterModel;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Cluster
    }

    async fn create(
        &self,
        plan: &ClusterModel,
        cancel: &CancellationToken,
    ) -> Result<ClusterModel> {
        validate_cluster(plan)?;

        let created = self.api.create(&create_request(plan)).await?;
        tracing::info!("Created cluster {} ({})", created.id, created.status);

        let converged = wait_for_terminal(&self.api, created, &self.policy, cancel).await?;
        reconcile_cluster(Some(plan), &converged)
    }

    async fn read(&self, state: &ClusterModel) -> Result<Option<ClusterModel>> {
        let id = model_id(ResourceKind::Cluster, &state.id)?;
        match gone_on_not_found(ResourceKind::Cluster, id, self.api.get(id).await)? {
            Some(remote) => reconcile_cluster(Some(state), &remote).map(Some),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        plan: &ClusterModel,
        cancel: &CancellationToken,
    ) -> Result<ClusterModel> {
        let id = model_id(ResourceKind::Cluster, &plan.id)?;
        validate_cluster(plan)?;

        let updated = self.api.update(id, &update_request(plan)).await?;
        let converged = wait_for_terminal(&self.api, updated, &self.policy, cancel).await?;
        reconcile_cluster(Some(plan), &converged)
    }

    async fn delete(&self, state: &ClusterModel) -> Result<()> {
        let id = model_id(ResourceKind::Cluster, &state.id)?;
        self.api.delete(id).await
    }

    async fn import(&self, id: &str) -> Result<ClusterModel> {
        let remote = self.api.get(id).await?;
        reconcile_cluster(None, &remote)
    }
}

fn create_request(plan: &ClusterModel) -> ClusterCreateRequest {
    let hybrid = plan.cluster_type == ClusterType::Hybrid;
    ClusterCreateRequest {
        cloud_provider: plan.cloud_provider.as_str().to_string(),
        db_instance_type: hybrid
            .then(|| non_empty_option(&plan.db_instance_type))
            .flatten(),
        k8s_tags: tags(&plan.k8s_tags),
        name: plan.name.clone(),
        node_pools: node_pools(&plan.node_pools),
        provider_account: hybrid
            .then(|| non_empty_option(&plan.provider_account))
            .flatten(),
        region: plan.region.clone(),
        cluster_type: plan.cluster_type.as_str().to_string(),
        vpc_subnet_range: plan.vpc_subnet_range.clone(),
        workspace_ids: plan.workspace_ids.clone(),
    }
}

fn update_request(plan: &ClusterModel) -> ClusterUpdateRequest {
    let hybrid = plan.cluster_type == ClusterType::Hybrid;
    ClusterUpdateRequest {
        db_instance_type: hybrid
            .then(|| non_empty_option(&plan.db_instance_type))
            .flatten(),
        k8s_tags: tags(&plan.k8s_tags),
        name: plan.name.clone(),
        node_pools: node_pools(&plan.node_pools),
        workspace_ids: plan.workspace_ids.clone(),
    }
}

fn tags(tags: &[K8sTag]) -> Vec<ClusterTag> {
    tags.iter()
        .map(|t| ClusterTag {
            key: t.key.clone(),
            value: t.value.clone(),
        })
        .collect()
}

fn node_pools(pools: &[NodePoolModel]) -> Vec<NodePoolRequest> {
    pools
        .iter()
        .map(|p| NodePoolRequest {
            is_default: p.is_default,
            max_node_count: p.max_node_count,
            name: p.name.clone(),
            node_instance_type: p.node_instance_type.clone(),
        })
        .collect()
}
