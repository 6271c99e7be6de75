use super::{non_empty, parse_or_prior, rebuild_keyed, rebuild_strings};
use crate::model::{
    CloudProvider, ClusterMetadataModel, ClusterModel, ClusterType, K8sTag, NodePoolModel,
};
use astroform_api::{ClusterResponse, ClusterTag, NodePoolResponse};
use astroform_cloud::{ResourceKind, Result};

/// Reconcile a cluster response into its model
///
/// Network ranges are only kept for GCP, the tenant only for Azure, and the
/// database instance type and provider account only for hybrid clusters.
pub fn reconcile_cluster(
    prior: Option<&ClusterModel>,
    remote: &ClusterResponse,
) -> Result<ClusterModel> {
    let cloud_provider = parse_or_prior(
        ResourceKind::Cluster,
        &remote.id,
        "cloud_provider",
        &remote.cloud_provider,
        prior.map(|p| p.cloud_provider),
    )?;
    let cluster_type = parse_or_prior(
        ResourceKind::Cluster,
        &remote.id,
        "type",
        &remote.cluster_type,
        prior.map(|p| p.cluster_type),
    )?;

    let gcp = cloud_provider == CloudProvider::Gcp;
    let azure = cloud_provider == CloudProvider::Azure;
    let hybrid = cluster_type == ClusterType::Hybrid;

    let prior_tags = prior.map_or(&[][..], |p| &p.k8s_tags[..]);
    let prior_pools = prior.map_or(&[][..], |p| &p.node_pools[..]);
    let prior_workspaces = prior.map_or(&[][..], |p| &p.workspace_ids[..]);

    Ok(ClusterModel {
        id: Some(remote.id.clone()),
        cloud_provider,
        cluster_type,
        name: remote.name.clone(),
        region: remote.region.clone(),
        vpc_subnet_range: remote.vpc_subnet_range.clone(),
        db_instance_type: gated(hybrid, &remote.db_instance_type),
        provider_account: gated(hybrid, &remote.provider_account),
        k8s_tags: rebuild_keyed(
            prior_tags,
            &remote.tags,
            |p| p.key.as_str(),
            |r| r.key.as_str(),
            |r, _| tag(r),
        ),
        node_pools: rebuild_keyed(
            prior_pools,
            &remote.node_pools,
            |p| p.name.as_str(),
            |r| r.name.as_str(),
            |r, _| node_pool(r),
        ),
        workspace_ids: rebuild_strings(prior_workspaces, &remote.workspace_ids),
        organization_id: non_empty(&remote.organization_id),
        is_limited: Some(remote.is_limited),
        metadata: remote.metadata.as_ref().map(|m| ClusterMetadataModel {
            external_ips: m.external_ips.clone(),
            oidc_issuer_url: m.oidc_issuer_url.clone(),
        }),
        pod_subnet_range: gated(gcp, &remote.pod_subnet_range),
        service_peering_range: gated(gcp, &remote.service_peering_range),
        service_subnet_range: gated(gcp, &remote.service_subnet_range),
        tenant_id: gated(azure, &remote.tenant_id),
    })
}

fn gated(applies: bool, value: &Option<String>) -> Option<String> {
    if !applies {
        return None;
    }
    value.as_deref().and_then(non_empty)
}

fn tag(remote: &ClusterTag) -> K8sTag {
    K8sTag {
        key: remote.key.clone(),
        value: remote.value.clone(),
    }
}

fn node_pool(remote: &NodePoolResponse) -> NodePoolModel {
    NodePoolModel {
        name: remote.name.clone(),
        node_instance_type: remote.node_instance_type.clone(),
        max_node_count: remote.max_node_count,
        is_default: remote.is_default,
        id: non_empty(&remote.id),
        cluster_id: non_empty(&remote.cluster_id),
        cloud_provider: non_empty(&remote.cloud_provider),
        created_at: non_empty(&remote.created_at),
        updated_at: non_empty(&remote.updated_at),
        supported_astro_machines: remote.supported_astro_machines.clone(),
    }
}
