use super::{ManagedResource, gone_on_not_found, model_id};
use crate::context::ProviderContext;
use crate::model::WorkspaceModel;
use crate::reconcile::reconcile_workspace;
use crate::validate::validate_workspace;
use astroform_api::{WorkspaceApi, WorkspaceRequest};
use astroform_cloud::{
    CancellationToken, ConvergencePolicy, ResourceApi, ResourceKind, Result, wait_for_terminal,
};
use async_trait::async_trait;

pub struct WorkspaceResource {
    api: WorkspaceApi,
    policy: ConvergencePolicy,
}

impl WorkspaceResource {
    pub fn new(context: &ProviderContext) -> Self {
        Self {
            api: context.client().workspaces(),
            policy: context.policy(ResourceKind::Workspace).clone(),
        }
    }
}

#[async_trait]
impl ManagedResource for WorkspaceResource {
    type Model = WorkspaceModel;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Workspace
    }

    async fn create(
        &self,
        plan: &WorkspaceModel,
        cancel: &CancellationToken,
    ) -> Result<WorkspaceModel> {
        validate_workspace(plan)?;

        let created = self.api.create(&request(plan)).await?;
        // Workspaces have no status; this returns the response as is.
        let converged = wait_for_terminal(&self.api, created, &self.policy, cancel).await?;
        Ok(reconcile_workspace(Some(plan), &converged))
    }

    async fn read(&self, state: &WorkspaceModel) -> Result<Option<WorkspaceModel>> {
        let id = model_id(ResourceKind::Workspace, &state.id)?;
        let remote = gone_on_not_found(ResourceKind::Workspace, id, self.api.get(id).await)?;
        Ok(remote.map(|remote| reconcile_workspace(Some(state), &remote)))
    }

    async fn update(
        &self,
        plan: &WorkspaceModel,
        cancel: &CancellationToken,
    ) -> Result<WorkspaceModel> {
        let id = model_id(ResourceKind::Workspace, &plan.id)?;
        validate_workspace(plan)?;

        let updated = self.api.update(id, &request(plan)).await?;
        let converged = wait_for_terminal(&self.api, updated, &self.policy, cancel).await?;
        Ok(reconcile_workspace(Some(plan), &converged))
    }

    async fn delete(&self, state: &WorkspaceModel) -> Result<()> {
        let id = model_id(ResourceKind::Workspace, &state.id)?;
        self.api.delete(id).await
    }

    async fn import(&self, id: &str) -> Result<WorkspaceModel> {
        let remote = self.api.get(id).await?;
        Ok(reconcile_workspace(None, &remote))
    }
}

fn request(plan: &WorkspaceModel) -> WorkspaceRequest {
    WorkspaceRequest {
        cicd_enforced_default: plan.cicd_enforced_default,
        description: plan.description.clone(),
        name: plan.name.clone(),
    }
}
