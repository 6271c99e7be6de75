use super::non_empty;
use crate::model::WorkspaceModel;
use astroform_api::WorkspaceResponse;

pub fn reconcile_workspace(
    _prior: Option<&WorkspaceModel>,
    remote: &WorkspaceResponse,
) -> WorkspaceModel {
    WorkspaceModel {
        id: Some(remote.id.clone()),
        name: remote.name.clone(),
        description: remote.description.clone(),
        cicd_enforced_default: remote.cicd_enforced_default,
        organization_id: non_empty(&remote.organization_id),
    }
}
