use crate::model::{ManagedDomainModel, OrganizationModel};
use astroform_api::OrganizationResponse;

/// Organizations are read-only, so there is never a prior model
pub fn reconcile_organization(remote: &OrganizationResponse) -> OrganizationModel {
    OrganizationModel {
        id: remote.id.clone(),
        name: remote.name.clone(),
        billing_email: remote.billing_email.clone(),
        status: remote.status.clone(),
        product: remote.product.clone(),
        payment_method: remote.payment_method.clone(),
        support_plan: remote.support_plan.clone(),
        is_scim_enabled: remote.is_scim_enabled,
        trial_expires_at: remote.trial_expires_at.clone(),
        created_at: remote.created_at.clone(),
        updated_at: remote.updated_at.clone(),
        managed_domains: remote
            .managed_domains
            .iter()
            .map(|d| ManagedDomainModel {
                id: d.id.clone(),
                name: d.name.clone(),
                status: d.status.clone(),
                enforced_logins: d.enforced_logins.clone(),
                created_at: d.created_at.clone(),
                updated_at: d.updated_at.clone(),
            })
            .collect(),
    }
}
