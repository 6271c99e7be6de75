use crate::context::ProviderContext;
use crate::model::OrganizationModel;
use crate::reconcile::reconcile_organization;
use astroform_api::OrganizationApi;
use astroform_cloud::Result;

/// Read-only access to organizations
pub struct OrganizationDataSource {
    api: OrganizationApi,
    default_id: String,
}

impl OrganizationDataSource {
    pub fn new(context: &ProviderContext) -> Self {
        Self {
            api: context.client().organizations(),
            default_id: context.organization_id().to_string(),
        }
    }

    /// Read one organization; `None` reads the configured one
    pub async fn read(&self, id: Option<&str>) -> Result<OrganizationModel> {
        let id = id.unwrap_or(&self.default_id);
        let remote = self.api.get(id).await?;
        Ok(reconcile_organization(&remote))
    }

    pub async fn list(&self) -> Result<Vec<OrganizationModel>> {
        let organizations = self.api.list().await?;
        Ok(organizations.iter().map(reconcile_organization).collect())
    }
}
