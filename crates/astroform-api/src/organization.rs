//! Organization endpoints (read-only)

use crate::client::{ApiClient, nullable};
use crate::user::SubjectProfile;
use astroform_cloud::{ErrorContext, Operation, ResourceKind, Result, StatusReport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct OrganizationApi {
    client: ApiClient,
}

impl OrganizationApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch one organization by id
    pub async fn get(&self, id: &str) -> Result<OrganizationResponse> {
        let context = ErrorContext::new(Operation::Read, ResourceKind::Organization).with_id(id);
        let url = self.client.url(&[id]);
        self.client.fetch(&context, &url).await
    }

    /// List every organization the token can see
    pub async fn list(&self) -> Result<Vec<OrganizationResponse>> {
        let context = ErrorContext::new(Operation::List, ResourceKind::Organization);
        let listing: OrganizationListResponse =
            self.client.fetch(&context, &self.client.url(&[])).await?;
        tracing::debug!(
            "Listed {} of {} organizations",
            listing.organizations.len(),
            listing.total_count
        );
        Ok(listing.organizations)
    }
}

// ============ API Types ============

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizationResponse {
    pub billing_email: String,
    pub created_at: String,
    pub created_by: Option<SubjectProfile>,
    pub id: String,
    pub is_scim_enabled: bool,
    #[serde(deserialize_with = "nullable")]
    pub managed_domains: Vec<ManagedDomain>,
    pub name: String,
    pub payment_method: String,
    pub product: String,
    pub status: String,
    pub support_plan: String,
    pub trial_expires_at: String,
    pub updated_at: String,
    pub updated_by: Option<SubjectProfile>,
}

impl StatusReport for OrganizationResponse {
    fn id(&self) -> &str {
        &self.id
    }

    // Billing status, not a lifecycle
    fn status(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManagedDomain {
    pub created_at: String,
    #[serde(deserialize_with = "nullable")]
    pub enforced_logins: Vec<String>,
    pub id: String,
    pub name: String,
    pub status: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct OrganizationListResponse {
    #[serde(deserialize_with = "nullable")]
    organizations: Vec<OrganizationResponse>,
    total_count: i64,
}
