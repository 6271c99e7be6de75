use serde::{Deserialize, Serialize};

/// Read-only view of an organization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationModel {
    pub id: String,
    pub name: String,
    pub billing_email: String,
    pub status: String,
    pub product: String,
    pub payment_method: String,
    pub support_plan: String,
    pub is_scim_enabled: bool,
    pub trial_expires_at: String,
    pub created_at: String,
    pub updated_at: String,
    pub managed_domains: Vec<ManagedDomainModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedDomainModel {
    pub id: String,
    pub name: String,
    pub status: String,
    pub enforced_logins: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}
