use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cicd_enforced_default: bool,

    // Computed
    #[serde(default)]
    pub organization_id: Option<String>,
}
