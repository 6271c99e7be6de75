use serde::{Deserialize, Serialize};

/// Who created or last touched a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubjectProfile {
    pub api_token_name: String,
    pub avatar_url: String,
    pub full_name: String,
    pub id: String,
    pub subject_type: String,
    pub username: String,
}
