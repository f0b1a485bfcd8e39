//! Role entity definitions

use serde::{Deserialize, Serialize};

/// A role users can be assigned to. Roles are seeded by migrations and only
/// ever looked up by the registration flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub role_type: String,
}
