use serde::{Deserialize, Serialize};

/// Roles allowed to delete forms.
const DELETE_ROLES: [&str; 2] = ["admin", "administrador"];

/// Logged-in user as kept under the `currentUser` session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "user".to_string()
}

impl CurrentUser {
    /// Whether the dashboard should offer the delete action.
    /// The remote API still enforces the permission with a 403.
    pub fn can_delete(&self) -> bool {
        DELETE_ROLES.contains(&self.role.as_str())
    }
}
