use serde::{Deserialize, Serialize};

/// Viewer role, taken from the `userType` of the authenticated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Employee,
    Client,
}

impl Role {
    /// Backend `userType` spelling
    pub fn code(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Employee => "EMPLOYEE",
            Role::Client => "CLIENT",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Employee => "Empleado",
            Role::Client => "Cliente",
        }
    }

    pub fn all() -> Vec<Role> {
        vec![Role::Admin, Role::Employee, Role::Client]
    }

    /// Parse a raw `userType`. Unknown values yield `None` so that
    /// eligibility resolution fails closed.
    pub fn from_user_type(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "EMPLOYEE" => Some(Role::Employee),
            "CLIENT" => Some(Role::Client),
            _ => None,
        }
    }

    /// Tab opened right after login
    pub fn landing_tab(&self) -> &'static str {
        match self {
            Role::Admin => "a002_quote",
            Role::Client => "a001_request",
            Role::Employee => "a004_task",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_user_type() {
        assert_eq!(Role::from_user_type("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_user_type(" client "), Some(Role::Client));
        assert_eq!(Role::from_user_type("Employee"), Some(Role::Employee));
        assert_eq!(Role::from_user_type("SUPERVISOR"), None);
        assert_eq!(Role::from_user_type(""), None);
    }
}
