//! Credential model, roles and the in-process session

use serde::{Deserialize, Serialize};

/// Access role attached to a credential
///
/// ADMIN has full read/write over books and categories, USER is
/// read/search only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "USER" => Ok(Role::User),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// A username/password-hash/role triple
///
/// The password hash is a Base64-encoded SHA-256 digest; plaintext
/// passwords are never stored or compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// Authenticated state for one caller
///
/// Threaded explicitly through every operation that needs authorization
/// instead of being held as process-global mutable state. A fresh session
/// carries no role until `authenticate` succeeds.
#[derive(Debug, Clone, Default)]
pub struct Session {
    role: Option<Role>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = Some(role);
    }

    pub(crate) fn clear(&mut self) {
        self.role = None;
    }
}
