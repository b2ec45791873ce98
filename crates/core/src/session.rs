//! Session-related types shared by the storefront and the back office.
//!
//! Both crates read the signed-in user from the same session, so the user
//! model and the session key names live here.

use serde::{Deserialize, Serialize};

use crate::types::{Email, UserId};

/// Role of the signed-in visitor. Drives route visibility only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

/// Session-stored user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: Email,
    pub role: Role,
    pub name: String,
    pub avatar: String,
}

impl SessionUser {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// First letter of the name, for avatar fallbacks.
    #[must_use]
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
    }
}

/// Session keys.
pub mod keys {
    /// Opaque token written on login; its presence marks the session as signed in.
    pub const TOKEN: &str = "token";

    /// The signed-in [`SessionUser`](super::SessionUser).
    pub const CURRENT_USER: &str = "current_user";

    /// The visitor's [`Cart`](crate::cart::Cart).
    pub const CART: &str = "cart";

    /// JSON text of the visitor's wishlist item array.
    pub const WISHLIST: &str = "wishlist";

    /// The visitor's [`AccountBook`](crate::account::AccountBook).
    pub const ACCOUNT: &str = "account";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(role: Role) -> SessionUser {
        SessionUser {
            id: UserId::new(1),
            email: Email::parse("admin@example.com").unwrap(),
            role,
            name: "admin user".to_string(),
            avatar: String::new(),
        }
    }

    #[test]
    fn test_is_admin() {
        assert!(user(Role::Admin).is_admin());
        assert!(!user(Role::User).is_admin());
    }

    #[test]
    fn test_initial_is_uppercase() {
        assert_eq!(user(Role::User).initial(), "A");
        let mut nameless = user(Role::User);
        nameless.name.clear();
        assert_eq!(nameless.initial(), "?");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&user(Role::Admin)).unwrap();
        assert!(json.contains("\"role\":\"admin\""));
        let back: SessionUser = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role, Role::Admin);
    }
}
