//! # Principals
//!
//! Principals are user identities known to the filesystem, each with a
//! [`Role`]. Per-file access is decided by the file's ACL, but changing an ACL
//! is a global capability reserved for principals holding [`Role::Admin`].
//!
//! ## Trust Model
//!
//! There is no authentication. The identity passed to an operation is taken
//! at face value; the policy only decides what that identity may do.
//!
//! Any identity not registered in the policy is treated as [`Role::User`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::node::Entry;
use super::permission::{Operation, Permission};

/// Identity used as the sole admin when no configuration is provided.
pub const DEFAULT_ADMIN: &str = "admin";

/// The role of a principal on the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May change permissions on any file.
    ///
    /// Admins do not bypass file ACLs: reading a file still requires a
    /// readable level on that file.
    Admin,

    /// Access governed only by file ACLs.
    #[default]
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

/// A principal identity on the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    /// The principal's user name.
    pub identity: String,
    /// The principal's global role.
    pub role: Role,
}

impl Principal {
    pub fn admin(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            role: Role::Admin,
        }
    }
}

/// The set of known principals and the authorization rules built on them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessPolicy {
    principals: BTreeMap<String, Principal>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy whose only registered principals are the given admins
    pub fn with_admins<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut policy = Self::new();
        for admin in admins {
            policy.register(Principal::admin(admin));
        }
        policy
    }

    /// Register a principal, replacing any previous one with the same identity
    fn register(&mut self, principal: Principal) -> Option<Principal> {
        self.principals
            .insert(principal.identity.clone(), principal)
    }

    pub fn role_of(&self, identity: &str) -> Role {
        self.principals
            .get(identity)
            .map(|principal| principal.role)
            .unwrap_or_default()
    }

    pub fn is_admin(&self, identity: &str) -> bool {
        self.role_of(identity) == Role::Admin
    }

    /// Level held by `user` on `entry`
    pub fn permission_of(&self, entry: &Entry, user: &str) -> Permission {
        entry.permission_of(user)
    }

    /// Decide whether `user` may perform `op` on `entry`.
    ///
    /// Grants are a global admin check and ignore the entry entirely.
    pub fn authorize(&self, entry: &Entry, user: &str, op: Operation) -> bool {
        match op {
            Operation::Grant => self.is_admin(user),
            _ => self.permission_of(entry, user).allows(op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_role_is_user() {
        let policy = AccessPolicy::with_admins([DEFAULT_ADMIN]);
        assert_eq!(policy.role_of("admin"), Role::Admin);
        assert_eq!(policy.role_of("joao"), Role::User);
        assert!(!policy.is_admin("joao"));
    }

    #[test]
    fn test_multiple_admins() {
        let policy = AccessPolicy::with_admins(["root", "ops"]);
        assert!(policy.is_admin("root"));
        assert!(policy.is_admin("ops"));
        assert!(!policy.is_admin("admin"));
    }

    #[test]
    fn test_register_replaces_role() {
        let mut policy = AccessPolicy::with_admins(["maria"]);
        let previous = policy.register(Principal {
            identity: "maria".to_string(),
            role: Role::User,
        });
        assert_eq!(previous.map(|p| p.role), Some(Role::Admin));
        assert!(!policy.is_admin("maria"));
    }

    #[test]
    fn test_authorize_uses_file_acl() {
        let policy = AccessPolicy::with_admins([DEFAULT_ADMIN]);
        let mut entry = Entry::with_owner("f", "", "joao");
        entry.set_permission("maria", Permission::Read);

        assert!(policy.authorize(&entry, "joao", Operation::Read));
        assert!(policy.authorize(&entry, "joao", Operation::Delete));
        assert!(policy.authorize(&entry, "maria", Operation::Read));
        assert!(!policy.authorize(&entry, "maria", Operation::Write));
        assert!(!policy.authorize(&entry, "maria", Operation::Delete));

        // admins get no implicit file access
        assert!(!policy.authorize(&entry, "admin", Operation::Read));
    }

    #[test]
    fn test_grant_is_admin_only() {
        let policy = AccessPolicy::with_admins([DEFAULT_ADMIN]);
        let entry = Entry::with_owner("f", "", "joao");

        // owning the file is not enough
        assert!(!policy.authorize(&entry, "joao", Operation::Grant));
        assert!(policy.authorize(&entry, "admin", Operation::Grant));
    }
}
