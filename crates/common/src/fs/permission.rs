//! # Permissions
//!
//! A [`Permission`] is the access level one user holds on one file. Levels are
//! written the way users type them on the command line: `none`, `r`, `w` and `rw`.
//!
//! Levels are checked against an [`Operation`]:
//!
//! | level  | read | write | delete |
//! |--------|------|-------|--------|
//! | `none` |      |       |        |
//! | `r`    | yes  |       |        |
//! | `w`    |      | yes   | yes    |
//! | `rw`   | yes  | yes   | yes    |
//!
//! [`Operation::Grant`] is never satisfied by a per-file level; it is decided by
//! the global [`AccessPolicy`](super::AccessPolicy).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::filesystem::FsError;

/// Access level of a single user on a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// No access. The implicit level of any user missing from a file's ACL.
    #[default]
    None,
    /// `r`
    #[serde(rename = "r")]
    Read,
    /// `w`
    #[serde(rename = "w")]
    Write,
    /// `rw`
    #[serde(rename = "rw")]
    ReadWrite,
}

/// Something a user asks to do with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Read,
    Write,
    Delete,
    /// Change another user's level on a file (chmod)
    Grant,
}

impl Permission {
    /// Every accepted level, in the order they are listed to users
    pub const ALL: [Permission; 4] = [
        Permission::ReadWrite,
        Permission::Read,
        Permission::Write,
        Permission::None,
    ];

    pub fn can_read(&self) -> bool {
        matches!(self, Permission::Read | Permission::ReadWrite)
    }

    pub fn can_write(&self) -> bool {
        matches!(self, Permission::Write | Permission::ReadWrite)
    }

    /// Check whether this level satisfies `op`.
    ///
    /// Deletion shares the write gate.
    pub fn allows(&self, op: Operation) -> bool {
        match op {
            Operation::Read => self.can_read(),
            Operation::Write | Operation::Delete => self.can_write(),
            Operation::Grant => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::None => "none",
            Permission::Read => "r",
            Permission::Write => "w",
            Permission::ReadWrite => "rw",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Permission::None),
            "r" => Ok(Permission::Read),
            "w" => Ok(Permission::Write),
            "rw" => Ok(Permission::ReadWrite),
            other => Err(FsError::InvalidPermission(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Read => write!(f, "read"),
            Operation::Write => write!(f, "write"),
            Operation::Delete => write!(f, "delete"),
            Operation::Grant => write!(f, "change permissions"),
        }
    }
}
