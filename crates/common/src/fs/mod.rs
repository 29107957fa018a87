//! In-memory filesystem data structures and operations
//!
//! This module defines the core types of the simulated filesystem:
//!
//! - **[`Entry`]** / **[`Directory`]**: the owned tree of files and directories
//! - **[`Permission`]**: per-user, per-file access levels (`none`, `r`, `w`, `rw`)
//! - **[`AccessPolicy`]**: principals and the global admin role
//! - **[`Journal`]**: append-only log of successful mutations
//! - **[`Filesystem`]**: the facade tying everything together
//!
//! # Architecture
//!
//! ## Tree
//!
//! The tree is a strict ownership hierarchy. Every directory owns its child
//! directories and its files, and all operations are top-down walks from the root:
//! ```text
//!                    / (root)
//!                       |
//!            +----------+----------+
//!            |                     |
//!          root/               notes.txt
//!            |
//!        projetos/
//!            |
//!     +------+------+
//!     |             |
//! projeto1.txt  projeto2.txt
//! ```
//!
//! Files and directories live in two separate namespaces, so a directory may
//! hold a file and a subdirectory with the same name.
//!
//! ## Journal and recovery
//!
//! Every authorized create, write and delete is appended to the [`Journal`]
//! after it has been applied to the tree. A simulated crash throws the tree away
//! and [`replay`]s the journal against a fresh root. Permission grants are *not*
//! journaled, so they do not survive recovery.

mod filesystem;
mod journal;
mod node;
mod path;
mod permission;
mod principal;
mod recovery;

pub use filesystem::{Filesystem, FsError, Listing};
pub use journal::{Journal, JournalAction, JournalEntry};
pub use node::{Directory, Entry};
pub use path::{join, normalize, split};
pub use permission::{Operation, Permission};
pub use principal::{AccessPolicy, Principal, Role, DEFAULT_ADMIN};
pub use recovery::{replay, ReplayStats};
