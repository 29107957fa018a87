use std::fmt;

use super::journal::{Journal, JournalAction};
use super::node::{Directory, Entry};
use super::path::{self, normalize};
use super::permission::{Operation, Permission};
use super::principal::AccessPolicy;
use super::recovery::{self, ReplayStats};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FsError {
    #[error("'{0}' already exists")]
    AlreadyExists(String),
    #[error("'{0}' not found")]
    NotFound(String),
    #[error("[{user}] permission denied: cannot {op} '{path}'")]
    PermissionDenied {
        user: String,
        op: Operation,
        path: String,
    },
    #[error("invalid permission '{0}': use 'rw', 'r', 'w' or 'none'")]
    InvalidPermission(String),
    #[error("invalid path '{0}': expected a file path")]
    InvalidPath(String),
}

impl FsError {
    fn denied(user: &str, op: Operation, path: &str) -> Self {
        tracing::warn!("[{}] denied: {} {}", user, op, path);
        FsError::PermissionDenied {
            user: user.to_string(),
            op,
            path: path.to_string(),
        }
    }
}

/// Immediate children of a directory, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub path: String,
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

impl Listing {
    fn of(path: String, dir: &Directory) -> Self {
        Self {
            path,
            dirs: dir.dirs().iter().map(|d| d.name().to_string()).collect(),
            files: dir.files().iter().map(|f| f.name().to_string()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contents of '{}':", self.path)?;
        for dir in &self.dirs {
            write!(f, "\n  <DIR> {}", dir)?;
        }
        for file in &self.files {
            write!(f, "\n        {}", file)?;
        }
        Ok(())
    }
}

/// The filesystem facade.
///
/// Every mutating operation resolves its target, checks the acting user
/// against the [`AccessPolicy`], applies the change to the tree and only then
/// appends to the [`Journal`]. Rejected operations leave both the tree and the
/// journal untouched.
#[derive(Debug, Clone)]
pub struct Filesystem {
    root: Directory,
    journal: Journal,
    policy: AccessPolicy,
}

impl Default for Filesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem {
    /// An empty filesystem whose only admin is [`DEFAULT_ADMIN`](super::DEFAULT_ADMIN)
    pub fn new() -> Self {
        Self::with_policy(AccessPolicy::with_admins([super::DEFAULT_ADMIN]))
    }

    pub fn with_policy(policy: AccessPolicy) -> Self {
        Self {
            root: Directory::root(),
            journal: Journal::new(),
            policy,
        }
    }

    /// Rebuild a filesystem from a previously captured journal
    pub fn from_journal(journal: Journal, policy: AccessPolicy) -> (Self, ReplayStats) {
        let (root, stats) = recovery::replay(&journal);
        (
            Self {
                root,
                journal,
                policy,
            },
            stats,
        )
    }

    pub fn root(&self) -> &Directory {
        &self.root
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /* Files */

    pub fn create_file(
        &mut self,
        path: &str,
        content: impl Into<Vec<u8>>,
        user: &str,
    ) -> Result<(), FsError> {
        let path = normalize(path);
        let (dir, name) = path::resolve_or_create(&mut self.root, &path);
        if name.is_empty() {
            return Err(FsError::InvalidPath(path.clone()));
        }
        if dir.get_file(name).is_some() {
            return Err(FsError::AlreadyExists(path.clone()));
        }

        let content = content.into();
        dir.insert_file(Entry::with_owner(name, content.clone(), user));
        self.journal
            .record(JournalAction::Create, &path, content, user);

        tracing::info!("[{}] created file {}", user, path);
        Ok(())
    }

    pub fn read_file(&self, path: &str, user: &str) -> Result<Vec<u8>, FsError> {
        let path = normalize(path);
        let entry = self
            .find_file(&path)
            .ok_or_else(|| FsError::NotFound(path.clone()))?;

        if !self.policy.authorize(entry, user, Operation::Read) {
            return Err(FsError::denied(user, Operation::Read, &path));
        }
        Ok(entry.content().to_vec())
    }

    pub fn write_file(
        &mut self,
        path: &str,
        content: impl Into<Vec<u8>>,
        user: &str,
    ) -> Result<(), FsError> {
        let path = normalize(path);
        let entry = path::lookup_mut(&mut self.root, &path)
            .and_then(|(dir, name)| dir.get_file_mut(name))
            .ok_or_else(|| FsError::NotFound(path.clone()))?;

        if !self.policy.authorize(entry, user, Operation::Write) {
            return Err(FsError::denied(user, Operation::Write, &path));
        }

        let content = content.into();
        entry.replace_content(content.clone());
        self.journal
            .record(JournalAction::Write, &path, content, user);

        tracing::info!("[{}] wrote file {}", user, path);
        Ok(())
    }

    pub fn delete_file(&mut self, path: &str, user: &str) -> Result<(), FsError> {
        let path = normalize(path);
        let (dir, name) = path::lookup_mut(&mut self.root, &path)
            .ok_or_else(|| FsError::NotFound(path.clone()))?;
        let entry = dir
            .get_file(name)
            .ok_or_else(|| FsError::NotFound(path.clone()))?;

        if !self.policy.authorize(entry, user, Operation::Delete) {
            return Err(FsError::denied(user, Operation::Delete, &path));
        }

        let removed = dir
            .remove_file(name)
            .ok_or_else(|| FsError::NotFound(path.clone()))?;
        self.journal
            .record(JournalAction::Delete, &path, removed.into_content(), user);

        tracing::info!("[{}] deleted file {}", user, path);
        Ok(())
    }

    /// Set `target_user`'s level on a file.
    ///
    /// Only admins may do this, and the admin check comes before anything
    /// else: a non-admin is denied even for a path that does not exist.
    /// Permission changes are not journaled and do not survive recovery.
    pub fn set_file_permission(
        &mut self,
        path: &str,
        target_user: &str,
        level: Permission,
        acting_user: &str,
    ) -> Result<(), FsError> {
        let path = normalize(path);
        if !self.policy.is_admin(acting_user) {
            return Err(FsError::denied(acting_user, Operation::Grant, &path));
        }

        let entry = path::lookup_mut(&mut self.root, &path)
            .and_then(|(dir, name)| dir.get_file_mut(name))
            .ok_or_else(|| FsError::NotFound(path.clone()))?;
        entry.set_permission(target_user, level);

        tracing::info!(
            "[{}] granted '{}' to {} on {}",
            acting_user,
            level,
            target_user,
            path
        );
        Ok(())
    }

    /// Look up a file without checking any permission
    pub fn find_file(&self, path: &str) -> Option<&Entry> {
        let (dir, name) = path::lookup(&self.root, path)?;
        dir.get_file(name)
    }

    /* Directories */

    /// Create a directory, and any missing parent on the way.
    ///
    /// Unguarded and not journaled.
    pub fn create_directory(&mut self, path: &str) -> Result<(), FsError> {
        let path = normalize(path);
        let (dir, name) = path::resolve_or_create(&mut self.root, &path);
        if name.is_empty() || dir.get_dir(name).is_some() {
            return Err(FsError::AlreadyExists(path.clone()));
        }
        dir.insert_dir(Directory::new(name));

        tracing::info!("created directory {}", path);
        Ok(())
    }

    pub fn list_directory(&self, path: &str) -> Result<Listing, FsError> {
        let path = normalize(path);
        let dir = self
            .find_dir(&path)
            .ok_or_else(|| FsError::NotFound(path.clone()))?;
        Ok(Listing::of(path, dir))
    }

    pub fn directory_exists(&self, path: &str) -> bool {
        self.find_dir(path).is_some()
    }

    fn find_dir(&self, path: &str) -> Option<&Directory> {
        let (parent, name) = path::lookup(&self.root, path)?;
        if name.is_empty() {
            return Some(parent);
        }
        parent.get_dir(name)
    }

    /* Recovery */

    /// Throw away the live tree and rebuild it from the journal.
    ///
    /// Directories created explicitly and permission grants are not
    /// journaled, so they are lost; file contents and existence are restored.
    pub fn simulate_crash_and_recovery(&mut self) -> ReplayStats {
        tracing::info!(
            "simulating crash: discarding tree, replaying {} journal entries",
            self.journal.len()
        );
        let (root, stats) = recovery::replay(&self.journal);
        self.root = root;
        tracing::info!("recovery complete: {}", stats);
        stats
    }
}
