use std::collections::BTreeMap;

use super::permission::Permission;

/**
 * Nodes
 * =====
 * The tree is made of two kinds of nodes:
 *  - Entries: files, holding content and an ACL
 *  - Directories: named containers of entries and other directories
 *  A directory keeps its children in insertion order, files and
 *   subdirectories in two separate lists. Names are unique within
 *   a list, but a file and a subdirectory may share a name.
 */

// A single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: String,
    content: Vec<u8>,
    // user -> level; users missing here hold `Permission::None`
    acl: BTreeMap<String, Permission>,
}

impl Entry {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            acl: BTreeMap::new(),
        }
    }

    /// Create a file owned by `owner`, who is granted `rw`
    pub fn with_owner(
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
        owner: impl Into<String>,
    ) -> Self {
        let mut entry = Self::new(name, content);
        entry.set_permission(owner, Permission::ReadWrite);
        entry
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Replace the content, returning the previous one
    pub fn replace_content(&mut self, content: impl Into<Vec<u8>>) -> Vec<u8> {
        std::mem::replace(&mut self.content, content.into())
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    /// Level held by `user`, `none` when the user is not listed
    pub fn permission_of(&self, user: &str) -> Permission {
        self.acl.get(user).copied().unwrap_or_default()
    }

    /// Overwrite the level of `user`. No merging with a previous level.
    pub fn set_permission(&mut self, user: impl Into<String>, level: Permission) {
        self.acl.insert(user.into(), level);
    }

    pub fn acl(&self) -> &BTreeMap<String, Permission> {
        &self.acl
    }
}

// A directory. The root is a directory with no parent and an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directory {
    name: String,
    dirs: Vec<Directory>,
    files: Vec<Entry>,
}

impl Directory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dirs: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dirs(&self) -> &[Directory] {
        &self.dirs
    }

    pub fn files(&self) -> &[Entry] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }

    pub fn get_dir(&self, name: &str) -> Option<&Directory> {
        self.dirs.iter().find(|dir| dir.name == name)
    }

    pub fn get_dir_mut(&mut self, name: &str) -> Option<&mut Directory> {
        self.dirs.iter_mut().find(|dir| dir.name == name)
    }

    /// Get the named subdirectory, appending an empty one if it is missing
    pub fn get_or_create_dir(&mut self, name: &str) -> &mut Directory {
        match self.dirs.iter().position(|dir| dir.name == name) {
            Some(index) => &mut self.dirs[index],
            None => {
                tracing::debug!("creating intermediate directory '{}'", name);
                self.dirs.push(Directory::new(name));
                let last = self.dirs.len() - 1;
                &mut self.dirs[last]
            }
        }
    }

    /// Append a subdirectory. Returns false, leaving the directory untouched,
    /// if one with the same name already exists.
    pub fn insert_dir(&mut self, dir: Directory) -> bool {
        if self.get_dir(&dir.name).is_some() {
            return false;
        }
        self.dirs.push(dir);
        true
    }

    pub fn get_file(&self, name: &str) -> Option<&Entry> {
        self.files.iter().find(|file| file.name == name)
    }

    pub fn get_file_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.files.iter_mut().find(|file| file.name == name)
    }

    /// Append a file. Returns false, leaving the directory untouched,
    /// if one with the same name already exists.
    pub fn insert_file(&mut self, entry: Entry) -> bool {
        if self.get_file(&entry.name).is_some() {
            return false;
        }
        self.files.push(entry);
        true
    }

    /// Remove the named file, keeping the order of its siblings
    pub fn remove_file(&mut self, name: &str) -> Option<Entry> {
        let index = self.files.iter().position(|file| file.name == name)?;
        Some(self.files.remove(index))
    }
}
