//! Crash recovery
//!
//! Recovery rebuilds a tree from nothing but the journal. Entries are applied
//! strictly in journal order, since a write or delete may target a file created
//! earlier in the same journal.
//!
//! An entry that no longer applies is skipped:
//! - create: skipped if the file already exists
//! - write: skipped if the file does not exist (nothing is synthesized)
//! - delete: skipped if the file does not exist
//!
//! Replaying the same journal always yields the same tree.

use super::journal::{Journal, JournalAction, JournalEntry};
use super::node::{Directory, Entry};
use super::path;

/// What a replay did, entry by entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub created: usize,
    pub written: usize,
    pub deleted: usize,
    /// Entries that had no effect on the rebuilt tree
    pub skipped: usize,
}

impl ReplayStats {
    /// Number of journal entries visited
    pub fn total(&self) -> usize {
        self.created + self.written + self.deleted + self.skipped
    }
}

impl std::fmt::Display for ReplayStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} entries replayed ({} created, {} written, {} deleted, {} skipped)",
            self.total(),
            self.created,
            self.written,
            self.deleted,
            self.skipped
        )
    }
}

/// Build a fresh tree by replaying every journal entry in order
pub fn replay(journal: &Journal) -> (Directory, ReplayStats) {
    let mut root = Directory::root();
    let mut stats = ReplayStats::default();

    for entry in journal {
        if apply(&mut root, entry) {
            match entry.action {
                JournalAction::Create => stats.created += 1,
                JournalAction::Write => stats.written += 1,
                JournalAction::Delete => stats.deleted += 1,
            }
        } else {
            tracing::debug!(
                "replay: skipping #{} {} {}",
                entry.seq,
                entry.action,
                entry.path
            );
            stats.skipped += 1;
        }
    }

    (root, stats)
}

/// Apply a single journal entry to `root`. Returns false if it had no effect.
pub(crate) fn apply(root: &mut Directory, entry: &JournalEntry) -> bool {
    match entry.action {
        JournalAction::Create => {
            let (dir, name) = path::resolve_or_create(root, &entry.path);
            if name.is_empty() || dir.get_file(name).is_some() {
                return false;
            }
            dir.insert_file(Entry::with_owner(
                name,
                entry.content.clone(),
                entry.user.as_str(),
            ))
        }
        JournalAction::Write => match path::lookup_mut(root, &entry.path)
            .and_then(|(dir, name)| dir.get_file_mut(name))
        {
            Some(file) => {
                file.replace_content(entry.content.clone());
                true
            }
            None => false,
        },
        JournalAction::Delete => match path::lookup_mut(root, &entry.path) {
            Some((dir, name)) => dir.remove_file(name).is_some(),
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::permission::Permission;

    fn file<'a>(root: &'a Directory, path: &str) -> Option<&'a Entry> {
        let (dir, name) = path::lookup(root, path)?;
        dir.get_file(name)
    }

    #[test]
    fn test_replay_empty_journal() {
        let (root, stats) = replay(&Journal::new());
        assert!(root.is_empty());
        assert_eq!(stats, ReplayStats::default());
    }

    #[test]
    fn test_replay_create_write_delete() {
        let mut journal = Journal::new();
        journal.record(JournalAction::Create, "/a/one.txt", "1", "alice");
        journal.record(JournalAction::Create, "/a/two.txt", "2", "bob");
        journal.record(JournalAction::Write, "/a/one.txt", "1b", "alice");
        journal.record(JournalAction::Delete, "/a/two.txt", "2", "bob");

        let (root, stats) = replay(&journal);

        let one = file(&root, "/a/one.txt").unwrap();
        assert_eq!(one.content(), b"1b");
        assert_eq!(one.permission_of("alice"), Permission::ReadWrite);
        assert!(file(&root, "/a/two.txt").is_none());

        assert_eq!(stats.created, 2);
        assert_eq!(stats.written, 1);
        assert_eq!(stats.deleted, 1);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.total(), journal.len());
    }

    #[test]
    fn test_replay_skips_double_create() {
        let mut journal = Journal::new();
        journal.record(JournalAction::Create, "/f", "first", "alice");
        journal.record(JournalAction::Create, "/f", "second", "bob");

        let (root, stats) = replay(&journal);
        let f = file(&root, "/f").unwrap();
        assert_eq!(f.content(), b"first");
        assert_eq!(f.permission_of("bob"), Permission::None);
        assert_eq!(stats.skipped, 1);
    }

    #[test]
    fn test_replay_drops_write_to_missing_file() {
        let mut journal = Journal::new();
        journal.record(JournalAction::Write, "/ghost/f", "boo", "alice");
        journal.record(JournalAction::Delete, "/ghost/f", "boo", "alice");

        let (root, stats) = replay(&journal);
        assert!(root.is_empty());
        assert_eq!(stats.skipped, 2);
    }

    #[test]
    fn test_replay_order_matters() {
        let mut in_order = Journal::new();
        in_order.record(JournalAction::Create, "/f", "v1", "u");
        in_order.record(JournalAction::Write, "/f", "v2", "u");

        let mut reversed = Journal::new();
        reversed.record(JournalAction::Write, "/f", "v2", "u");
        reversed.record(JournalAction::Create, "/f", "v1", "u");

        let (a, _) = replay(&in_order);
        let (b, _) = replay(&reversed);
        assert_eq!(file(&a, "/f").unwrap().content(), b"v2");
        assert_eq!(file(&b, "/f").unwrap().content(), b"v1");
    }

    #[test]
    fn test_replay_is_deterministic() {
        let mut journal = Journal::new();
        journal.record(JournalAction::Create, "/x/y/z", "z", "u");
        journal.record(JournalAction::Create, "/x/w", "w", "u");
        journal.record(JournalAction::Delete, "/x/w", "w", "u");

        let (first, _) = replay(&journal);
        let (second, _) = replay(&journal);
        assert_eq!(first, second);
    }
}
