//! Mutation journal
//!
//! The journal is a grow-only, ordered list of every successful create, write
//! and delete. Each entry carries everything needed to re-apply it on its own:
//! the target path, a snapshot of the content and the acting user.
//!
//! Entries are numbered from 1 in append order. Nothing ever mutates or removes
//! an entry, and recovery only reads the journal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of journaled mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalAction {
    /// A file was created
    Create,
    /// A file's content was replaced
    Write,
    /// A file was removed
    Delete,
}

impl fmt::Display for JournalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JournalAction::Create => write!(f, "create"),
            JournalAction::Write => write!(f, "write"),
            JournalAction::Delete => write!(f, "delete"),
        }
    }
}

/// A single recorded mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the journal, starting at 1
    pub seq: u64,
    /// What happened
    pub action: JournalAction,
    /// Normalized absolute path of the file
    pub path: String,
    /// Create: initial content. Write: new content. Delete: content at deletion time.
    pub content: Vec<u8>,
    /// Who did it
    pub user: String,
}

/// The journal itself
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mutation. Returns the sequence number it was given.
    pub fn record(
        &mut self,
        action: JournalAction,
        path: impl Into<String>,
        content: impl Into<Vec<u8>>,
        user: impl Into<String>,
    ) -> u64 {
        let seq = self.entries.len() as u64 + 1;
        let entry = JournalEntry {
            seq,
            action,
            path: path.into(),
            content: content.into(),
            user: user.into(),
        };
        tracing::debug!(
            "journal #{}: {} {} by {}",
            seq,
            entry.action,
            entry.path,
            entry.user
        );
        self.entries.push(entry);
        seq
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// All entries in append order (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&JournalEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Journal {
    type Item = &'a JournalEntry;
    type IntoIter = std::slice::Iter<'a, JournalEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_assigns_sequence_numbers() {
        let mut journal = Journal::new();
        assert!(journal.is_empty());

        let first = journal.record(JournalAction::Create, "/a", "x", "admin");
        let second = journal.record(JournalAction::Write, "/a", "y", "admin");
        let third = journal.record(JournalAction::Delete, "/a", "y", "admin");

        assert_eq!((first, second, third), (1, 2, 3));
        assert_eq!(journal.len(), 3);
        assert_eq!(journal.last().unwrap().action, JournalAction::Delete);
    }

    #[test]
    fn test_iteration_is_append_order() {
        let mut journal = Journal::new();
        journal.record(JournalAction::Create, "/b", "", "u");
        journal.record(JournalAction::Create, "/a", "", "u");

        let paths: Vec<_> = journal.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/b", "/a"]);

        let seqs: Vec<_> = (&journal).into_iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut journal = Journal::new();
        journal.record(
            JournalAction::Create,
            "/docs/a.txt",
            "documentação",
            "admin",
        );
        journal.record(
            JournalAction::Delete,
            "/docs/a.txt",
            "documentação",
            "admin",
        );

        let json = serde_json::to_string(&journal).unwrap();
        assert!(json.contains("\"action\":\"create\""));

        let decoded: Journal = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, journal);
    }
}
