//! Append-only revision log
//!
//! Insertion order is commit order. Nothing is ever removed or rewritten once
//! appended, so there is deliberately no remove/update API here.

use crate::object::{Revision, RevisionId};

/// Ordered history of every revision in a repository
#[derive(Debug, Clone, Default)]
pub struct RevisionLog {
    revisions: Vec<Revision>,
}

impl RevisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a revision at the end
    pub fn append(&mut self, revision: Revision) {
        self.revisions.push(revision);
    }

    /// All revisions, oldest first
    pub fn list_all(&self) -> Vec<Revision> {
        self.revisions.clone()
    }

    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    /// Borrowing iterator, oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Revision> {
        self.revisions.iter()
    }

    /// Newest revision of `filename` carrying `identifier`
    ///
    /// Scans from the most recent append backwards, so if two revisions share
    /// an identifier the later one wins.
    pub fn find_latest(&self, filename: &str, identifier: &RevisionId) -> Option<&Revision> {
        self.revisions
            .iter()
            .rev()
            .find(|revision| revision.matches(filename, identifier))
    }

    /// Revisions of `filename`, oldest first
    pub fn history(&self, filename: &str) -> Vec<Revision> {
        self.revisions
            .iter()
            .filter(|revision| revision.filename() == filename)
            .cloned()
            .collect()
    }

    /// Most recent revision of `filename`
    pub fn latest(&self, filename: &str) -> Option<&Revision> {
        self.revisions
            .iter()
            .rev()
            .find(|revision| revision.filename() == filename)
    }
}
