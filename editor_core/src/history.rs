//! Bounded linear undo history
//!
//! Entries are full document snapshots. There is no redo: committing while
//! the step is behind the tail drops the tail.

use alloc::collections::VecDeque;

use crate::facet::Document;

/// Default number of retained entries
pub const DEFAULT_CAPACITY: usize = 50;

/// Linear history of document snapshots
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Document>,
    step: usize,
    capacity: usize,
}

impl History {
    /// Starts a history whose only entry is `initial`
    pub fn new(initial: Document, capacity: usize) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(initial);
        Self {
            entries,
            step: 0,
            capacity: capacity.max(1),
        }
    }

    /// Records `snapshot`; returns false if it equals the current entry
    pub fn commit(&mut self, snapshot: Document) -> bool {
        if self.current() == Some(&snapshot) {
            return false;
        }

        self.entries.truncate(self.step + 1);
        self.entries.push_back(snapshot);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.step = self.entries.len() - 1;
        true
    }

    /// Steps back one entry and returns it, or `None` at the oldest entry
    pub fn undo(&mut self) -> Option<&Document> {
        if self.step == 0 {
            return None;
        }
        self.step -= 1;
        self.entries.get(self.step)
    }

    pub fn current(&self) -> Option<&Document> {
        self.entries.get(self.step)
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every entry and restarts from `initial`
    pub fn reset(&mut self, initial: Document) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.step = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::Facet;
    use alloc::format;

    fn doc(markup: &str) -> Document {
        let mut d = Document::new();
        d.set(Facet::Markup, markup);
        d
    }

    #[test]
    fn test_commit_and_undo() {
        let mut history = History::new(Document::new(), 50);
        assert!(history.commit(doc("a")));
        assert!(history.commit(doc("ab")));
        assert_eq!(history.len(), 3);
        assert_eq!(history.step(), 2);

        assert_eq!(history.undo(), Some(&doc("a")));
        assert_eq!(history.undo(), Some(&Document::new()));
        assert_eq!(history.undo(), None);
        assert_eq!(history.step(), 0);
    }

    #[test]
    fn test_duplicate_commit_is_noop() {
        let mut history = History::new(Document::new(), 50);
        assert!(history.commit(doc("a")));
        assert!(!history.commit(doc("a")));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_commit_after_undo_discards_future() {
        let mut history = History::new(Document::new(), 50);
        history.commit(doc("a"));
        history.commit(doc("b"));
        history.undo();
        assert!(history.commit(doc("c")));
        assert_eq!(history.len(), 3);
        assert_eq!(history.current(), Some(&doc("c")));
        assert_eq!(history.undo(), Some(&doc("a")));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::new(Document::new(), DEFAULT_CAPACITY);
        for i in 0..51 {
            history.commit(doc(&format!("{}", i)));
        }
        assert_eq!(history.len(), DEFAULT_CAPACITY);
        assert_eq!(history.step(), DEFAULT_CAPACITY - 1);

        // Undo all the way: oldest surviving entry is commit #1
        let mut last = None;
        while let Some(entry) = history.undo() {
            last = Some(entry.clone());
        }
        assert_eq!(last, Some(doc("1")));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_zero_capacity_keeps_one_entry() {
        let mut history = History::new(Document::new(), 0);
        history.commit(doc("x"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some(&doc("x")));
    }

    #[test]
    fn test_reset() {
        let mut history = History::new(Document::new(), 50);
        history.commit(doc("a"));
        history.reset(doc("b"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.step(), 0);
        assert_eq!(history.current(), Some(&doc("b")));
    }
}
