//! Undo/Redo history management

use std::sync::Arc;

use crate::diagram::Diagram;

/// A committed diagram state
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Diagram as it was after the change
    pub diagram: Arc<Diagram>,
    /// Description of the change that produced this state
    pub description: String,
}

/// Linear undo/redo log of full diagram snapshots
///
/// The cursor points at the entry that matches the current diagram.
/// Committing while the cursor is not at the end abandons every entry after
/// it; there is no redo tree.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    /// `None` when the history is empty
    cursor: Option<usize>,
    /// Maximum number of entries kept
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}

impl History {
    /// Create a history keeping at most `max_entries` snapshots
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            max_entries: max_entries.max(1),
        }
    }

    /// Record a new state, discarding any redo branch
    pub fn commit(&mut self, diagram: Arc<Diagram>, description: impl Into<String>) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }

        self.entries.push(HistoryEntry {
            diagram,
            description: description.into(),
        });

        // Trim history if it exceeds the maximum
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }

        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back one entry, returning the diagram to restore
    pub fn undo(&mut self) -> Option<Arc<Diagram>> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                tracing::debug!("Undo: {}", self.entries[cursor].description);
                self.cursor = Some(cursor - 1);
                Some(Arc::clone(&self.entries[cursor - 1].diagram))
            }
            _ => None,
        }
    }

    /// Step forward one entry, returning the diagram to restore
    pub fn redo(&mut self) -> Option<Arc<Diagram>> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if self.cursor.is_some() && next < self.entries.len() {
            tracing::debug!("Redo: {}", self.entries[next].description);
            self.cursor = Some(next);
            Some(Arc::clone(&self.entries[next].diagram))
        } else {
            None
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// Description of the change `undo` would revert
    pub fn undo_description(&self) -> Option<&str> {
        let cursor = self.cursor.filter(|&c| c > 0)?;
        Some(self.entries[cursor].description.as_str())
    }

    /// Description of the change `redo` would reapply
    pub fn redo_description(&self) -> Option<&str> {
        let next = self.cursor? + 1;
        self.entries.get(next).map(|e| e.description.as_str())
    }

    /// Diagram at the cursor
    pub fn current(&self) -> Option<Arc<Diagram>> {
        self.cursor.map(|c| Arc::clone(&self.entries[c].diagram))
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::entity::Team;

    fn diagrams() -> (Arc<Diagram>, Arc<Diagram>, Arc<Diagram>) {
        let (a, _) = Diagram::new().with_new_player(Team::Home, Vec2::ZERO);
        let (b, _) = a.with_new_player(Team::Home, Vec2::ONE);
        let (c, _) = b.with_new_player(Team::Away, Vec2::ONE);
        (Arc::new(a), Arc::new(b), Arc::new(c))
    }

    #[test]
    fn test_undo_redo_sequence() {
        let (a, b, c) = diagrams();
        let mut history = History::default();
        history.commit(a.clone(), "A");
        history.commit(b.clone(), "B");
        history.commit(c.clone(), "C");

        assert_eq!(history.undo().as_deref(), Some(&*b));
        assert_eq!(history.undo().as_deref(), Some(&*a));
        assert!(history.undo().is_none());
        assert_eq!(history.current().as_deref(), Some(&*a));
        assert!(!history.can_undo());

        assert_eq!(history.redo().as_deref(), Some(&*b));
        assert_eq!(history.redo().as_deref(), Some(&*c));
        assert!(history.redo().is_none());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_truncates_redo_branch() {
        let (a, b, c) = diagrams();
        let (d, _) = a.with_new_player(Team::Away, Vec2::new(3.0, 3.0));
        let d = Arc::new(d);

        let mut history = History::default();
        history.commit(a, "A");
        history.commit(b.clone(), "B");
        history.commit(c, "C");

        history.undo();
        history.commit(d.clone(), "D");

        assert!(history.redo().is_none());
        assert_eq!(history.len(), 3);
        assert_eq!(history.current().as_deref(), Some(&*d));
        assert_eq!(history.undo().as_deref(), Some(&*b));
    }

    #[test]
    fn test_empty_history_is_inert() {
        let mut history = History::default();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(history.current().is_none());
        assert_eq!(history.cursor(), None);
    }

    #[test]
    fn test_clear() {
        let (a, b, _) = diagrams();
        let mut history = History::default();
        history.commit(a, "A");
        history.commit(b, "B");

        history.clear();
        assert!(history.is_empty());
        assert!(history.undo().is_none());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_max_entries_drops_oldest() {
        let (a, b, c) = diagrams();
        let mut history = History::new(2);
        history.commit(a, "A");
        history.commit(b.clone(), "B");
        history.commit(c, "C");

        assert_eq!(history.len(), 2);
        assert_eq!(history.cursor(), Some(1));
        assert_eq!(history.undo().as_deref(), Some(&*b));
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_descriptions() {
        let (a, b, _) = diagrams();
        let mut history = History::default();
        history.commit(a, "Place Player");
        history.commit(b, "Move Player");

        assert_eq!(history.undo_description(), Some("Move Player"));
        assert_eq!(history.redo_description(), None);
        history.undo();
        assert_eq!(history.undo_description(), None);
        assert_eq!(history.redo_description(), Some("Move Player"));
    }
}
