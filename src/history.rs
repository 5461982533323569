use std::collections::VecDeque;

/// Default number of undo snapshots kept.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Bounded undo stack of serialized documents.
///
/// The last committed document is held separately and is never itself on the
/// stack; only the states before it are. There is no redo.
#[derive(Debug, Clone)]
pub struct EditHistory {
    /// Prior states, oldest at the front
    undo_stack: VecDeque<String>,
    /// Last committed state
    current: Option<String>,
    max_depth: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl EditHistory {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_depth),
            current: None,
            max_depth,
        }
    }

    /// Drop every snapshot and start over from `current`.
    pub fn reset(&mut self, current: String) {
        self.undo_stack.clear();
        self.current = Some(current);
    }

    /// Record a new committed state.
    ///
    /// Returns `false` (and records nothing) when `state` equals the current
    /// one, which is how zero-length drags stay out of the stack.
    pub fn commit(&mut self, state: String) -> bool {
        if self.current.as_deref() == Some(state.as_str()) {
            return false;
        }
        if let Some(previous) = self.current.replace(state) {
            if self.max_depth > 0 {
                self.undo_stack.push_back(previous);
            }
            while self.undo_stack.len() > self.max_depth {
                self.undo_stack.pop_front();
            }
        }
        true
    }

    /// Pop the most recent snapshot, which becomes the current state.
    pub fn undo(&mut self) -> Option<String> {
        let previous = self.undo_stack.pop_back()?;
        self.current = Some(previous.clone());
        Some(previous)
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Number of states that can be undone to.
    pub fn depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_commits_are_suppressed() {
        let mut history = EditHistory::new(5);
        history.reset("a".into());
        assert!(!history.commit("a".into()));
        assert_eq!(history.depth(), 0);
        assert!(history.commit("b".into()));
        assert_eq!(history.depth(), 1);
        assert_eq!(history.current(), Some("b"));
    }

    #[test]
    fn evicts_oldest_first() {
        let mut history = EditHistory::new(3);
        history.reset("0".into());
        for i in 1..=5 {
            history.commit(i.to_string());
        }
        assert_eq!(history.depth(), 3);
        assert_eq!(history.undo().as_deref(), Some("4"));
        assert_eq!(history.undo().as_deref(), Some("3"));
        assert_eq!(history.undo().as_deref(), Some("2"));
        assert_eq!(history.undo(), None);
        assert_eq!(history.current(), Some("2"));
    }

    #[test]
    fn first_commit_without_reset_has_nothing_to_undo() {
        let mut history = EditHistory::default();
        assert!(history.commit("a".into()));
        assert!(!history.can_undo());
    }

    #[test]
    fn zero_depth_keeps_no_snapshots() {
        let mut history = EditHistory::new(0);
        history.reset("a".into());
        assert!(history.commit("b".into()));
        assert!(!history.can_undo());
        assert_eq!(history.current(), Some("b"));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut history = EditHistory::new(2);
        history.reset("a".into());
        history.commit("b".into());
        history.clear();
        assert_eq!(history.current(), None);
        assert!(!history.can_undo());
    }
}
