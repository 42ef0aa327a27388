//! Operation bracketing and undo/redo

use super::SceneDocument;

impl SceneDocument {
    /// Snapshot the scene at the start of an operation.
    /// A second start while one is pending folds into the pending one.
    pub(super) fn begin_operation(&mut self, name: &str) {
        if self.pending.is_none() {
            self.pending = Some((name.to_string(), self.model.clone()));
        }
    }

    /// Push the pending operation to the undo stack if it changed anything.
    pub(super) fn finish_operation(&mut self) {
        if let Some((name, before)) = self.pending.take() {
            if before != self.model {
                self.undo_stack.push((name, before));
                if self.undo_stack.len() > 100 {
                    self.undo_stack.remove(0);
                }
                self.redo_stack.clear();
            }
        }
    }

    /// Undo last operation
    pub fn undo(&mut self) -> bool {
        if let Some((name, prev)) = self.undo_stack.pop() {
            let current = std::mem::replace(&mut self.model, prev);
            self.redo_stack.push((name, current));
            self.version += 1;
            true
        } else {
            false
        }
    }

    /// Redo last undone operation
    pub fn redo(&mut self) -> bool {
        if let Some((name, next)) = self.redo_stack.pop() {
            let current = std::mem::replace(&mut self.model, next);
            self.undo_stack.push((name, current));
            self.version += 1;
            true
        } else {
            false
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of operations on the undo stack
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Name of the most recent undoable operation
    pub fn last_operation(&self) -> Option<&str> {
        self.undo_stack.last().map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::nested_scene;
    use crate::host::SceneHost;
    use crate::state::SceneDocument;

    #[test]
    fn test_bracketed_operation_undo_redo() {
        let mut doc = SceneDocument::new(1, nested_scene());
        let x = "X".to_string();
        let y = "Y".to_string();

        doc.start_operation("Hide More");
        doc.set_hidden(&x, true);
        doc.set_hidden(&y, true);
        doc.commit_operation();
        assert_eq!(doc.undo_depth(), 1);

        assert!(doc.undo());
        assert!(!doc.is_hidden(&x));
        assert!(!doc.is_hidden(&y));
        assert!(doc.can_redo());

        assert!(doc.redo());
        assert!(doc.is_hidden(&x));
        assert!(!doc.redo());
    }

    #[test]
    fn test_empty_operation_not_recorded() {
        let mut doc = SceneDocument::new(1, nested_scene());
        doc.start_operation("Hide Less");
        doc.commit_operation();
        assert!(!doc.can_undo());
        assert!(!doc.undo());
    }

    #[test]
    fn test_new_operation_clears_redo() {
        let mut doc = SceneDocument::new(1, nested_scene());
        doc.start_operation("first");
        doc.set_hidden(&"X".to_string(), true);
        doc.commit_operation();
        doc.undo();

        doc.start_operation("second");
        doc.set_hidden(&"Y".to_string(), true);
        doc.commit_operation();
        assert!(!doc.can_redo());
        assert_eq!(doc.last_operation(), Some("second"));
    }
}
