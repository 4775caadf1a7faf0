//! RAII guard around an undo batch.

use trackview_sequence::{SequenceEntity, UndoManager};

/// Opens an undo batch on creation and closes it when dropped, so every
/// change made while the guard lives lands in one undo step.
pub struct ScopedUndoBatch<'a> {
    undo: &'a mut dyn UndoManager,
}

impl<'a> ScopedUndoBatch<'a> {
    pub fn begin(undo: &'a mut dyn UndoManager, label: &str) -> Self {
        undo.begin_batch(label);
        Self { undo }
    }

    /// Record that `entity` changed inside this batch.
    pub fn mark_entity_dirty(&mut self, entity: &dyn SequenceEntity) {
        self.undo.mark_entity_dirty(entity);
    }
}

impl Drop for ScopedUndoBatch<'_> {
    fn drop(&mut self) {
        self.undo.end_batch();
    }
}
