//! Undo/redo for sequence edits.
//!
//! Edits are grouped into batches. Inside a batch, every entity marked dirty
//! records the transition from its last known state to its current one. Undo
//! hands back the inverse batch for the caller to apply.

use std::collections::HashMap;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::sequence::{Sequence, SequenceEntity, SequenceState};

/// Groups entity changes into undoable steps.
pub trait UndoManager {
    /// Open a batch. Batches nest; only the outermost one commits.
    fn begin_batch(&mut self, label: &str);
    /// Record that `entity` changed inside the open batch.
    fn mark_entity_dirty(&mut self, entity: &dyn SequenceEntity);
    /// Close the innermost batch.
    fn end_batch(&mut self);
}

// ── Batches ─────────────────────────────────────────────────────

/// State transition of one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityChange {
    pub entity_id: Uuid,
    pub before: SequenceState,
    pub after: SequenceState,
}

/// A named group of entity changes undone and redone together.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoBatch {
    pub label: String,
    pub changes: Vec<EntityChange>,
}

impl UndoBatch {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            changes: Vec::new(),
        }
    }

    /// Produce the inverse batch (for undo).
    pub fn inverse(&self) -> Self {
        Self {
            label: self.label.clone(),
            changes: self
                .changes
                .iter()
                .rev()
                .map(|c| EntityChange {
                    entity_id: c.entity_id,
                    before: c.after.clone(),
                    after: c.before.clone(),
                })
                .collect(),
        }
    }

    /// Put every changed sequence found in `sequences` into its `after` state.
    pub fn apply_to(&self, sequences: &mut [Sequence]) {
        for change in &self.changes {
            if let Some(seq) = sequences.iter_mut().find(|s| s.id == change.entity_id) {
                seq.restore(&change.after);
            }
        }
    }

    /// Whether the batch touches `entity_id`.
    pub fn touches(&self, entity_id: Uuid) -> bool {
        self.changes.iter().any(|c| c.entity_id == entity_id)
    }
}

// ── Undo stack ──────────────────────────────────────────────────

/// Undo/redo history stack.
#[derive(Debug)]
pub struct UndoStack {
    /// Last committed state of every tracked entity.
    baselines: HashMap<Uuid, SequenceState>,
    /// Batch being recorded and its nesting depth.
    open: Option<(UndoBatch, usize)>,
    /// Committed batches (most recent last).
    undo: Vec<UndoBatch>,
    /// Undone batches (most recent last).
    redo: Vec<UndoBatch>,
    /// Maximum history depth.
    max_depth: usize,
}

impl UndoStack {
    /// Create a new undo stack with the given maximum depth.
    pub fn new(max_depth: usize) -> Self {
        Self {
            baselines: HashMap::new(),
            open: None,
            undo: Vec::new(),
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Start tracking `entity` from its current state.
    pub fn track(&mut self, entity: &dyn SequenceEntity) {
        self.baselines
            .insert(entity.entity_id(), SequenceState::capture(entity));
    }

    /// Pop the most recent batch for undo. Returns the inverse batch.
    pub fn undo(&mut self) -> Option<UndoBatch> {
        let batch = self.undo.pop()?;
        let inverse = batch.inverse();
        self.reset_baselines(&inverse);
        info!(label = %batch.label, "undo");
        self.redo.push(batch);
        Some(inverse)
    }

    /// Pop the most recent undone batch for redo. Returns it for reapplying.
    pub fn redo(&mut self) -> Option<UndoBatch> {
        let batch = self.redo.pop()?;
        self.reset_baselines(&batch);
        info!(label = %batch.label, "redo");
        self.undo.push(batch.clone());
        Some(batch)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Label of the batch `undo` would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.undo.last().map(|b| b.label.as_str())
    }

    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    fn reset_baselines(&mut self, applied: &UndoBatch) {
        for change in &applied.changes {
            self.baselines
                .insert(change.entity_id, change.after.clone());
        }
    }

    fn commit(&mut self, batch: UndoBatch) {
        if batch.changes.is_empty() {
            debug!(label = %batch.label, "empty undo batch discarded");
            return;
        }
        self.redo.clear();
        self.undo.push(batch);
        if self.undo.len() > self.max_depth {
            self.undo.remove(0);
        }
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(200)
    }
}

impl UndoManager for UndoStack {
    fn begin_batch(&mut self, label: &str) {
        match &mut self.open {
            Some((_, depth)) => *depth += 1,
            None => self.open = Some((UndoBatch::new(label), 1)),
        }
    }

    fn mark_entity_dirty(&mut self, entity: &dyn SequenceEntity) {
        let Some((batch, _)) = &mut self.open else {
            warn!(entity = %entity.entity_id(), "entity marked dirty outside an undo batch");
            return;
        };
        let id = entity.entity_id();
        let after = SequenceState::capture(entity);
        let before = match self.baselines.get(&id) {
            Some(state) => state.clone(),
            None => {
                warn!(entity = %id, "untracked entity marked dirty; change cannot be undone");
                after.clone()
            }
        };
        self.baselines.insert(id, after.clone());

        // Marking twice in one batch extends the first change.
        if let Some(existing) = batch.changes.iter_mut().find(|c| c.entity_id == id) {
            existing.after = after;
        } else {
            batch.changes.push(EntityChange {
                entity_id: id,
                before,
                after,
            });
        }
    }

    fn end_batch(&mut self) {
        let Some((batch, depth)) = self.open.take() else {
            warn!("end_batch without a matching begin_batch");
            return;
        };
        if depth > 1 {
            self.open = Some((batch, depth - 1));
        } else {
            self.commit(batch);
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────
