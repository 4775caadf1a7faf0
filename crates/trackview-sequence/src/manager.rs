//! Sequence naming and lookup.

use std::collections::HashMap;

use tracing::info;
use trackview_core::{validate_sequence_name, Result};
use uuid::Uuid;

use crate::sequence::SequenceEntity;

/// Owner of sequence naming.
pub trait SequenceManager {
    /// Rename `sequence`. Rejects names that fail
    /// [`validate_sequence_name`].
    fn rename_node(&mut self, sequence: &mut dyn SequenceEntity, new_name: &str) -> Result<()>;
}

/// Name index over the sequences of an open level.
#[derive(Debug, Default)]
pub struct SequenceLibrary {
    names: HashMap<Uuid, String>,
}

impl SequenceLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, sequence: &dyn SequenceEntity) {
        self.names
            .insert(sequence.entity_id(), sequence.name().to_owned());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<Uuid> {
        self.names
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(id, _)| *id)
    }

    /// First of `base`, `base 2`, `base 3`, ... not already in use.
    pub fn unique_name(&self, base: &str) -> String {
        if self.find_by_name(base).is_none() {
            return base.to_owned();
        }
        (2..)
            .map(|n| format!("{base} {n}"))
            .find(|candidate| self.find_by_name(candidate).is_none())
            .unwrap_or_else(|| base.to_owned())
    }
}

impl SequenceManager for SequenceLibrary {
    fn rename_node(&mut self, sequence: &mut dyn SequenceEntity, new_name: &str) -> Result<()> {
        validate_sequence_name(new_name)?;

        let old_name = sequence.name().to_owned();
        sequence.set_name(new_name);
        self.names
            .insert(sequence.entity_id(), new_name.to_owned());
        info!(%old_name, %new_name, "sequence renamed");
        Ok(())
    }
}
