//! Editor snapshot for deterministic replay checks

use alloc::vec::Vec;
use markup_assist::Suggestion;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::{Document, Facet, Selection};

/// Complete editor state snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct EditorSnapshot {
    pub facet: Facet,
    pub document: Document,
    pub selection: Selection,
    pub history_len: usize,
    pub history_step: usize,
    pub suggestions: Vec<Suggestion>,
    pub highlighted: usize,
    pub now_ms: u64,
}

impl EditorSnapshot {
    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison of replayed sessions
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update([self.facet as u8]);

        for facet in Facet::ALL {
            hasher.update(self.document.get(facet).as_bytes());
            hasher.update([0u8]);
        }

        hasher.update(self.selection.start.to_le_bytes());
        hasher.update(self.selection.end.to_le_bytes());

        hasher.update(self.history_len.to_le_bytes());
        hasher.update(self.history_step.to_le_bytes());

        for suggestion in &self.suggestions {
            hasher.update(suggestion.value.as_bytes());
            hasher.update([suggestion.kind as u8]);
        }
        hasher.update(self.highlighted.to_le_bytes());
        hasher.update(self.now_ms.to_le_bytes());

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Key, PlaygroundCore};

    fn replay(keys: &str) -> EditorSnapshot {
        let mut core = PlaygroundCore::default();
        for ch in keys.chars() {
            core.apply_key(Key::Char(ch));
        }
        core.apply_key(Key::Enter);
        core.snapshot()
    }

    #[test]
    fn test_snapshot_hash_deterministic() {
        let first = replay("ul.menu");
        let second = replay("ul.menu");
        assert_eq!(first, second);
        assert_eq!(first.hash(), second.hash(), "Hash should be deterministic");
    }

    #[test]
    fn test_snapshot_hash_different_for_different_state() {
        let first = replay("ul.menu");
        let mut second = first.clone();
        second.selection.start += 1;
        assert_ne!(first.hash(), second.hash(), "Different states should have different hashes");
    }
}
