//! Per-session note selection.
//!
//! A `Selection` is the set of checked note ids plus a generation counter.
//! `clear()` bumps the generation; the page embeds it in checkbox element
//! ids so the browser drops any form state left over from before the clear.

pub mod store;

use std::collections::BTreeSet;

pub use drawing_notes_types::NoticeLevel;
pub use store::{Notice, SessionStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: BTreeSet<usize>,
    generation: u64,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check or uncheck a note. Repeating the same call is a no-op.
    pub fn toggle(&mut self, id: usize, checked: bool) {
        if checked {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    /// Drop every selection and start a new generation.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.generation += 1;
    }

    pub fn contains(&self, id: usize) -> bool {
        self.selected.contains(&id)
    }

    pub fn ids(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// DOM id for a note's checkbox in a given generation
pub fn checkbox_key(id: usize, generation: u64) -> String {
    format!("check_{}_{}", id, generation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut sel = Selection::new();
        sel.toggle(3, true);
        sel.toggle(1, true);
        assert!(sel.contains(3));
        assert_eq!(sel.ids().iter().copied().collect::<Vec<_>>(), vec![1, 3]);

        sel.toggle(3, false);
        assert!(!sel.contains(3));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn test_toggle_is_idempotent() {
        let mut sel = Selection::new();
        sel.toggle(2, true);
        sel.toggle(2, true);
        assert_eq!(sel.len(), 1);

        sel.toggle(5, false);
        sel.toggle(5, false);
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn test_check_then_uncheck_restores_state() {
        let mut sel = Selection::new();
        sel.toggle(0, true);
        let before = sel.clone();

        sel.toggle(4, true);
        sel.toggle(4, false);
        assert_eq!(sel, before);
    }

    #[test]
    fn test_clear_empties_and_bumps_generation() {
        let mut sel = Selection::new();
        sel.toggle(0, true);
        sel.toggle(7, true);
        assert_eq!(checkbox_key(7, sel.generation()), "check_7_0");

        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.generation(), 1);
        assert_eq!(checkbox_key(7, sel.generation()), "check_7_1");

        // Clearing an empty selection still starts a new generation
        sel.clear();
        assert!(sel.is_empty());
        assert_eq!(sel.generation(), 2);
    }
}
