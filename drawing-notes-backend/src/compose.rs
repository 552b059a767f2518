//! Filter & ordering engine.
//!
//! Narrows the catalog to a category for display, and turns a selection set
//! into the generated text: selected notes sorted by (category rank, row id)
//! and joined with a blank line. Everything here is a pure function of its
//! inputs, so the page and the export always agree byte for byte.

use drawing_notes_types::GenerationSummary;
use std::collections::BTreeSet;

use crate::catalog::{Catalog, CategoryOrder, Note};
use crate::placeholder::needs_editing;

/// Separator between notes in the generated text
pub const NOTE_SEPARATOR: &str = "\n\n";

/// Category filter for the note list. `All` is the dropdown sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Parse a dropdown value; `all` (any case) or blank selects everything.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c,
        }
    }

    pub fn matches(&self, note: &Note) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => note.note_type == *c,
        }
    }
}

/// Rows matching the filter, in catalog order.
pub fn filter<'a>(catalog: &'a Catalog, category: &CategoryFilter) -> Vec<&'a Note> {
    catalog.notes().iter().filter(|n| category.matches(n)).collect()
}

/// Selected rows ordered by (category rank, original row id).
/// Ids that are not in the catalog are ignored.
pub fn compose<'a>(
    catalog: &'a Catalog,
    selected: &BTreeSet<usize>,
    order: &CategoryOrder,
) -> Vec<&'a Note> {
    let mut notes: Vec<&Note> = selected.iter().filter_map(|&id| catalog.get(id)).collect();
    notes.sort_by_key(|n| (order.rank(&n.note_type), n.id));
    notes
}

/// Note texts joined with a blank line. Empty when there are no notes.
pub fn join_texts(notes: &[&Note]) -> String {
    notes
        .iter()
        .map(|n| n.text.as_str())
        .collect::<Vec<_>>()
        .join(NOTE_SEPARATOR)
}

/// Count, categories in output order, and whether any note still needs editing.
pub fn summarize(notes: &[&Note]) -> GenerationSummary {
    let mut categories: Vec<String> = Vec::new();
    for note in notes {
        if !categories.iter().any(|c| *c == note.note_type) {
            categories.push(note.note_type.clone());
        }
    }

    GenerationSummary {
        count: notes.len(),
        categories,
        any_placeholder: notes.iter().any(|n| needs_editing(&n.text)),
    }
}
