//! Note catalog: the read-only table of predefined drawing notes.
//!
//! Loaded once at startup from `drawing_notes.csv` (columns `Name,Type,Text`)
//! and shared behind an `Arc` for the lifetime of the process. Nothing
//! mutates it after load, so sessions read it without locking.

pub mod category_order;
pub mod loader;

use std::path::PathBuf;
use thiserror::Error;

pub use category_order::CategoryOrder;

/// Columns the catalog file must carry
pub const REQUIRED_COLUMNS: [&str; 3] = ["Name", "Type", "Text"];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("malformed category order: {0}")]
    CategoryOrder(#[from] ron::error::SpannedError),
}

/// One selectable catalog entry. `id` is the zero-based data row index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: usize,
    pub name: String,
    pub note_type: String,
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    notes: Vec<Note>,
}

impl Catalog {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: usize) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn contains(&self, id: usize) -> bool {
        id < self.notes.len()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Distinct categories for the filter dropdown, ordered by rank.
    /// Unranked categories come last in first-appearance order.
    pub fn categories(&self, order: &CategoryOrder) -> Vec<String> {
        let mut seen: Vec<&str> = Vec::new();
        for note in &self.notes {
            if !seen.contains(&note.note_type.as_str()) {
                seen.push(&note.note_type);
            }
        }
        // sort_by_key is stable, so unranked ties keep appearance order
        seen.sort_by_key(|t| order.rank(t));
        seen.into_iter().map(String::from).collect()
    }
}
