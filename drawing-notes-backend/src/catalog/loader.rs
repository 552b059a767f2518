//! CSV loading for the note catalog.

use serde::Deserialize;
use std::path::Path;

use super::{Catalog, CatalogError, Note, REQUIRED_COLUMNS};

const UTF8_BOM: char = '\u{feff}';

#[derive(Debug, Deserialize)]
struct NoteRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type")]
    note_type: String,
    #[serde(rename = "Text")]
    text: String,
}

/// Load the catalog from a CSV file on disk.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&content)?;
    if catalog.is_empty() {
        log::warn!("[CATALOG] {:?} has no notes", path);
    } else {
        log::info!("[CATALOG] Loaded {} notes from {:?}", catalog.len(), path);
    }
    Ok(catalog)
}

/// Parse CSV text with a `Name,Type,Text` header. A leading BOM is ignored
/// and extra columns are skipped.
pub fn parse_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CatalogError::MissingColumn(column));
        }
    }

    let mut notes = Vec::new();
    for (id, record) in reader.deserialize::<NoteRecord>().enumerate() {
        let record = record?;
        notes.push(Note {
            id,
            name: record.name,
            note_type: record.note_type,
            text: normalize_line_endings(&record.text),
        });
    }

    Ok(Catalog::new(notes))
}

/// CRLF and lone CR become LF, matching what a browser puts in a textarea.
fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
