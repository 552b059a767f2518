/// Marker left in note text where the user must fill in a value.
pub const PLACEHOLDER_MARKER: &str = "[specify";

/// True if the text still contains an unedited `[specify ...]` marker
/// (case-insensitive).
pub fn needs_editing(text: &str) -> bool {
    text.to_lowercase().contains(PLACEHOLDER_MARKER)
}
