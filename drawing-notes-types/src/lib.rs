//! Shared types for the drawing notes backend JSON API and its clients.

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

// =====================================================
// Request Types
// =====================================================

/// Check or uncheck a single note
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub id: usize,
    pub checked: bool,
}

/// Contact form submission
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

// =====================================================
// Response Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// =====================================================
// Domain Types
// =====================================================

/// A catalog note as seen by the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteView {
    pub id: usize,
    pub name: String,
    pub note_type: String,
    pub text: String,
    /// Text still contains a `[specify ...]` marker
    pub needs_editing: bool,
    pub selected: bool,
}

/// Summary of one generation, recorded with lead usage entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub count: usize,
    /// Distinct categories in output order
    pub categories: Vec<String>,
    pub any_placeholder: bool,
}

/// Current generated text for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedNotes {
    pub text: String,
    pub summary: GenerationSummary,
    pub generation: u64,
}

/// Selection after a mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected: Vec<usize>,
    pub generation: u64,
}

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Outcome of a contact form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResult {
    /// Whether the lead was recorded
    pub recorded: bool,
    pub level: NoticeLevel,
    pub message: String,
}

/// Service health status
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub notes_loaded: usize,
    pub active_sessions: usize,
    pub leads_configured: bool,
}
