//! Lead capture. Records who used the tool in a hosted database.
//!
//! The contact form hands a name, an email, and the summary of the current
//! generation to a `LeadSink`. The sink looks the email up, appends a dated
//! usage entry to an existing record or creates a new one. Failures are
//! reported once and never retried.

pub mod contact;
pub mod notion;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use drawing_notes_types::GenerationSummary;
use thiserror::Error;

pub use contact::{validate_contact, ContactCheck};
pub use notion::NotionLeadClient;

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("lead capture is not configured")]
    NotConfigured,
    #[error("lead request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("lead API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected lead API response: {0}")]
    Malformed(String),
}

/// What happened to the lead record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadOutcome {
    Created { record_id: String },
    Appended { record_id: String },
}

impl LeadOutcome {
    pub fn record_id(&self) -> &str {
        match self {
            LeadOutcome::Created { record_id } | LeadOutcome::Appended { record_id } => record_id,
        }
    }
}

#[async_trait]
pub trait LeadSink: Send + Sync {
    /// Look up the record for `email`; append a usage entry if it exists,
    /// otherwise create it with the identity fields and one usage entry.
    async fn upsert_lead(
        &self,
        name: &str,
        email: &str,
        summary: &GenerationSummary,
    ) -> Result<LeadOutcome, LeadError>;

    fn is_configured(&self) -> bool;
}

/// One line of usage history, e.g.
/// `2026-03-02 14:05 UTC: generated 3 notes; categories: General, Weld; placeholders to edit: yes`
pub fn usage_entry(summary: &GenerationSummary, at: DateTime<Utc>) -> String {
    let categories = if summary.categories.is_empty() {
        "none".to_string()
    } else {
        summary.categories.join(", ")
    };
    format!(
        "{}: generated {} {}; categories: {}; placeholders to edit: {}",
        at.format("%Y-%m-%d %H:%M UTC"),
        summary.count,
        if summary.count == 1 { "note" } else { "notes" },
        categories,
        if summary.any_placeholder { "yes" } else { "no" },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_usage_entry_format() {
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 14, 5, 9).unwrap();
        let summary = GenerationSummary {
            count: 3,
            categories: vec!["General".to_string(), "Weld".to_string()],
            any_placeholder: true,
        };
        assert_eq!(
            usage_entry(&summary, at),
            "2026-03-02 14:05 UTC: generated 3 notes; categories: General, Weld; placeholders to edit: yes"
        );
    }

    #[test]
    fn test_usage_entry_without_generation() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let entry = usage_entry(&GenerationSummary::default(), at);
        assert_eq!(
            entry,
            "2026-01-01 00:00 UTC: generated 0 notes; categories: none; placeholders to edit: no"
        );
    }

    #[test]
    fn test_usage_entry_singular() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let summary = GenerationSummary {
            count: 1,
            categories: vec!["Tube".to_string()],
            any_placeholder: false,
        };
        assert!(usage_entry(&summary, at).contains("generated 1 note;"));
    }

    #[test]
    fn test_outcome_record_id() {
        let created = LeadOutcome::Created { record_id: "abc".to_string() };
        let appended = LeadOutcome::Appended { record_id: "def".to_string() };
        assert_eq!(created.record_id(), "abc");
        assert_eq!(appended.record_id(), "def");
    }
}
