//! HTTP controllers and the session plumbing they share.

pub mod api;
pub mod health;
pub mod page;

use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use drawing_notes_types::{ContactResult, GenerationSummary, NoteView};
use uuid::Uuid;

use crate::catalog::Note;
use crate::compose::{compose, join_texts, summarize};
use crate::leads::{validate_contact, ContactCheck, LeadOutcome};
use crate::placeholder::needs_editing;
use crate::selection::{Notice, NoticeLevel, Selection};
use crate::AppState;

pub const SESSION_COOKIE: &str = "dn_session";

/// The caller's session, resolved from the session cookie.
pub struct SessionHandle {
    pub id: Uuid,
    created: bool,
}

impl SessionHandle {
    pub fn from_request(state: &AppState, req: &HttpRequest) -> Self {
        let cookie = req.cookie(SESSION_COOKIE);
        let (id, created) = state.sessions.resolve(cookie.as_ref().map(|c| c.value()));
        Self { id, created }
    }

    /// Response builder that sets the session cookie when the session is new.
    pub fn respond(&self, status: StatusCode) -> HttpResponseBuilder {
        let mut builder = HttpResponse::build(status);
        if self.created {
            builder.cookie(
                Cookie::build(SESSION_COOKIE, self.id.to_string())
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax)
                    .finish(),
            );
        }
        builder
    }
}

/// Generated text and its summary for a selection.
pub fn generate(state: &AppState, selection: &Selection) -> (String, GenerationSummary) {
    let notes = compose(&state.catalog, selection.ids(), &state.category_order);
    (join_texts(&notes), summarize(&notes))
}

pub fn note_views(notes: &[&Note], selection: &Selection) -> Vec<NoteView> {
    notes
        .iter()
        .map(|n| NoteView {
            id: n.id,
            name: n.name.clone(),
            note_type: n.note_type.clone(),
            text: n.text.clone(),
            needs_editing: needs_editing(&n.text),
            selected: selection.contains(n.id),
        })
        .collect()
}

/// Validate and forward a contact submission. Never retries; the returned
/// result is what the user sees.
pub async fn submit_contact(state: &AppState, session_id: Uuid, name: &str, email: &str) -> ContactResult {
    let (name, email) = match validate_contact(name, email) {
        ContactCheck::Ready { name, email } => (name, email),
        ContactCheck::Rejected(notice) => return contact_result(false, notice),
    };

    if !state.leads.is_configured() {
        log::warn!("[LEADS] Contact submitted but lead capture is not configured");
        return contact_result(
            false,
            Notice::new(NoticeLevel::Warning, "Contact capture is not available right now."),
        );
    }

    let selection = state.sessions.with_session(session_id, |s| s.selection.clone());
    let (_, summary) = generate(state, &selection);

    match state.leads.upsert_lead(&name, &email, &summary).await {
        Ok(outcome) => {
            log::info!("[LEADS] Recorded contact for session {} ({})", session_id, outcome.record_id());
            let message = match outcome {
                LeadOutcome::Created { .. } => "Thanks! We'll keep you posted.",
                LeadOutcome::Appended { .. } => "Thanks for coming back! Your visit was recorded.",
            };
            contact_result(true, Notice::new(NoticeLevel::Success, message))
        }
        Err(e) => {
            log::error!("[LEADS] Failed to record lead: {}", e);
            contact_result(
                false,
                Notice::new(
                    NoticeLevel::Error,
                    "Could not save your details right now. Your notes are unaffected.",
                ),
            )
        }
    }
}

fn contact_result(recorded: bool, notice: Notice) -> ContactResult {
    ContactResult {
        recorded,
        level: notice.level,
        message: notice.message,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use drawing_notes_types::GenerationSummary;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use crate::catalog::{Catalog, CategoryOrder, Note};
    use crate::leads::{LeadError, LeadOutcome, LeadSink};
    use crate::selection::SessionStore;
    use crate::AppState;

    /// LeadSink that records calls instead of talking to a server.
    pub struct RecordingSink {
        pub calls: Mutex<Vec<(String, String, GenerationSummary)>>,
        pub configured: bool,
        pub fail: bool,
    }

    impl RecordingSink {
        pub fn new(configured: bool, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                configured,
                fail,
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LeadSink for RecordingSink {
        async fn upsert_lead(
            &self,
            name: &str,
            email: &str,
            summary: &GenerationSummary,
        ) -> Result<LeadOutcome, LeadError> {
            self.calls
                .lock()
                .unwrap()
                .push((name.to_string(), email.to_string(), summary.clone()));
            if self.fail {
                Err(LeadError::Malformed("boom".to_string()))
            } else {
                Ok(LeadOutcome::Created { record_id: "page-1".to_string() })
            }
        }

        fn is_configured(&self) -> bool {
            self.configured
        }
    }

    fn note(id: usize, note_type: &str, name: &str, text: &str) -> Note {
        Note {
            id,
            name: name.to_string(),
            note_type: note_type.to_string(),
            text: text.to_string(),
        }
    }

    pub fn state_with(leads: Arc<dyn LeadSink>) -> AppState {
        let catalog = Catalog::new(vec![
            note(0, "General", "Deburr", "A"),
            note(1, "Weld", "Fillet", "B [specify size]"),
            note(2, "General", "Scale", "C"),
        ]);
        AppState {
            catalog: Arc::new(catalog),
            category_order: Arc::new(CategoryOrder::from_pairs([("General", 0), ("Weld", 5)])),
            sessions: Arc::new(SessionStore::new(Duration::from_secs(3600), 100)),
            leads,
            started_at: Instant::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[actix_web::test]
    async fn test_submit_contact_records_current_generation() {
        let sink = RecordingSink::new(true, false);
        let state = state_with(sink.clone());
        let (sid, _) = state.sessions.resolve(None);
        state.sessions.with_session(sid, |s| {
            s.selection.toggle(1, true);
            s.selection.toggle(0, true);
        });

        let result = submit_contact(&state, sid, " Ada ", "ada@example.com").await;
        assert!(result.recorded);
        assert_eq!(result.level, NoticeLevel::Success);

        let calls = sink.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (name, email, summary) = &calls[0];
        assert_eq!(name, "Ada");
        assert_eq!(email, "ada@example.com");
        assert_eq!(summary.count, 2);
        assert_eq!(summary.categories, vec!["General", "Weld"]);
        assert!(summary.any_placeholder);
    }

    #[actix_web::test]
    async fn test_submit_contact_validation_skips_sink() {
        let sink = RecordingSink::new(true, false);
        let state = state_with(sink.clone());
        let (sid, _) = state.sessions.resolve(None);

        let result = submit_contact(&state, sid, "Ada", "").await;
        assert!(!result.recorded);
        assert_eq!(result.level, NoticeLevel::Warning);

        let result = submit_contact(&state, sid, "", "").await;
        assert_eq!(result.level, NoticeLevel::Info);

        let result = submit_contact(&state, sid, "Ada", "not-an-email").await;
        assert_eq!(result.level, NoticeLevel::Warning);

        assert_eq!(sink.call_count(), 0);
    }

    #[actix_web::test]
    async fn test_submit_contact_unconfigured_skips_sink() {
        let sink = RecordingSink::new(false, false);
        let state = state_with(sink.clone());
        let (sid, _) = state.sessions.resolve(None);

        let result = submit_contact(&state, sid, "Ada", "ada@example.com").await;
        assert!(!result.recorded);
        assert_eq!(sink.call_count(), 0);
    }

    #[actix_web::test]
    async fn test_submit_contact_failure_is_reported_once() {
        let sink = RecordingSink::new(true, true);
        let state = state_with(sink.clone());
        let (sid, _) = state.sessions.resolve(None);
        state.sessions.with_session(sid, |s| s.selection.toggle(2, true));

        let result = submit_contact(&state, sid, "Ada", "ada@example.com").await;
        assert!(!result.recorded);
        assert_eq!(result.level, NoticeLevel::Error);
        assert_eq!(sink.call_count(), 1);
        // Selection survives a failed submission
        assert!(state.sessions.snapshot(sid).selection.contains(2));
    }

    #[test]
    fn test_generate_orders_selection() {
        let state = state_with(RecordingSink::new(false, false));
        let mut selection = Selection::new();
        selection.toggle(1, true);
        selection.toggle(2, true);
        selection.toggle(0, true);
        let (text, summary) = generate(&state, &selection);
        assert_eq!(text, "A\n\nC\n\nB [specify size]");
        assert_eq!(summary.count, 3);
    }
}
