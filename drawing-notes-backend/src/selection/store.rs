//! In-memory session store.
//!
//! Each browser session gets a `SessionState` keyed by the UUID in its
//! session cookie. State lives only in memory: nothing is persisted across
//! restarts, and sessions idle longer than the TTL are swept by a
//! background task.

use dashmap::DashMap;
use drawing_notes_types::NoticeLevel;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::Selection;
use crate::compose::CategoryFilter;

/// One-shot message shown on the next page render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Everything one user session owns.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub selection: Selection,
    pub category: CategoryFilter,
    pub notice: Option<Notice>,
    pub last_access: Instant,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            selection: Selection::new(),
            category: CategoryFilter::All,
            notice: None,
            last_access: Instant::now(),
        }
    }
}

/// Thread-safe session map keyed by session id, bounded to `max_sessions`.
pub struct SessionStore {
    sessions: DashMap<Uuid, SessionState>,
    ttl: Duration,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        let max_sessions = max_sessions.max(1);
        Self {
            sessions: DashMap::with_capacity(max_sessions),
            ttl,
            max_sessions,
        }
    }

    /// Resolve a cookie value to a live session, creating one if the value
    /// is missing, malformed, or refers to an expired session.
    /// Returns the id and whether it was newly created.
    pub fn resolve(&self, raw_id: Option<&str>) -> (Uuid, bool) {
        if let Some(id) = raw_id.and_then(|s| Uuid::parse_str(s).ok()) {
            if let Some(mut entry) = self.sessions.get_mut(&id) {
                entry.last_access = Instant::now();
                return (id, false);
            }
        }

        let id = Uuid::new_v4();
        self.make_room();
        self.sessions.insert(id, SessionState::default());
        log::debug!("[SESSIONS] Started session {}", id);
        (id, true)
    }

    /// Evict least-recently-accessed sessions until one more fits.
    fn make_room(&self) {
        while self.sessions.len() >= self.max_sessions {
            let oldest = self
                .sessions
                .iter()
                .map(|e| (*e.key(), e.last_access))
                .min_by_key(|&(_, t)| t);
            match oldest {
                Some((id, _)) => {
                    self.sessions.remove(&id);
                    log::debug!("[SESSIONS] Store full, evicted session {}", id);
                }
                None => break,
            }
        }
    }

    /// Run `f` against a session's state. Missing sessions are recreated.
    pub fn with_session<R>(&self, id: Uuid, f: impl FnOnce(&mut SessionState) -> R) -> R {
        if !self.sessions.contains_key(&id) {
            self.make_room();
        }
        let mut entry = self.sessions.entry(id).or_default();
        entry.last_access = Instant::now();
        f(entry.value_mut())
    }

    /// Clone the current state of a session.
    #[cfg(test)]
    pub fn snapshot(&self, id: Uuid) -> SessionState {
        self.with_session(id, |s| s.clone())
    }

    /// Queue a notice for the next render.
    pub fn set_notice(&self, id: Uuid, notice: Notice) {
        self.with_session(id, |s| s.notice = Some(notice));
    }

    /// Take the pending notice, if any.
    pub fn take_notice(&self, id: Uuid) -> Option<Notice> {
        self.with_session(id, |s| s.notice.take())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop sessions idle longer than the TTL. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let before = self.sessions.len();
        let ttl = self.ttl;
        self.sessions.retain(|_, s| s.last_access.elapsed() < ttl);
        before.saturating_sub(self.sessions.len())
    }

    /// Spawn a background task that periodically sweeps idle sessions.
    pub fn start_background_sweeper(
        self: &Arc<Self>,
        interval: Duration,
    ) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // skip immediate tick
            loop {
                ticker.tick().await;
                let evicted = store.evict_expired();
                if evicted > 0 {
                    log::debug!(
                        "[SESSIONS] Evicted {} idle sessions ({} active)",
                        evicted,
                        store.len()
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_creates_and_reuses() {
        let store = SessionStore::new(Duration::from_secs(60), 100);
        let (id, created) = store.resolve(None);
        assert!(created);

        let (same, created) = store.resolve(Some(&id.to_string()));
        assert!(!created);
        assert_eq!(same, id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_resolve_rejects_garbage_cookie() {
        let store = SessionStore::new(Duration::from_secs(60), 100);
        let (_, created) = store.resolve(Some("not-a-uuid"));
        assert!(created);

        let unknown = Uuid::new_v4().to_string();
        let (id, created) = store.resolve(Some(&unknown));
        assert!(created);
        assert_ne!(id.to_string(), unknown);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new(Duration::from_secs(60), 100);
        let (a, _) = store.resolve(None);
        let (b, _) = store.resolve(None);

        store.with_session(a, |s| s.selection.toggle(1, true));
        assert!(store.snapshot(a).selection.contains(1));
        assert!(store.snapshot(b).selection.is_empty());
    }

    #[test]
    fn test_notice_is_one_shot() {
        let store = SessionStore::new(Duration::from_secs(60), 100);
        let (id, _) = store.resolve(None);
        store.set_notice(id, Notice::new(NoticeLevel::Warning, "Please enter your email"));

        let notice = store.take_notice(id).unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(store.take_notice(id).is_none());
    }

    #[test]
    fn test_evict_expired() {
        let store = SessionStore::new(Duration::ZERO, 100);
        store.resolve(None);
        store.resolve(None);
        assert_eq!(store.evict_expired(), 2);
        assert!(store.is_empty());

        let store = SessionStore::new(Duration::from_secs(3600), 100);
        store.resolve(None);
        assert_eq!(store.evict_expired(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_evicts_least_recent_when_full() {
        let store = SessionStore::new(Duration::from_secs(3600), 3);
        let (first, _) = store.resolve(None);
        std::thread::sleep(Duration::from_millis(2));
        let (second, _) = store.resolve(None);
        std::thread::sleep(Duration::from_millis(2));
        let (third, _) = store.resolve(None);
        std::thread::sleep(Duration::from_millis(2));

        // Touch the oldest so the second becomes least recent
        store.with_session(first, |s| s.selection.toggle(4, true));
        std::thread::sleep(Duration::from_millis(2));

        let (fourth, created) = store.resolve(None);
        assert!(created);
        assert_eq!(store.len(), 3);

        let (_, recreated) = store.resolve(Some(&second.to_string()));
        assert!(recreated);
        assert_eq!(store.len(), 3);
        assert!(store.snapshot(first).selection.contains(4));
        assert_ne!(fourth, third);
    }

    #[test]
    fn test_store_never_exceeds_cap() {
        let store = SessionStore::new(Duration::from_secs(3600), 10);
        for _ in 0..250 {
            store.resolve(None);
        }
        assert_eq!(store.len(), 10);
    }

    #[test]
    fn test_notice_level_strings() {
        assert_eq!(NoticeLevel::Warning.as_str(), "warning");
        assert_eq!("success".parse::<NoticeLevel>().unwrap(), NoticeLevel::Success);
    }
}
