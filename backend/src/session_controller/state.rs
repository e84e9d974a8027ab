//! Shared server state: the form repositories and the open edit sessions.
//!
//! `AppState` is created once in `main.rs` and injected into every handler as
//! `web::Data`. The engine itself is single-threaded, so each request takes the
//! lock it needs for the duration of one operation; that keeps mutations one at
//! a time even though actix runs several workers.
//!
//! Lock order: when a handler needs both, it locks `sessions` before `forms`.
//! A handler holding `forms` never waits on `sessions`.
//!
//! Sessions leave the registry when the client exits or deletes them, or when
//! `start_session_reaper` finds them idle. An idle session is dropped without
//! saving.

use common::editor::TemplateEditSession;
use common::FormsState;
use log::info;
use std::time::{Duration, Instant};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

/// Open sessions keyed by session id.
pub type SessionMap = HashMap<String, OpenSession>;

/// An edit session plus the time a request last reached it.
pub struct OpenSession {
    pub session: TemplateEditSession,
    last_used: Instant,
}

impl OpenSession {
    pub fn new(session: TemplateEditSession) -> Self {
        Self {
            session,
            last_used: Instant::now(),
        }
    }

    /// Marks the session as used now and hands out the editor.
    pub fn touch(&mut self) -> &mut TemplateEditSession {
        self.last_used = Instant::now();
        &mut self.session
    }
}

#[derive(Clone)]
pub struct AppState {
    /// Saved templates and submissions.
    pub forms: Arc<RwLock<FormsState>>,

    /// Open edit sessions keyed by session id (a UUID handed to the client
    /// by `POST /api/sessions`).
    pub sessions: Arc<RwLock<SessionMap>>,
}

impl AppState {
    pub fn new(forms: FormsState) -> Self {
        Self {
            forms: Arc::new(RwLock::new(forms)),
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

/// Drops every session last used more than `idle` before `now`. Returns how
/// many were dropped.
pub fn expire_idle(sessions: &mut SessionMap, now: Instant, idle: Duration) -> usize {
    let before = sessions.len();
    sessions.retain(|_, open| now.saturating_duration_since(open.last_used) <= idle);
    before - sessions.len()
}

/// Long-running task that closes abandoned sessions (a closed tab, a client
/// that left after a clean exit check). Runs for the life of the server.
pub async fn start_session_reaper(state: AppState, idle: Duration) {
    let period = idle.clamp(Duration::from_secs(1), Duration::from_secs(60));
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        let expired = expire_idle(&mut *state.sessions.write().await, Instant::now(), idle);
        if expired > 0 {
            info!("Closed {} idle edit session(s)", expired);
        }
    }
}
