use dashmap::DashMap;
use sqlx::{Pool, Postgres};
use tracing::debug;

use crate::{
    db,
    models::{
        error::ServerError,
        session::{LiveSession, LiveSessionSnapshot},
    },
};

/// Process-wide map of session code to live quiz state. The registry is the
/// only mutable shared resource in the process; every mutation goes through
/// `with_session_mut` so writers on one session code are serialized by the
/// map's per-key guard. Entries are never torn down, they live until the
/// process exits.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, LiveSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn get(&self, session_code: &str) -> Option<LiveSessionSnapshot> {
        self.sessions.get(session_code).map(|s| s.snapshot())
    }

    /// Look up the live session for a code, deriving it from the store on a
    /// miss: one round-trip for the quiz id and its question count, then a
    /// fresh waiting session. Memory-only on every later call, and
    /// idempotent until the first state-changing call.
    pub async fn ensure(
        &self,
        pool: &Pool<Postgres>,
        session_code: &str,
    ) -> Result<LiveSessionSnapshot, ServerError> {
        if let Some(session) = self.sessions.get(session_code) {
            return Ok(session.snapshot());
        }

        let quiz_id = db::quiz::find_quiz_id_by_code(pool, session_code)
            .await?
            .ok_or_else(|| {
                ServerError::NotFound(format!("No quiz with session code {}", session_code))
            })?;
        let total_questions = db::quiz::count_questions(pool, quiz_id).await?;

        debug!(
            "Materialized session {} for quiz {} ({} questions)",
            session_code, quiz_id, total_questions
        );
        Ok(self.materialize(session_code, quiz_id, total_questions))
    }

    /// `ensure` keyed by quiz id instead of session code (lobby creation).
    pub async fn ensure_for_quiz(
        &self,
        pool: &Pool<Postgres>,
        quiz_id: i64,
    ) -> Result<(String, LiveSessionSnapshot), ServerError> {
        let session_code = db::quiz::get_session_code(pool, quiz_id)
            .await?
            .ok_or_else(|| ServerError::NotFound(format!("No quiz with id {}", quiz_id)))?;

        if let Some(session) = self.sessions.get(&session_code) {
            let snapshot = session.snapshot();
            drop(session);
            return Ok((session_code, snapshot));
        }

        let total_questions = db::quiz::count_questions(pool, quiz_id).await?;
        let snapshot = self.materialize(&session_code, quiz_id, total_questions);
        Ok((session_code, snapshot))
    }

    /// Insert-if-absent. Two racing misses both derive equivalent fresh
    /// sessions, so keeping whichever landed first is safe.
    pub(crate) fn materialize(
        &self,
        session_code: &str,
        quiz_id: i64,
        total_questions: i64,
    ) -> LiveSessionSnapshot {
        self.sessions
            .entry(session_code.to_string())
            .or_insert_with(|| LiveSession::new(quiz_id, total_questions))
            .snapshot()
    }

    /// Run `f` against the live session under the map's per-key guard.
    /// Returns None when no session exists for the code. `f` must stay
    /// non-blocking and must not touch the store; store access belongs
    /// before or after, never inside the guard.
    pub fn with_session_mut<F, R>(&self, session_code: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut LiveSession) -> R,
    {
        self.sessions.get_mut(session_code).map(|mut s| f(&mut s))
    }
}
