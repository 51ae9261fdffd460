use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Waiting,
    Active,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceStatus {
    NextQuestion,
    QuizEnded,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AdvanceOutcome {
    pub status: AdvanceStatus,
    pub current_question: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveParticipant {
    pub id: i64,
    pub name: String,
    pub is_host: bool,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveResponse {
    pub answer_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

/// Volatile per-session state, process lifetime only. Restart rewinds a
/// session to question 0 / waiting; collected live responses are gone.
/// Durable rows in the store are the source of truth for scoring.
#[derive(Debug, Clone)]
pub struct LiveSession {
    pub quiz_id: i64,
    pub current_question: i64,
    pub status: SessionStatus,
    pub participants: Vec<LiveParticipant>,
    pub responses: HashMap<i64, HashMap<i64, LiveResponse>>,
    pub total_questions: i64,
}

impl LiveSession {
    pub fn new(quiz_id: i64, total_questions: i64) -> Self {
        Self {
            quiz_id,
            current_question: 0,
            status: SessionStatus::Waiting,
            participants: Vec::new(),
            responses: HashMap::new(),
            total_questions,
        }
    }

    /// Host pressed start: waiting -> active, unconditional.
    pub fn start_now(&mut self) {
        self.status = SessionStatus::Active;
    }

    /// Host override: force results, regardless of position.
    pub fn end_now(&mut self) {
        self.status = SessionStatus::Results;
    }

    /// Move to the next question, or end the quiz when already at the last
    /// index. current_question never decrements and never passes the last
    /// index, so repeated calls at the end are idempotent. A quiz with zero
    /// questions ends immediately without ever going active.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if self.current_question >= self.total_questions - 1 {
            self.status = SessionStatus::Results;
            AdvanceOutcome {
                status: AdvanceStatus::QuizEnded,
                current_question: self.current_question,
            }
        } else {
            self.current_question += 1;
            self.status = SessionStatus::Active;
            AdvanceOutcome {
                status: AdvanceStatus::NextQuestion,
                current_question: self.current_question,
            }
        }
    }

    /// Joining is allowed in every state; sessions are volatile, so a
    /// participant re-joining after a server restart must not be rejected.
    pub fn join(&mut self, participant: LiveParticipant) {
        self.participants.push(participant);
    }

    /// Record a live answer under the session's current question index.
    /// The question id the client sent is durable-only context; the live
    /// view attributes the answer to whatever question is up right now.
    /// Last write wins per (current_question, participant).
    pub fn record_response(
        &mut self,
        participant_id: i64,
        answer_id: Option<i64>,
        timestamp: DateTime<Utc>,
    ) {
        self.responses
            .entry(self.current_question)
            .or_default()
            .insert(
                participant_id,
                LiveResponse {
                    answer_id,
                    timestamp,
                },
            );
    }

    pub fn snapshot(&self) -> LiveSessionSnapshot {
        LiveSessionSnapshot {
            quiz_id: self.quiz_id,
            current_question: self.current_question,
            status: self.status,
            participant_count: self.participants.len(),
            participants: self.participants.clone(),
            responses: self.responses.clone(),
            total_questions: self.total_questions,
        }
    }
}

/// Owned copy of a live session handed to the gateway, so no map guard
/// outlives a handler.
#[derive(Debug, Clone, Serialize)]
pub struct LiveSessionSnapshot {
    pub quiz_id: i64,
    pub current_question: i64,
    pub status: SessionStatus,
    pub participants: Vec<LiveParticipant>,
    pub responses: HashMap<i64, HashMap<i64, LiveResponse>>,
    pub total_questions: i64,
    pub participant_count: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct JoinSessionRequest {
    #[validate(length(min = 1, max = 255, message = "Participant name must be 1-255 characters"))]
    pub participant_name: String,
    #[serde(default)]
    pub is_host: bool,
}

#[derive(Debug, Serialize)]
pub struct JoinSessionResponse {
    pub success: bool,
    pub participant_id: i64,
    pub is_host: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateLobbyRequest {
    pub quiz_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub participant_id: i64,
    pub question_id: i64,
    pub answer_id: Option<i64>,
    pub session_code: Option<String>,
}

/// Host view of the live response map.
#[derive(Debug, Serialize)]
pub struct SessionResponsesView {
    pub responses: HashMap<i64, HashMap<i64, LiveResponse>>,
    pub current_question: i64,
    pub participants: Vec<LiveParticipant>,
}
