use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::{
    api::validation::ValidatedJson,
    db,
    models::{
        app_state::AppState,
        error::ServerError,
        leaderboard::{self, LeaderboardResponse},
        session::{
            CreateLobbyRequest, JoinSessionRequest, JoinSessionResponse, LiveParticipant,
            SessionResponsesView, SubmitAnswerRequest,
        },
    },
};

pub fn session_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/lobby", post(create_lobby))
        .route("/answers", post(submit_answer))
        .route("/{session_code}/open", post(open_session))
        .route("/{session_code}/join", post(join_session))
        .route("/{session_code}/status", get(get_session_status))
        .route("/{session_code}/responses", get(get_responses))
        .route("/{session_code}/participants", get(get_lobby_participants))
        .route("/{session_code}/leaderboard", get(get_live_leaderboard))
        .route("/{session_code}/advance", post(advance_question))
        .route("/{session_code}/start", post(start_quiz_now))
        .route("/{session_code}/end", post(end_quiz))
        .with_state(state)
}

/// Materialize the live session for a code (no-op when it already exists).
async fn open_session(
    State(state): State<Arc<AppState>>,
    Path(session_code): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let snapshot = state
        .get_registry()
        .ensure(state.get_pool(), &session_code)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "quiz_id": snapshot.quiz_id })),
    ))
}

async fn create_lobby(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateLobbyRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let (session_code, _) = state
        .get_registry()
        .ensure_for_quiz(state.get_pool(), request.quiz_id)
        .await?;

    info!("Opened lobby {} for quiz {}", session_code, request.quiz_id);
    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "session_code": session_code })),
    ))
}

async fn join_session(
    State(state): State<Arc<AppState>>,
    Path(session_code): Path<String>,
    ValidatedJson(request): ValidatedJson<JoinSessionRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let pool = state.get_pool();
    let registry = state.get_registry();

    let quiz_id = db::quiz::find_quiz_id_by_code(pool, &session_code)
        .await?
        .ok_or_else(|| {
            ServerError::NotFound(format!("No quiz with session code {}", session_code))
        })?;

    // Durable insert is the commit point; only then touch live state.
    let participant_id = db::participant::insert_participant(
        pool,
        quiz_id,
        &request.participant_name,
        Some(&session_code),
        request.is_host,
    )
    .await?;

    registry.ensure(pool, &session_code).await?;
    let appended = registry.with_session_mut(&session_code, |session| {
        session.join(LiveParticipant {
            id: participant_id,
            name: request.participant_name.clone(),
            is_host: request.is_host,
            score: 0,
        });
    });
    if appended.is_none() {
        warn!(
            "Participant {} joined durably but session {} vanished from the registry",
            participant_id, session_code
        );
    }

    info!(
        "Participant {} joined session {} (host: {})",
        participant_id, session_code, request.is_host
    );
    let response = JoinSessionResponse {
        success: true,
        participant_id,
        is_host: request.is_host,
    };
    Ok((StatusCode::OK, Json(response)))
}

async fn get_session_status(
    State(state): State<Arc<AppState>>,
    Path(session_code): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let snapshot = state
        .get_registry()
        .ensure(state.get_pool(), &session_code)
        .await?;

    Ok((StatusCode::OK, Json(snapshot)))
}

async fn get_responses(
    State(state): State<Arc<AppState>>,
    Path(session_code): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let snapshot = state
        .get_registry()
        .get(&session_code)
        .ok_or_else(|| ServerError::NotFound(format!("Session {} not found", session_code)))?;

    let view = SessionResponsesView {
        responses: snapshot.responses,
        current_question: snapshot.current_question,
        participants: snapshot.participants,
    };
    Ok((StatusCode::OK, Json(view)))
}

async fn get_lobby_participants(
    State(state): State<Arc<AppState>>,
    Path(session_code): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let snapshot = state
        .get_registry()
        .get(&session_code)
        .ok_or_else(|| ServerError::NotFound(format!("Session {} not found", session_code)))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "participants": snapshot.participants })),
    ))
}

async fn advance_question(
    State(state): State<Arc<AppState>>,
    Path(session_code): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let outcome = state
        .get_registry()
        .with_session_mut(&session_code, |session| session.advance())
        .ok_or_else(|| ServerError::NotFound(format!("Session {} not found", session_code)))?;

    info!(
        "Session {} advanced: {:?} (question {})",
        session_code, outcome.status, outcome.current_question
    );
    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "status": outcome.status,
            "current_question": outcome.current_question,
        })),
    ))
}

async fn start_quiz_now(
    State(state): State<Arc<AppState>>,
    Path(session_code): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    state
        .get_registry()
        .with_session_mut(&session_code, |session| session.start_now())
        .ok_or_else(|| ServerError::NotFound(format!("Session {} not found", session_code)))?;

    info!("Session {} started", session_code);
    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

async fn end_quiz(
    State(state): State<Arc<AppState>>,
    Path(session_code): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    state
        .get_registry()
        .with_session_mut(&session_code, |session| session.end_now())
        .ok_or_else(|| ServerError::NotFound(format!("Session {} not found", session_code)))?;

    info!("Session {} ended by host", session_code);
    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

async fn submit_answer(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, ServerError> {
    // Durable write first; the live update after it is best-effort and
    // never rolls the row back.
    db::response::insert_response(
        state.get_pool(),
        request.participant_id,
        request.question_id,
        request.answer_id,
    )
    .await?;

    if let Some(session_code) = &request.session_code {
        let recorded = state.get_registry().with_session_mut(session_code, |session| {
            session.record_response(request.participant_id, request.answer_id, Utc::now());
        });
        if recorded.is_none() {
            debug!(
                "No live session {} for answer from participant {}",
                session_code, request.participant_id
            );
        }
    }

    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

async fn get_live_leaderboard(
    State(state): State<Arc<AppState>>,
    Path(session_code): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    // Derived from durable rows only, never from the live session.
    let header = db::quiz::get_quiz_header_by_code(state.get_pool(), &session_code)
        .await?
        .ok_or_else(|| {
            ServerError::NotFound(format!("No quiz with session code {}", session_code))
        })?;

    let mut entries =
        db::leaderboard::leaderboard_by_session(state.get_pool(), &session_code).await?;
    leaderboard::rank(&mut entries);

    let response = LeaderboardResponse {
        quiz_title: header.title,
        leaderboard: entries,
    };
    Ok((StatusCode::OK, Json(response)))
}
