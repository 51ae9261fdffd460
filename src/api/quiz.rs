use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::info;

use crate::{
    api::validation::ValidatedJson,
    db,
    models::{
        app_state::AppState,
        error::ServerError,
        leaderboard::{self, LeaderboardResponse},
        quiz::{CreateQuizRequest, CreateQuizResponse},
        results::ParticipantResults,
    },
};

pub fn quiz_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(create_quiz).get(get_quizzes))
        .route("/{quiz_id}", get(get_quiz).delete(delete_quiz))
        .route("/code/{session_code}", get(get_quiz_by_code))
        .route("/{quiz_id}/leaderboard", get(get_leaderboard))
        .route(
            "/{quiz_id}/results/{participant_id}",
            get(get_participant_results),
        )
        .with_state(state)
}

async fn create_quiz(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateQuizRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let (quiz_id, session_code) = db::quiz::create_quiz(state.get_pool(), &request).await?;

    info!("Created quiz {} with session code {}", quiz_id, session_code);
    let response = CreateQuizResponse {
        success: true,
        quiz_id,
        session_code,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_quizzes(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let quizzes = db::quiz::list_quizzes(state.get_pool()).await?;
    Ok((StatusCode::OK, Json(quizzes)))
}

async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let tree = db::quiz::get_quiz_tree(state.get_pool(), quiz_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Quiz with id {} does not exist", quiz_id)))?;

    Ok((StatusCode::OK, Json(tree)))
}

async fn get_quiz_by_code(
    State(state): State<Arc<AppState>>,
    Path(session_code): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let tree = db::quiz::get_quiz_tree_by_code(state.get_pool(), &session_code)
        .await?
        .ok_or_else(|| {
            ServerError::NotFound(format!("No quiz with session code {}", session_code))
        })?;

    Ok((StatusCode::OK, Json(tree)))
}

async fn delete_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    db::quiz::delete_quiz(state.get_pool(), quiz_id).await?;

    info!("Deleted quiz {}", quiz_id);
    Ok((StatusCode::OK, Json(json!({ "success": true }))))
}

async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let header = db::quiz::get_quiz_header(state.get_pool(), quiz_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Quiz with id {} does not exist", quiz_id)))?;

    let mut entries = db::leaderboard::leaderboard_by_quiz(state.get_pool(), quiz_id).await?;
    leaderboard::rank(&mut entries);

    let response = LeaderboardResponse {
        quiz_title: header.title,
        leaderboard: entries,
    };
    Ok((StatusCode::OK, Json(response)))
}

async fn get_participant_results(
    State(state): State<Arc<AppState>>,
    Path((quiz_id, participant_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ServerError> {
    let name = db::participant::get_participant_name(state.get_pool(), participant_id, quiz_id)
        .await?
        .ok_or_else(|| {
            ServerError::NotFound(format!(
                "Participant {} not found in quiz {}",
                participant_id, quiz_id
            ))
        })?;

    let rows =
        db::response::participant_result_rows(state.get_pool(), quiz_id, participant_id).await?;
    Ok((StatusCode::OK, Json(ParticipantResults::from_rows(name, rows))))
}
