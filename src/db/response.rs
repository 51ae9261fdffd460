use sqlx::{Pool, Postgres};

use crate::models::results::ParticipantResultRow;

/// Durable responses are append-only; a participant answering twice leaves
/// two rows. Scoring picks the latest one.
pub async fn insert_response(
    pool: &Pool<Postgres>,
    participant_id: i64,
    question_id: i64,
    answer_id: Option<i64>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO "responses" (participant_id, question_id, answer_id)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(participant_id)
    .bind(question_id)
    .bind(answer_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// All questions and answers of a quiz joined against the participant's
/// latest response per question.
pub async fn participant_result_rows(
    pool: &Pool<Postgres>,
    quiz_id: i64,
    participant_id: i64,
) -> Result<Vec<ParticipantResultRow>, sqlx::Error> {
    sqlx::query_as::<_, ParticipantResultRow>(
        r#"
        SELECT q.id AS question_id, q.question_text, q.question_number,
               a.id AS answer_id, a.answer_text, a.is_correct,
               r.answer_id AS selected_answer_id
        FROM "questions" q
        LEFT JOIN "answers" a ON q.id = a.question_id
        LEFT JOIN (
            SELECT DISTINCT ON (question_id) question_id, answer_id
            FROM "responses"
            WHERE participant_id = $2
            ORDER BY question_id, responded_at DESC, id DESC
        ) r ON r.question_id = q.id
        WHERE q.quiz_id = $1
        ORDER BY q.question_number, q.id, a.id
        "#,
    )
    .bind(quiz_id)
    .bind(participant_id)
    .fetch_all(pool)
    .await
}
