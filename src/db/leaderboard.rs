use sqlx::{Pool, Postgres};

use crate::models::leaderboard::LeaderboardEntry;

// Both aggregations consider only the latest response row per
// (participant, question): the durable table is append-only and the
// last-write-wins policy is applied here, mirroring the live map.

pub async fn leaderboard_by_quiz(
    pool: &Pool<Postgres>,
    quiz_id: i64,
) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
    sqlx::query_as::<_, LeaderboardEntry>(
        r#"
        SELECT p.id AS participant_id,
               p.participant_name,
               COUNT(r.id) AS total_questions,
               COALESCE(SUM(CASE WHEN a.is_correct THEN 1 ELSE 0 END), 0) AS correct_answers
        FROM "participants" p
        LEFT JOIN (
            SELECT DISTINCT ON (participant_id, question_id) id, participant_id, answer_id
            FROM "responses"
            ORDER BY participant_id, question_id, responded_at DESC, id DESC
        ) r ON p.id = r.participant_id
        LEFT JOIN "answers" a ON r.answer_id = a.id
        WHERE p.quiz_id = $1
        GROUP BY p.id, p.participant_name
        "#,
    )
    .bind(quiz_id)
    .fetch_all(pool)
    .await
}

pub async fn leaderboard_by_session(
    pool: &Pool<Postgres>,
    session_code: &str,
) -> Result<Vec<LeaderboardEntry>, sqlx::Error> {
    sqlx::query_as::<_, LeaderboardEntry>(
        r#"
        SELECT p.id AS participant_id,
               p.participant_name,
               COUNT(r.id) AS total_questions,
               COALESCE(SUM(CASE WHEN a.is_correct THEN 1 ELSE 0 END), 0) AS correct_answers
        FROM "participants" p
        LEFT JOIN (
            SELECT DISTINCT ON (participant_id, question_id) id, participant_id, answer_id
            FROM "responses"
            ORDER BY participant_id, question_id, responded_at DESC, id DESC
        ) r ON p.id = r.participant_id
        LEFT JOIN "answers" a ON r.answer_id = a.id
        WHERE p.session_code = $1
        GROUP BY p.id, p.participant_name
        "#,
    )
    .bind(session_code)
    .fetch_all(pool)
    .await
}
