use sqlx::{Pool, Postgres};

pub async fn insert_participant(
    pool: &Pool<Postgres>,
    quiz_id: i64,
    participant_name: &str,
    session_code: Option<&str>,
    is_host: bool,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO "participants" (quiz_id, participant_name, session_code, is_host)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(quiz_id)
    .bind(participant_name)
    .bind(session_code)
    .bind(is_host)
    .fetch_one(pool)
    .await
}

pub async fn get_participant_name(
    pool: &Pool<Postgres>,
    participant_id: i64,
    quiz_id: i64,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT participant_name
        FROM "participants"
        WHERE id = $1 AND quiz_id = $2
        "#,
    )
    .bind(participant_id)
    .bind(quiz_id)
    .fetch_optional(pool)
    .await
}
