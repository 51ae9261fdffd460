use sqlx::{Pool, Postgres};

use crate::{
    models::{
        error::ServerError,
        quiz::{CreateQuizRequest, QuizHeader, QuizSummary, QuizTree, QuizTreeRow},
    },
    service::session_code,
};

/// Persist a quiz with its questions and answers in one transaction.
/// Question numbers are assigned 1..N in input order; answer order follows
/// insertion ids. A session-code collision maps to Conflict.
pub async fn create_quiz(
    pool: &Pool<Postgres>,
    request: &CreateQuizRequest,
) -> Result<(i64, String), ServerError> {
    let session_code = session_code::generate();
    let mut tx = pool.begin().await?;

    let quiz_id = match sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO "quizzes" (title, description, session_code)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&request.title)
    .bind(&request.description)
    .bind(&session_code)
    .fetch_one(&mut *tx)
    .await
    {
        Ok(id) => id,
        Err(e) if e.as_database_error().is_some_and(|d| d.is_unique_violation()) => {
            return Err(ServerError::Conflict(format!(
                "Session code {} already in use",
                session_code
            )));
        }
        Err(e) => return Err(e.into()),
    };

    for (idx, question) in request.questions.iter().enumerate() {
        let question_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO "questions" (quiz_id, question_text, question_number)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(quiz_id)
        .bind(&question.question)
        .bind(idx as i32 + 1)
        .fetch_one(&mut *tx)
        .await?;

        for answer in &question.answers {
            sqlx::query(
                r#"
                INSERT INTO "answers" (question_id, answer_text, image_url, is_correct)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(question_id)
            .bind(&answer.text)
            .bind(&answer.image)
            .bind(answer.is_correct)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    Ok((quiz_id, session_code))
}

pub async fn list_quizzes(pool: &Pool<Postgres>) -> Result<Vec<QuizSummary>, sqlx::Error> {
    sqlx::query_as::<_, QuizSummary>(
        r#"
        SELECT id, title, description, created_at
        FROM "quizzes"
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn delete_quiz(pool: &Pool<Postgres>, quiz_id: i64) -> Result<(), ServerError> {
    // Questions, answers, participants and responses go with it (cascade).
    let row = sqlx::query(
        r#"
        DELETE FROM "quizzes"
        WHERE id = $1
        "#,
    )
    .bind(quiz_id)
    .execute(pool)
    .await?;

    if row.rows_affected() == 0 {
        return Err(ServerError::NotFound(format!(
            "Quiz with id {} does not exist",
            quiz_id
        )));
    }

    Ok(())
}

pub async fn get_quiz_header(
    pool: &Pool<Postgres>,
    quiz_id: i64,
) -> Result<Option<QuizHeader>, sqlx::Error> {
    sqlx::query_as::<_, QuizHeader>(
        r#"
        SELECT id, title, description, session_code
        FROM "quizzes"
        WHERE id = $1
        "#,
    )
    .bind(quiz_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_quiz_header_by_code(
    pool: &Pool<Postgres>,
    session_code: &str,
) -> Result<Option<QuizHeader>, sqlx::Error> {
    sqlx::query_as::<_, QuizHeader>(
        r#"
        SELECT id, title, description, session_code
        FROM "quizzes"
        WHERE session_code = $1
        "#,
    )
    .bind(session_code)
    .fetch_optional(pool)
    .await
}

pub async fn find_quiz_id_by_code(
    pool: &Pool<Postgres>,
    session_code: &str,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT id
        FROM "quizzes"
        WHERE session_code = $1
        "#,
    )
    .bind(session_code)
    .fetch_optional(pool)
    .await
}

pub async fn get_session_code(
    pool: &Pool<Postgres>,
    quiz_id: i64,
) -> Result<Option<String>, sqlx::Error> {
    let code = sqlx::query_scalar::<_, Option<String>>(
        r#"
        SELECT session_code
        FROM "quizzes"
        WHERE id = $1
        "#,
    )
    .bind(quiz_id)
    .fetch_optional(pool)
    .await?;

    Ok(code.flatten())
}

pub async fn count_questions(pool: &Pool<Postgres>, quiz_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM "questions"
        WHERE quiz_id = $1
        "#,
    )
    .bind(quiz_id)
    .fetch_one(pool)
    .await
}

/// Nested quiz tree for a quiz id, or None when the quiz does not exist.
pub async fn get_quiz_tree(
    pool: &Pool<Postgres>,
    quiz_id: i64,
) -> Result<Option<QuizTree>, sqlx::Error> {
    let Some(header) = get_quiz_header(pool, quiz_id).await? else {
        return Ok(None);
    };

    let rows = sqlx::query_as::<_, QuizTreeRow>(
        r#"
        SELECT q.id, q.question_text, q.question_number,
               a.id AS answer_id, a.answer_text, a.image_url, a.is_correct
        FROM "questions" q
        LEFT JOIN "answers" a ON q.id = a.question_id
        WHERE q.quiz_id = $1
        ORDER BY q.question_number, q.id, a.id
        "#,
    )
    .bind(quiz_id)
    .fetch_all(pool)
    .await?;

    Ok(Some(QuizTree::from_rows(header, rows)))
}

pub async fn get_quiz_tree_by_code(
    pool: &Pool<Postgres>,
    session_code: &str,
) -> Result<Option<QuizTree>, sqlx::Error> {
    match find_quiz_id_by_code(pool, session_code).await? {
        Some(quiz_id) => get_quiz_tree(pool, quiz_id).await,
        None => Ok(None),
    }
}
