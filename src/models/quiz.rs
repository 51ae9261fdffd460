use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuizHeader {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub session_code: Option<String>,
}

/// Nested quiz -> questions -> answers view, rebuilt from the flat join.
#[derive(Debug, Serialize)]
pub struct QuizTree {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub questions: Vec<QuestionTree>,
}

#[derive(Debug, Serialize)]
pub struct QuestionTree {
    pub id: i64,
    pub question_text: String,
    pub question_number: i32,
    pub answers: Vec<AnswerView>,
}

#[derive(Debug, Serialize)]
pub struct AnswerView {
    pub id: i64,
    pub answer_text: String,
    pub image_url: Option<String>,
    pub is_correct: bool,
}

/// One row of the questions LEFT JOIN answers query. Answer columns are
/// null for questions without answers.
#[derive(Debug, sqlx::FromRow)]
pub struct QuizTreeRow {
    pub id: i64,
    pub question_text: String,
    pub question_number: i32,
    pub answer_id: Option<i64>,
    pub answer_text: Option<String>,
    pub image_url: Option<String>,
    pub is_correct: Option<bool>,
}

impl QuizTree {
    /// Regroup flat rows into the nested tree. Rows must arrive ordered by
    /// (question_number, question id, answer id) so question order matches
    /// authoring order and answers keep insertion order.
    pub fn from_rows(header: QuizHeader, rows: Vec<QuizTreeRow>) -> Self {
        let mut questions: Vec<QuestionTree> = Vec::new();

        for row in rows {
            if questions.last().map(|q| q.id) != Some(row.id) {
                questions.push(QuestionTree {
                    id: row.id,
                    question_text: row.question_text,
                    question_number: row.question_number,
                    answers: Vec::new(),
                });
            }

            if let (Some(id), Some(answer_text)) = (row.answer_id, row.answer_text) {
                if let Some(question) = questions.last_mut() {
                    question.answers.push(AnswerView {
                        id,
                        answer_text,
                        image_url: row.image_url,
                        is_correct: row.is_correct.unwrap_or(false),
                    });
                }
            }
        }

        Self {
            id: header.id,
            title: header.title,
            description: header.description,
            questions,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "A quiz needs at least one question"), nested)]
    pub questions: Vec<CreateQuestion>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateQuestion {
    #[validate(length(min = 1, message = "Question text cannot be empty"))]
    pub question: String,
    #[validate(length(min = 1, message = "A question needs at least one answer"), nested)]
    pub answers: Vec<CreateAnswer>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateAnswer {
    #[validate(length(min = 1, max = 255, message = "Answer text must be 1-255 characters"))]
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Serialize)]
pub struct CreateQuizResponse {
    pub success: bool,
    pub quiz_id: i64,
    pub session_code: String,
}
