use serde::Serialize;

/// Per-participant result breakdown, derived from durable rows only.
#[derive(Debug, Serialize)]
pub struct ParticipantResults {
    pub participant_name: String,
    pub questions: Vec<QuestionResult>,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub score: String,
    pub percentage: f64,
}

#[derive(Debug, Serialize)]
pub struct QuestionResult {
    pub id: i64,
    pub question_text: String,
    pub question_number: i32,
    pub answers: Vec<AnswerResult>,
    pub selected_answer_id: Option<i64>,
    pub is_correct: bool,
}

#[derive(Debug, Serialize)]
pub struct AnswerResult {
    pub id: i64,
    pub answer_text: String,
    pub is_correct: bool,
}

/// One row of the questions x answers x latest-response join.
#[derive(Debug, sqlx::FromRow)]
pub struct ParticipantResultRow {
    pub question_id: i64,
    pub question_text: String,
    pub question_number: i32,
    pub answer_id: Option<i64>,
    pub answer_text: Option<String>,
    pub is_correct: Option<bool>,
    pub selected_answer_id: Option<i64>,
}

impl ParticipantResults {
    /// Rows must arrive ordered by (question_number, question id, answer id).
    /// A question counts as correct when the participant's selected answer
    /// carries the correctness flag; totals count questions, not answer rows.
    pub fn from_rows(participant_name: String, rows: Vec<ParticipantResultRow>) -> Self {
        let mut questions: Vec<QuestionResult> = Vec::new();

        for row in rows {
            if questions.last().map(|q| q.id) != Some(row.question_id) {
                questions.push(QuestionResult {
                    id: row.question_id,
                    question_text: row.question_text,
                    question_number: row.question_number,
                    answers: Vec::new(),
                    selected_answer_id: row.selected_answer_id,
                    is_correct: false,
                });
            }

            if let (Some(id), Some(answer_text)) = (row.answer_id, row.answer_text) {
                let is_correct = row.is_correct.unwrap_or(false);
                if let Some(question) = questions.last_mut() {
                    if question.selected_answer_id == Some(id) && is_correct {
                        question.is_correct = true;
                    }
                    question.answers.push(AnswerResult {
                        id,
                        answer_text,
                        is_correct,
                    });
                }
            }
        }

        let total_questions = questions.len() as i64;
        let correct_answers = questions.iter().filter(|q| q.is_correct).count() as i64;
        let percentage = if total_questions > 0 {
            (correct_answers as f64 / total_questions as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };

        Self {
            participant_name,
            score: format!("{}/{}", correct_answers, total_questions),
            percentage,
            questions,
            total_questions,
            correct_answers,
        }
    }
}
