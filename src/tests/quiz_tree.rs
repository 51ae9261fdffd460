#[cfg(test)]
mod tests {
    use crate::models::{
        quiz::{QuizHeader, QuizTree, QuizTreeRow},
        results::{ParticipantResultRow, ParticipantResults},
    };

    fn header() -> QuizHeader {
        QuizHeader {
            id: 1,
            title: "Colors".to_string(),
            description: Some("A quiz about colors".to_string()),
            session_code: Some("AB12C3".to_string()),
        }
    }

    fn row(
        question_id: i64,
        number: i32,
        text: &str,
        answer: Option<(i64, &str, bool)>,
    ) -> QuizTreeRow {
        QuizTreeRow {
            id: question_id,
            question_text: text.to_string(),
            question_number: number,
            answer_id: answer.map(|(id, _, _)| id),
            answer_text: answer.map(|(_, t, _)| t.to_string()),
            image_url: None,
            is_correct: answer.map(|(_, _, c)| c),
        }
    }

    #[test]
    fn rows_group_into_questions_in_submission_order() {
        let rows = vec![
            row(10, 1, "Best color?", Some((100, "Red", true))),
            row(10, 1, "Best color?", Some((101, "Blue", false))),
            row(11, 2, "Worst color?", Some((102, "Beige", true))),
        ];

        let tree = QuizTree::from_rows(header(), rows);

        assert_eq!(tree.questions.len(), 2);
        assert_eq!(tree.questions[0].question_number, 1);
        assert_eq!(tree.questions[0].answers.len(), 2);
        assert_eq!(tree.questions[0].answers[0].answer_text, "Red");
        assert!(tree.questions[0].answers[0].is_correct);
        assert_eq!(tree.questions[1].answers.len(), 1);
    }

    #[test]
    fn question_without_answers_gets_an_empty_list() {
        let rows = vec![
            row(10, 1, "Best color?", Some((100, "Red", true))),
            row(11, 2, "Unanswerable?", None),
        ];

        let tree = QuizTree::from_rows(header(), rows);

        assert_eq!(tree.questions.len(), 2);
        assert!(tree.questions[1].answers.is_empty());
    }

    #[test]
    fn empty_quiz_has_no_questions() {
        let tree = QuizTree::from_rows(header(), Vec::new());
        assert!(tree.questions.is_empty());
    }

    fn result_row(
        question_id: i64,
        number: i32,
        answer: (i64, &str, bool),
        selected: Option<i64>,
    ) -> ParticipantResultRow {
        ParticipantResultRow {
            question_id,
            question_text: format!("Question {}", number),
            question_number: number,
            answer_id: Some(answer.0),
            answer_text: Some(answer.1.to_string()),
            is_correct: Some(answer.2),
            selected_answer_id: selected,
        }
    }

    #[test]
    fn participant_results_count_questions_not_answer_rows() {
        let rows = vec![
            result_row(10, 1, (100, "Red", true), Some(100)),
            result_row(10, 1, (101, "Blue", false), Some(100)),
            result_row(11, 2, (102, "Beige", true), Some(103)),
            result_row(11, 2, (103, "Mauve", false), Some(103)),
        ];

        let results = ParticipantResults::from_rows("Alice".to_string(), rows);

        assert_eq!(results.total_questions, 2);
        assert_eq!(results.correct_answers, 1);
        assert_eq!(results.score, "1/2");
        assert_eq!(results.percentage, 50.0);
        assert!(results.questions[0].is_correct);
        assert!(!results.questions[1].is_correct);
    }

    #[test]
    fn unanswered_questions_are_not_correct() {
        let rows = vec![result_row(10, 1, (100, "Red", true), None)];

        let results = ParticipantResults::from_rows("Alice".to_string(), rows);

        assert_eq!(results.total_questions, 1);
        assert_eq!(results.correct_answers, 0);
        assert_eq!(results.questions[0].selected_answer_id, None);
    }

    #[test]
    fn no_questions_yield_zero_percentage() {
        let results = ParticipantResults::from_rows("Alice".to_string(), Vec::new());

        assert_eq!(results.total_questions, 0);
        assert_eq!(results.score, "0/0");
        assert_eq!(results.percentage, 0.0);
    }
}
