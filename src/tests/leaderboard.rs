#[cfg(test)]
mod tests {
    use crate::models::leaderboard::{LeaderboardEntry, rank};

    fn entry(id: i64, name: &str, total: i64, correct: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            participant_id: id,
            participant_name: name.to_string(),
            total_questions: total,
            correct_answers: correct,
        }
    }

    #[test]
    fn more_correct_answers_rank_higher() {
        let mut entries = vec![entry(1, "Bob", 2, 2), entry(2, "Alice", 3, 3)];
        rank(&mut entries);

        assert_eq!(entries[0].participant_name, "Alice");
        assert_eq!(entries[1].participant_name, "Bob");
    }

    #[test]
    fn equal_scores_order_by_fewest_answered() {
        let mut entries = vec![entry(1, "Bob", 5, 3), entry(2, "Alice", 3, 3)];
        rank(&mut entries);

        assert_eq!(entries[0].participant_name, "Alice");
        assert_eq!(entries[1].participant_name, "Bob");
    }

    #[test]
    fn remaining_ties_fall_back_to_participant_id() {
        let mut entries = vec![
            entry(3, "Carol", 3, 2),
            entry(1, "Alice", 3, 2),
            entry(2, "Bob", 3, 2),
        ];
        rank(&mut entries);

        let ids: Vec<i64> = entries.iter().map(|e| e.participant_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn participants_without_responses_sort_last() {
        let mut entries = vec![
            entry(1, "Idle", 0, 0),
            entry(2, "Alice", 3, 3),
            entry(3, "Bob", 3, 1),
        ];
        rank(&mut entries);

        let names: Vec<&str> = entries.iter().map(|e| e.participant_name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Idle"]);
    }
}
