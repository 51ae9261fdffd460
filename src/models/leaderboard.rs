use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LeaderboardEntry {
    pub participant_id: i64,
    pub participant_name: String,
    pub total_questions: i64,
    pub correct_answers: i64,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub quiz_title: String,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Ranking policy, in one place: most correct answers first, equal scores
/// order by fewest questions answered, remaining ties by participant id
/// (insertion order).
pub fn rank(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        b.correct_answers
            .cmp(&a.correct_answers)
            .then(a.total_questions.cmp(&b.total_questions))
            .then(a.participant_id.cmp(&b.participant_id))
    });
}
