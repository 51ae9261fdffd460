#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        models::session::{LiveParticipant, SessionStatus},
        service::registry::SessionRegistry,
    };

    fn participant(id: i64, name: &str) -> LiveParticipant {
        LiveParticipant {
            id,
            name: name.to_string(),
            is_host: false,
            score: 0,
        }
    }

    #[test]
    fn get_on_unknown_code_is_none() {
        let registry = SessionRegistry::new();
        assert!(registry.get("NOPE42").is_none());
    }

    #[test]
    fn with_session_mut_on_unknown_code_is_none() {
        let registry = SessionRegistry::new();
        let result = registry.with_session_mut("NOPE42", |_| ());
        assert!(result.is_none());
    }

    #[test]
    fn materialize_creates_a_waiting_session() {
        let registry = SessionRegistry::new();
        let snapshot = registry.materialize("AB12C3", 7, 4);

        assert_eq!(snapshot.quiz_id, 7);
        assert_eq!(snapshot.status, SessionStatus::Waiting);
        assert_eq!(snapshot.current_question, 0);
        assert_eq!(snapshot.total_questions, 4);
        assert_eq!(snapshot.participant_count, 0);
    }

    #[test]
    fn materialize_keeps_the_existing_session() {
        let registry = SessionRegistry::new();
        registry.materialize("AB12C3", 7, 4);

        registry.with_session_mut("AB12C3", |session| {
            session.join(participant(1, "Alice"));
            session.start_now();
        });

        // A second derive-on-miss for the same code must not rewind state.
        let snapshot = registry.materialize("AB12C3", 7, 4);
        assert_eq!(snapshot.status, SessionStatus::Active);
        assert_eq!(snapshot.participant_count, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_joins_lose_no_appends() {
        let registry = Arc::new(SessionRegistry::new());
        registry.materialize("AB12C3", 1, 10);

        let mut handles = Vec::new();
        for i in 0..100i64 {
            let registry_clone = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry_clone.with_session_mut("AB12C3", |session| {
                    session.join(participant(i, &format!("participant-{}", i)));
                })
            }));
        }

        let results = futures::future::join_all(handles).await;
        for result in results {
            assert!(result.unwrap().is_some());
        }

        let snapshot = registry.get("AB12C3").unwrap();
        assert_eq!(snapshot.participants.len(), 100);

        let mut ids: Vec<i64> = snapshot.participants.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 100, "Duplicate or lost participant appends");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_answers_and_advance_do_not_corrupt_the_map() {
        let registry = Arc::new(SessionRegistry::new());
        registry.materialize("XY98Z7", 1, 50);

        let mut handles = Vec::new();
        for i in 0..50i64 {
            let registry_clone = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry_clone.with_session_mut("XY98Z7", |session| {
                    session.record_response(i, Some(i), chrono::Utc::now());
                });
            }));
        }
        for _ in 0..10 {
            let registry_clone = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry_clone.with_session_mut("XY98Z7", |session| {
                    session.advance();
                });
            }));
        }

        futures::future::join_all(handles).await;

        // Which question each answer landed on is racy; that none were lost
        // is not.
        let snapshot = registry.get("XY98Z7").unwrap();
        let recorded: usize = snapshot.responses.values().map(|m| m.len()).sum();
        assert_eq!(recorded, 50);
        assert_eq!(snapshot.current_question, 10);
    }
}
