use aria_persist::{FitnessDataStore, PersistError, SupabaseConfig, SupabaseDataStore};
use aria_types::{ConversationTurn, WorkoutStatus};
use chrono::NaiveDate;
use mockito::{Matcher, Server};

fn store(server: &Server) -> SupabaseDataStore {
    SupabaseDataStore::from_config(&SupabaseConfig::new(server.url(), "anon-key")).unwrap()
}

#[tokio::test]
async fn test_active_workout_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/workouts")
        .match_header("apikey", "anon-key")
        .match_header("authorization", "Bearer anon-key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "*".into()),
            Matcher::UrlEncoded("user_id".into(), "eq.u1".into()),
            Matcher::UrlEncoded("status".into(), "eq.in_progress".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .with_status(200)
        .with_body(r#"[{"id":"w1","name":"Leg Day","status":"in_progress"}]"#)
        .create_async()
        .await;

    let workout = store(&server).active_workout("u1").await.unwrap().unwrap();

    assert_eq!(workout.name, "Leg Day");
    assert_eq!(workout.status, WorkoutStatus::InProgress);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_maybe_single_empty_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/v1/user_goals")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    assert!(store(&server).goals("u1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_nutrition_filters_by_date() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/nutrition_logs")
        .match_query(Matcher::UrlEncoded("date".into(), "eq.2024-05-03".into()))
        .with_status(200)
        .with_body(r#"[{"user_id":"u1","calories":1850.5,"protein":140}]"#)
        .create_async()
        .await;

    let day = store(&server)
        .nutrition_for_day("u1", NaiveDate::from_ymd_opt(2024, 5, 3).unwrap())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(day.calories, 1850.5);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_recent_workouts_limit() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/v1/workouts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("order".into(), "created_at.desc".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(r#"[{"id":"a"},{"id":"b"}]"#)
        .create_async()
        .await;

    let workouts = store(&server).recent_workouts("u1", 10).await.unwrap();
    assert_eq!(workouts.len(), 2);
}

#[tokio::test]
async fn test_error_status_surfaces_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/v1/user_preferences")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message":"Invalid API key"}"#)
        .create_async()
        .await;

    let err = store(&server).preferences("u1").await.unwrap_err();
    match err {
        PersistError::Api { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_save_conversation_turns_inserts_rows() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/ai_conversations")
        .match_header("prefer", "return=minimal")
        .match_body(Matcher::PartialJson(serde_json::json!([
            { "user_id": "u1", "session_id": "s1", "role": "user", "content": "hi" },
            { "user_id": "u1", "session_id": "s1", "role": "assistant", "content": "hello" }
        ])))
        .with_status(201)
        .create_async()
        .await;

    let turns = vec![ConversationTurn::user("hi"), ConversationTurn::assistant("hello")];
    store(&server)
        .save_conversation_turns("u1", "s1", &turns)
        .await
        .unwrap();

    mock.assert_async().await;
}
