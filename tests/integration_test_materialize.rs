mod common;

use axum::http::StatusCode;
use chrono::NaiveDate;
use common::{parse_body, TestApp};
use gym_scheduler::domain::models::{schedule::MaterializeResult, user::Role};
use serde_json::json;
use std::collections::HashSet;
use tokio::task::JoinSet;

#[tokio::test]
async fn test_materialize_then_conflict_returns_canonical_id() {
    let app = TestApp::new().await;
    let (_, auth) = app.seed_and_login("admin", Role::Admin).await;
    let template_id = app.create_template(&auth, 5, "16:00", 8, "UPPER").await;
    let uri = format!("/api/v1/default-schedules/{}/materialize", template_id);

    let res = app.send("POST", &uri, &auth, Some(json!({"date": "2024-05-17"}))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = parse_body(res).await;
    assert_eq!(created["current_participants"], 0);
    assert_eq!(created["capacity"], 8);
    assert_eq!(created["time"], "16:00");

    let res = app.send("POST", &uri, &auth, Some(json!({"date": "2024-05-17"}))).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert_eq!(body["code"], "ALREADY_EXISTS");
    assert_eq!(body["schedule_id"], created["id"]);
}

#[tokio::test]
async fn test_materialize_rejects_wrong_weekday_and_unknown_template() {
    let app = TestApp::new().await;
    let (_, auth) = app.seed_and_login("admin", Role::Admin).await;
    let template_id = app.create_template(&auth, 5, "16:00", 8, "UPPER").await;

    // 2024-05-16 is a Thursday.
    let res = app.send("POST", &format!("/api/v1/default-schedules/{}/materialize", template_id), &auth, Some(json!({
        "date": "2024-05-16"
    }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["code"], "VALIDATION");

    let res = app.send("POST", "/api/v1/default-schedules/missing/materialize", &auth, Some(json!({
        "date": "2024-05-17"
    }))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.send("POST", &format!("/api/v1/default-schedules/{}/materialize", template_id), &auth, Some(json!({
        "date": "17/05/2024"
    }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inactive_template_is_not_materialized() {
    let app = TestApp::new().await;
    let (_, auth) = app.seed_and_login("admin", Role::Admin).await;

    let res = app.send("POST", "/api/v1/default-schedules", &auth, Some(json!({
        "day_of_week": 1, "time": "07:00", "capacity": 10, "workout_type": "UPPER", "is_active": false
    }))).await;
    let template_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.send("POST", &format!("/api/v1/default-schedules/{}/materialize", template_id), &auth, Some(json!({
        "date": "2024-05-13"
    }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedules")
        .fetch_one(&app.pool).await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_concurrent_http_materialize_shares_one_instance() {
    let app = TestApp::new().await;
    let (_, auth) = app.seed_and_login("admin", Role::Admin).await;
    let template_id = app.create_template(&auth, 5, "16:00", 8, "UPPER").await;
    let uri = format!("/api/v1/default-schedules/{}/materialize", template_id);

    let (a, b) = tokio::join!(
        app.send("POST", &uri, &auth, Some(json!({"date": "2024-05-17"}))),
        app.send("POST", &uri, &auth, Some(json!({"date": "2024-05-17"}))),
    );

    let mut statuses = vec![a.status().as_u16(), b.status().as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![201, 409]);

    let (a, b) = (parse_body(a).await, parse_body(b).await);
    let id_a = a.get("schedule_id").unwrap_or(&a["id"]).clone();
    let id_b = b.get("schedule_id").unwrap_or(&b["id"]).clone();
    assert_eq!(id_a, id_b);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schedules")
        .fetch_one(&app.pool).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_materializer_race_has_exactly_one_creator() {
    let app = TestApp::new().await;
    let (_, auth) = app.seed_and_login("admin", Role::Admin).await;
    let template_id = app.create_template(&auth, 5, "16:00", 8, "UPPER").await;
    let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();

    let mut set = JoinSet::new();
    for _ in 0..8 {
        let materializer = app.state.materializer.clone();
        let template_id = template_id.clone();
        set.spawn(async move { materializer.materialize(&template_id, date).await });
    }

    let mut ids = HashSet::new();
    let mut created = 0;
    while let Some(joined) = set.join_next().await {
        let result = joined.unwrap().expect("materialize failed");
        if let MaterializeResult::Created(_) = &result {
            created += 1;
        }
        ids.insert(result.into_instance().id);
    }

    assert_eq!(created, 1);
    assert_eq!(ids.len(), 1);
}
