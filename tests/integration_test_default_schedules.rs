mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use gym_scheduler::domain::models::user::Role;
use serde_json::json;

#[tokio::test]
async fn test_upsert_defaults_coach_to_acting_user() {
    let app = TestApp::new().await;
    let (coach, auth) = app.seed_and_login("coach", Role::Coach).await;

    let res = app.send("POST", "/api/v1/default-schedules", &auth, Some(json!({
        "day_of_week": 1, "time": "7:30", "capacity": 12, "workout_type": "UPPER", "coach_id": ""
    }))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = parse_body(res).await;

    assert_eq!(created["coach_id"], coach.id);
    assert_eq!(created["time"], "07:30");
    assert_eq!(created["is_active"], true);

    // Upsert by id updates in place.
    let id = created["id"].as_str().unwrap();
    let res = app.send("POST", "/api/v1/default-schedules", &auth, Some(json!({
        "id": id, "day_of_week": 2, "time": "08:00", "capacity": 10, "workout_type": "LOWER", "is_active": false
    }))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["day_of_week"], 2);
    assert_eq!(updated["workout_type"], "LOWER");
    assert_eq!(updated["is_active"], false);

    let res = app.send("GET", "/api/v1/default-schedules", &auth, None).await;
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_members_cannot_edit_templates() {
    let app = TestApp::new().await;
    let (_, auth) = app.seed_and_login("alice", Role::User).await;

    let res = app.send("POST", "/api/v1/default-schedules", &auth, Some(json!({
        "day_of_week": 1, "time": "07:00", "capacity": 12, "workout_type": "UPPER"
    }))).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(parse_body(res).await["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_invalid_templates_are_rejected() {
    let app = TestApp::new().await;
    let (_, auth) = app.seed_and_login("admin", Role::Admin).await;

    for payload in [
        json!({"day_of_week": 7, "time": "07:00", "capacity": 12, "workout_type": "UPPER"}),
        json!({"day_of_week": 1, "time": "25:00", "capacity": 12, "workout_type": "UPPER"}),
        json!({"day_of_week": 1, "time": "07:00", "capacity": 0, "workout_type": "UPPER"}),
    ] {
        let res = app.send("POST", "/api/v1/default-schedules", &auth, Some(payload)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse_body(res).await["code"], "VALIDATION");
    }

    let res = app.send("GET", "/api/v1/default-schedules", &auth, None).await;
    assert!(parse_body(res).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_template_keeps_instances() {
    let app = TestApp::new().await;
    let (_, auth) = app.seed_and_login("admin", Role::Admin).await;
    let template_id = app.create_template(&auth, 1, "07:00", 10, "UPPER").await;

    let res = app.send("POST", &format!("/api/v1/default-schedules/{}/materialize", template_id), &auth, Some(json!({
        "date": "2024-05-13"
    }))).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let schedule_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.send("DELETE", &format!("/api/v1/default-schedules/{}", template_id), &auth, None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.send("GET", &format!("/api/v1/default-schedules/{}", template_id), &auth, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.send("GET", &format!("/api/v1/schedules/{}", schedule_id), &auth, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["default_schedule_id"], template_id);
    assert_eq!(body["coach"]["username"], "admin");
}

#[tokio::test]
async fn test_week_view_merges_templates_and_instances() {
    let app = TestApp::new().await;
    let (_, auth) = app.seed_and_login("admin", Role::Admin).await;

    let monday = app.create_template(&auth, 1, "07:00", 10, "UPPER").await;
    app.create_template(&auth, 5, "16:00", 8, "UPPER").await;

    let res = app.send("POST", &format!("/api/v1/default-schedules/{}/materialize", monday), &auth, Some(json!({
        "date": "2024-05-13"
    }))).await;
    let schedule_id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.send("GET", "/api/v1/schedules/week?start=2024-05-13", &auth, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let slots = parse_body(res).await;
    let slots = slots.as_array().unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["date"], "2024-05-13");
    assert_eq!(slots[0]["schedule_id"], schedule_id);
    assert_eq!(slots[0]["is_flexible"], false);
    assert_eq!(slots[1]["date"], "2024-05-17");
    assert!(slots[1]["schedule_id"].is_null());
    assert_eq!(slots[1]["is_flexible"], true);
}
