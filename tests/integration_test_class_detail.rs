mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use gym_scheduler::domain::models::{user::Role, workout::MemberMaxLifts};
use serde_json::json;

#[tokio::test]
async fn test_current_class_computes_weights_per_booking_type() {
    let app = TestApp::new().await;
    let (_, admin) = app.seed_and_login("admin", Role::Admin).await;
    let (alice, alice_auth) = app.seed_and_login("alice", Role::User).await;
    let (bob, bob_auth) = app.seed_and_login("bob", Role::User).await;

    app.state.user_repo.update_max_lifts(&alice.id, &MemberMaxLifts {
        max_bench: Some(100.0),
        ..Default::default()
    }).await.unwrap();
    app.state.user_repo.update_max_lifts(&bob.id, &MemberMaxLifts {
        max_squat: Some(180.0),
        max_deadlift: Some(200.0),
        ..Default::default()
    }).await.unwrap();

    let template_id = app.create_template(&admin, 5, "16:00", 8, "UPPER").await;
    let uri = format!("/api/v1/default-schedules/{}/book", template_id);
    app.send("POST", &uri, &alice_auth, Some(json!({"date": "2024-05-17", "workout_type": "UPPER"}))).await;
    app.send("POST", &uri, &bob_auth, Some(json!({"date": "2024-05-17", "workout_type": "LOWER"}))).await;

    let res = app.send("GET", "/api/v1/classes/current?date=2024-05-17&hour=16", &alice_auth, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let view = parse_body(res).await;

    // 2024-05-17 falls in week 4 of a cycle starting 2024-01-01.
    assert_eq!(view["week"], 4);
    assert_eq!(view["schedule"]["current_participants"], 2);
    let participants = view["participants"].as_array().unwrap();
    assert_eq!(participants.len(), 2);

    let a = participants.iter().find(|p| p["username"] == "alice").unwrap();
    assert_eq!(a["scheme"]["lift_type"], "UPPER");
    assert_eq!(a["lifts"][0]["lift"], "BENCH");
    assert_eq!(a["lifts"][0]["weight"]["status"], "computed");
    assert_eq!(a["lifts"][0]["weight"]["weight"]["value"], json!([50.0, 55.0, 60.0]));
    assert_eq!(a["lifts"][1]["lift"], "OHP");
    assert_eq!(a["lifts"][1]["weight"]["status"], "unavailable");

    let b = participants.iter().find(|p| p["username"] == "bob").unwrap();
    assert_eq!(b["scheme"]["lift_type"], "LOWER");
    assert_eq!(b["lifts"][0]["lift"], "SQUAT");
    // 90, 99 -> 100, 108 -> 110
    assert_eq!(b["lifts"][0]["weight"]["weight"]["value"], json!([90.0, 100.0, 110.0]));
    assert_eq!(b["lifts"][1]["weight"]["weight"]["value"], json!([100.0, 110.0, 120.0]));
}

#[tokio::test]
async fn test_week_override_and_invalid_week() {
    let app = TestApp::new().await;
    let (_, admin) = app.seed_and_login("admin", Role::Admin).await;
    let (member, auth) = app.seed_and_login("member", Role::User).await;
    app.state.user_repo.update_max_lifts(&member.id, &MemberMaxLifts {
        max_bench: Some(100.0),
        ..Default::default()
    }).await.unwrap();

    let template_id = app.create_template(&admin, 1, "07:00", 8, "UPPER").await;
    let res = app.send("POST", &format!("/api/v1/default-schedules/{}/book", template_id), &auth, Some(json!({
        "date": "2024-05-13"
    }))).await;
    let schedule_id = parse_body(res).await["schedule_id"].as_str().unwrap().to_string();

    let res = app.send("GET", &format!("/api/v1/schedules/{}/detail?week=1", schedule_id), &auth, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let view = parse_body(res).await;
    assert_eq!(view["week"], 1);
    assert_eq!(view["day"], 1);
    assert_eq!(view["participants"][0]["lifts"][0]["weight"]["weight"]["value"], json!([60.0, 65.0, 70.0]));

    let res = app.send("GET", &format!("/api/v1/schedules/{}/detail?week=9", schedule_id), &auth, None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["code"], "INVALID_WEEK");
    assert_eq!(body["week"], 9);
}

#[tokio::test]
async fn test_no_class_in_session() {
    let app = TestApp::new().await;
    let (_, auth) = app.seed_and_login("member", Role::User).await;

    let res = app.send("GET", "/api/v1/classes/current?date=2024-05-17&hour=3", &auth, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(parse_body(res).await["code"], "NO_CLASS_IN_SESSION");

    let res = app.send("GET", "/api/v1/classes/current?date=2024-05-17&hour=24", &auth, None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scheme_lookup() {
    let app = TestApp::new().await;
    let (_, auth) = app.seed_and_login("member", Role::User).await;

    let res = app.send("GET", "/api/v1/schemes/1/1", &auth, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let scheme = parse_body(res).await;
    assert_eq!(scheme["lift_type"], "UPPER");
    assert_eq!(scheme["reps"], json!([8, 8, 8]));

    let res = app.send("GET", "/api/v1/schemes/1/2", &auth, None).await;
    assert_eq!(parse_body(res).await["lift_type"], "LOWER");

    // Saturday folds back to Monday.
    let res = app.send("GET", "/api/v1/schemes/1/6", &auth, None).await;
    let scheme = parse_body(res).await;
    assert_eq!(scheme["day"], 1);
    assert_eq!(scheme["lift_type"], "UPPER");

    let res = app.send("GET", "/api/v1/schemes/0/1", &auth, None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["code"], "INVALID_WEEK");

    let res = app.send("GET", "/api/v1/schemes/1/8", &auth, None).await;
    assert_eq!(parse_body(res).await["code"], "VALIDATION");
}

#[tokio::test]
async fn test_weight_uses_callers_max() {
    let app = TestApp::new().await;
    let (member, auth) = app.seed_and_login("member", Role::User).await;

    let res = app.send("GET", "/api/v1/weights?lift=deadlift&percentage=75", &auth, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert!(body["max"].is_null());
    assert!(body["weight"].is_null());

    app.state.user_repo.update_max_lifts(&member.id, &MemberMaxLifts {
        max_deadlift: Some(200.0),
        ..Default::default()
    }).await.unwrap();

    let res = app.send("GET", "/api/v1/weights?lift=deadlift&percentage=75", &auth, None).await;
    let body = parse_body(res).await;
    assert_eq!(body["lift"], "DEADLIFT");
    assert_eq!(body["weight"]["kind"], "scalar");
    assert_eq!(body["weight"]["value"], 150.0);

    let res = app.send("GET", "/api/v1/weights?lift=curl&percentage=75", &auth, None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["code"], "VALIDATION");
}

#[tokio::test]
async fn test_unparseable_path_and_query_use_error_body() {
    let app = TestApp::new().await;
    let (_, auth) = app.seed_and_login("member", Role::User).await;

    let res = app.send("GET", "/api/v1/schemes/x/1", &auth, None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["code"], "VALIDATION");
    assert!(body["error"].is_string());

    let res = app.send("GET", "/api/v1/weights?lift=squat", &auth, None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["code"], "VALIDATION");

    let res = app.send("GET", "/api/v1/weights?lift=squat&percentage=heavy", &auth, None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(res).await["code"], "VALIDATION");
}
