mod test_utils;

use axum::http::StatusCode;
use carehive_core::models::shift::ShiftStatus;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_utils::{as_user, days_from_today, shift, TestApp, ADMIN, FAMILY};

const CALENDAR: &str = "/api/agencies/agency-1/calendar";

#[tokio::test]
async fn test_week_calendar_for_admin() {
    let date = days_from_today(7);
    let app = TestApp::new(vec![
        shift("s-1", date, ShiftStatus::Scheduled),
        shift("s-2", days_from_today(60), ShiftStatus::Scheduled),
    ]);

    let response = as_user(
        app.server
            .get(CALENDAR)
            .add_query_param("view", "week")
            .add_query_param("date", date),
        ADMIN,
    )
    .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["view"], json!("week"));
    assert_eq!(body["shifts"].as_array().unwrap().len(), 1);
    assert_eq!(body["shifts"][0]["id"], json!("s-1"));
    assert_eq!(body["summary"]["total_shifts"], json!(1));
    assert_eq!(body["summary"]["total_hours"], json!(8.0));
    assert_eq!(body["summary"]["scheduled"], json!(1));
    assert_eq!(body["days"].as_array().unwrap().len(), 1);
    assert_eq!(body["days"][0]["date"], json!(date.to_string()));
    assert_eq!(
        body["actions"]["s-1"],
        json!({ "confirm": true, "cancel": true, "copy": true })
    );

    // Assigned caregiver first, then the one only seen on a shift
    let caregivers: Vec<&str> = body["caregivers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(caregivers, vec!["cg-2", "cg-1"]);
    assert_eq!(body["elders"][0]["groupId"], json!("group-1"));
}

#[tokio::test]
async fn test_filter_by_absent_caregiver_is_empty() {
    let date = days_from_today(7);
    let app = TestApp::new(vec![shift("s-1", date, ShiftStatus::Scheduled)]);

    let response = as_user(
        app.server
            .get(CALENDAR)
            .add_query_param("date", date)
            .add_query_param("caregiver", "cg-9")
            .add_query_param("elder", "all"),
        ADMIN,
    )
    .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["shifts"], json!([]));
    assert_eq!(body["summary"]["total_shifts"], json!(0));
}

#[tokio::test]
async fn test_filter_all_keeps_every_shift() {
    let date = days_from_today(7);
    let app = TestApp::new(vec![shift("s-1", date, ShiftStatus::Confirmed)]);

    let response = as_user(
        app.server
            .get(CALENDAR)
            .add_query_param("view", "month")
            .add_query_param("date", date)
            .add_query_param("caregiver", "all"),
        ADMIN,
    )
    .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["shifts"].as_array().unwrap().len(), 1);
    assert_eq!(body["actions"]["s-1"]["confirm"], json!(false));
}

#[tokio::test]
async fn test_unknown_view_is_rejected() {
    let app = TestApp::new(Vec::new());

    let response = as_user(app.server.get(CALENDAR).add_query_param("view", "year"), ADMIN)
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        json!("Unknown view mode: year")
    );
}

#[tokio::test]
async fn test_week_past_last_representable_date_is_rejected() {
    let app = TestApp::new(Vec::new());

    let response = as_user(
        app.server
            .get(CALENDAR)
            .add_query_param("view", "week")
            .add_query_param("date", NaiveDate::MAX),
        ADMIN,
    )
    .expect_failure()
    .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_last_representable_month_has_no_next() {
    let app = TestApp::new(Vec::new());

    let response = as_user(
        app.server
            .get(CALENDAR)
            .add_query_param("view", "month")
            .add_query_param("date", NaiveDate::MAX),
        ADMIN,
    )
    .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["range"]["end"], json!(NaiveDate::MAX));
    assert_eq!(body["next"], Value::Null);
    assert!(body["previous"].is_string());
}

#[tokio::test]
async fn test_missing_user_header() {
    let app = TestApp::new(Vec::new());

    let response = app
        .server
        .get(CALENDAR)
        .add_query_param("view", "week")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_family_member_cannot_manage_schedule() {
    let app = TestApp::new(Vec::new());

    let response = as_user(app.server.get(CALENDAR).add_query_param("view", "week"), FAMILY)
        .expect_failure()
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>()["error"],
        json!("Only agency administrators can manage shifts")
    );
}

#[tokio::test]
async fn test_unknown_user() {
    let app = TestApp::new(Vec::new());

    let response = as_user(app.server.get(CALENDAR).add_query_param("view", "week"), "stranger")
        .expect_failure()
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
