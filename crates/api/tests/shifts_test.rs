mod test_utils;

use axum::http::StatusCode;
use carehive_core::models::shift::ShiftStatus;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_utils::{as_user, days_ago, days_from_today, elder, shift, TestApp, ADMIN, FAMILY};

const SHIFTS: &str = "/api/agencies/agency-1/shifts";

fn draft(date: chrono::NaiveDate, start: &str, end: &str) -> Value {
    json!({
        "date": date,
        "caregiver": { "id": "cg-1", "name": "Amara Okafor" },
        "elder": elder(),
        "start_time": start,
        "end_time": end,
        "notes": "Morning medication"
    })
}

#[tokio::test]
async fn test_create_shift() {
    let app = TestApp::new(Vec::new());

    let response = as_user(app.server.post(SHIFTS), ADMIN)
        .json(&draft(days_from_today(2), "09:00", "17:00"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let shift_id = response.json::<Value>()["shift_id"]
        .as_str()
        .unwrap()
        .to_string();
    let created = app.shifts.get(&shift_id).await.unwrap();
    assert_eq!(created.duration, 480);
    assert_eq!(created.status, ShiftStatus::Scheduled);
    assert_eq!(created.notes.as_deref(), Some("Morning medication"));
}

#[tokio::test]
async fn test_create_rejects_reversed_times() {
    let app = TestApp::new(Vec::new());

    let response = as_user(app.server.post(SHIFTS), ADMIN)
        .json(&draft(days_from_today(2), "17:00", "09:00"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        json!("End time must be after start time")
    );
    assert_eq!(app.shifts.len().await, 0);
}

#[tokio::test]
async fn test_create_rejects_past_date() {
    let app = TestApp::new(Vec::new());

    let response = as_user(app.server.post(SHIFTS), ADMIN)
        .json(&draft(days_ago(1), "09:00", "17:00"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(app.shifts.len().await, 0);
}

#[tokio::test]
async fn test_create_overlapping_shift_conflicts() {
    let date = days_from_today(2);
    let app = TestApp::new(vec![shift("s-1", date, ShiftStatus::Scheduled)]);

    let response = as_user(app.server.post(SHIFTS), ADMIN)
        .json(&draft(date, "12:00", "20:00"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(app.shifts.len().await, 1);
}

#[tokio::test]
async fn test_family_member_cannot_create() {
    let app = TestApp::new(Vec::new());

    let response = as_user(app.server.post(SHIFTS), FAMILY)
        .json(&draft(days_from_today(2), "09:00", "17:00"))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(app.shifts.len().await, 0);
}

#[tokio::test]
async fn test_bulk_reports_partial_failure() {
    let busy = days_from_today(4);
    let app = TestApp::new(vec![shift("s-1", busy, ShiftStatus::Confirmed)]);
    let dates = vec![days_from_today(5), busy, days_from_today(3)];

    let response = as_user(app.server.post(&format!("{}/bulk", SHIFTS)), ADMIN)
        .json(&json!({
            "dates": dates,
            "caregiver": { "id": "cg-1", "name": "Amara Okafor" },
            "elder": elder(),
            "start_time": "09:00",
            "end_time": "17:00"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["total"], json!(3));
    assert_eq!(
        body["succeeded"],
        json!([days_from_today(3), days_from_today(5)])
    );
    assert_eq!(body["failed"].as_array().unwrap().len(), 1);
    assert_eq!(body["failed"][0]["date"], json!(busy));
    assert_eq!(body["message"], json!("Created 2 shifts, 1 failed"));
    assert_eq!(app.shifts.len().await, 3);
}

#[tokio::test]
async fn test_bulk_requires_caregiver() {
    let app = TestApp::new(Vec::new());

    let response = as_user(app.server.post(&format!("{}/bulk", SHIFTS)), ADMIN)
        .json(&json!({
            "dates": [days_from_today(1)],
            "caregiver": null,
            "elder": elder(),
            "start_time": "09:00",
            "end_time": "17:00"
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        json!("Please select a caregiver")
    );
    assert_eq!(app.shifts.len().await, 0);
}

#[tokio::test]
async fn test_confirm_scheduled_shift() {
    let date = days_from_today(1);
    let app = TestApp::new(vec![shift("s-1", date, ShiftStatus::Scheduled)]);

    let response = as_user(app.server.post(&format!("{}/confirm", SHIFTS)), ADMIN)
        .json(&json!({ "shift_id": "s-1", "date": date }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], json!("confirmed"));
    assert_eq!(
        app.shifts.get("s-1").await.unwrap().status,
        ShiftStatus::Confirmed
    );
}

#[tokio::test]
async fn test_confirm_requires_scheduled_status() {
    let date = days_from_today(1);
    let app = TestApp::new(vec![shift("s-1", date, ShiftStatus::Confirmed)]);

    let response = as_user(app.server.post(&format!("{}/confirm", SHIFTS)), ADMIN)
        .json(&json!({ "shift_id": "s-1", "date": date }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_confirm_unknown_shift() {
    let app = TestApp::new(Vec::new());

    let response = as_user(app.server.post(&format!("{}/confirm", SHIFTS)), ADMIN)
        .json(&json!({ "shift_id": "missing", "date": days_from_today(1) }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_takes_two_steps() {
    let date = days_from_today(1);
    let app = TestApp::new(vec![shift("s-1", date, ShiftStatus::Confirmed)]);
    let path = format!("{}/cancel", SHIFTS);

    let first = as_user(app.server.post(&path), ADMIN)
        .json(&json!({ "shift_id": "s-1", "date": date }))
        .await;

    first.assert_status_ok();
    assert_eq!(
        first.json::<Value>(),
        json!({ "shift_id": "s-1", "cancelled": false, "confirmation_required": true })
    );
    assert_eq!(
        app.shifts.get("s-1").await.unwrap().status,
        ShiftStatus::Confirmed
    );

    let second = as_user(app.server.post(&path), ADMIN)
        .json(&json!({ "shift_id": "s-1", "date": date, "confirmed": true }))
        .await;

    second.assert_status_ok();
    assert_eq!(second.json::<Value>()["cancelled"], json!(true));
    assert_eq!(
        app.shifts.get("s-1").await.unwrap().status,
        ShiftStatus::Cancelled
    );
}

#[tokio::test]
async fn test_cancel_completed_shift_is_rejected() {
    let date = days_from_today(1);
    let app = TestApp::new(vec![shift("s-1", date, ShiftStatus::Completed)]);

    let response = as_user(app.server.post(&format!("{}/cancel", SHIFTS)), ADMIN)
        .json(&json!({ "shift_id": "s-1", "date": date, "confirmed": true }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        app.shifts.get("s-1").await.unwrap().status,
        ShiftStatus::Completed
    );
}

#[tokio::test]
async fn test_copy_creates_independent_shift() {
    let date = days_from_today(1);
    let target = days_from_today(8);
    let app = TestApp::new(vec![shift("s-1", date, ShiftStatus::Confirmed)]);

    let response = as_user(app.server.post(&format!("{}/copy", SHIFTS)), ADMIN)
        .json(&json!({ "shift_id": "s-1", "date": date, "target_date": target }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let copy_id = response.json::<Value>()["shift_id"]
        .as_str()
        .unwrap()
        .to_string();
    let copy = app.shifts.get(&copy_id).await.unwrap();
    assert_eq!(copy.date, target);
    assert_eq!(copy.caregiver_id, "cg-1");
    assert_eq!(copy.start_time, "09:00");
    assert_eq!(copy.status, ShiftStatus::Scheduled);

    let original = app.shifts.get("s-1").await.unwrap();
    assert_eq!(original.date, date);
    assert_eq!(original.status, ShiftStatus::Confirmed);
}

#[tokio::test]
async fn test_copy_to_past_date_is_rejected() {
    let date = days_from_today(1);
    let app = TestApp::new(vec![shift("s-1", date, ShiftStatus::Scheduled)]);

    let response = as_user(app.server.post(&format!("{}/copy", SHIFTS)), ADMIN)
        .json(&json!({ "shift_id": "s-1", "date": date, "target_date": days_ago(3) }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        json!("Cannot copy a shift to a past date")
    );
    assert_eq!(app.shifts.len().await, 1);
}
