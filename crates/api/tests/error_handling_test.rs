use axum::{http::StatusCode, response::IntoResponse};
use carehive_api::middleware::error_handling::AppError;
use carehive_core::errors::ScheduleError;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(ScheduleError::NotFound("Shift with ID s-1 not found".into()), StatusCode::NOT_FOUND)]
#[case(ScheduleError::Validation("Please select a caregiver".into()), StatusCode::BAD_REQUEST)]
#[case(ScheduleError::Authentication("Missing x-user-id header".into()), StatusCode::UNAUTHORIZED)]
#[case(ScheduleError::Authorization("Only agency administrators can manage shifts".into()), StatusCode::FORBIDDEN)]
#[case(ScheduleError::Conflict("Overlapping shift".into()), StatusCode::CONFLICT)]
#[case(ScheduleError::Service("Shift not found".into()), StatusCode::UNPROCESSABLE_ENTITY)]
#[case(ScheduleError::Transport(eyre::eyre!("connection refused")), StatusCode::BAD_GATEWAY)]
fn test_error_status_mapping(#[case] error: ScheduleError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[test]
fn test_eyre_report_becomes_gateway_error() {
    let error: AppError = eyre::eyre!("timed out").into();
    assert_eq!(error.status(), StatusCode::BAD_GATEWAY);
}
