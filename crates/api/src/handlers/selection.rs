//! Date picking for bulk creation. The client owns the selection and sends
//! it back with every change; past dates are dropped on the way in.

use axum::Json;
use carehive_core::pattern::{DatePattern, DateSelection, PatternOutcome};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::today;

#[derive(Debug, Deserialize)]
pub struct PatternRequest {
    pub pattern: DatePattern,
    /// Any date of the displayed month
    pub month: NaiveDate,
    #[serde(default)]
    pub selected: Vec<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct PatternResponse {
    pub outcome: PatternOutcome,
    pub selected: DateSelection,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub date: NaiveDate,
    #[serde(default)]
    pub selected: Vec<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub toggled: bool,
    pub selected: DateSelection,
}

#[axum::debug_handler]
pub async fn apply_pattern(Json(payload): Json<PatternRequest>) -> Json<PatternResponse> {
    let today = today();
    let mut selection = DateSelection::from_dates(payload.selected, today);
    let outcome = selection.apply_pattern(payload.pattern, payload.month, today);

    Json(PatternResponse {
        outcome,
        selected: selection,
    })
}

#[axum::debug_handler]
pub async fn toggle_date(Json(payload): Json<ToggleRequest>) -> Json<ToggleResponse> {
    let today = today();
    let mut selection = DateSelection::from_dates(payload.selected, today);
    let toggled = selection.toggle(payload.date, today);

    Json(ToggleResponse {
        toggled,
        selected: selection,
    })
}
