#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use carehive_api::{middleware::actor::USER_ID_HEADER, router, ApiState};
use carehive_core::{
    models::{
        directory::{CaregiverAssignment, Elder},
        shift::{ScheduledShift, ShiftStatus},
    },
    role::{AgencyMembership, AgencyRole, UserProfile},
};
use carehive_service::memory::{InMemoryDirectory, InMemoryShiftService};
use chrono::{Days, Local, NaiveDate, Utc};

pub const AGENCY: &str = "agency-1";
pub const ADMIN: &str = "admin-1";
pub const FAMILY: &str = "family-1";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn days_from_today(days: u64) -> NaiveDate {
    today() + Days::new(days)
}

pub fn days_ago(days: u64) -> NaiveDate {
    today() - Days::new(days)
}

pub fn elder() -> Elder {
    Elder {
        id: "elder-1".to_string(),
        name: "Rose Lindqvist".to_string(),
        group_id: "group-1".to_string(),
    }
}

pub fn shift(id: &str, date: NaiveDate, status: ShiftStatus) -> ScheduledShift {
    ScheduledShift {
        id: id.to_string(),
        agency_id: AGENCY.to_string(),
        group_id: "group-1".to_string(),
        elder_id: "elder-1".to_string(),
        elder_name: "Rose Lindqvist".to_string(),
        caregiver_id: "cg-1".to_string(),
        caregiver_name: "Amara Okafor".to_string(),
        date,
        start_time: "09:00".to_string(),
        end_time: "17:00".to_string(),
        duration: 480,
        status,
        notes: None,
        is_recurring: false,
        created_at: Utc::now(),
    }
}

pub fn directory() -> InMemoryDirectory {
    let mut directory = InMemoryDirectory::with_admin(ADMIN, AGENCY);
    directory.profiles.insert(
        FAMILY.to_string(),
        UserProfile {
            id: FAMILY.to_string(),
            name: Some("Ingrid Lindqvist".to_string()),
            agencies: Some(vec![AgencyMembership {
                agency_id: AGENCY.to_string(),
                role: Some(AgencyRole::FamilyMember),
            }]),
            groups: None,
        },
    );
    directory.names = HashMap::from([
        ("cg-1".to_string(), "Amara Okafor".to_string()),
        ("cg-2".to_string(), "Tomas Reyes".to_string()),
    ]);
    directory.assignments.insert(
        AGENCY.to_string(),
        vec![CaregiverAssignment {
            caregiver_id: "cg-2".to_string(),
            elder_ids: vec!["elder-1".to_string()],
            active: true,
        }],
    );
    directory.elders.insert(AGENCY.to_string(), vec![elder()]);
    directory
}

pub struct TestApp {
    pub server: TestServer,
    pub shifts: Arc<InMemoryShiftService>,
}

impl TestApp {
    pub fn new(shifts: Vec<ScheduledShift>) -> Self {
        let service = Arc::new(InMemoryShiftService::with_shifts(shifts));
        let state = Arc::new(ApiState {
            shifts: service.clone(),
            directory: Arc::new(directory()),
        });

        Self {
            server: TestServer::new(router(state)).unwrap(),
            shifts: service,
        }
    }
}

/// Marks a request as sent by `user_id`.
pub fn as_user(request: TestRequest, user_id: &str) -> TestRequest {
    request.add_header(
        HeaderName::from_static(USER_ID_HEADER),
        HeaderValue::from_str(user_id).unwrap(),
    )
}
