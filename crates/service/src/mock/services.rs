use std::collections::HashMap;

use async_trait::async_trait;
use carehive_core::{
    models::{
        directory::{CaregiverAssignment, Elder},
        shift::{NewShift, ScheduledShift, ServiceResponse},
    },
    role::UserProfile,
};
use chrono::NaiveDate;
use mockall::mock;

use crate::{AgencyDirectory, ShiftService};

// Mock collaborators for testing
mock! {
    pub ShiftService {}

    #[async_trait]
    impl ShiftService for ShiftService {
        async fn create_shift(&self, shift: &NewShift) -> eyre::Result<ServiceResponse>;

        async fn confirm_shift(
            &self,
            shift_id: &str,
            user_id: &str,
        ) -> eyre::Result<ServiceResponse>;

        async fn cancel_shift(
            &self,
            shift_id: &str,
            user_id: &str,
            reason: &str,
        ) -> eyre::Result<ServiceResponse>;

        async fn get_scheduled_shifts(
            &self,
            agency_id: &str,
            start: NaiveDate,
            end: NaiveDate,
        ) -> eyre::Result<Vec<ScheduledShift>>;
    }
}

mock! {
    pub AgencyDirectory {}

    #[async_trait]
    impl AgencyDirectory for AgencyDirectory {
        async fn resolve_names(
            &self,
            user_ids: &[String],
            agency_id: &str,
        ) -> eyre::Result<HashMap<String, String>>;

        async fn caregiver_assignments(
            &self,
            agency_id: &str,
        ) -> eyre::Result<Vec<CaregiverAssignment>>;

        async fn elders(&self, agency_id: &str) -> eyre::Result<Vec<Elder>>;

        async fn user_profile(&self, user_id: &str) -> eyre::Result<Option<UserProfile>>;
    }
}
