use carehive_core::{
    errors::{ScheduleError, ScheduleResult},
    role::{derive_role, Role, UserProfile},
};

use crate::AgencyDirectory;

/// The acting user of a scheduling operation within one agency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerContext {
    pub agency_id: String,
    pub user_id: String,
    pub role: Role,
}

impl SchedulerContext {
    /// Builds a context for `profile`, refusing users who may not manage the
    /// agency schedule.
    pub fn for_user(profile: &UserProfile, agency_id: &str) -> ScheduleResult<Self> {
        let role = derive_role(profile, agency_id);
        if !role.can_manage_schedule() {
            tracing::warn!(
                "User {} with role {:?} tried to manage the schedule of agency {}",
                profile.id,
                role,
                agency_id
            );
            return Err(ScheduleError::Authorization(
                "Only agency administrators can manage shifts".to_string(),
            ));
        }

        Ok(Self {
            agency_id: agency_id.to_string(),
            user_id: profile.id.clone(),
            role,
        })
    }

    /// Looks the user up in the directory and builds their context.
    pub async fn load<D>(directory: &D, user_id: &str, agency_id: &str) -> ScheduleResult<Self>
    where
        D: AgencyDirectory + ?Sized,
    {
        let profile = directory
            .user_profile(user_id)
            .await?
            .ok_or_else(|| ScheduleError::NotFound(format!("User with ID {} not found", user_id)))?;

        Self::for_user(&profile, agency_id)
    }
}
