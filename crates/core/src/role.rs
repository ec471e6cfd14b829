//! # Roles
//!
//! User documents carry agency and group memberships as optional nested
//! arrays. [`derive_role`] is the one place that turns them into a single
//! role for an agency, with a fixed precedence:
//!
//! 1. agency super admin
//! 2. agency caregiver admin
//! 3. agency caregiver
//! 4. group admin
//! 5. group member
//!
//! Anyone else has [`Role::None`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgencyRole {
    SuperAdmin,
    CaregiverAdmin,
    Caregiver,
    FamilyMember,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupRole {
    Admin,
    Member,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgencyMembership {
    pub agency_id: String,
    pub role: Option<AgencyRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMembership {
    pub group_id: String,
    #[serde(default)]
    pub agency_id: Option<String>,
    pub role: Option<GroupRole>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub agencies: Option<Vec<AgencyMembership>>,
    #[serde(default)]
    pub groups: Option<Vec<GroupMembership>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    None,
    FamilyMember,
    FamilyAdmin,
    Caregiver,
    CaregiverAdmin,
    SuperAdmin,
}

impl Role {
    /// Only agency administrators place caregivers on shifts.
    pub fn can_manage_schedule(self) -> bool {
        matches!(self, Role::SuperAdmin | Role::CaregiverAdmin)
    }
}

/// Highest-precedence role `profile` holds within `agency_id`.
///
/// Group memberships tagged with a different agency are ignored; untagged
/// ones count for any agency.
pub fn derive_role(profile: &UserProfile, agency_id: &str) -> Role {
    let agency_role = profile
        .agencies
        .iter()
        .flatten()
        .filter(|membership| membership.agency_id == agency_id)
        .filter_map(|membership| membership.role)
        .map(|role| match role {
            AgencyRole::SuperAdmin => Role::SuperAdmin,
            AgencyRole::CaregiverAdmin => Role::CaregiverAdmin,
            AgencyRole::Caregiver => Role::Caregiver,
            AgencyRole::FamilyMember => Role::FamilyMember,
        })
        .max();

    let group_role = profile
        .groups
        .iter()
        .flatten()
        .filter(|membership| {
            membership
                .agency_id
                .as_deref()
                .is_none_or(|id| id == agency_id)
        })
        .filter_map(|membership| membership.role)
        .map(|role| match role {
            GroupRole::Admin => Role::FamilyAdmin,
            GroupRole::Member => Role::FamilyMember,
        })
        .max();

    agency_role.max(group_role).unwrap_or(Role::None)
}
