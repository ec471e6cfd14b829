use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Display-only caregiver entry for calendar legends and selection menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaregiverInfo {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// A care recipient as listed for an agency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Elder {
    pub id: String,
    pub name: String,
    pub group_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaregiverAssignment {
    pub caregiver_id: String,
    #[serde(default)]
    pub elder_ids: Vec<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// A caregiver chosen in a creation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caregiver {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameLookupRequest {
    pub user_ids: Vec<String>,
    pub agency_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameLookupResponse {
    #[serde(default)]
    pub names: HashMap<String, String>,
}

/// Colors handed out to caregivers in order of first appearance.
pub const CAREGIVER_PALETTE: [&str; 8] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
];

pub fn caregiver_color(index: usize) -> &'static str {
    CAREGIVER_PALETTE[index % CAREGIVER_PALETTE.len()]
}
