//! Types for profile API responses.

use serde::{Deserialize, Serialize};

/// Standard `{success, data}` envelope the profile endpoints answer with.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: T,
}

/// Editable subset of the profile. Absent fields are left untouched
/// server-side.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}
