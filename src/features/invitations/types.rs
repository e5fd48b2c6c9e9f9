//! Types for invitation API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
    Expired,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub token: Option<String>,
    pub status: InvitationStatus,
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub invited_by_name: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub organization_slug: Option<String>,
}

impl Invitation {
    /// Expiry is computed client-side; the server's `status` may lag behind
    /// the wall clock.
    pub fn is_expired(&self, now_millis: u64) -> bool {
        let expires = self.expires_at.timestamp_millis();
        expires >= 0 && (expires as u64) < now_millis
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvitationEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    pub invitation: Invitation,
}
