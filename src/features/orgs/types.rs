//! Request and response types for organization API endpoints.

use crate::features::invitations::types::Invitation;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A membership entry on the "my organizations" listing. Individual users
/// can belong to several; none of them changes the primary context until the
/// user explicitly switches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrganization {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub role: String,
    #[serde(default)]
    pub joined_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrganizationEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: Organization,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserOrganizationsEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: UserOrganizationsData,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserOrganizationsData {
    pub organizations: Vec<UserOrganization>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchOrganizationRequest {
    pub organization_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveOrganizationRequest {
    pub organization_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InviteMemberRequest {
    pub email: String,
    pub role: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub image: Option<String>,
    pub role: String,
    #[serde(default)]
    pub joined_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MembersEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    pub members: MembersData,
}

/// Joined members and still-pending invitations, listed together on the
/// members page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MembersData {
    pub joined: Vec<Member>,
    pub pending: Vec<Invitation>,
}
