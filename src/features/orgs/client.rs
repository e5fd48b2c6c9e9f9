//! Client wrappers for organization-related API endpoints.

use crate::app_lib::{get_json, get_optional_json, post_json, AppError};
use crate::features::auth::types::MessageResponse;
use crate::features::orgs::types::{
    InviteMemberRequest, LeaveOrganizationRequest, MembersData, MembersEnvelope, Organization,
    OrganizationEnvelope, SwitchOrganizationRequest, UserOrganization, UserOrganizationsEnvelope,
};

/// Fetches the organization owned by the current account. A 404 means the
/// account is organization-typed but has no organization record yet; that is
/// a valid empty state, not a failure.
pub async fn fetch_my_organization(auth: Option<&str>) -> Result<Option<Organization>, AppError> {
    let envelope: Option<OrganizationEnvelope> =
        get_optional_json("/organizations/me", auth).await?;
    Ok(envelope.map(|body| body.data))
}

/// Fetches all organizations the current user belongs to as a member.
pub async fn list_my_organizations(auth: Option<&str>) -> Result<Vec<UserOrganization>, AppError> {
    let envelope: UserOrganizationsEnvelope =
        get_json("/organizations/my-organizations", auth).await?;
    Ok(envelope.data.organizations)
}

/// Sets (or clears, with `None`) the active organization context. Callers
/// follow a successful switch with a full reload; the context change touches
/// almost every visible entity.
pub async fn switch_organization(
    organization_id: Option<String>,
    auth: Option<&str>,
) -> Result<MessageResponse, AppError> {
    let request = SwitchOrganizationRequest { organization_id };
    post_json("/organizations/switch", &request, auth).await
}

pub async fn leave_organization(
    organization_id: &str,
    auth: Option<&str>,
) -> Result<MessageResponse, AppError> {
    let request = LeaveOrganizationRequest {
        organization_id: organization_id.to_string(),
    };
    post_json("/organizations/leave", &request, auth).await
}

/// Invites an email address into the current organization.
pub async fn invite_member(
    email: &str,
    role: &str,
    auth: Option<&str>,
) -> Result<MessageResponse, AppError> {
    let request = InviteMemberRequest {
        email: email.to_string(),
        role: role.to_string(),
    };
    post_json("/organizations/invite", &request, auth).await
}

/// Lists joined members and pending invitations for the current organization.
pub async fn list_members(auth: Option<&str>) -> Result<MembersData, AppError> {
    let envelope: MembersEnvelope = get_json("/organizations/members", auth).await?;
    Ok(envelope.members)
}
