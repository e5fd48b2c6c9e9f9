//! Client wrappers for invitation endpoints.

use crate::app_lib::{get_optional_json, post_empty, AppError};
use crate::features::auth::types::MessageResponse;
use crate::features::invitations::types::{Invitation, InvitationEnvelope};

/// Fetches an invitation by its link token. `None` means the invitation does
/// not exist (or was removed), which the flow renders as its own state.
pub async fn fetch_by_token(token: &str, auth: Option<&str>) -> Result<Option<Invitation>, AppError> {
    let envelope: Option<InvitationEnvelope> =
        get_optional_json(&format!("/invitations/{token}"), auth).await?;
    Ok(envelope.map(|body| body.invitation))
}

pub async fn accept(token: &str, auth: Option<&str>) -> Result<MessageResponse, AppError> {
    post_empty(&format!("/invitations/{token}/accept"), auth).await
}

pub async fn decline(token: &str, auth: Option<&str>) -> Result<MessageResponse, AppError> {
    post_empty(&format!("/invitations/{token}/decline"), auth).await
}
