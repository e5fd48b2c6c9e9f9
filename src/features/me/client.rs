//! Client helpers for current-user profile endpoints.

use crate::{
    app_lib::{get_json, put_json, AppError},
    features::auth::types::UserSnapshot,
    features::me::types::{ProfileEnvelope, ProfileUpdate},
};

/// Fetch the authenticated user's profile. This is the authoritative user
/// projection; callers overwrite any cached snapshot with the result.
pub async fn fetch_profile(auth: Option<&str>) -> Result<UserSnapshot, AppError> {
    let envelope: ProfileEnvelope<UserSnapshot> = get_json("/profile", auth).await?;
    Ok(envelope.data)
}

/// Update profile fields and return the server's refreshed projection.
pub async fn update_profile(
    update: &ProfileUpdate,
    auth: Option<&str>,
) -> Result<UserSnapshot, AppError> {
    let envelope: ProfileEnvelope<UserSnapshot> = put_json("/profile", update, auth).await?;
    Ok(envelope.data)
}
