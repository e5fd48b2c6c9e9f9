//! Client wrappers for the auth API endpoints. These helpers centralize
//! request shapes and keep credential handling out of route code.

use crate::{
    app_lib::{post_json, AppError},
    features::auth::types::{
        AuthResponse, EmailRequest, LoginRequest, MessageResponse, RegisterOrganizationRequest,
        RegisterRequest, ResetPasswordRequest, VerifyEmailRequest,
    },
};

/// Registers an individual account. The account stays unverified until the
/// emailed OTP is confirmed.
pub async fn register(request: &RegisterRequest) -> Result<MessageResponse, AppError> {
    post_json("/auth/register", request, None).await
}

/// Registers an organization account; the backend creates the user and the
/// organization record atomically.
pub async fn register_organization(
    request: &RegisterOrganizationRequest,
) -> Result<MessageResponse, AppError> {
    post_json("/auth/register-organization", request, None).await
}

/// Exchanges credentials for a bearer token and the current user projection.
pub async fn login(request: &LoginRequest) -> Result<AuthResponse, AppError> {
    post_json("/auth/login", request, None).await
}

/// Confirms the emailed OTP. Success issues a fresh credential, so a
/// just-verified signup lands authenticated.
pub async fn verify_email(request: &VerifyEmailRequest) -> Result<AuthResponse, AppError> {
    post_json("/auth/verify-email", request, None).await
}

pub async fn resend_otp(email: &str) -> Result<MessageResponse, AppError> {
    let request = EmailRequest {
        email: email.to_string(),
    };
    post_json("/auth/resend-otp", &request, None).await
}

pub async fn request_password_reset(email: &str) -> Result<MessageResponse, AppError> {
    let request = EmailRequest {
        email: email.to_string(),
    };
    post_json("/auth/request-password-reset", &request, None).await
}

pub async fn reset_password(request: &ResetPasswordRequest) -> Result<MessageResponse, AppError> {
    post_json("/auth/reset-password", request, None).await
}
