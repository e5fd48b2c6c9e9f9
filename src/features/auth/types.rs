//! Request and response types for auth-related API calls, plus the persisted
//! session record. Payloads carry credentials and OTP codes, so they must
//! never be logged.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Individual,
    Organization,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub is_email_verified: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub active_organization_id: Option<String>,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub subscription_status: Option<String>,
    #[serde(default)]
    pub credits_remaining: Option<i64>,
}

impl UserSnapshot {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let trimmed = full.trim();
        if trimmed.is_empty() {
            self.email.clone()
        } else {
            trimmed.to_string()
        }
    }
}

/// The durable session document: bearer token plus the last-known server
/// user projection. Persisted as a single record so the token and the user
/// can never be observed out of step with each other.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: String,
    pub user: UserSnapshot,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOrganizationRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub org_name: String,
    pub org_slug: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
}

/// Login and OTP verification both answer with a fresh credential and the
/// server's current user projection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub token: String,
    pub user: UserSnapshot,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_decodes_camel_case_wire_format() {
        let json = r#"{
            "message": "Login successful",
            "token": "jwt-abc",
            "user": {
                "id": "u1",
                "email": "a@b.com",
                "firstName": "Ada",
                "lastName": "Lovelace",
                "userType": "organization",
                "isEmailVerified": true,
                "activeOrganizationId": "org-1"
            }
        }"#;

        let decoded: AuthResponse = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(decoded.token, "jwt-abc");
        assert_eq!(decoded.user.user_type, UserType::Organization);
        assert_eq!(decoded.user.active_organization_id.as_deref(), Some("org-1"));
        assert_eq!(decoded.user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn user_snapshot_defaults_missing_fields() {
        let decoded: UserSnapshot =
            serde_json::from_str(r#"{"id":"u2","email":"b@c.com"}"#).expect("Failed to deserialize");
        assert_eq!(decoded.user_type, UserType::Individual);
        assert!(!decoded.is_email_verified);
        assert_eq!(decoded.display_name(), "b@c.com");
    }

    #[test]
    fn session_record_round_trips() {
        let record = SessionRecord {
            token: "jwt-abc".to_string(),
            user: serde_json::from_str(r#"{"id":"u1","email":"a@b.com"}"#).expect("user"),
        };
        let json = serde_json::to_string(&record).expect("Failed to serialize");
        let decoded: SessionRecord = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(decoded, record);
    }
}
