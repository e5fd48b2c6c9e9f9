//! Client wrappers for plan listing, subscription status, and payments.

use crate::app_lib::{get_json, post_json, AppError};
use crate::features::payments::types::{
    CreatePaymentRequest, PaymentEnvelope, Plan, PlansResponse, SubscriptionStatusData,
    SubscriptionStatusEnvelope,
};

/// Recognized business outcome when a payment is attempted over an active
/// subscription; call sites present it as information, not a failure.
pub const ACTIVE_SUBSCRIPTION_EXISTS: &str = "ACTIVE_SUBSCRIPTION_EXISTS";

pub async fn fetch_plans(auth: Option<&str>) -> Result<Vec<Plan>, AppError> {
    let response: PlansResponse = get_json("/subscriptions", auth).await?;
    Ok(response.plans)
}

pub async fn fetch_status(auth: Option<&str>) -> Result<SubscriptionStatusData, AppError> {
    let envelope: SubscriptionStatusEnvelope = get_json("/subscriptions/status", auth).await?;
    Ok(envelope.data)
}

/// Creates a payment for the given plan. `ACTIVE_SUBSCRIPTION_EXISTS` comes
/// back as an `AppError::Http` whose code the caller matches explicitly.
pub async fn create_payment(plan_id: &str, auth: Option<&str>) -> Result<PaymentEnvelope, AppError> {
    let request = CreatePaymentRequest {
        plan_id: plan_id.to_string(),
    };
    post_json("/payments", &request, auth).await
}
