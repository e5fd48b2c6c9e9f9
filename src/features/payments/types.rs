//! Types for subscription plan and payment API responses.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub target_type: String,
    /// Price in cents.
    pub price: i64,
    pub interval: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub validity_days: Option<u32>,
}

impl Plan {
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price as f64 / 100.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlansResponse {
    pub plans: Vec<Plan>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub plan_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub transaction_id: String,
    pub plan_id: String,
    pub expires_at: String,
    pub credits: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: PaymentData,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSubscription {
    pub plan_id: String,
    pub status: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// Per-context subscription status; the organization half is absent for
/// accounts without an organization context.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubscriptionStatusData {
    pub individual: PlanSubscription,
    #[serde(default)]
    pub organization: Option<PlanSubscription>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubscriptionStatusEnvelope {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: SubscriptionStatusData,
}
