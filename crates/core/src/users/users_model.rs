use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of the signed-in user as returned by the auth endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub phone: String,
    /// Wallet balance available for new investments
    pub balance: Decimal,
    /// ROI and referral earnings that may be withdrawn
    pub withdrawable: Decimal,
    pub referral_code: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
