use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of users referred at each tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralCounts {
    pub level1: u32,
    pub level2: u32,
    pub level3: u32,
    pub total: u32,
}

/// Authoritative referral aggregate reported by the backend.
///
/// The default value stands in for a summary that has not loaded yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralSummary {
    /// Cumulative commissions and rewards earned through referrals
    pub total_earnings: Decimal,
    pub counts: ReferralCounts,
}

impl ReferralSummary {
    pub fn with_total(total_earnings: Decimal) -> Self {
        Self {
            total_earnings,
            counts: ReferralCounts::default(),
        }
    }
}
