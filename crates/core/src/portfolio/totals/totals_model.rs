use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::investments::Investment;
use crate::portfolio::chart::current_totals;
use crate::referrals::ReferralSummary;
use crate::users::UserProfile;

/// Values shown on the dashboard summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    /// Wallet balance from the user profile
    pub balance: Decimal,
    /// Principal of active investments
    pub total_invested: Decimal,
    /// Profit across all investments
    pub total_earnings: Decimal,
    /// Backend referral total
    pub referral_earnings: Decimal,
    /// Withdrawable ROI and referral income from the user profile
    pub withdrawable: Decimal,
}

impl PortfolioTotals {
    /// Builds the card values from the live inputs. A profile that has not
    /// loaded yet contributes zero balance and withdrawable amounts.
    pub fn reconcile(
        investments: &[Investment],
        referral: &ReferralSummary,
        profile: Option<&UserProfile>,
    ) -> Self {
        let current = current_totals(investments, referral);
        Self {
            balance: profile.map(|p| p.balance).unwrap_or_default(),
            total_invested: current.total_investments,
            total_earnings: current.total_earnings,
            referral_earnings: current.referral_earnings,
            withdrawable: profile.map(|p| p.withdrawable).unwrap_or_default(),
        }
    }
}
