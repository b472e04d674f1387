//! Investment ledger events.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind tag of a ledger event as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LedgerEventKind {
    Investment,
    InvestmentExpired,
    RoiEarning,
    ReferralEarning,
    DailyCommission,
    OneTimeReward,
    Unknown(String),
}

/// Series a ledger event feeds on the performance chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerChannel {
    Earnings,
    Investments,
    Referral,
}

impl LedgerEventKind {
    pub fn as_str(&self) -> &str {
        match self {
            LedgerEventKind::Investment => "investment",
            LedgerEventKind::InvestmentExpired => "investment_expired",
            LedgerEventKind::RoiEarning => "roi_earning",
            LedgerEventKind::ReferralEarning => "referral_earning",
            LedgerEventKind::DailyCommission => "daily_commission",
            LedgerEventKind::OneTimeReward => "one_time_reward",
            LedgerEventKind::Unknown(s) => s,
        }
    }

    /// Channel this kind contributes to, if any.
    ///
    /// Expiry has no channel: an expired position leaves "total invested"
    /// through its status, not through a ledger debit.
    pub fn channel(&self) -> Option<LedgerChannel> {
        match self {
            LedgerEventKind::RoiEarning => Some(LedgerChannel::Earnings),
            LedgerEventKind::Investment => Some(LedgerChannel::Investments),
            LedgerEventKind::ReferralEarning
            | LedgerEventKind::DailyCommission
            | LedgerEventKind::OneTimeReward => Some(LedgerChannel::Referral),
            LedgerEventKind::InvestmentExpired | LedgerEventKind::Unknown(_) => None,
        }
    }
}

impl From<&str> for LedgerEventKind {
    fn from(value: &str) -> Self {
        match value.trim() {
            "investment" => LedgerEventKind::Investment,
            "investment_expired" => LedgerEventKind::InvestmentExpired,
            "roi_earning" => LedgerEventKind::RoiEarning,
            "referral_earning" => LedgerEventKind::ReferralEarning,
            "daily_commission" => LedgerEventKind::DailyCommission,
            "one_time_reward" => LedgerEventKind::OneTimeReward,
            other => LedgerEventKind::Unknown(other.to_string()),
        }
    }
}

impl Serialize for LedgerEventKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LedgerEventKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(LedgerEventKind::from(raw.as_str()))
    }
}

/// Immutable historical record of a balance-affecting occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEvent {
    /// Calendar day of the event; `None` when the backend date is unusable
    pub date: Option<NaiveDate>,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: LedgerEventKind,
    /// Account balance after the event, as reported by the backend
    pub balance: Decimal,
}
