//! Investment domain models.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{STATUS_ACTIVE, STATUS_CLOSED, STATUS_EXPIRED};
use crate::utils::decimal_utils::saturating_sum;
use crate::utils::time_utils::display_date_from_utc;

/// Lifecycle status of an investment position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum InvestmentStatus {
    #[default]
    Active,
    Closed,
    Expired,
    /// Any status string the backend sends that we do not know about.
    /// Never counted as active.
    Other(String),
}

impl InvestmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            InvestmentStatus::Active => STATUS_ACTIVE,
            InvestmentStatus::Closed => STATUS_CLOSED,
            InvestmentStatus::Expired => STATUS_EXPIRED,
            InvestmentStatus::Other(s) => s,
        }
    }
}

impl From<&str> for InvestmentStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            STATUS_ACTIVE => InvestmentStatus::Active,
            STATUS_CLOSED => InvestmentStatus::Closed,
            STATUS_EXPIRED => InvestmentStatus::Expired,
            _ => InvestmentStatus::Other(value.to_string()),
        }
    }
}

impl Serialize for InvestmentStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for InvestmentStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(InvestmentStatus::from(raw.as_str()))
    }
}

/// When an investment was opened.
///
/// The backend usually sends a full timestamp, but older records carry a
/// bare calendar date. A bare date is already a calendar day and is never
/// shifted by the display timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum CreatedAt {
    Instant(DateTime<Utc>),
    Date(NaiveDate),
}

impl CreatedAt {
    /// Calendar day this investment falls on in the display timezone.
    pub fn display_date(&self, tz: Tz) -> NaiveDate {
        match self {
            CreatedAt::Instant(instant) => display_date_from_utc(*instant, tz),
            CreatedAt::Date(date) => *date,
        }
    }
}

/// Current-state snapshot of a simulated forex position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    /// Market symbol, e.g. `EUR/USD`
    pub pair: String,
    /// Principal committed to the position
    pub amount: Decimal,
    pub entry_price: Decimal,
    pub current_price: Decimal,
    /// Daily return rate promised at opening
    pub daily_roi: Decimal,
    /// Lifetime return, regardless of status
    pub profit: Decimal,
    pub status: InvestmentStatus,
    /// `None` when the backend sent no parseable timestamp
    pub created_at: Option<CreatedAt>,
}

impl Investment {
    /// Only active positions count toward invested capital.
    pub fn is_active(&self) -> bool {
        self.status == InvestmentStatus::Active
    }

    /// Principal counted toward "total invested": the amount while active,
    /// zero otherwise.
    pub fn invested_amount(&self) -> Decimal {
        if self.is_active() {
            self.amount
        } else {
            Decimal::ZERO
        }
    }
}

/// Sum of principal over active investments.
pub fn total_invested(investments: &[Investment]) -> Decimal {
    saturating_sum(investments.iter().map(Investment::invested_amount))
}

/// Sum of profit over all investments, active or not.
pub fn total_profit(investments: &[Investment]) -> Decimal {
    saturating_sum(investments.iter().map(|inv| inv.profit))
}
