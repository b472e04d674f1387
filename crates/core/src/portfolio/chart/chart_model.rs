//! Chart domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{LAST_30_DAYS_POINTS, LAST_7_DAYS_POINTS};
use crate::investments::LedgerChannel;
use crate::utils::decimal_utils::saturating_add;
use crate::utils::time_utils::format_chart_label;

/// Window selector for the chart tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartPeriod {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "7d", alias = "last7days")]
    Last7Days,
    #[serde(rename = "30d", alias = "last30days")]
    Last30Days,
}

impl ChartPeriod {
    pub const ALL_PERIODS: [ChartPeriod; 3] = [
        ChartPeriod::All,
        ChartPeriod::Last30Days,
        ChartPeriod::Last7Days,
    ];

    /// How many trailing points the period keeps.
    ///
    /// This counts points, not calendar days: a sparse history shown under
    /// `Last7Days` may span months.
    pub fn max_points(&self) -> Option<usize> {
        match self {
            ChartPeriod::All => None,
            ChartPeriod::Last7Days => Some(LAST_7_DAYS_POINTS),
            ChartPeriod::Last30Days => Some(LAST_30_DAYS_POINTS),
        }
    }
}

/// Per-day deltas of the three chart series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub earnings_change: Decimal,
    pub investments_change: Decimal,
    pub referral_change: Decimal,
}

impl DailyBucket {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            earnings_change: Decimal::ZERO,
            investments_change: Decimal::ZERO,
            referral_change: Decimal::ZERO,
        }
    }

    pub fn add(&mut self, channel: LedgerChannel, amount: Decimal) {
        match channel {
            LedgerChannel::Earnings => {
                self.earnings_change = saturating_add(self.earnings_change, amount)
            }
            LedgerChannel::Investments => {
                self.investments_change = saturating_add(self.investments_change, amount)
            }
            LedgerChannel::Referral => {
                self.referral_change = saturating_add(self.referral_change, amount)
            }
        }
    }
}

/// Running totals of the three series as of one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// Display label, e.g. `Jan 1, 2024`
    pub label: String,
    pub total_earnings: Decimal,
    pub total_investments: Decimal,
    pub referral_earnings: Decimal,
}

impl ChartPoint {
    pub fn new(
        date: NaiveDate,
        total_earnings: Decimal,
        total_investments: Decimal,
        referral_earnings: Decimal,
    ) -> Self {
        Self {
            date,
            label: format_chart_label(date),
            total_earnings,
            total_investments,
            referral_earnings,
        }
    }

    pub fn zero(date: NaiveDate) -> Self {
        Self::new(date, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    }
}

/// Authoritative "right now" totals every series must end on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTotals {
    /// Sum of profit over all investments
    pub total_earnings: Decimal,
    /// Sum of principal over active investments
    pub total_investments: Decimal,
    /// Backend referral total
    pub referral_earnings: Decimal,
}

/// Output of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub period: ChartPeriod,
    pub points: Vec<ChartPoint>,
    /// Investments and ledger events left out of bucketing for lack of a date
    pub skipped_undated: usize,
}
