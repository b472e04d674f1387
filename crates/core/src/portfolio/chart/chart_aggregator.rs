//! Performance chart aggregation.

use chrono::NaiveDate;
use chrono_tz::Tz;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::chart_model::{ChartPeriod, ChartPoint, ChartSeries, CurrentTotals, DailyBucket};
use crate::constants::MIN_CHART_POINTS;
use crate::investments::{total_invested, total_profit, Investment, LedgerChannel, LedgerEvent};
use crate::referrals::ReferralSummary;
use crate::utils::decimal_utils::saturating_add;
use crate::utils::time_utils::{display_date_today, DEFAULT_DISPLAY_TZ};

/// Authoritative totals computed straight from the live inputs.
///
/// Earnings include profit from every investment regardless of status;
/// invested capital counts active positions only.
pub fn current_totals(investments: &[Investment], referral: &ReferralSummary) -> CurrentTotals {
    CurrentTotals {
        total_earnings: total_profit(investments),
        total_investments: total_invested(investments),
        referral_earnings: referral.total_earnings,
    }
}

/// Builds the performance chart series.
///
/// Stateless: every call recomputes from its inputs, which are never
/// mutated. Inputs that have not loaded yet are passed as empty slices and
/// `ReferralSummary::default()`.
#[derive(Debug, Clone, Copy)]
pub struct PortfolioAggregator {
    tz: Tz,
}

impl Default for PortfolioAggregator {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_TZ)
    }
}

impl PortfolioAggregator {
    /// Creates an aggregator bucketing timestamps by calendar day in `tz`.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Chart points for `period`, ending on today's authoritative totals.
    pub fn aggregate(
        &self,
        investments: &[Investment],
        history: &[LedgerEvent],
        referral: &ReferralSummary,
        period: ChartPeriod,
    ) -> Vec<ChartPoint> {
        let today = display_date_today(self.tz);
        self.aggregate_as_of(investments, history, referral, period, today)
    }

    /// Same as [`aggregate`](Self::aggregate) with an explicit "today".
    pub fn aggregate_as_of(
        &self,
        investments: &[Investment],
        history: &[LedgerEvent],
        referral: &ReferralSummary,
        period: ChartPeriod,
        today: NaiveDate,
    ) -> Vec<ChartPoint> {
        self.build_series(investments, history, referral, period, today)
            .points
    }

    /// Full aggregation pass, including the count of undated records that
    /// were left out of the reconstruction.
    pub fn build_series(
        &self,
        investments: &[Investment],
        history: &[LedgerEvent],
        referral: &ReferralSummary,
        period: ChartPeriod,
        today: NaiveDate,
    ) -> ChartSeries {
        debug!(
            "Aggregating chart ({:?}) from {} investments and {} ledger events as of {}",
            period,
            investments.len(),
            history.len(),
            today
        );

        let (mut buckets, skipped_undated) = self.collect_buckets(investments, history);
        if skipped_undated > 0 {
            warn!(
                "Skipped {} undated records while bucketing the performance chart",
                skipped_undated
            );
        }

        distribute_referral_total(&mut buckets, referral.total_earnings, today);

        let mut points = running_totals(buckets.values());
        reconcile_with_current(&mut points, current_totals(investments, referral), today);
        truncate_to_period(&mut points, period);
        pad_to_minimum(&mut points);

        ChartSeries {
            period,
            points,
            skipped_undated,
        }
    }

    /// Groups investments and ledger events into per-day buckets.
    ///
    /// Every dated record opens a bucket for its day even when it contributes
    /// nothing (closed investments, expiry events, unknown kinds).
    fn collect_buckets(
        &self,
        investments: &[Investment],
        history: &[LedgerEvent],
    ) -> (BTreeMap<NaiveDate, DailyBucket>, usize) {
        let mut buckets: BTreeMap<NaiveDate, DailyBucket> = BTreeMap::new();
        let mut skipped = 0;

        for investment in investments {
            let Some(created_at) = investment.created_at else {
                skipped += 1;
                continue;
            };
            let date = created_at.display_date(self.tz);
            buckets
                .entry(date)
                .or_insert_with(|| DailyBucket::new(date))
                .add(LedgerChannel::Investments, investment.invested_amount());
        }

        for event in history {
            let Some(date) = event.date else {
                skipped += 1;
                continue;
            };
            let bucket = buckets
                .entry(date)
                .or_insert_with(|| DailyBucket::new(date));
            if let Some(channel) = event.kind.channel() {
                bucket.add(channel, event.amount);
            }
        }

        (buckets, skipped)
    }
}

/// Spreads a backend referral total over the buckets when the ledger has no
/// dated referral entries at all.
///
/// This is display smoothing, not a ledger fact. With N >= 2 days the i-th
/// day (0-based) receives `(total / N) * (i + 1) / N`, so later days get
/// more. A single day takes the whole total; with no days a bucket for
/// `today` is created.
fn distribute_referral_total(
    buckets: &mut BTreeMap<NaiveDate, DailyBucket>,
    total: Decimal,
    today: NaiveDate,
) {
    let has_referral_entries = buckets.values().any(|b| !b.referral_change.is_zero());
    if has_referral_entries || total <= Decimal::ZERO {
        return;
    }

    match buckets.len() {
        0 => {
            buckets
                .entry(today)
                .or_insert_with(|| DailyBucket::new(today))
                .add(LedgerChannel::Referral, total);
        }
        1 => {
            if let Some(bucket) = buckets.values_mut().next() {
                bucket.add(LedgerChannel::Referral, total);
            }
        }
        count => {
            let count = Decimal::from(count);
            let increment = total / count;
            for (index, bucket) in buckets.values_mut().enumerate() {
                let weight = Decimal::from(index + 1);
                // increment is rounded, so increment * N can exceed the range
                let portion = increment
                    .checked_mul(weight)
                    .map_or_else(|| increment / count * weight, |scaled| scaled / count);
                bucket.add(LedgerChannel::Referral, portion);
            }
        }
    }
}

/// Cumulative sums of the bucket deltas, one point per bucket in date order.
fn running_totals<'a>(buckets: impl Iterator<Item = &'a DailyBucket>) -> Vec<ChartPoint> {
    let mut earnings = Decimal::ZERO;
    let mut investments = Decimal::ZERO;
    let mut referrals = Decimal::ZERO;

    buckets
        .map(|bucket| {
            earnings = saturating_add(earnings, bucket.earnings_change);
            investments = saturating_add(investments, bucket.investments_change);
            referrals = saturating_add(referrals, bucket.referral_change);
            ChartPoint::new(bucket.date, earnings, investments, referrals)
        })
        .collect()
}

/// Pins the end of the series to the authoritative totals.
///
/// The last point is overwritten when it already sits on (or, for
/// future-dated ledger entries, after) `today`; otherwise a point for
/// `today` is appended.
fn reconcile_with_current(points: &mut Vec<ChartPoint>, current: CurrentTotals, today: NaiveDate) {
    match points.last_mut() {
        Some(last) if last.date >= today => {
            last.total_earnings = current.total_earnings;
            last.total_investments = current.total_investments;
            last.referral_earnings = current.referral_earnings;
        }
        _ => points.push(ChartPoint::new(
            today,
            current.total_earnings,
            current.total_investments,
            current.referral_earnings,
        )),
    }
}

/// Keeps the trailing points of the period. Counts points, not days.
fn truncate_to_period(points: &mut Vec<ChartPoint>, period: ChartPeriod) {
    if let Some(max) = period.max_points() {
        if points.len() > max {
            points.drain(..points.len() - max);
        }
    }
}

/// Prepends a zero point the day before the first one so a lone point
/// still draws a line.
fn pad_to_minimum(points: &mut Vec<ChartPoint>) {
    if points.len() >= MIN_CHART_POINTS {
        return;
    }
    let Some(first) = points.first() else {
        return;
    };
    if let Some(previous_day) = first.date.pred_opt() {
        points.insert(0, ChartPoint::zero(previous_day));
    }
}
