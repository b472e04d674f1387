//! Unit tests for the dashboard loader.

use super::*;
use crate::traits::{Parsed, PortfolioApi};
use async_trait::async_trait;
use chrono::NaiveDate;
use kesfolio_core::errors::{Error, Result};
use kesfolio_core::ingest::IngestReport;
use kesfolio_core::{
    ChartPeriod, CreatedAt, Investment, InvestmentStatus, LedgerEvent, LedgerEventKind,
    PortfolioAggregator, ReferralSummary, UserProfile,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Implementations
// ============================================================================

#[derive(Default)]
struct MockPortfolioApi {
    profile: Option<UserProfile>,
    investments: Mutex<Option<Vec<Investment>>>,
    history: Option<Vec<LedgerEvent>>,
    referral: Option<ReferralSummary>,
    history_report: IngestReport,
    unauthorized: bool,
    calls: AtomicUsize,
}

fn unavailable() -> Error {
    Error::Api {
        status: 500,
        message: "Failed to fetch".to_string(),
    }
}

#[async_trait]
impl PortfolioApi for MockPortfolioApi {
    async fn get_profile(&self) -> Result<Parsed<UserProfile>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.profile.clone().map(Parsed::clean).ok_or_else(unavailable)
    }

    async fn get_investments(&self) -> Result<Parsed<Vec<Investment>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unauthorized {
            return Err(Error::Unauthorized);
        }
        self.investments
            .lock()
            .unwrap()
            .clone()
            .map(Parsed::clean)
            .ok_or_else(unavailable)
    }

    async fn get_investment_history(&self) -> Result<Parsed<Vec<LedgerEvent>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.history
            .clone()
            .map(|h| Parsed::new(h, self.history_report.clone()))
            .ok_or_else(unavailable)
    }

    async fn get_referral_stats(&self) -> Result<Parsed<ReferralSummary>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.referral.clone().map(Parsed::clean).ok_or_else(unavailable)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn investment(id: &str, amount: Decimal, profit: Decimal, status: InvestmentStatus) -> Investment {
    Investment {
        id: id.to_string(),
        pair: "EUR/USD".to_string(),
        amount,
        entry_price: dec!(1.0),
        current_price: dec!(1.01),
        daily_roi: dec!(0.02),
        profit,
        status,
        created_at: Some(CreatedAt::Date(date(2024, 1, 1))),
    }
}

fn full_api() -> MockPortfolioApi {
    MockPortfolioApi {
        profile: Some(UserProfile {
            id: "u1".to_string(),
            balance: dec!(250),
            withdrawable: dec!(80),
            ..UserProfile::default()
        }),
        investments: Mutex::new(Some(vec![
            investment("a", dec!(1000), dec!(50), InvestmentStatus::Active),
            investment("b", dec!(500), dec!(20), InvestmentStatus::Closed),
        ])),
        history: Some(vec![LedgerEvent {
            date: Some(date(2024, 1, 2)),
            amount: dec!(10),
            kind: LedgerEventKind::RoiEarning,
            balance: Decimal::ZERO,
        }]),
        referral: Some(ReferralSummary::with_total(dec!(30))),
        ..MockPortfolioApi::default()
    }
}

fn service(api: Arc<MockPortfolioApi>) -> DashboardService {
    DashboardService::new(api, PortfolioAggregator::default())
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_load_builds_full_snapshot() {
    let snapshot = service(Arc::new(full_api())).load().await.unwrap();

    assert!(snapshot.complete);
    assert_eq!(snapshot.totals.balance, dec!(250));
    assert_eq!(snapshot.totals.withdrawable, dec!(80));
    assert_eq!(snapshot.totals.total_invested, dec!(1000));
    assert_eq!(snapshot.totals.total_earnings, dec!(70));
    assert_eq!(snapshot.totals.referral_earnings, dec!(30));

    let periods: Vec<ChartPeriod> = snapshot.charts.iter().map(|c| c.period).collect();
    assert_eq!(periods, ChartPeriod::ALL_PERIODS.to_vec());
    for chart in &snapshot.charts {
        let last = chart.points.last().unwrap();
        assert_eq!(last.total_investments, snapshot.totals.total_invested);
        assert_eq!(last.total_earnings, snapshot.totals.total_earnings);
        assert_eq!(last.referral_earnings, snapshot.totals.referral_earnings);
    }

    assert_eq!(snapshot.positions.len(), 2);
    assert!(snapshot.positions[0].closable);
    assert!(!snapshot.positions[1].closable);
    assert!(snapshot.ingest.is_clean());
}

#[tokio::test]
async fn test_failed_fetches_degrade_to_defaults() {
    let api = MockPortfolioApi {
        history: None,
        referral: None,
        profile: None,
        ..full_api()
    };

    let snapshot = service(Arc::new(api)).load().await.unwrap();

    assert!(!snapshot.complete);
    assert_eq!(snapshot.totals.balance, Decimal::ZERO);
    assert_eq!(snapshot.totals.referral_earnings, Decimal::ZERO);
    assert_eq!(snapshot.totals.total_invested, dec!(1000));
    let all = &snapshot.charts[0];
    assert_eq!(all.points.last().unwrap().total_earnings, dec!(70));
}

#[tokio::test]
async fn test_nothing_loaded_still_yields_a_series() {
    let api = MockPortfolioApi::default();
    let snapshot = service(Arc::new(api)).load().await.unwrap();

    assert!(!snapshot.complete);
    assert_eq!(snapshot.totals, kesfolio_core::PortfolioTotals::default());
    for chart in &snapshot.charts {
        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[1].total_investments, Decimal::ZERO);
    }
    assert!(snapshot.positions.is_empty());
}

#[tokio::test]
async fn test_unauthorized_is_propagated() {
    let api = MockPortfolioApi {
        unauthorized: true,
        ..full_api()
    };
    let err = service(Arc::new(api)).load().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_each_load_recomputes_from_fresh_inputs() {
    let api = Arc::new(full_api());
    let service = service(api.clone());

    let first = service.load().await.unwrap();
    assert_eq!(first.totals.total_invested, dec!(1000));

    *api.investments.lock().unwrap() = Some(vec![investment(
        "c",
        dec!(200),
        dec!(1),
        InvestmentStatus::Active,
    )]);
    let second = service.load().await.unwrap();

    assert_eq!(second.totals.total_invested, dec!(200));
    assert_eq!(second.totals.total_earnings, dec!(1));
    assert_eq!(second.positions.len(), 1);
    assert_eq!(api.calls.load(Ordering::SeqCst), 8);
}

#[tokio::test]
async fn test_ingest_reports_are_merged() {
    let api = MockPortfolioApi {
        history_report: IngestReport {
            records_read: 1,
            undated_records: 1,
            ..IngestReport::default()
        },
        ..full_api()
    };

    let (inputs, ingest) = service(Arc::new(api)).fetch_inputs().await.unwrap();
    assert!(inputs.is_complete());
    assert_eq!(ingest.undated_records, 1);
    assert!(!ingest.is_clean());
}

#[test]
fn test_build_snapshot_is_deterministic() {
    let inputs = DashboardInputs {
        investments: Some(vec![investment(
            "a",
            dec!(100),
            dec!(5),
            InvestmentStatus::Active,
        )]),
        ..DashboardInputs::default()
    };
    let aggregator = PortfolioAggregator::default();
    let today = date(2024, 2, 1);

    let first = build_snapshot(&inputs, &aggregator, today, IngestReport::default());
    let second = build_snapshot(&inputs, &aggregator, today, IngestReport::default());

    assert_eq!(first, second);
    assert_eq!(first.charts[0].points.last().unwrap().date, today);
}
