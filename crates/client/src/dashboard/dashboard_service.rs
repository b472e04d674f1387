use chrono::NaiveDate;
use kesfolio_core::errors::{Error, Result};
use kesfolio_core::ingest::IngestReport;
use kesfolio_core::portfolio::positions::build_position_rows;
use kesfolio_core::utils::time_utils::display_date_today;
use kesfolio_core::{ChartPeriod, PortfolioAggregator, PortfolioTotals};
use log::{debug, warn};
use std::sync::Arc;

use super::dashboard_model::{DashboardInputs, DashboardSnapshot};
use crate::traits::{Parsed, PortfolioApi};

/// Keeps a successfully parsed input, or degrades a failed fetch to "not
/// loaded". Only a lost session is fatal.
fn settle<T>(
    name: &str,
    result: Result<Parsed<T>>,
    ingest: &mut IngestReport,
) -> Result<Option<T>> {
    match result {
        Ok(parsed) => {
            ingest.merge(&parsed.report);
            Ok(Some(parsed.value))
        }
        Err(Error::Unauthorized) => Err(Error::Unauthorized),
        Err(e) => {
            warn!("Failed to load {}, continuing without it: {}", name, e);
            Ok(None)
        }
    }
}

/// Derives the dashboard from whatever inputs are available.
pub fn build_snapshot(
    inputs: &DashboardInputs,
    aggregator: &PortfolioAggregator,
    today: NaiveDate,
    ingest: IngestReport,
) -> DashboardSnapshot {
    let referral = inputs.referral.clone().unwrap_or_default();
    let investments = inputs.investments();
    let history = inputs.history();

    let charts = ChartPeriod::ALL_PERIODS
        .iter()
        .map(|period| aggregator.build_series(investments, history, &referral, *period, today))
        .collect();

    DashboardSnapshot {
        totals: PortfolioTotals::reconcile(investments, &referral, inputs.profile.as_ref()),
        charts,
        positions: build_position_rows(investments),
        ingest,
        complete: inputs.is_complete(),
    }
}

/// Loads dashboard inputs from the backend and derives the snapshot.
pub struct DashboardService {
    api: Arc<dyn PortfolioApi>,
    aggregator: PortfolioAggregator,
}

impl DashboardService {
    pub fn new(api: Arc<dyn PortfolioApi>, aggregator: PortfolioAggregator) -> Self {
        Self { api, aggregator }
    }

    /// Fetches all four inputs concurrently.
    ///
    /// Each call starts from scratch; nothing from earlier loads is reused.
    pub async fn fetch_inputs(&self) -> Result<(DashboardInputs, IngestReport)> {
        debug!("Fetching dashboard inputs...");
        let (profile, investments, history, referral) = tokio::join!(
            self.api.get_profile(),
            self.api.get_investments(),
            self.api.get_investment_history(),
            self.api.get_referral_stats(),
        );

        let mut ingest = IngestReport::new();
        let inputs = DashboardInputs {
            profile: settle("user profile", profile, &mut ingest)?,
            investments: settle("investments", investments, &mut ingest)?,
            history: settle("investment history", history, &mut ingest)?,
            referral: settle("referral stats", referral, &mut ingest)?,
        };
        Ok((inputs, ingest))
    }

    /// Fetches the inputs and derives the snapshot as of today in the
    /// aggregator's display timezone.
    pub async fn load(&self) -> Result<DashboardSnapshot> {
        let (inputs, ingest) = self.fetch_inputs().await?;
        let today = display_date_today(self.aggregator.timezone());
        let snapshot = build_snapshot(&inputs, &self.aggregator, today, ingest);
        if !snapshot.complete {
            warn!("Dashboard built from partially loaded inputs");
        }
        Ok(snapshot)
    }
}
