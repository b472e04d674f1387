//! Traits defining the contract for backend reads.

use async_trait::async_trait;
use kesfolio_core::errors::Result;
use kesfolio_core::ingest::IngestReport;
use kesfolio_core::{Investment, LedgerEvent, ReferralSummary, UserProfile};

/// A typed payload together with what the parsing boundary had to repair.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub report: IngestReport,
}

impl<T> Parsed<T> {
    pub fn new(value: T, report: IngestReport) -> Self {
        Self { value, report }
    }

    /// Wraps a value that needed no repair.
    pub fn clean(value: T) -> Self {
        Self::new(value, IngestReport::default())
    }
}

/// Read side of the backend used by the dashboard.
#[async_trait]
pub trait PortfolioApi: Send + Sync {
    /// Signed-in user, from `GET /auth/verify`
    async fn get_profile(&self) -> Result<Parsed<UserProfile>>;

    /// `GET /investments`
    async fn get_investments(&self) -> Result<Parsed<Vec<Investment>>>;

    /// `GET /investments/history`
    async fn get_investment_history(&self) -> Result<Parsed<Vec<LedgerEvent>>>;

    /// `GET /referral/stats`
    async fn get_referral_stats(&self) -> Result<Parsed<ReferralSummary>>;
}
