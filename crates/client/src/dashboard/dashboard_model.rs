use serde::{Deserialize, Serialize};

use kesfolio_core::ingest::IngestReport;
use kesfolio_core::{
    ChartSeries, Investment, LedgerEvent, PortfolioTotals, PositionRow, ReferralSummary,
    UserProfile,
};

/// Raw dashboard inputs as far as they have loaded.
///
/// `None` marks an input whose fetch failed or has not completed; the
/// derivation treats it as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardInputs {
    pub profile: Option<UserProfile>,
    pub investments: Option<Vec<Investment>>,
    pub history: Option<Vec<LedgerEvent>>,
    pub referral: Option<ReferralSummary>,
}

impl DashboardInputs {
    pub fn investments(&self) -> &[Investment] {
        self.investments.as_deref().unwrap_or_default()
    }

    pub fn history(&self) -> &[LedgerEvent] {
        self.history.as_deref().unwrap_or_default()
    }

    /// True when every input arrived.
    pub fn is_complete(&self) -> bool {
        self.profile.is_some()
            && self.investments.is_some()
            && self.history.is_some()
            && self.referral.is_some()
    }
}

/// Everything the dashboard renders, derived from one set of inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub totals: PortfolioTotals,
    /// One series per chart tab, in tab order
    pub charts: Vec<ChartSeries>,
    pub positions: Vec<PositionRow>,
    /// Repairs made while parsing the inputs
    pub ingest: IngestReport,
    /// False when at least one input failed to load
    pub complete: bool,
}
