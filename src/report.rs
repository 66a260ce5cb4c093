//! serializable portfolio report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alerts::PortfolioAlert;
use crate::errors::Result;
use crate::payoff::PayoffRecommendation;
use crate::projection::{CardPortfolioTotals, LoanPortfolioReport, ProjectionRow, ProjectionSummary};
use crate::statement::CardStatement;
use crate::types::{InstrumentId, Severity};

/// one card's current cycle plus its forward projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub statement: CardStatement,
    pub rows: Vec<ProjectionRow>,
    pub summary: ProjectionSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub as_of: DateTime<Utc>,
    pub cards: Vec<CardView>,
    pub card_totals: CardPortfolioTotals,
    pub loans: LoanPortfolioReport,
    pub alerts: Vec<PortfolioAlert>,
    pub payoff: PayoffRecommendation,
}

impl PortfolioReport {
    pub fn card(&self, id: InstrumentId) -> Option<&CardView> {
        self.cards.iter().find(|c| c.statement.instrument_id == id)
    }

    pub fn alerts_for(&self, id: InstrumentId) -> impl Iterator<Item = &PortfolioAlert> {
        self.alerts.iter().filter(move |a| a.instrument_id == id)
    }

    pub fn alert_count(&self, severity: Severity) -> usize {
        self.alerts.iter().filter(|a| a.severity == severity).count()
    }

    /// get the report as pretty json
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// get the report as compact json
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
