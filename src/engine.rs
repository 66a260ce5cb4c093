use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::SafeTimeProvider;
use log::debug;

use crate::alerts::{RiskAlertGenerator, RiskSignals};
use crate::config::EngineConfig;
use crate::errors::Result;
use crate::instruments::{CardInstrument, CardRecord, LoanInstrument, LoanRecord};
use crate::payoff::{PayoffCandidate, PayoffPrioritizer};
use crate::projection::{AmortizationSimulator, CardPortfolioTotals, LoanProjector, ProjectionSummary};
use crate::report::{CardView, PortfolioReport};
use crate::statement::CardStatement;

/// evaluates a snapshot of cards and loans into a single report
///
/// Evaluation is a pure function of the instruments, the configuration and
/// "now": the same inputs always produce the same report.
#[derive(Debug, Clone)]
pub struct PortfolioEngine {
    config: EngineConfig,
    alerts: RiskAlertGenerator,
    prioritizer: PayoffPrioritizer,
}

impl PortfolioEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            alerts: RiskAlertGenerator::new(),
            prioritizer: PayoffPrioritizer::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// evaluate as of the provider's current time
    pub fn evaluate(
        &self,
        cards: &[CardInstrument],
        loans: &[LoanInstrument],
        time_provider: &SafeTimeProvider,
    ) -> PortfolioReport {
        let now = time_provider.now();
        self.evaluate_at(cards, loans, now)
    }

    /// normalize raw records, then evaluate
    pub fn evaluate_records(
        &self,
        cards: &[CardRecord],
        loans: &[LoanRecord],
        time_provider: &SafeTimeProvider,
    ) -> PortfolioReport {
        let defaults = &self.config.defaults;
        let cards: Vec<CardInstrument> = cards.iter().map(|r| r.normalize(defaults)).collect();
        let loans: Vec<LoanInstrument> = loans.iter().map(|r| r.normalize(defaults)).collect();
        self.evaluate(&cards, &loans, time_provider)
    }

    pub fn project_card(&self, card: &CardInstrument, today: NaiveDate) -> CardView {
        let statement = CardStatement::project(card, today);
        let rows = AmortizationSimulator::new(statement.simulation_params(card))
            .run(self.config.projection.card_months);
        let summary = ProjectionSummary::from_rows(&rows);

        CardView { statement, rows, summary }
    }

    pub fn evaluate_at(
        &self,
        cards: &[CardInstrument],
        loans: &[LoanInstrument],
        now: DateTime<Utc>,
    ) -> PortfolioReport {
        let today = now.date_naive();
        debug!("evaluating {} cards and {} loans as of {}", cards.len(), loans.len(), today);

        let card_views: Vec<CardView> = cards.iter().map(|c| self.project_card(c, today)).collect();
        let card_totals =
            CardPortfolioTotals::from_cards(card_views.iter().map(|v| (&v.statement, &v.summary)));

        let loan_report = LoanProjector::new(&self.config.projection).project_portfolio(loans, now);

        let signals: Vec<RiskSignals> = card_views
            .iter()
            .map(|v| RiskSignals::from(&v.statement))
            .chain(loan_report.loans.iter().map(RiskSignals::from))
            .collect();
        let alerts = self.alerts.generate(&signals);

        let candidates: Vec<PayoffCandidate> = card_views
            .iter()
            .zip(cards)
            .map(|(v, card)| PayoffCandidate::from_card(&v.statement, card, &self.config.payoff))
            .chain(loans.iter().map(|l| PayoffCandidate::from_loan(l, &self.config.payoff)))
            .collect();
        let payoff = self.prioritizer.recommend(&candidates);

        debug!(
            "report: {} alerts, {} payoff candidates",
            alerts.len(),
            payoff.avalanche.len()
        );

        PortfolioReport {
            as_of: now,
            cards: card_views,
            card_totals,
            loans: loan_report,
            alerts,
            payoff,
        }
    }
}
