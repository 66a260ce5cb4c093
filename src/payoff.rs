use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::PayoffConfig;
use crate::decimal::{Money, Rate};
use crate::instruments::{CardInstrument, LoanInstrument};
use crate::projection::{AmortizationSimulator, LoanProjector};
use crate::statement::CardStatement;
use crate::types::{InstrumentId, InstrumentKind, PayoffStrategy};

/// an instrument considered for extra-payment targeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffCandidate {
    pub instrument_id: InstrumentId,
    pub kind: InstrumentKind,
    pub name: String,
    pub balance: Money,
    pub apr: Rate,
    pub monthly_interest: Money,
    pub utilization: Rate,
    pub minimum_due: Money,
    pub planned_payment: Money,
    /// interest avoided over the savings window by directing the hypothetical extra payment here
    pub annual_interest_savings: Money,
}

impl PayoffCandidate {
    pub fn from_card(statement: &CardStatement, card: &CardInstrument, config: &PayoffConfig) -> Self {
        let simulator = AmortizationSimulator::new(statement.simulation_params(card));

        Self {
            instrument_id: statement.instrument_id,
            kind: InstrumentKind::Card,
            name: statement.name.clone(),
            balance: statement.display_balance,
            apr: statement.apr,
            monthly_interest: statement.monthly_interest(),
            utilization: statement.display_utilization,
            minimum_due: statement.minimum_due,
            planned_payment: statement.planned_payment,
            annual_interest_savings: simulator
                .interest_savings(config.savings_extra_payment, config.savings_months),
        }
    }

    pub fn from_loan(loan: &LoanInstrument, config: &PayoffConfig) -> Self {
        let simulator = AmortizationSimulator::new(LoanProjector::simulation_params(loan));
        let first = simulator.step(1, loan.outstanding_principal);

        Self {
            instrument_id: loan.id,
            kind: InstrumentKind::Loan,
            name: loan.name.clone(),
            balance: loan.outstanding_principal,
            apr: loan.apr,
            monthly_interest: first.interest,
            utilization: Rate::ZERO,
            minimum_due: first.minimum_due,
            planned_payment: first.planned_payment,
            annual_interest_savings: simulator
                .interest_savings(config.savings_extra_payment, config.savings_months),
        }
    }
}

fn compare_names(a: &PayoffCandidate, b: &PayoffCandidate) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.instrument_id.cmp(&b.instrument_id))
}

/// apr desc, monthly interest desc, balance desc, name asc
pub fn compare_avalanche(a: &PayoffCandidate, b: &PayoffCandidate) -> Ordering {
    b.apr
        .cmp(&a.apr)
        .then_with(|| b.monthly_interest.cmp(&a.monthly_interest))
        .then_with(|| b.balance.cmp(&a.balance))
        .then_with(|| compare_names(a, b))
}

/// balance asc, apr desc, monthly interest desc, name asc
pub fn compare_snowball(a: &PayoffCandidate, b: &PayoffCandidate) -> Ordering {
    a.balance
        .cmp(&b.balance)
        .then_with(|| b.apr.cmp(&a.apr))
        .then_with(|| b.monthly_interest.cmp(&a.monthly_interest))
        .then_with(|| compare_names(a, b))
}

/// candidates with an open balance, best target first
pub fn rank_candidates(candidates: &[PayoffCandidate], strategy: PayoffStrategy) -> Vec<PayoffCandidate> {
    let mut ranked: Vec<PayoffCandidate> = candidates
        .iter()
        .filter(|c| c.balance.is_positive())
        .cloned()
        .collect();

    match strategy {
        PayoffStrategy::Avalanche => ranked.sort_by(compare_avalanche),
        PayoffStrategy::Snowball => ranked.sort_by(compare_snowball),
    }
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffRecommendation {
    pub avalanche: Vec<PayoffCandidate>,
    pub snowball: Vec<PayoffCandidate>,
    pub avalanche_target: Option<PayoffCandidate>,
    pub snowball_target: Option<PayoffCandidate>,
    pub recommended_strategy: Option<PayoffStrategy>,
    pub recommended_target: Option<PayoffCandidate>,
    pub note: Option<String>,
}

/// ranks candidates under both strategies and picks a cross-portfolio target
#[derive(Debug, Clone, Copy, Default)]
pub struct PayoffPrioritizer;

impl PayoffPrioritizer {
    pub fn new() -> Self {
        Self
    }

    pub fn recommend(&self, candidates: &[PayoffCandidate]) -> PayoffRecommendation {
        let avalanche = rank_candidates(candidates, PayoffStrategy::Avalanche);
        let snowball = rank_candidates(candidates, PayoffStrategy::Snowball);

        let avalanche_target = avalanche.first().cloned();
        let snowball_target = snowball.first().cloned();

        // snowball wins only on strictly larger savings
        let recommended = match (&avalanche_target, &snowball_target) {
            (Some(a), Some(s)) if s.annual_interest_savings > a.annual_interest_savings => {
                Some((PayoffStrategy::Snowball, s.clone()))
            }
            (Some(a), _) => Some((PayoffStrategy::Avalanche, a.clone())),
            (None, _) => None,
        };

        if let Some((strategy, target)) = &recommended {
            debug!(
                "payoff target {} via {:?}, saves {}",
                target.instrument_id, strategy, target.annual_interest_savings
            );
        }

        let note = if recommended.is_none() {
            Some("no open balances".to_string())
        } else {
            None
        };
        let (recommended_strategy, recommended_target) = match recommended {
            Some((strategy, target)) => (Some(strategy), Some(target)),
            None => (None, None),
        };

        PayoffRecommendation {
            avalanche,
            snowball,
            avalanche_target,
            snowball_target,
            recommended_strategy,
            recommended_target,
            note,
        }
    }
}
