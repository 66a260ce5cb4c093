pub mod loan;
pub mod portfolio;
pub mod simulator;

use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};

pub use loan::{
    HorizonSnapshot, LoanPortfolioReport, LoanProjection, LoanProjector, LoanRow, PayoffDate,
};
pub use portfolio::{weighted_apr, CardPortfolioTotals};
pub use simulator::{AmortizationSimulator, SimulationParams};

/// one projected month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// 1-based month number
    pub month_index: u32,
    pub start_balance: Money,
    pub interest: Money,
    /// start balance plus interest, what is owed before paying
    pub due_balance: Money,
    pub minimum_due: Money,
    pub planned_payment: Money,
    pub planned_spend: Money,
    pub ending_balance: Money,
    pub ending_utilization: Rate,
}

/// totals over a sequence of projected months
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub months: u32,
    pub total_interest: Money,
    pub total_payments: Money,
    pub total_spend: Money,
    pub ending_balance: Money,
    /// first month whose ending balance is zero
    pub payoff_month: Option<u32>,
}

impl ProjectionSummary {
    pub fn from_rows(rows: &[ProjectionRow]) -> Self {
        Self {
            months: rows.len() as u32,
            total_interest: rows.iter().map(|r| r.interest).sum(),
            total_payments: rows.iter().map(|r| r.planned_payment).sum(),
            total_spend: rows.iter().map(|r| r.planned_spend).sum(),
            ending_balance: rows.last().map(|r| r.ending_balance).unwrap_or(Money::ZERO),
            payoff_month: rows
                .iter()
                .find(|r| r.ending_balance.is_zero())
                .map(|r| r.month_index),
        }
    }
}
