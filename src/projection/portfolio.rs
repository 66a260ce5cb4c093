use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProjectionSummary;
use crate::decimal::{Money, Rate};
use crate::statement::CardStatement;

/// balance-weighted average apr; zero when nothing is owed
pub fn weighted_apr(positions: impl IntoIterator<Item = (Money, Rate)>) -> Rate {
    let (weighted, total) = positions
        .into_iter()
        .filter(|(balance, _)| balance.is_positive())
        .fold((Decimal::ZERO, Decimal::ZERO), |(weighted, total), (balance, apr)| {
            (
                weighted + balance.as_decimal() * apr.as_decimal(),
                total + balance.as_decimal(),
            )
        });

    if total.is_zero() {
        return Rate::ZERO;
    }
    Rate::from_decimal(weighted / total)
}

/// totals across every card in a portfolio
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardPortfolioTotals {
    pub card_count: u32,
    pub total_display_balance: Money,
    pub total_credit_limit: Money,
    pub total_available_credit: Money,
    pub aggregate_utilization: Rate,
    pub weighted_apr: Rate,
    pub next_cycle_interest: Money,
    pub projected_interest: Money,
    pub projected_ending_balance: Money,
}

impl CardPortfolioTotals {
    pub fn from_cards<'a>(
        cards: impl IntoIterator<Item = (&'a CardStatement, &'a ProjectionSummary)>,
    ) -> Self {
        let mut totals = CardPortfolioTotals::default();
        let mut positions = Vec::new();

        for (statement, summary) in cards {
            totals.card_count += 1;
            totals.total_display_balance += statement.display_balance;
            totals.total_credit_limit += statement.credit_limit;
            totals.total_available_credit += statement.display_available_credit;
            totals.next_cycle_interest += statement.interest;
            totals.projected_interest += summary.total_interest;
            totals.projected_ending_balance += summary.ending_balance;
            positions.push((statement.display_balance, statement.apr));
        }

        totals.aggregate_utilization = totals
            .total_display_balance
            .ratio_of(totals.total_credit_limit);
        totals.weighted_apr = weighted_apr(positions);
        totals
    }
}
