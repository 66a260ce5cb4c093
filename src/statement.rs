use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::cycle::DueCycle;
use crate::decimal::{Money, Rate};
use crate::instruments::CardInstrument;
use crate::projection::SimulationParams;
use crate::types::InstrumentId;

/// a card is over limit once its display balance exceeds the limit by more than this
pub const OVER_LIMIT_EPSILON: Decimal = dec!(0.000001);

/// a planned payment short of the cycle's interest by more than this is flagged
pub const BELOW_INTEREST_MARGIN: Decimal = dec!(0.01);

/// one billing cycle of a card, resolved against "today"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardStatement {
    pub instrument_id: InstrumentId,
    pub name: String,
    pub apr: Rate,
    pub monthly_rate: Rate,
    pub credit_limit: Money,
    pub statement_balance: Money,
    pub interest: Money,
    pub new_statement_balance: Money,
    pub minimum_due: Money,
    pub planned_payment: Money,
    /// balance assuming this cycle's planned payment has posted
    pub due_adjusted_balance: Money,
    pub due_cycle: DueCycle,
    pub display_balance: Money,
    /// negative when over limit
    pub display_available_credit: Money,
    pub display_utilization: Rate,
    pub over_limit: bool,
    pub payment_below_interest: bool,
}

impl CardStatement {
    /// resolve the current cycle of `card` as of `today`
    pub fn project(card: &CardInstrument, today: NaiveDate) -> Self {
        let monthly_rate = card.monthly_rate();

        let interest = card.statement_balance.interest_at(monthly_rate);
        let new_statement_balance = card.statement_balance + interest;

        let minimum_due = card
            .minimum_payment
            .minimum_due(card.statement_balance, interest, new_statement_balance);
        let planned_payment = new_statement_balance.min(minimum_due + card.extra_payment);

        let due_adjusted_balance =
            (new_statement_balance - planned_payment).non_negative() + card.pending_charges;

        // before the due date the cardholder still owes the pre-payment amount
        let due_cycle = DueCycle::resolve(card.due_day, today);
        let display_balance = if due_cycle.due_applied {
            due_adjusted_balance
        } else {
            card.current_used
        };

        let display_available_credit = card.credit_limit - display_balance;
        let display_utilization = display_balance.ratio_of(card.credit_limit);

        let over_limit =
            display_balance.as_decimal() > card.credit_limit.as_decimal() + OVER_LIMIT_EPSILON;
        let payment_below_interest =
            planned_payment.as_decimal() + BELOW_INTEREST_MARGIN < interest.as_decimal();

        Self {
            instrument_id: card.id,
            name: card.name.clone(),
            apr: card.apr,
            monthly_rate,
            credit_limit: card.credit_limit,
            statement_balance: card.statement_balance,
            interest,
            new_statement_balance,
            minimum_due,
            planned_payment,
            due_adjusted_balance,
            due_cycle,
            display_balance,
            display_available_credit,
            display_utilization,
            over_limit,
            payment_below_interest,
        }
    }

    /// parameters for projecting this card forward from its due-adjusted balance
    pub fn simulation_params(&self, card: &CardInstrument) -> SimulationParams {
        SimulationParams {
            start_balance: self.due_adjusted_balance,
            credit_limit: card.credit_limit,
            monthly_rate: self.monthly_rate,
            minimum_payment: card.minimum_payment,
            extra_payment: card.extra_payment,
            planned_spend: card.planned_monthly_spend,
        }
    }

    /// display balance times the monthly rate
    pub fn monthly_interest(&self) -> Money {
        self.display_balance.interest_at(self.monthly_rate)
    }
}
