use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a debt instrument, assigned by the owning record store
pub type InstrumentId = Uuid;

/// kind of debt instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentKind {
    /// revolving credit card
    Card,
    /// installment loan
    Loan,
}

/// how the minimum (or installment) payment is derived each cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MinimumPaymentPolicy {
    /// a flat amount each cycle
    Fixed { amount: Money },
    /// a percentage of the opening balance plus the interest accrued this cycle
    PercentPlusInterest { percent: Decimal },
}

impl MinimumPaymentPolicy {
    /// unclamped minimum for a cycle opening at `balance` and accruing `interest`
    pub fn minimum_raw(&self, balance: Money, interest: Money) -> Money {
        match *self {
            MinimumPaymentPolicy::Fixed { amount } => amount,
            MinimumPaymentPolicy::PercentPlusInterest { percent } => {
                balance.percentage(percent) + interest
            }
        }
    }

    /// minimum due, floored at zero and capped at what is owed
    pub fn minimum_due(&self, balance: Money, interest: Money, due_balance: Money) -> Money {
        due_balance.min(self.minimum_raw(balance, interest).non_negative())
    }
}

impl Default for MinimumPaymentPolicy {
    fn default() -> Self {
        MinimumPaymentPolicy::Fixed { amount: Money::ZERO }
    }
}

/// loan payment cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanCadence {
    Weekly,
    Biweekly,
    #[default]
    Monthly,
}

impl LoanCadence {
    /// payments per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            LoanCadence::Weekly => 52,
            LoanCadence::Biweekly => 26,
            LoanCadence::Monthly => 12,
        }
    }

    /// convert a per-period amount to its monthly equivalent
    pub fn monthly_equivalent(&self, per_period: Money) -> Money {
        match self {
            LoanCadence::Monthly => per_period,
            _ => Money::from_decimal(
                per_period.as_decimal() * Decimal::from(self.periods_per_year()) / Decimal::from(12),
            ),
        }
    }
}

/// alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Watch,
    Warning,
    Critical,
}

impl Severity {
    /// sort rank, higher is more severe
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Watch => 1,
            Severity::Warning => 2,
            Severity::Critical => 3,
        }
    }
}

/// payoff strategy for ranking instruments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffStrategy {
    /// highest apr first
    Avalanche,
    /// smallest balance first
    Snowball,
}
