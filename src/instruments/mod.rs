pub mod card;
pub mod loan;
pub mod records;

pub use card::{CardInstrument, CardInstrumentBuilder};
pub use loan::{LoanInstrument, LoanInstrumentBuilder};
pub use records::{CardRecord, LoanRecord, RawMinimumPayment};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::types::MinimumPaymentPolicy;

/// largest amount an instrument may carry, so 36 months of growth stays inside `Decimal` range
pub const MAX_AMOUNT: Decimal = dec!(1000000000000);

/// largest apr or minimum-payment percent, in percent
pub const MAX_PERCENT: Decimal = dec!(1000);

fn ensure_non_negative(field: &'static str, amount: Money) -> Result<Money> {
    if amount.is_negative() {
        return Err(EngineError::NegativeAmount { field, amount });
    }
    if amount.as_decimal() > MAX_AMOUNT {
        return Err(EngineError::AmountOutOfRange { field, amount });
    }
    Ok(amount)
}

fn ensure_rate(rate: Rate) -> Result<Rate> {
    if rate < Rate::ZERO || rate.as_decimal() * Decimal::ONE_HUNDRED > MAX_PERCENT {
        return Err(EngineError::InvalidInterestRate { rate });
    }
    Ok(rate)
}

fn ensure_day(field: &'static str, day: u32) -> Result<u32> {
    if !(1..=31).contains(&day) {
        return Err(EngineError::InvalidDayOfMonth { field, day });
    }
    Ok(day)
}

fn ensure_policy(policy: MinimumPaymentPolicy) -> Result<MinimumPaymentPolicy> {
    match policy {
        MinimumPaymentPolicy::Fixed { amount } if amount.is_negative() => {
            Err(EngineError::InvalidMinimumPolicy {
                message: format!("fixed amount {} is negative", amount),
            })
        }
        MinimumPaymentPolicy::PercentPlusInterest { percent } if percent < Decimal::ZERO => {
            Err(EngineError::InvalidMinimumPolicy {
                message: format!("percent {} is negative", percent),
            })
        }
        MinimumPaymentPolicy::Fixed { amount } if amount.as_decimal() > MAX_AMOUNT => {
            Err(EngineError::InvalidMinimumPolicy {
                message: format!("fixed amount {} exceeds {}", amount, MAX_AMOUNT),
            })
        }
        MinimumPaymentPolicy::PercentPlusInterest { percent } if percent > MAX_PERCENT => {
            Err(EngineError::InvalidMinimumPolicy {
                message: format!("percent {} exceeds {}", percent, MAX_PERCENT),
            })
        }
        _ => Ok(policy),
    }
}
