use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};

/// standard reporting horizon for card projections
pub const STANDARD_HORIZON_MONTHS: u32 = 12;

/// longest loan projection the engine models
pub const LOAN_HORIZON_CAP_MONTHS: u32 = 36;

/// longest card projection or savings window the engine models
pub const CARD_HORIZON_CAP_MONTHS: u32 = 36;

/// engine configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub projection: ProjectionConfig,
    pub defaults: RecordDefaults,
    pub payoff: PayoffConfig,
}

/// projection horizons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// months projected for each card
    pub card_months: u32,
    /// months projected for each loan, also the payoff-date search window
    pub loan_months: u32,
    /// months at which loan outstanding balances are snapshotted
    pub loan_checkpoints: Vec<u32>,
}

/// fallbacks used when normalizing out-of-range record fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordDefaults {
    pub statement_day: u32,
    pub due_day: u32,
}

/// payoff recommendation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffConfig {
    /// hypothetical extra monthly payment used to estimate annual interest savings
    pub savings_extra_payment: Money,
    /// months the savings estimate covers
    pub savings_months: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            card_months: STANDARD_HORIZON_MONTHS,
            loan_months: LOAN_HORIZON_CAP_MONTHS,
            loan_checkpoints: vec![12, 24, 36],
        }
    }
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            statement_day: 1,
            due_day: 21,
        }
    }
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            savings_extra_payment: Money::from_major(100),
            savings_months: STANDARD_HORIZON_MONTHS,
        }
    }
}

impl EngineConfig {
    /// parse configuration from json; missing sections take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// render configuration as pretty json
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// check that every setting is in range
    pub fn validate(&self) -> Result<()> {
        let projection = &self.projection;

        if projection.loan_months > LOAN_HORIZON_CAP_MONTHS {
            return Err(EngineError::InvalidConfiguration {
                message: format!(
                    "loan_months {} exceeds the {}-month cap",
                    projection.loan_months, LOAN_HORIZON_CAP_MONTHS
                ),
            });
        }

        for (field, months) in [
            ("card_months", projection.card_months),
            ("savings_months", self.payoff.savings_months),
        ] {
            if months > CARD_HORIZON_CAP_MONTHS {
                return Err(EngineError::InvalidConfiguration {
                    message: format!(
                        "{} {} exceeds the {}-month cap",
                        field, months, CARD_HORIZON_CAP_MONTHS
                    ),
                });
            }
        }

        if let Some(checkpoint) = projection
            .loan_checkpoints
            .iter()
            .find(|&&m| m == 0 || m > projection.loan_months)
        {
            return Err(EngineError::InvalidConfiguration {
                message: format!(
                    "loan checkpoint {} outside 1..={}",
                    checkpoint, projection.loan_months
                ),
            });
        }

        if projection.loan_checkpoints.windows(2).any(|w| w[0] >= w[1]) {
            return Err(EngineError::InvalidConfiguration {
                message: "loan checkpoints must be strictly increasing".to_string(),
            });
        }

        for (field, day) in [
            ("statement_day", self.defaults.statement_day),
            ("due_day", self.defaults.due_day),
        ] {
            if !(1..=31).contains(&day) {
                return Err(EngineError::InvalidDayOfMonth { field, day });
            }
        }

        if self.payoff.savings_extra_payment.is_negative() {
            return Err(EngineError::NegativeAmount {
                field: "savings_extra_payment",
                amount: self.payoff.savings_extra_payment,
            });
        }

        Ok(())
    }
}
