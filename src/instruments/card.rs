use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ensure_day, ensure_non_negative, ensure_policy, ensure_rate};
use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::types::{InstrumentId, MinimumPaymentPolicy};

/// validated snapshot of a revolving card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardInstrument {
    pub id: InstrumentId,
    pub name: String,
    pub credit_limit: Money,
    pub current_used: Money,
    pub statement_balance: Money,
    pub pending_charges: Money,
    pub minimum_payment: MinimumPaymentPolicy,
    pub extra_payment: Money,
    pub planned_monthly_spend: Money,
    pub apr: Rate,
    pub statement_day: u32,
    pub due_day: u32,
}

impl CardInstrument {
    /// builder for creating cards
    pub fn builder() -> CardInstrumentBuilder {
        CardInstrumentBuilder::new()
    }

    pub fn monthly_rate(&self) -> Rate {
        self.apr.monthly_rate()
    }
}

/// builder that rejects invalid fields instead of defaulting them
#[derive(Debug, Clone, Default)]
pub struct CardInstrumentBuilder {
    id: Option<InstrumentId>,
    name: Option<String>,
    credit_limit: Option<Money>,
    current_used: Option<Money>,
    statement_balance: Option<Money>,
    pending_charges: Option<Money>,
    minimum_payment: Option<MinimumPaymentPolicy>,
    extra_payment: Option<Money>,
    planned_monthly_spend: Option<Money>,
    apr: Option<Rate>,
    statement_day: Option<u32>,
    due_day: Option<u32>,
}

impl CardInstrumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: InstrumentId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn credit_limit(mut self, limit: Money) -> Self {
        self.credit_limit = Some(limit);
        self
    }

    pub fn current_used(mut self, used: Money) -> Self {
        self.current_used = Some(used);
        self
    }

    pub fn statement_balance(mut self, balance: Money) -> Self {
        self.statement_balance = Some(balance);
        self
    }

    pub fn pending_charges(mut self, pending: Money) -> Self {
        self.pending_charges = Some(pending);
        self
    }

    pub fn minimum_payment(mut self, policy: MinimumPaymentPolicy) -> Self {
        self.minimum_payment = Some(policy);
        self
    }

    pub fn extra_payment(mut self, extra: Money) -> Self {
        self.extra_payment = Some(extra);
        self
    }

    pub fn planned_monthly_spend(mut self, spend: Money) -> Self {
        self.planned_monthly_spend = Some(spend);
        self
    }

    pub fn apr(mut self, apr: Rate) -> Self {
        self.apr = Some(apr);
        self
    }

    pub fn statement_day(mut self, day: u32) -> Self {
        self.statement_day = Some(day);
        self
    }

    pub fn due_day(mut self, day: u32) -> Self {
        self.due_day = Some(day);
        self
    }

    pub fn build(self) -> Result<CardInstrument> {
        let name = self.name.ok_or(EngineError::MissingField { field: "name" })?;

        Ok(CardInstrument {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name,
            credit_limit: ensure_non_negative("credit_limit", self.credit_limit.unwrap_or(Money::ZERO))?,
            current_used: ensure_non_negative("current_used", self.current_used.unwrap_or(Money::ZERO))?,
            statement_balance: ensure_non_negative(
                "statement_balance",
                self.statement_balance.unwrap_or(Money::ZERO),
            )?,
            pending_charges: ensure_non_negative(
                "pending_charges",
                self.pending_charges.unwrap_or(Money::ZERO),
            )?,
            minimum_payment: ensure_policy(self.minimum_payment.unwrap_or_default())?,
            extra_payment: ensure_non_negative("extra_payment", self.extra_payment.unwrap_or(Money::ZERO))?,
            planned_monthly_spend: ensure_non_negative(
                "planned_monthly_spend",
                self.planned_monthly_spend.unwrap_or(Money::ZERO),
            )?,
            apr: ensure_rate(self.apr.unwrap_or(Rate::ZERO))?,
            statement_day: ensure_day("statement_day", self.statement_day.unwrap_or(1))?,
            due_day: ensure_day("due_day", self.due_day.unwrap_or(21))?,
        })
    }
}
