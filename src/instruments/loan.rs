use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ensure_day, ensure_non_negative, ensure_policy, ensure_rate};
use crate::decimal::{Money, Rate};
use crate::errors::{EngineError, Result};
use crate::events::{LoanEvent, LoanHistory};
use crate::types::{InstrumentId, LoanCadence, MinimumPaymentPolicy};

/// validated snapshot of an installment loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanInstrument {
    pub id: InstrumentId,
    pub name: String,
    pub outstanding_principal: Money,
    pub apr: Rate,
    pub cadence: LoanCadence,
    pub due_day: u32,
    /// flat charge billed every month regardless of balance
    pub subscription_fee: Option<Money>,
    /// scheduled installment, per cadence period
    pub installment: MinimumPaymentPolicy,
    /// extra paid on top of the installment, per cadence period
    pub extra_payment: Money,
    #[serde(default)]
    pub history: LoanHistory,
}

impl LoanInstrument {
    /// builder for creating loans
    pub fn builder() -> LoanInstrumentBuilder {
        LoanInstrumentBuilder::new()
    }

    pub fn monthly_rate(&self) -> Rate {
        self.apr.monthly_rate()
    }

    /// installment policy expressed per month
    pub fn monthly_installment(&self) -> MinimumPaymentPolicy {
        match self.installment {
            MinimumPaymentPolicy::Fixed { amount } => MinimumPaymentPolicy::Fixed {
                amount: self.cadence.monthly_equivalent(amount),
            },
            // percent-of-balance policies already describe a monthly cycle
            policy @ MinimumPaymentPolicy::PercentPlusInterest { .. } => policy,
        }
    }

    pub fn monthly_extra_payment(&self) -> Money {
        self.cadence.monthly_equivalent(self.extra_payment)
    }

    pub fn subscription_fee(&self) -> Money {
        self.subscription_fee.unwrap_or(Money::ZERO)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoanInstrumentBuilder {
    id: Option<InstrumentId>,
    name: Option<String>,
    outstanding_principal: Option<Money>,
    apr: Option<Rate>,
    cadence: Option<LoanCadence>,
    due_day: Option<u32>,
    subscription_fee: Option<Money>,
    installment: Option<MinimumPaymentPolicy>,
    extra_payment: Option<Money>,
    history: LoanHistory,
}

impl LoanInstrumentBuilder {
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

    pub fn outstanding_principal(mut self, principal: Money) -> Self {
        self.outstanding_principal = Some(principal);
        self
    }

    pub fn apr(mut self, apr: Rate) -> Self {
        self.apr = Some(apr);
        self
    }

    pub fn cadence(mut self, cadence: LoanCadence) -> Self {
        self.cadence = Some(cadence);
        self
    }

    pub fn due_day(mut self, day: u32) -> Self {
        self.due_day = Some(day);
        self
    }

    pub fn subscription_fee(mut self, fee: Money) -> Self {
        self.subscription_fee = Some(fee);
        self
    }

    pub fn installment(mut self, policy: MinimumPaymentPolicy) -> Self {
        self.installment = Some(policy);
        self
    }

    pub fn extra_payment(mut self, extra: Money) -> Self {
        self.extra_payment = Some(extra);
        self
    }

    pub fn event(mut self, event: LoanEvent) -> Self {
        self.history.record(event);
        self
    }

    pub fn build(self) -> Result<LoanInstrument> {
        let name = self.name.ok_or(EngineError::MissingField { field: "name" })?;
        let subscription_fee = match self.subscription_fee {
            Some(fee) => Some(ensure_non_negative("subscription_fee", fee)?),
            None => None,
        };

        Ok(LoanInstrument {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name,
            outstanding_principal: ensure_non_negative(
                "outstanding_principal",
                self.outstanding_principal.unwrap_or(Money::ZERO),
            )?,
            apr: ensure_rate(self.apr.unwrap_or(Rate::ZERO))?,
            cadence: self.cadence.unwrap_or_default(),
            due_day: ensure_day("due_day", self.due_day.unwrap_or(21))?,
            subscription_fee,
            installment: ensure_policy(self.installment.unwrap_or_default())?,
            extra_payment: ensure_non_negative("extra_payment", self.extra_payment.unwrap_or(Money::ZERO))?,
            history: self.history,
        })
    }
}
