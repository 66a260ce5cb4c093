//! Raw records as supplied by the owning record store, and the single step that
//! turns them into validated instruments.
//!
//! Nothing here fails: missing, negative, or non-finite numbers become zero,
//! magnitudes above [`MAX_AMOUNT`] or [`MAX_PERCENT`] are clamped to them, and
//! out-of-range days fall back to [`RecordDefaults`]. Each substitution is
//! logged at `warn` level with the instrument id.

use log::warn;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CardInstrument, LoanInstrument, MAX_AMOUNT, MAX_PERCENT};
use crate::config::RecordDefaults;
use crate::decimal::{Money, Rate};
use crate::events::LoanHistory;
use crate::types::{InstrumentId, LoanCadence, MinimumPaymentPolicy};

/// minimum payment policy as stored, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawMinimumPayment {
    Fixed {
        #[serde(default)]
        amount: Option<f64>,
    },
    PercentPlusInterest {
        #[serde(default)]
        percent: Option<f64>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardRecord {
    pub id: InstrumentId,
    pub name: Option<String>,
    pub credit_limit: Option<f64>,
    pub current_used: Option<f64>,
    pub statement_balance: Option<f64>,
    pub pending_charges: Option<f64>,
    pub minimum_payment: Option<RawMinimumPayment>,
    pub extra_payment: Option<f64>,
    pub planned_monthly_spend: Option<f64>,
    /// annual rate in percent, e.g. 24.99
    pub apr: Option<f64>,
    pub statement_day: Option<i64>,
    pub due_day: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanRecord {
    pub id: InstrumentId,
    pub name: Option<String>,
    pub outstanding_principal: Option<f64>,
    /// annual rate in percent
    pub apr: Option<f64>,
    pub cadence: Option<LoanCadence>,
    pub due_day: Option<i64>,
    pub subscription_fee: Option<f64>,
    pub installment: Option<RawMinimumPayment>,
    pub extra_payment: Option<f64>,
    pub history: LoanHistory,
}

struct Normalizer<'a> {
    id: InstrumentId,
    defaults: &'a RecordDefaults,
}

impl Normalizer<'_> {
    fn amount(&self, field: &str, value: Option<f64>) -> Money {
        let Some(raw) = value else {
            return Money::ZERO;
        };
        match Money::from_f64(raw) {
            Some(amount) if amount.is_negative() => {
                self.replaced_with_zero(field, raw);
                Money::ZERO
            }
            Some(amount) if amount.as_decimal() <= MAX_AMOUNT => amount,
            // finite but above the ceiling, or too large for `Decimal` at all
            _ if raw.is_finite() && raw > 0.0 => {
                warn!("instrument {}: {} = {} clamped to {}", self.id, field, raw, MAX_AMOUNT);
                Money::from_decimal(MAX_AMOUNT)
            }
            _ => {
                self.replaced_with_zero(field, raw);
                Money::ZERO
            }
        }
    }

    fn percent(&self, field: &str, value: Option<f64>) -> Decimal {
        let Some(raw) = value else {
            return Decimal::ZERO;
        };
        if !raw.is_finite() || raw < 0.0 {
            self.replaced_with_zero(field, raw);
            return Decimal::ZERO;
        }
        match Decimal::from_f64(raw) {
            Some(p) if p <= MAX_PERCENT => p,
            _ => {
                warn!("instrument {}: {} = {} clamped to {}", self.id, field, raw, MAX_PERCENT);
                MAX_PERCENT
            }
        }
    }

    fn replaced_with_zero(&self, field: &str, raw: f64) {
        warn!("instrument {}: {} = {} replaced with 0", self.id, field, raw);
    }

    fn day(&self, field: &str, value: Option<i64>, fallback: u32) -> u32 {
        match value {
            Some(day) if (1..=31).contains(&day) => day as u32,
            Some(day) => {
                warn!("instrument {}: {} = {} out of range, using {}", self.id, field, day, fallback);
                fallback
            }
            None => fallback,
        }
    }

    fn policy(&self, field: &str, value: Option<&RawMinimumPayment>) -> MinimumPaymentPolicy {
        match value {
            Some(RawMinimumPayment::Fixed { amount }) => MinimumPaymentPolicy::Fixed {
                amount: self.amount(field, *amount),
            },
            Some(RawMinimumPayment::PercentPlusInterest { percent }) => {
                MinimumPaymentPolicy::PercentPlusInterest {
                    percent: self.percent(field, *percent),
                }
            }
            None => MinimumPaymentPolicy::default(),
        }
    }

    fn name(&self, value: Option<&String>) -> String {
        match value {
            Some(name) => name.trim().to_string(),
            None => {
                warn!("instrument {}: missing name", self.id);
                String::new()
            }
        }
    }
}

impl CardRecord {
    /// normalize into a validated card
    pub fn normalize(&self, defaults: &RecordDefaults) -> CardInstrument {
        let n = Normalizer { id: self.id, defaults };

        CardInstrument {
            id: self.id,
            name: n.name(self.name.as_ref()),
            credit_limit: n.amount("credit_limit", self.credit_limit),
            current_used: n.amount("current_used", self.current_used),
            statement_balance: n.amount("statement_balance", self.statement_balance),
            pending_charges: n.amount("pending_charges", self.pending_charges),
            minimum_payment: n.policy("minimum_payment", self.minimum_payment.as_ref()),
            extra_payment: n.amount("extra_payment", self.extra_payment),
            planned_monthly_spend: n.amount("planned_monthly_spend", self.planned_monthly_spend),
            apr: Rate::from_percentage(n.percent("apr", self.apr)),
            statement_day: n.day("statement_day", self.statement_day, n.defaults.statement_day),
            due_day: n.day("due_day", self.due_day, n.defaults.due_day),
        }
    }
}

impl LoanRecord {
    /// normalize into a validated loan
    pub fn normalize(&self, defaults: &RecordDefaults) -> LoanInstrument {
        let n = Normalizer { id: self.id, defaults };

        LoanInstrument {
            id: self.id,
            name: n.name(self.name.as_ref()),
            outstanding_principal: n.amount("outstanding_principal", self.outstanding_principal),
            apr: Rate::from_percentage(n.percent("apr", self.apr)),
            cadence: self.cadence.unwrap_or_default(),
            due_day: n.day("due_day", self.due_day, n.defaults.due_day),
            subscription_fee: self
                .subscription_fee
                .map(|fee| n.amount("subscription_fee", Some(fee))),
            installment: n.policy("installment", self.installment.as_ref()),
            extra_payment: n.amount("extra_payment", self.extra_payment),
            history: self.history.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn test_missing_fields_become_zero() {
        let record = CardRecord {
            id: Uuid::new_v4(),
            name: Some("Travel card".to_string()),
            ..Default::default()
        };
        let card = record.normalize(&RecordDefaults::default());

        assert_eq!(card.credit_limit, Money::ZERO);
        assert_eq!(card.current_used, Money::ZERO);
        assert_eq!(card.apr, Rate::ZERO);
        assert_eq!(card.minimum_payment, MinimumPaymentPolicy::Fixed { amount: Money::ZERO });
        assert_eq!(card.statement_day, 1);
        assert_eq!(card.due_day, 21);
    }

    #[test]
    fn test_negative_and_non_finite_become_zero() {
        let record = CardRecord {
            credit_limit: Some(f64::NAN),
            current_used: Some(-250.0),
            statement_balance: Some(f64::INFINITY),
            pending_charges: Some(12.5),
            apr: Some(f64::NEG_INFINITY),
            minimum_payment: Some(RawMinimumPayment::PercentPlusInterest { percent: Some(-2.0) }),
            ..Default::default()
        };
        let card = record.normalize(&RecordDefaults::default());

        assert_eq!(card.credit_limit, Money::ZERO);
        assert_eq!(card.current_used, Money::ZERO);
        assert_eq!(card.statement_balance, Money::ZERO);
        assert_eq!(card.pending_charges, Money::from_decimal(dec!(12.50)));
        assert_eq!(card.apr, Rate::ZERO);
        assert_eq!(
            card.minimum_payment,
            MinimumPaymentPolicy::PercentPlusInterest { percent: Decimal::ZERO }
        );
    }

    #[test]
    fn test_extreme_magnitudes_are_clamped() {
        let record = CardRecord {
            credit_limit: Some(1e20),
            statement_balance: Some(1e20),
            apr: Some(1e12),
            minimum_payment: Some(RawMinimumPayment::PercentPlusInterest { percent: Some(5e6) }),
            ..Default::default()
        };
        let card = record.normalize(&RecordDefaults::default());

        assert_eq!(card.credit_limit, Money::from_decimal(MAX_AMOUNT));
        assert_eq!(card.statement_balance, Money::from_decimal(MAX_AMOUNT));
        assert_eq!(card.apr, Rate::from_percentage(MAX_PERCENT));
        assert_eq!(
            card.minimum_payment,
            MinimumPaymentPolicy::PercentPlusInterest { percent: MAX_PERCENT }
        );

        let loan = LoanRecord {
            outstanding_principal: Some(1e40),
            installment: Some(RawMinimumPayment::Fixed { amount: Some(1e15) }),
            ..Default::default()
        }
        .normalize(&RecordDefaults::default());
        assert_eq!(loan.outstanding_principal, Money::from_decimal(MAX_AMOUNT));
        assert_eq!(
            loan.installment,
            MinimumPaymentPolicy::Fixed { amount: Money::from_decimal(MAX_AMOUNT) }
        );
    }

    #[test]
    fn test_out_of_range_days_fall_back() {
        let record = CardRecord {
            statement_day: Some(0),
            due_day: Some(45),
            ..Default::default()
        };
        let card = record.normalize(&RecordDefaults::default());
        assert_eq!(card.statement_day, 1);
        assert_eq!(card.due_day, 21);

        let custom = RecordDefaults { statement_day: 5, due_day: 28 };
        let card = record.normalize(&custom);
        assert_eq!(card.statement_day, 5);
        assert_eq!(card.due_day, 28);
    }

    #[test]
    fn test_apr_percent_converted_to_rate() {
        let record = CardRecord {
            apr: Some(24.0),
            due_day: Some(31),
            ..Default::default()
        };
        let card = record.normalize(&RecordDefaults::default());
        assert_eq!(card.apr.as_decimal(), dec!(0.24));
        assert_eq!(card.due_day, 31);
    }

    #[test]
    fn test_deserialize_card_record_from_json() {
        let json = r#"{
            "id": "6f1c1a59-5d6b-4a63-9d7c-2b8f3f0e9a11",
            "name": "Cashback",
            "credit_limit": 5000,
            "current_used": 1200.55,
            "minimum_payment": {"type": "fixed", "amount": 35},
            "apr": 19.99
        }"#;
        let record: CardRecord = serde_json::from_str(json).unwrap();
        let card = record.normalize(&RecordDefaults::default());

        assert_eq!(card.name, "Cashback");
        assert_eq!(card.current_used, Money::from_decimal(dec!(1200.55)));
        assert_eq!(card.minimum_payment, MinimumPaymentPolicy::Fixed { amount: Money::from_major(35) });
        assert_eq!(card.apr.as_decimal(), dec!(0.1999));
    }

    #[test]
    fn test_loan_record_normalizes() {
        let record = LoanRecord {
            name: Some("  Auto loan ".to_string()),
            outstanding_principal: Some(9_500.0),
            apr: Some(6.5),
            subscription_fee: Some(-3.0),
            installment: Some(RawMinimumPayment::Fixed { amount: Some(310.0) }),
            due_day: Some(-1),
            ..Default::default()
        };
        let loan = record.normalize(&RecordDefaults::default());

        assert_eq!(loan.name, "Auto loan");
        assert_eq!(loan.outstanding_principal, Money::from_major(9_500));
        assert_eq!(loan.apr.as_decimal(), dec!(0.065));
        assert_eq!(loan.subscription_fee, Some(Money::ZERO));
        assert_eq!(loan.installment, MinimumPaymentPolicy::Fixed { amount: Money::from_major(310) });
        assert_eq!(loan.due_day, 21);
        assert_eq!(loan.cadence, LoanCadence::Monthly);
    }
}
