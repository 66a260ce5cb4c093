use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// balance-affecting events recorded against a loan by the owning record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoanEvent {
    Disbursement {
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    Payment {
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    FeeCharged {
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    InterestCharged {
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    /// manual correction; negative amounts reduce the balance
    Adjustment {
        amount: Money,
        reason: String,
        timestamp: DateTime<Utc>,
    },
}

impl LoanEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            LoanEvent::Disbursement { timestamp, .. }
            | LoanEvent::Payment { timestamp, .. }
            | LoanEvent::FeeCharged { timestamp, .. }
            | LoanEvent::InterestCharged { timestamp, .. }
            | LoanEvent::Adjustment { timestamp, .. } => *timestamp,
        }
    }

    pub fn amount(&self) -> Money {
        match self {
            LoanEvent::Disbursement { amount, .. }
            | LoanEvent::Payment { amount, .. }
            | LoanEvent::FeeCharged { amount, .. }
            | LoanEvent::InterestCharged { amount, .. }
            | LoanEvent::Adjustment { amount, .. } => *amount,
        }
    }
}

/// to-date totals derived from a loan's history
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryTotals {
    pub total_disbursed: Money,
    pub total_paid: Money,
    pub interest_charged: Money,
    pub fees_charged: Money,
    pub net_adjustments: Money,
    pub payment_count: u32,
    pub last_payment_at: Option<DateTime<Utc>>,
    pub last_payment_amount: Option<Money>,
}

/// ordered history of balance-affecting events for one loan
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanHistory {
    events: Vec<LoanEvent>,
}

impl LoanHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn from_events(events: Vec<LoanEvent>) -> Self {
        Self { events }
    }

    pub fn record(&mut self, event: LoanEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[LoanEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// totals over events stamped at or before `as_of`; later events are ignored
    pub fn totals_as_of(&self, as_of: DateTime<Utc>) -> HistoryTotals {
        let mut totals = HistoryTotals::default();

        for event in self.events.iter().filter(|e| e.timestamp() <= as_of) {
            match event {
                LoanEvent::Disbursement { amount, .. } => totals.total_disbursed += *amount,
                LoanEvent::Payment { amount, timestamp } => {
                    totals.total_paid += *amount;
                    totals.payment_count += 1;
                    // events may arrive out of order, keep the latest payment
                    if totals.last_payment_at.map_or(true, |last| *timestamp >= last) {
                        totals.last_payment_at = Some(*timestamp);
                        totals.last_payment_amount = Some(*amount);
                    }
                }
                LoanEvent::FeeCharged { amount, .. } => totals.fees_charged += *amount,
                LoanEvent::InterestCharged { amount, .. } => totals.interest_charged += *amount,
                LoanEvent::Adjustment { amount, .. } => totals.net_adjustments += *amount,
            }
        }

        totals
    }
}
