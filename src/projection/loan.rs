use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use super::simulator::{AmortizationSimulator, SimulationParams};
use super::weighted_apr;
use crate::config::{ProjectionConfig, STANDARD_HORIZON_MONTHS};
use crate::cycle::DueCycle;
use crate::decimal::{Money, Rate};
use crate::events::HistoryTotals;
use crate::instruments::LoanInstrument;
use crate::types::{InstrumentId, LoanCadence};

/// one projected loan month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRow {
    pub month_index: u32,
    pub due_date: NaiveDate,
    pub opening_outstanding: Money,
    pub interest_accrued: Money,
    pub principal_paid: Money,
    pub planned_loan_payment: Money,
    pub subscription_due: Money,
    /// loan payment plus subscription
    pub total_payment: Money,
    pub ending_outstanding: Money,
}

/// outstanding balance at a fixed checkpoint month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonSnapshot {
    pub month: u32,
    pub ending_outstanding: Money,
}

/// when the loan is projected to reach zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayoffDate {
    /// nothing outstanding today
    AlreadyPaid,
    On { month_index: u32, date: NaiveDate },
    BeyondModeledWindow { months_modeled: u32 },
}

impl PayoffDate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            PayoffDate::On { date, .. } => Some(*date),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanProjection {
    pub instrument_id: InstrumentId,
    pub name: String,
    pub apr: Rate,
    pub cadence: LoanCadence,
    pub due_cycle: DueCycle,
    pub current_principal: Money,
    /// interest accruing over the coming month
    pub current_interest: Money,
    pub subscription_fee: Money,
    pub rows: Vec<LoanRow>,
    pub horizons: Vec<HorizonSnapshot>,
    pub projected_payoff: PayoffDate,
    pub to_date: HistoryTotals,
}

impl LoanProjection {
    /// sum of interest over the first `months` rows
    pub fn interest_over(&self, months: usize) -> Money {
        self.rows.iter().take(months).map(|r| r.interest_accrued).sum()
    }

    /// sum of total payments over the first `months` rows
    pub fn payments_over(&self, months: usize) -> Money {
        self.rows.iter().take(months).map(|r| r.total_payment).sum()
    }

    pub fn horizon(&self, month: u32) -> Option<Money> {
        self.horizons
            .iter()
            .find(|h| h.month == month)
            .map(|h| h.ending_outstanding)
    }
}

/// portfolio-level loan aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanPortfolioReport {
    pub loans: Vec<LoanProjection>,
    pub total_outstanding: Money,
    pub weighted_apr: Rate,
    pub projected_next_month_interest: Money,
    pub projected_annual_interest: Money,
    pub projected_annual_payments: Money,
}

/// projects installment loans through the shared balance recurrence
pub struct LoanProjector {
    months: u32,
    checkpoints: Vec<u32>,
}

impl LoanProjector {
    pub fn new(config: &ProjectionConfig) -> Self {
        Self {
            months: config.loan_months,
            checkpoints: config.loan_checkpoints.clone(),
        }
    }

    pub fn simulation_params(loan: &LoanInstrument) -> SimulationParams {
        SimulationParams {
            start_balance: loan.outstanding_principal,
            credit_limit: Money::ZERO,
            monthly_rate: loan.monthly_rate(),
            minimum_payment: loan.monthly_installment(),
            extra_payment: loan.monthly_extra_payment(),
            planned_spend: Money::ZERO,
        }
    }

    /// project one loan as of `now`
    pub fn project(&self, loan: &LoanInstrument, now: DateTime<Utc>) -> LoanProjection {
        let due_cycle = DueCycle::resolve(loan.due_day, now.date_naive());
        let subscription = loan.subscription_fee();

        let simulator = AmortizationSimulator::new(Self::simulation_params(loan));
        let rows: Vec<LoanRow> = simulator
            .run(self.months)
            .into_iter()
            .map(|row| LoanRow {
                month_index: row.month_index,
                due_date: due_cycle.due_date_after(row.month_index - 1),
                opening_outstanding: row.start_balance,
                interest_accrued: row.interest,
                principal_paid: (row.planned_payment - row.interest).non_negative(),
                planned_loan_payment: row.planned_payment,
                subscription_due: subscription,
                total_payment: row.planned_payment + subscription,
                ending_outstanding: row.ending_balance,
            })
            .collect();

        let horizons = self
            .checkpoints
            .iter()
            .filter_map(|&month| {
                let index = month.checked_sub(1)? as usize;
                rows.get(index).map(|row| HorizonSnapshot {
                    month,
                    ending_outstanding: row.ending_outstanding,
                })
            })
            .collect();

        let projected_payoff = if loan.outstanding_principal.is_zero() {
            PayoffDate::AlreadyPaid
        } else {
            rows.iter()
                .find(|r| r.ending_outstanding.is_zero())
                .map(|r| PayoffDate::On {
                    month_index: r.month_index,
                    date: r.due_date,
                })
                .unwrap_or(PayoffDate::BeyondModeledWindow {
                    months_modeled: self.months,
                })
        };

        debug!(
            "loan {}: {} rows, payoff {:?}",
            loan.id,
            rows.len(),
            projected_payoff
        );

        LoanProjection {
            instrument_id: loan.id,
            name: loan.name.clone(),
            apr: loan.apr,
            cadence: loan.cadence,
            due_cycle,
            current_principal: loan.outstanding_principal,
            current_interest: loan.outstanding_principal.interest_at(loan.monthly_rate()),
            subscription_fee: subscription,
            rows,
            horizons,
            projected_payoff,
            to_date: loan.history.totals_as_of(now),
        }
    }

    /// project every loan and aggregate
    pub fn project_portfolio(&self, loans: &[LoanInstrument], now: DateTime<Utc>) -> LoanPortfolioReport {
        let projections: Vec<LoanProjection> = loans.iter().map(|l| self.project(l, now)).collect();
        let annual = STANDARD_HORIZON_MONTHS as usize;

        LoanPortfolioReport {
            total_outstanding: projections.iter().map(|p| p.current_principal).sum(),
            weighted_apr: weighted_apr(projections.iter().map(|p| (p.current_principal, p.apr))),
            projected_next_month_interest: projections.iter().map(|p| p.interest_over(1)).sum(),
            projected_annual_interest: projections.iter().map(|p| p.interest_over(annual)).sum(),
            projected_annual_payments: projections.iter().map(|p| p.payments_over(annual)).sum(),
            loans: projections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LoanEvent;
    use crate::types::MinimumPaymentPolicy;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap()
    }

    fn projector() -> LoanProjector {
        LoanProjector::new(&ProjectionConfig::default())
    }

    fn loan(principal: i64, apr: rust_decimal::Decimal, installment: i64) -> LoanInstrument {
        LoanInstrument::builder()
            .name("Personal loan")
            .outstanding_principal(Money::from_major(principal))
            .apr(Rate::from_percentage(apr))
            .installment(MinimumPaymentPolicy::Fixed { amount: Money::from_major(installment) })
            .due_day(15)
            .build()
            .unwrap()
    }

    #[test]
    fn test_rows_split_principal_and_interest() {
        let projection = projector().project(&loan(12_000, dec!(12), 500), now());

        assert_eq!(projection.rows.len(), 36);
        let first = &projection.rows[0];
        assert_eq!(first.opening_outstanding, Money::from_major(12_000));
        assert_eq!(first.interest_accrued, Money::from_major(120));
        assert_eq!(first.principal_paid, Money::from_major(380));
        assert_eq!(first.planned_loan_payment, Money::from_major(500));
        assert_eq!(first.ending_outstanding, Money::from_major(11_620));
        assert_eq!(projection.current_principal, Money::from_major(12_000));
        assert_eq!(projection.current_interest, Money::from_major(120));
    }

    #[test]
    fn test_due_dates_follow_cycle() {
        let projection = projector().project(&loan(1_000, dec!(10), 100), now());
        assert_eq!(projection.rows[0].due_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(projection.rows[1].due_date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(projection.rows[12].due_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn test_subscription_added_to_total_payment() {
        let subscribed = LoanInstrument::builder()
            .name("Financing plan")
            .outstanding_principal(Money::from_major(2_400))
            .installment(MinimumPaymentPolicy::Fixed { amount: Money::from_major(200) })
            .subscription_fee(Money::from_decimal(dec!(9.99)))
            .build()
            .unwrap();
        let projection = projector().project(&subscribed, now());

        let first = &projection.rows[0];
        assert_eq!(first.subscription_due, Money::from_decimal(dec!(9.99)));
        assert_eq!(first.total_payment, Money::from_decimal(dec!(209.99)));
        // subscription does not touch the balance
        assert_eq!(first.ending_outstanding, Money::from_major(2_200));
    }

    #[test]
    fn test_payoff_within_window() {
        let projection = projector().project(&loan(1_000, dec!(0), 100), now());
        assert_eq!(
            projection.projected_payoff,
            PayoffDate::On {
                month_index: 10,
                date: NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
            }
        );
        assert_eq!(projection.horizon(12), Some(Money::ZERO));
    }

    #[test]
    fn test_payoff_beyond_window() {
        let projection = projector().project(&loan(50_000, dec!(7), 400), now());
        assert_eq!(
            projection.projected_payoff,
            PayoffDate::BeyondModeledWindow { months_modeled: 36 }
        );
        assert_eq!(projection.projected_payoff.date(), None);
        assert_eq!(projection.horizons.len(), 3);
        assert!(projection.horizon(12).unwrap() > projection.horizon(24).unwrap());
        assert!(projection.horizon(24).unwrap() > projection.horizon(36).unwrap());
    }

    #[test]
    fn test_zero_balance_is_already_paid() {
        let projection = projector().project(&loan(0, dec!(5), 100), now());
        assert_eq!(projection.projected_payoff, PayoffDate::AlreadyPaid);
    }

    #[test]
    fn test_shorter_window_drops_checkpoints() {
        let config = ProjectionConfig {
            loan_months: 12,
            loan_checkpoints: vec![12],
            ..ProjectionConfig::default()
        };
        let projection = LoanProjector::new(&config).project(&loan(5_000, dec!(8), 150), now());
        assert_eq!(projection.rows.len(), 12);
        assert_eq!(projection.horizons.len(), 1);
        assert_eq!(projection.projected_payoff, PayoffDate::BeyondModeledWindow { months_modeled: 12 });
    }

    #[test]
    fn test_history_totals_as_of_now() {
        let with_history = LoanInstrument::builder()
            .name("Loan")
            .outstanding_principal(Money::from_major(800))
            .event(LoanEvent::Payment {
                amount: Money::from_major(200),
                timestamp: Utc.with_ymd_and_hms(2023, 12, 15, 0, 0, 0).unwrap(),
            })
            .event(LoanEvent::Payment {
                amount: Money::from_major(200),
                timestamp: Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap(),
            })
            .build()
            .unwrap();
        let projection = projector().project(&with_history, now());
        assert_eq!(projection.to_date.total_paid, Money::from_major(200));
    }

    #[test]
    fn test_portfolio_aggregation() {
        let loans = vec![loan(12_000, dec!(12), 500), loan(6_000, dec!(6), 300)];
        let report = projector().project_portfolio(&loans, now());

        assert_eq!(report.total_outstanding, Money::from_major(18_000));
        // 120 + 30
        assert_eq!(report.projected_next_month_interest, Money::from_major(150));
        // (12000 * 0.12 + 6000 * 0.06) / 18000
        assert_eq!(report.weighted_apr.as_decimal(), dec!(0.1));
        assert_eq!(report.projected_annual_payments, Money::from_major(9_600));
        assert_eq!(
            report.projected_annual_interest,
            report.loans[0].interest_over(12) + report.loans[1].interest_over(12)
        );
    }

    #[test]
    fn test_empty_portfolio() {
        let report = projector().project_portfolio(&[], now());
        assert_eq!(report.total_outstanding, Money::ZERO);
        assert_eq!(report.weighted_apr, Rate::ZERO);
        assert!(report.loans.is_empty());
    }
}
