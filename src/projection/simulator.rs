use serde::{Deserialize, Serialize};

use super::{ProjectionRow, ProjectionSummary};
use crate::decimal::{Money, Rate};
use crate::types::MinimumPaymentPolicy;

/// inputs to the monthly balance recurrence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub start_balance: Money,
    /// zero when the instrument has no limit; utilization is then reported as zero
    pub credit_limit: Money,
    pub monthly_rate: Rate,
    pub minimum_payment: MinimumPaymentPolicy,
    pub extra_payment: Money,
    pub planned_spend: Money,
}

/// forward projection of a balance under a fixed payment plan
///
/// Every figure is rounded to the cent as it is produced, so month `m` opens
/// at exactly the rounded ending balance reported for month `m - 1`.
#[derive(Debug, Clone)]
pub struct AmortizationSimulator {
    params: SimulationParams,
}

impl AmortizationSimulator {
    pub fn new(params: SimulationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// project `months` rows; zero months yields no rows
    pub fn run(&self, months: u32) -> Vec<ProjectionRow> {
        let mut rows = Vec::with_capacity(months as usize);
        let mut balance = self.params.start_balance.non_negative();

        for month_index in 1..=months {
            let row = self.step(month_index, balance);
            balance = row.ending_balance;
            rows.push(row);
        }

        rows
    }

    /// one month of the recurrence opening at `balance`
    pub fn step(&self, month_index: u32, balance: Money) -> ProjectionRow {
        let p = &self.params;

        let interest = balance.interest_at(p.monthly_rate);
        let due_balance = balance + interest;
        let minimum_due = p.minimum_payment.minimum_due(balance, interest, due_balance);
        let planned_payment = due_balance.min(minimum_due + p.extra_payment);
        let ending_balance = (due_balance - planned_payment).non_negative() + p.planned_spend;

        ProjectionRow {
            month_index,
            start_balance: balance,
            interest,
            due_balance,
            minimum_due,
            planned_payment,
            planned_spend: p.planned_spend,
            ending_balance,
            ending_utilization: ending_balance.ratio_of(p.credit_limit).clamp_unit(),
        }
    }

    /// interest avoided over `months` by adding `extra` to every payment
    pub fn interest_savings(&self, extra: Money, months: u32) -> Money {
        let baseline = ProjectionSummary::from_rows(&self.run(months)).total_interest;

        let boosted = AmortizationSimulator::new(SimulationParams {
            extra_payment: self.params.extra_payment + extra,
            ..self.params
        });
        let reduced = ProjectionSummary::from_rows(&boosted.run(months)).total_interest;

        (baseline - reduced).non_negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn params(start: i64, apr: rust_decimal::Decimal, policy: MinimumPaymentPolicy) -> SimulationParams {
        SimulationParams {
            start_balance: Money::from_major(start),
            credit_limit: Money::from_major(5_000),
            monthly_rate: Rate::from_percentage(apr).monthly_rate(),
            minimum_payment: policy,
            extra_payment: Money::ZERO,
            planned_spend: Money::ZERO,
        }
    }

    fn fixed(amount: i64) -> MinimumPaymentPolicy {
        MinimumPaymentPolicy::Fixed { amount: Money::from_major(amount) }
    }

    #[test]
    fn test_single_month_fixed_minimum() {
        let rows = AmortizationSimulator::new(params(1_200, dec!(24), fixed(25))).run(1);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.month_index, 1);
        assert_eq!(row.start_balance, Money::from_major(1_200));
        assert_eq!(row.interest, Money::from_decimal(dec!(24.00)));
        assert_eq!(row.due_balance, Money::from_decimal(dec!(1224.00)));
        assert_eq!(row.minimum_due, Money::from_decimal(dec!(25.00)));
        assert_eq!(row.planned_payment, Money::from_decimal(dec!(25.00)));
        assert_eq!(row.ending_balance, Money::from_decimal(dec!(1199.00)));
        assert_eq!(row.ending_utilization.as_decimal(), dec!(0.2398));
    }

    #[test]
    fn test_rows_chain_on_rounded_balance() {
        let rows = AmortizationSimulator::new(params(1_000, dec!(19.99), fixed(40))).run(12);

        assert_eq!(rows.len(), 12);
        for pair in rows.windows(2) {
            assert_eq!(pair[1].start_balance, pair[0].ending_balance);
        }
        // 1000 * 0.1999 / 12 = 16.658.. rounds to 16.66
        assert_eq!(rows[0].interest, Money::from_decimal(dec!(16.66)));
        assert_eq!(rows[0].ending_balance, Money::from_decimal(dec!(976.66)));
        // 976.66 * 0.1999 / 12 = 16.2694.. rounds to 16.27
        assert_eq!(rows[1].interest, Money::from_decimal(dec!(16.27)));
        assert_eq!(rows[1].ending_balance, Money::from_decimal(dec!(952.93)));
    }

    #[test]
    fn test_zero_months_is_empty() {
        let rows = AmortizationSimulator::new(params(1_000, dec!(20), fixed(50))).run(0);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_zero_apr_has_no_interest() {
        let rows = AmortizationSimulator::new(params(900, dec!(0), fixed(100))).run(12);
        assert!(rows.iter().all(|r| r.interest.is_zero()));
        assert_eq!(rows[8].ending_balance, Money::ZERO);
        assert_eq!(ProjectionSummary::from_rows(&rows).payoff_month, Some(9));
    }

    #[test]
    fn test_invariants_hold_every_month() {
        let mut p = params(3_000, dec!(27.5), MinimumPaymentPolicy::PercentPlusInterest { percent: dec!(1) });
        p.extra_payment = Money::from_major(75);
        p.planned_spend = Money::from_major(120);
        let rows = AmortizationSimulator::new(p).run(36);

        for row in &rows {
            assert!(!row.ending_balance.is_negative());
            assert!(row.minimum_due <= row.due_balance);
            assert!(row.planned_payment <= row.due_balance);
            assert_eq!(
                row.ending_balance,
                (row.due_balance - row.planned_payment).non_negative() + row.planned_spend
            );
            assert!(row.ending_utilization >= Rate::ZERO && row.ending_utilization <= Rate::ONE);
        }
    }

    #[test]
    fn test_paid_off_balance_stays_at_spend() {
        let mut p = params(100, dec!(12), fixed(500));
        p.planned_spend = Money::from_major(30);
        let rows = AmortizationSimulator::new(p).run(3);

        assert_eq!(rows[0].planned_payment, Money::from_major(101));
        assert_eq!(rows[0].ending_balance, Money::from_major(30));
        assert_eq!(rows[1].ending_balance, Money::from_major(30));
    }

    #[test]
    fn test_zero_limit_utilization_is_zero() {
        let mut p = params(2_000, dec!(18), fixed(50));
        p.credit_limit = Money::ZERO;
        let rows = AmortizationSimulator::new(p).run(12);
        assert!(rows.iter().all(|r| r.ending_utilization == Rate::ZERO));
    }

    #[test]
    fn test_utilization_clamped_when_over_limit() {
        let mut p = params(4_900, dec!(24), fixed(10));
        p.planned_spend = Money::from_major(500);
        let rows = AmortizationSimulator::new(p).run(2);
        assert_eq!(rows[0].ending_utilization, Rate::ONE);
    }

    #[test]
    fn test_negative_start_balance_floors_at_zero() {
        let rows = AmortizationSimulator::new(params(-50, dec!(24), fixed(25))).run(1);
        assert_eq!(rows[0].start_balance, Money::ZERO);
        assert_eq!(rows[0].ending_balance, Money::ZERO);
    }

    #[test]
    fn test_interest_savings_from_extra_payment() {
        let sim = AmortizationSimulator::new(params(1_200, dec!(24), fixed(25)));
        let savings = sim.interest_savings(Money::from_major(100), 12);
        assert!(savings.is_positive());

        let free = AmortizationSimulator::new(params(1_200, dec!(0), fixed(25)));
        assert_eq!(free.interest_savings(Money::from_major(100), 12), Money::ZERO);
    }

    #[test]
    fn test_run_is_repeatable() {
        let sim = AmortizationSimulator::new(params(2_500, dec!(21), fixed(60)));
        assert_eq!(sim.run(12), sim.run(12));
    }
}
