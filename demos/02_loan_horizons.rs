/// loan horizons - balance checkpoints, payoff dates and history as time moves
use chrono::{Duration, TimeZone, Utc};
use debt_payoff_engine::{
    LoanCadence, LoanEvent, LoanInstrument, LoanProjector, MinimumPaymentPolicy, Money,
    PayoffDate, ProjectionConfig, Rate, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== loan horizons example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let loans = vec![
        LoanInstrument::builder()
            .name("Car loan")
            .outstanding_principal(Money::from_major(14_000))
            .apr(Rate::from_percentage(dec!(6.9)))
            .installment(MinimumPaymentPolicy::Fixed { amount: Money::from_major(420) })
            .due_day(12)
            .event(LoanEvent::Disbursement {
                amount: Money::from_major(18_000),
                timestamp: Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap(),
            })
            .event(LoanEvent::Payment {
                amount: Money::from_major(420),
                timestamp: Utc.with_ymd_and_hms(2023, 12, 12, 0, 0, 0).unwrap(),
            })
            .event(LoanEvent::Payment {
                amount: Money::from_major(420),
                timestamp: Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap(),
            })
            .build()?,
        LoanInstrument::builder()
            .name("Laptop financing")
            .outstanding_principal(Money::from_major(1_200))
            .cadence(LoanCadence::Biweekly)
            .installment(MinimumPaymentPolicy::Fixed { amount: Money::from_major(60) })
            .subscription_fee(Money::from_decimal(dec!(4.99)))
            .due_day(31)
            .build()?,
    ];

    let projector = LoanProjector::new(&ProjectionConfig::default());

    for step in 0..2 {
        if step > 0 {
            controller.advance(Duration::days(10));
        }
        let report = projector.project_portfolio(&loans, time.now());

        println!("--- {} ---", time.now().format("%Y-%m-%d"));
        println!(
            "outstanding ${}  weighted apr {}  next month interest ${}  annual payments ${}",
            report.total_outstanding,
            report.weighted_apr,
            report.projected_next_month_interest,
            report.projected_annual_payments,
        );

        for loan in &report.loans {
            println!("\n{} (next due {})", loan.name, loan.due_cycle.next_due_date);
            for h in &loan.horizons {
                println!("  month {:>2}: ${}", h.month, h.ending_outstanding);
            }
            match loan.projected_payoff {
                PayoffDate::AlreadyPaid => println!("  already paid"),
                PayoffDate::On { month_index, date } => {
                    println!("  paid off in month {} ({})", month_index, date)
                }
                PayoffDate::BeyondModeledWindow { months_modeled } => {
                    println!("  not paid off within {} months", months_modeled)
                }
            }
            println!(
                "  paid to date ${} over {} payments",
                loan.to_date.total_paid, loan.to_date.payment_count
            );
        }
        println!();
    }

    Ok(())
}
