/// portfolio report - alerts and payoff targeting across several cards
use chrono::{TimeZone, Utc};
use debt_payoff_engine::{
    CardInstrument, EngineConfig, MinimumPaymentPolicy, Money, PayoffStrategy, PortfolioEngine,
    Rate, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== portfolio report example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 5, 18, 9, 0, 0).unwrap(),
    ));

    let cards = vec![
        CardInstrument::builder()
            .name("Travel Rewards")
            .credit_limit(Money::from_major(10_000))
            .current_used(Money::from_major(4_200))
            .statement_balance(Money::from_major(3_900))
            .pending_charges(Money::from_major(300))
            .minimum_payment(MinimumPaymentPolicy::PercentPlusInterest { percent: dec!(1) })
            .extra_payment(Money::from_major(150))
            .planned_monthly_spend(Money::from_major(400))
            .apr(Rate::from_percentage(dec!(21.49)))
            .due_day(20)
            .build()?,
        CardInstrument::builder()
            .name("Store Card")
            .credit_limit(Money::from_major(1_500))
            .current_used(Money::from_major(1_420))
            .statement_balance(Money::from_major(1_420))
            .minimum_payment(MinimumPaymentPolicy::Fixed { amount: Money::from_major(25) })
            .apr(Rate::from_percentage(dec!(29.99)))
            .due_day(28)
            .build()?,
        CardInstrument::builder()
            .name("Balance Transfer")
            .credit_limit(Money::from_major(6_000))
            .current_used(Money::from_major(600))
            .statement_balance(Money::from_major(600))
            .minimum_payment(MinimumPaymentPolicy::Fixed { amount: Money::from_major(50) })
            .apr(Rate::from_percentage(dec!(3.99)))
            .due_day(5)
            .build()?,
    ];

    let engine = PortfolioEngine::new(EngineConfig::default())?;
    let report = engine.evaluate(&cards, &[], &time);

    println!("as of {}", report.as_of.format("%Y-%m-%d"));
    for view in &report.cards {
        let s = &view.statement;
        println!(
            "{:<18} balance ${:>9}  utilization {:>6}  due {}  12m interest ${}",
            s.name,
            s.display_balance,
            s.display_utilization,
            s.due_cycle.next_due_date,
            view.summary.total_interest,
        );
    }

    let totals = &report.card_totals;
    println!(
        "\ntotal ${} of ${} ({}), weighted apr {}",
        totals.total_display_balance,
        totals.total_credit_limit,
        totals.aggregate_utilization,
        totals.weighted_apr,
    );

    println!("\nalerts:");
    for alert in &report.alerts {
        println!("  [{:?}] {} - {}", alert.severity, alert.title, alert.detail);
    }

    println!("\navalanche order:");
    for (i, c) in report.payoff.avalanche.iter().enumerate() {
        println!("  {}. {} ({} apr, ${})", i + 1, c.name, c.apr, c.balance);
    }
    println!("snowball order:");
    for (i, c) in report.payoff.snowball.iter().enumerate() {
        println!("  {}. {} (${}, {} apr)", i + 1, c.name, c.balance, c.apr);
    }

    if let (Some(strategy), Some(target)) =
        (report.payoff.recommended_strategy, &report.payoff.recommended_target)
    {
        let label = match strategy {
            PayoffStrategy::Avalanche => "avalanche",
            PayoffStrategy::Snowball => "snowball",
        };
        println!(
            "\nrecommended: {} via {} (saves ${} a year)",
            target.name, label, target.annual_interest_savings
        );
    }

    Ok(())
}
