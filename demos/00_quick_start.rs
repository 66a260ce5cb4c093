/// quick start - one card, one loan, one report
use debt_payoff_engine::{
    CardInstrument, EngineConfig, LoanInstrument, MinimumPaymentPolicy, Money, PortfolioEngine,
    Rate, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let card = CardInstrument::builder()
        .name("Everyday Visa")
        .credit_limit(Money::from_major(5_000))
        .current_used(Money::from_major(1_800))
        .statement_balance(Money::from_major(1_500))
        .pending_charges(Money::from_major(300))
        .minimum_payment(MinimumPaymentPolicy::PercentPlusInterest { percent: dec!(1) })
        .apr(Rate::from_percentage(dec!(24.99)))
        .due_day(21)
        .build()?;

    let loan = LoanInstrument::builder()
        .name("Personal loan")
        .outstanding_principal(Money::from_major(7_500))
        .apr(Rate::from_percentage(dec!(9.5)))
        .installment(MinimumPaymentPolicy::Fixed { amount: Money::from_major(275) })
        .build()?;

    // production: use system time
    let time = SafeTimeProvider::new(TimeSource::System);

    let engine = PortfolioEngine::new(EngineConfig::default())?;
    let report = engine.evaluate(&[card], &[loan], &time);

    println!("{}", report.to_json_pretty()?);

    Ok(())
}
