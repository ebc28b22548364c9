/// quick start - compute an EMI and print the first few installments
use emi_calculator_rs::{compute, Decimal, Money, PaymentFrequency};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    // 100,000 at 12% over one year, paid monthly
    let result = compute(
        Money::from_major(100_000),
        Decimal::from(12),
        Decimal::ONE,
        PaymentFrequency::Monthly,
    )?;

    println!("EMI: {}", result.payment.round_dp(2));
    for row in result.schedule.iter().take(3) {
        println!(
            "period {:>3}  principal {:>10}  interest {:>9}  balance {:>10}",
            row.period,
            row.principal_payment.round_dp(2),
            row.interest_payment.round_dp(2),
            row.remaining_balance.round_dp(2),
        );
    }
    println!("total interest: {}", result.total_interest().round_dp(2));

    Ok(())
}
