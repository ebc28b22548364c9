/// same loan under every payment frequency
use emi_calculator_rs::{LoanSpec, Money, PaymentFrequency};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    for frequency in PaymentFrequency::ALL {
        let spec = LoanSpec::builder()
            .principal(Money::from_major(500_000))
            .rate_percent(dec!(9.5))
            .tenure_years(dec!(10))
            .frequency(frequency)
            .build()?;
        let result = emi_calculator_rs::compute_for(&spec)?;

        println!(
            "{:<12} {:>4} payments of {:>12}  total interest {:>12}",
            frequency,
            result.number_of_payments(),
            result.payment.round_dp(2),
            result.total_interest().round_dp(2),
        );
    }

    // unknown labels fall back to monthly
    let spec = LoanSpec::builder()
        .principal(Money::from_major(500_000))
        .rate_percent(dec!(9.5))
        .tenure_years(dec!(10))
        .frequency_label("fortnightly")
        .build()?;
    println!("'fortnightly' resolves to {}", spec.frequency);

    Ok(())
}
