/// page through a long mortgage schedule the way a table would
use emi_calculator_rs::chrono::Utc;
use emi_calculator_rs::{CalculatorConfig, EmiSession, LoanSpec, Money, SafeTimeProvider, TimeSource};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let time = SafeTimeProvider::new(TimeSource::Test(Utc::now()));
    let mut session = EmiSession::new(CalculatorConfig::mortgage())?;

    let spec = LoanSpec::builder()
        .principal(Money::from_major(350_000))
        .rate_percent(dec!(6.25))
        .tenure_years(dec!(30))
        .build()?;
    let calculation = session.calculate(spec, &time)?;
    println!("calculation {} at {}", calculation.id, calculation.calculated_at);

    session.set_rows_per_page(100)?;
    let mut page = session.page()?;
    loop {
        let first = page.rows.first().map(|r| r.period).unwrap_or(0);
        let last = page.rows.last().map(|r| r.period).unwrap_or(0);
        println!("page {}/{}: periods {}-{}", page.page, page.total_pages, first, last);
        if !page.has_next() {
            break;
        }
        page = session.next_page()?;
    }

    Ok(())
}
