/// submit raw form json and print the display view as json
use emi_calculator_rs::{EmiSession, LoanForm, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let time = SafeTimeProvider::new(TimeSource::System);
    let mut session = EmiSession::default();

    let form = LoanForm::from_json(
        r#"{ "principal": "25000", "rate_percent": "10", "tenure_years": "2", "frequency": "quarterly" }"#,
    )?;
    session.submit(&form, &time)?;

    println!("{}", session.view()?.to_json_pretty()?);

    // an invalid form leaves the previous result in place
    let bad = LoanForm::from_json(r#"{ "principal": "0", "rate_percent": "10", "tenure_years": "2" }"#)?;
    if let Err(e) = session.submit(&bad, &time) {
        println!("rejected: {e}");
    }

    Ok(())
}
