use chrono::{DateTime, Utc};
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::amortization::{compute_for, AmortizationResult};
use crate::config::CalculatorConfig;
use crate::decimal::Money;
use crate::errors::{EmiError, Result};
use crate::loan::LoanSpec;
use crate::types::{CalculationId, PaymentFrequency};
use crate::view::{paginate, total_pages, SchedulePage, ScheduleView};

/// raw form input; every field may still be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanForm {
    pub principal: Option<Money>,
    pub rate_percent: Option<Decimal>,
    pub tenure_years: Option<Decimal>,
    pub frequency: Option<String>,
}

impl LoanForm {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// validate into a loan spec, using `default_frequency` when none was chosen
    pub fn to_spec(&self, default_frequency: PaymentFrequency) -> Result<LoanSpec> {
        let frequency = self
            .frequency
            .as_deref()
            .map(PaymentFrequency::from_label)
            .unwrap_or(default_frequency);

        let mut builder = LoanSpec::builder().frequency(frequency);
        if let Some(principal) = self.principal {
            builder = builder.principal(principal);
        }
        if let Some(rate) = self.rate_percent {
            builder = builder.rate_percent(rate);
        }
        if let Some(tenure) = self.tenure_years {
            builder = builder.tenure_years(tenure);
        }
        builder.build()
    }
}

/// a computed result together with what produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub id: CalculationId,
    pub calculated_at: DateTime<Utc>,
    pub spec: LoanSpec,
    pub result: AmortizationResult,
}

/// holds the latest calculation and the page being shown
#[derive(Debug, Clone)]
pub struct EmiSession {
    config: CalculatorConfig,
    current: Option<Calculation>,
    page: usize,
    rows_per_page: usize,
}

impl Default for EmiSession {
    fn default() -> Self {
        let config = CalculatorConfig::default();
        Self {
            rows_per_page: config.rows_per_page,
            config,
            current: None,
            page: 1,
        }
    }
}

impl EmiSession {
    pub fn new(config: CalculatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rows_per_page: config.rows_per_page,
            config,
            current: None,
            page: 1,
        })
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// compute and replace the held calculation; on error the previous one is kept
    pub fn calculate(&mut self, spec: LoanSpec, time: &SafeTimeProvider) -> Result<&Calculation> {
        let result = compute_for(&spec)?;
        let calculation = Calculation {
            id: Uuid::new_v4(),
            calculated_at: time.now(),
            spec,
            result,
        };

        info!(
            id = %calculation.id,
            payment = %calculation.result.payment.round_dp(self.config.display_decimal_places),
            periods = calculation.result.number_of_payments(),
            replaced = self.current.is_some(),
            "calculation stored"
        );

        self.page = 1;
        Ok(self.current.insert(calculation))
    }

    /// validate raw form input, then calculate
    pub fn submit(&mut self, form: &LoanForm, time: &SafeTimeProvider) -> Result<&Calculation> {
        let spec = form.to_spec(self.config.default_frequency)?;
        self.calculate(spec, time)
    }

    pub fn current(&self) -> Result<&Calculation> {
        self.current.as_ref().ok_or(EmiError::NoCalculation)
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.page = 1;
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn total_pages(&self) -> Result<usize> {
        let calculation = self.current()?;
        total_pages(calculation.result.schedule.len(), self.rows_per_page)
    }

    /// full schedule rounded for display
    pub fn view(&self) -> Result<ScheduleView> {
        let calculation = self.current()?;
        Ok(ScheduleView::from_result(
            &calculation.result,
            self.config.display_decimal_places,
        ))
    }

    /// rows on the current page
    pub fn page(&self) -> Result<SchedulePage> {
        let calculation = self.current()?;
        paginate(
            &calculation.result,
            self.page,
            self.rows_per_page,
            self.config.display_decimal_places,
        )
    }

    /// advance one page; stays put on the last page
    pub fn next_page(&mut self) -> Result<SchedulePage> {
        let total = self.total_pages()?;
        if self.page < total {
            self.page += 1;
        }
        self.page()
    }

    /// go back one page; stays put on the first page
    pub fn previous_page(&mut self) -> Result<SchedulePage> {
        self.current()?;
        if self.page > 1 {
            self.page -= 1;
        }
        self.page()
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<SchedulePage> {
        let total_pages = self.total_pages()?;
        if page == 0 || page > total_pages {
            return Err(EmiError::InvalidPage { page, total_pages });
        }
        self.page = page;
        self.page()
    }

    /// change page size; the current page is pulled back into range
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<()> {
        if !self.config.allows_rows_per_page(rows_per_page) {
            return Err(EmiError::InvalidRowsPerPage { rows_per_page });
        }
        self.rows_per_page = rows_per_page;
        if let Some(calculation) = &self.current {
            let total = total_pages(calculation.result.schedule.len(), rows_per_page)?;
            self.page = self.page.min(total);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ))
    }

    fn mortgage_spec() -> LoanSpec {
        LoanSpec::builder()
            .principal(Money::from_major(300_000))
            .rate_percent(dec!(6.5))
            .tenure_years(dec!(30))
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_session() {
        let mut session = EmiSession::default();
        assert_eq!(session.current().unwrap_err(), EmiError::NoCalculation);
        assert!(session.page().is_err());
        assert!(session.next_page().is_err());
        assert!(session.previous_page().is_err());
        assert_eq!(session.current_page(), 1);
    }

    #[test]
    fn test_calculate_stamps_time() {
        let time = test_time();
        let mut session = EmiSession::default();

        let calculation = session.calculate(mortgage_spec(), &time).unwrap();
        assert_eq!(calculation.calculated_at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(calculation.result.schedule.len(), 360);
    }

    #[test]
    fn test_recalculation_replaces_and_resets_page() {
        let time = test_time();
        let control = time.test_control().unwrap();
        let mut session = EmiSession::default();

        let first_id = session.calculate(mortgage_spec(), &time).unwrap().id;
        session.go_to_page(5).unwrap();
        assert_eq!(session.current_page(), 5);

        control.advance(Duration::minutes(5));
        let spec = LoanSpec::builder()
            .principal(Money::from_major(10_000))
            .rate_percent(dec!(8))
            .tenure_years(dec!(2))
            .frequency(PaymentFrequency::Quarterly)
            .build()
            .unwrap();
        let second = session.calculate(spec, &time).unwrap();

        assert_ne!(second.id, first_id);
        assert_eq!(second.result.schedule.len(), 8);
        assert_eq!(second.calculated_at, Utc.with_ymd_and_hms(2024, 1, 1, 0, 5, 0).unwrap());
        assert_eq!(session.current_page(), 1);
        assert_eq!(session.total_pages().unwrap(), 1);
    }

    #[test]
    fn test_failed_submit_keeps_previous_calculation() {
        let time = test_time();
        let mut session = EmiSession::default();
        let id = session.calculate(mortgage_spec(), &time).unwrap().id;

        let form = LoanForm {
            principal: Some(Money::ZERO),
            rate_percent: Some(dec!(5)),
            tenure_years: Some(dec!(1)),
            frequency: None,
        };
        assert!(matches!(
            session.submit(&form, &time),
            Err(EmiError::InvalidLoanSpec { .. })
        ));
        assert_eq!(session.current().unwrap().id, id);
    }

    #[test]
    fn test_paging_stays_within_bounds() {
        let time = test_time();
        let mut session = EmiSession::default();
        session.calculate(mortgage_spec(), &time).unwrap();
        assert_eq!(session.total_pages().unwrap(), 36);

        let page = session.previous_page().unwrap();
        assert_eq!(page.page, 1);

        let page = session.next_page().unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.rows[0].period, 11);

        session.go_to_page(36).unwrap();
        let page = session.next_page().unwrap();
        assert_eq!(page.page, 36);
        assert_eq!(page.rows.last().map(|r| r.period), Some(360));

        assert!(matches!(
            session.go_to_page(37),
            Err(EmiError::InvalidPage { page: 37, total_pages: 36 })
        ));
    }

    #[test]
    fn test_rows_per_page_change_clamps_page() {
        let time = test_time();
        let mut session = EmiSession::default();
        session.calculate(mortgage_spec(), &time).unwrap();
        session.go_to_page(30).unwrap();

        session.set_rows_per_page(200).unwrap();
        assert_eq!(session.rows_per_page(), 200);
        assert_eq!(session.current_page(), 2);
        assert_eq!(session.page().unwrap().rows.len(), 160);

        assert_eq!(
            session.set_rows_per_page(25).unwrap_err(),
            EmiError::InvalidRowsPerPage { rows_per_page: 25 }
        );
    }

    #[test]
    fn test_submit_form_json() {
        let time = test_time();
        let mut session = EmiSession::new(CalculatorConfig::business_loan()).unwrap();
        let form = LoanForm::from_json(
            r#"{ "principal": "100000", "rate_percent": "12", "tenure_years": "1" }"#,
        )
        .unwrap();

        let calculation = session.submit(&form, &time).unwrap();
        assert_eq!(calculation.spec.frequency, PaymentFrequency::Quarterly);
        assert_eq!(calculation.result.schedule.len(), 4);
    }

    #[test]
    fn test_submit_missing_field() {
        let time = test_time();
        let mut session = EmiSession::default();
        let form = LoanForm {
            principal: Some(Money::from_major(1_000)),
            rate_percent: None,
            tenure_years: Some(dec!(1)),
            frequency: Some("monthly".to_string()),
        };
        assert!(session.submit(&form, &time).is_err());
        assert!(session.current().is_err());
    }

    #[test]
    fn test_view_uses_configured_places() {
        let time = test_time();
        let mut session = EmiSession::default();
        let spec = LoanSpec::builder()
            .principal(Money::from_major(100_000))
            .rate_percent(dec!(12))
            .tenure_years(dec!(1))
            .build()
            .unwrap();
        session.calculate(spec, &time).unwrap();

        let view = session.view().unwrap();
        assert_eq!(view.payment.to_string(), "8884.88");

        session.clear();
        assert!(session.view().is_err());
    }
}
