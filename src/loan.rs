use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{EmiError, Result};
use crate::types::PaymentFrequency;

/// validated description of a fixed-payment amortizing loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSpec {
    pub principal: Money,
    pub annual_rate: Rate,
    pub tenure_years: Decimal,
    pub frequency: PaymentFrequency,
}

impl LoanSpec {
    /// create a loan spec, rejecting inputs that cannot produce a schedule
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        tenure_years: Decimal,
        frequency: PaymentFrequency,
    ) -> Result<Self> {
        let spec = Self {
            principal,
            annual_rate,
            tenure_years,
            frequency,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn builder() -> LoanSpecBuilder {
        LoanSpecBuilder::new()
    }

    /// check field bounds and that at least one period results
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(EmiError::invalid_spec("principal", "must be greater than zero"));
        }
        // zero is allowed: the schedule degenerates to equal principal slices
        if self.annual_rate.is_negative() {
            return Err(EmiError::invalid_spec("annual_rate", "must not be negative"));
        }
        if self.tenure_years <= Decimal::ZERO {
            return Err(EmiError::invalid_spec("tenure_years", "must be greater than zero"));
        }
        number_of_payments(self.tenure_years, self.frequency)?;
        Ok(())
    }

    pub fn periods_per_year(&self) -> u32 {
        self.frequency.periods_per_year()
    }

    pub fn period_rate(&self) -> Rate {
        self.annual_rate.periodic(self.periods_per_year())
    }

    pub fn number_of_payments(&self) -> Result<u32> {
        number_of_payments(self.tenure_years, self.frequency)
    }
}

/// upper bound on installments in one schedule (100 years of monthly payments)
pub const MAX_PERIODS: u32 = 1_200;

/// whole number of installments, rounding half away from zero
pub fn number_of_payments(tenure_years: Decimal, frequency: PaymentFrequency) -> Result<u32> {
    let periods_per_year = frequency.periods_per_year();
    let exact = tenure_years
        .checked_mul(Decimal::from(periods_per_year))
        .ok_or_else(|| EmiError::CalculationOverflow {
            context: "tenure in periods".to_string(),
        })?;
    let rounded = exact.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    if rounded <= Decimal::ZERO {
        return Err(EmiError::NoPayments {
            tenure_years,
            periods_per_year,
        });
    }

    if rounded > Decimal::from(MAX_PERIODS) {
        return Err(EmiError::TooManyPayments {
            tenure_years,
            periods_per_year,
            max_periods: MAX_PERIODS,
        });
    }

    rounded.to_u32().ok_or_else(|| EmiError::CalculationOverflow {
        context: format!("{rounded} periods does not fit a period counter"),
    })
}

/// builder for loan specs
#[derive(Debug, Clone, Default)]
pub struct LoanSpecBuilder {
    principal: Option<Money>,
    annual_rate: Option<Rate>,
    tenure_years: Option<Decimal>,
    frequency: Option<PaymentFrequency>,
}

impl LoanSpecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    /// annual rate given in percent, e.g. 8.5 for 8.5%
    pub fn rate_percent(mut self, percent: Decimal) -> Self {
        self.annual_rate = Some(Rate::from_percentage(percent));
        self
    }

    pub fn tenure_years(mut self, years: Decimal) -> Self {
        self.tenure_years = Some(years);
        self
    }

    pub fn frequency(mut self, frequency: PaymentFrequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// frequency from a form label; unknown labels become monthly
    pub fn frequency_label(mut self, label: &str) -> Self {
        self.frequency = Some(PaymentFrequency::from_label(label));
        self
    }

    pub fn build(self) -> Result<LoanSpec> {
        let principal = self
            .principal
            .ok_or_else(|| EmiError::invalid_spec("principal", "is required"))?;
        let annual_rate = self
            .annual_rate
            .ok_or_else(|| EmiError::invalid_spec("annual_rate", "is required"))?;
        let tenure_years = self
            .tenure_years
            .ok_or_else(|| EmiError::invalid_spec("tenure_years", "is required"))?;

        LoanSpec::new(
            principal,
            annual_rate,
            tenure_years,
            self.frequency.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn personal_loan() -> LoanSpecBuilder {
        LoanSpec::builder()
            .principal(Money::from_major(100_000))
            .rate_percent(dec!(12))
            .tenure_years(dec!(1))
    }

    #[test]
    fn test_builder_defaults_to_monthly() {
        let spec = personal_loan().build().unwrap();
        assert_eq!(spec.frequency, PaymentFrequency::Monthly);
        assert_eq!(spec.period_rate().as_decimal(), dec!(0.01));
        assert_eq!(spec.number_of_payments().unwrap(), 12);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = LoanSpec::builder().rate_percent(dec!(5)).tenure_years(dec!(1)).build().unwrap_err();
        assert!(matches!(err, EmiError::InvalidLoanSpec { ref field, .. } if field == "principal"));

        let err = LoanSpec::builder().principal(Money::from_major(1)).tenure_years(dec!(1)).build().unwrap_err();
        assert!(matches!(err, EmiError::InvalidLoanSpec { ref field, .. } if field == "annual_rate"));
    }

    #[test]
    fn test_non_positive_inputs_rejected() {
        assert!(personal_loan().principal(Money::ZERO).build().is_err());
        assert!(personal_loan().principal(Money::from_major(-10)).build().is_err());
        assert!(personal_loan().rate_percent(dec!(-1)).build().is_err());
        assert!(personal_loan().tenure_years(dec!(0)).build().is_err());
    }

    #[test]
    fn test_zero_rate_accepted() {
        let spec = personal_loan().rate_percent(dec!(0)).build().unwrap();
        assert!(spec.annual_rate.is_zero());
    }

    #[test]
    fn test_tenure_rounding() {
        assert_eq!(number_of_payments(dec!(2.5), PaymentFrequency::Yearly).unwrap(), 3);
        assert_eq!(number_of_payments(dec!(2.4), PaymentFrequency::Yearly).unwrap(), 2);
        assert_eq!(number_of_payments(dec!(1.5), PaymentFrequency::Quarterly).unwrap(), 6);
        assert_eq!(number_of_payments(dec!(30), PaymentFrequency::Monthly).unwrap(), 360);
    }

    #[test]
    fn test_zero_periods_rejected() {
        let err = number_of_payments(dec!(0.2), PaymentFrequency::Yearly).unwrap_err();
        assert_eq!(
            err,
            EmiError::NoPayments {
                tenure_years: dec!(0.2),
                periods_per_year: 1,
            }
        );
        assert!(personal_loan()
            .tenure_years(dec!(0.01))
            .frequency(PaymentFrequency::Monthly)
            .build()
            .is_err());
    }

    #[test]
    fn test_period_count_capped() {
        assert_eq!(number_of_payments(dec!(100), PaymentFrequency::Monthly).unwrap(), MAX_PERIODS);
        assert_eq!(
            number_of_payments(dec!(4000000000), PaymentFrequency::Yearly).unwrap_err(),
            EmiError::TooManyPayments {
                tenure_years: dec!(4000000000),
                periods_per_year: 1,
                max_periods: MAX_PERIODS,
            }
        );
        assert!(matches!(
            number_of_payments(dec!(100.1), PaymentFrequency::Monthly),
            Err(EmiError::TooManyPayments { .. })
        ));
        assert!(personal_loan().tenure_years(dec!(250)).build().is_err());
    }

    #[test]
    fn test_frequency_label() {
        let spec = personal_loan().frequency_label("semi-annual").build().unwrap();
        assert_eq!(spec.frequency, PaymentFrequency::SemiAnnual);
        let spec = personal_loan().frequency_label("weekly").build().unwrap();
        assert_eq!(spec.frequency, PaymentFrequency::Monthly);
    }
}
