use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{EmiError, Result};
use crate::loan::{number_of_payments, LoanSpec};
use crate::types::PaymentFrequency;

/// one installment in an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub principal_payment: Money,
    pub interest_payment: Money,
    pub remaining_balance: Money,
}

/// fixed installment plus the full schedule that retires the loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub payment: Money,
    pub schedule: Vec<AmortizationRow>,
}

impl AmortizationResult {
    pub fn number_of_payments(&self) -> u32 {
        self.schedule.len() as u32
    }

    pub fn total_principal(&self) -> Money {
        self.schedule.iter().map(|row| row.principal_payment).sum()
    }

    pub fn total_interest(&self) -> Money {
        self.schedule.iter().map(|row| row.interest_payment).sum()
    }

    pub fn total_payment(&self) -> Money {
        self.schedule
            .iter()
            .map(|row| row.principal_payment + row.interest_payment)
            .sum()
    }

    /// row for a 1-based period number
    pub fn row(&self, period: u32) -> Option<&AmortizationRow> {
        if period == 0 {
            return None;
        }
        self.schedule.get((period - 1) as usize)
    }

    /// outstanding balance once `period` has been paid; period 0 is the opening balance
    pub fn balance_after(&self, period: u32) -> Option<Money> {
        if period == 0 {
            return self
                .schedule
                .first()
                .map(|row| row.remaining_balance + row.principal_payment);
        }
        self.row(period).map(|row| row.remaining_balance)
    }
}

/// equal-installment amortization calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmortizationCalculator {
    frequency: PaymentFrequency,
}

impl AmortizationCalculator {
    pub fn new(frequency: PaymentFrequency) -> Self {
        Self { frequency }
    }

    pub fn frequency(&self) -> PaymentFrequency {
        self.frequency
    }

    /// calculate installment and full schedule
    pub fn calculate_schedule(
        &self,
        principal: Money,
        annual_rate: Rate,
        tenure_years: Decimal,
    ) -> Result<AmortizationResult> {
        let periods_per_year = self.frequency.periods_per_year();
        let period_rate = annual_rate.periodic(periods_per_year);
        let periods = number_of_payments(tenure_years, self.frequency)?;
        let payment = installment_amount(principal, period_rate, periods)?;

        debug!(
            %principal,
            %annual_rate,
            frequency = %self.frequency,
            periods,
            %payment,
            "computing amortization schedule"
        );

        let r = period_rate.as_decimal();
        let mut schedule = Vec::with_capacity(periods as usize);
        let mut balance = principal;

        for period in 1..=periods {
            let interest_payment = balance * r;
            let principal_payment = payment - interest_payment;

            // floating drift in the last period must not leave a negative balance
            balance = (balance - principal_payment).max(Money::ZERO);

            schedule.push(AmortizationRow {
                period,
                principal_payment,
                interest_payment,
                remaining_balance: balance,
            });
        }

        Ok(AmortizationResult { payment, schedule })
    }
}

/// compute from primitive inputs, validating them first
pub fn compute(
    principal: Money,
    annual_rate_percent: Decimal,
    tenure_years: Decimal,
    frequency: PaymentFrequency,
) -> Result<AmortizationResult> {
    let spec = LoanSpec::new(
        principal,
        Rate::from_percentage(annual_rate_percent),
        tenure_years,
        frequency,
    )?;
    compute_for(&spec)
}

/// compute for an already validated loan spec
pub fn compute_for(spec: &LoanSpec) -> Result<AmortizationResult> {
    AmortizationCalculator::new(spec.frequency).calculate_schedule(
        spec.principal,
        spec.annual_rate,
        spec.tenure_years,
    )
}

/// EMI = P * r / (1 - (1 + r)^-n), or P / n without interest
pub fn installment_amount(principal: Money, period_rate: Rate, periods: u32) -> Result<Money> {
    // guard for direct callers; validated specs always carry at least one period
    if periods == 0 {
        return Err(EmiError::invalid_spec("periods", "must be at least one"));
    }

    let n = Decimal::from(periods);
    let r = period_rate.as_decimal();

    if r.is_zero() {
        return Ok(principal / n);
    }

    // discount factor shrinks towards zero, so long or steep loans cannot overflow
    let base = Decimal::ONE + r;
    let mut discount = Decimal::ONE;
    for _ in 0..periods {
        discount = discount.checked_div(base).unwrap_or(Decimal::ZERO);
        if discount.is_zero() {
            break;
        }
    }

    let denominator = Decimal::ONE - discount;
    if denominator.is_zero() {
        // rate too small to register at decimal precision
        return Ok(principal / n);
    }

    principal
        .checked_mul(r)
        .and_then(|m| m.checked_div(denominator))
        .ok_or_else(|| overflow("installment amount"))
}

fn overflow(context: &str) -> EmiError {
    EmiError::CalculationOverflow {
        context: context.to_string(),
    }
}
