/// display views over a computed schedule
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::{AmortizationResult, AmortizationRow};
use crate::decimal::Money;
use crate::errors::{EmiError, Result};

/// schedule row rounded for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowView {
    pub period: u32,
    pub principal_payment: Money,
    pub interest_payment: Money,
    pub remaining_balance: Money,
}

impl RowView {
    pub fn from_row(row: &AmortizationRow, dp: u32) -> Self {
        RowView {
            period: row.period,
            principal_payment: row.principal_payment.round_dp(dp),
            interest_payment: row.interest_payment.round_dp(dp),
            remaining_balance: row.remaining_balance.round_dp(dp),
        }
    }
}

/// principal against interest over the life of the loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal: Money,
    pub interest: Money,
    /// fraction of all payments that goes to principal
    pub principal_share: Decimal,
}

impl PaymentBreakdown {
    pub fn from_result(result: &AmortizationResult, dp: u32) -> Self {
        let principal = result.total_principal();
        let interest = result.total_interest();
        let total = (principal + interest).as_decimal();
        let principal_share = if total.is_zero() {
            Decimal::ZERO
        } else {
            (principal.as_decimal() / total).round_dp(4)
        };

        PaymentBreakdown {
            principal: principal.round_dp(dp),
            interest: interest.round_dp(dp),
            principal_share,
        }
    }
}

/// serializable view of a full calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleView {
    pub payment: Money,
    pub number_of_payments: u32,
    pub total_payment: Money,
    pub breakdown: PaymentBreakdown,
    pub rows: Vec<RowView>,
}

impl ScheduleView {
    pub fn from_result(result: &AmortizationResult, dp: u32) -> Self {
        ScheduleView {
            payment: result.payment.round_dp(dp),
            number_of_payments: result.number_of_payments(),
            total_payment: result.total_payment().round_dp(dp),
            breakdown: PaymentBreakdown::from_result(result, dp),
            rows: result
                .schedule
                .iter()
                .map(|row| RowView::from_row(row, dp))
                .collect(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// one page of schedule rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePage {
    pub page: usize,
    pub rows_per_page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub rows: Vec<RowView>,
}

impl SchedulePage {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// number of pages needed for `total_rows`, never less than one
pub fn total_pages(total_rows: usize, rows_per_page: usize) -> Result<usize> {
    if rows_per_page == 0 {
        return Err(EmiError::InvalidRowsPerPage { rows_per_page });
    }
    Ok(total_rows.div_ceil(rows_per_page).max(1))
}

/// slice a 1-based page out of the schedule
pub fn paginate(
    result: &AmortizationResult,
    page: usize,
    rows_per_page: usize,
    dp: u32,
) -> Result<SchedulePage> {
    let total_rows = result.schedule.len();
    let total_pages = total_pages(total_rows, rows_per_page)?;

    if page == 0 || page > total_pages {
        return Err(EmiError::InvalidPage { page, total_pages });
    }

    let start = (page - 1) * rows_per_page;
    let end = (start + rows_per_page).min(total_rows);
    let rows = result.schedule[start..end]
        .iter()
        .map(|row| RowView::from_row(row, dp))
        .collect();

    Ok(SchedulePage {
        page,
        rows_per_page,
        total_pages,
        total_rows,
        rows,
    })
}
