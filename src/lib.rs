pub mod amortization;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod loan;
pub mod session;
pub mod types;
pub mod view;

// re-export key types
pub use amortization::{
    compute, compute_for, installment_amount, AmortizationCalculator, AmortizationResult,
    AmortizationRow,
};
pub use config::CalculatorConfig;
pub use decimal::{Money, Rate};
pub use errors::{EmiError, Result};
pub use loan::{LoanSpec, LoanSpecBuilder, MAX_PERIODS};
pub use session::{Calculation, EmiSession, LoanForm};
pub use types::{CalculationId, PaymentFrequency};
pub use view::{paginate, PaymentBreakdown, RowView, SchedulePage, ScheduleView};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
