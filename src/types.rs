use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use uuid::Uuid;

use crate::errors::{EmiError, Result};

/// unique identifier for a calculation held by a session
pub type CalculationId = Uuid;

/// how often an installment falls due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentFrequency {
    #[default]
    Monthly,
    Quarterly,
    SemiAnnual,
    Yearly,
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 4] = [
        PaymentFrequency::Monthly,
        PaymentFrequency::Quarterly,
        PaymentFrequency::SemiAnnual,
        PaymentFrequency::Yearly,
    ];

    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::SemiAnnual => 2,
            PaymentFrequency::Yearly => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentFrequency::Monthly => "monthly",
            PaymentFrequency::Quarterly => "quarterly",
            PaymentFrequency::SemiAnnual => "semi-annual",
            PaymentFrequency::Yearly => "yearly",
        }
    }

    /// lenient lookup: anything that is not a known label is treated as monthly
    pub fn from_label(label: &str) -> Self {
        match label.parse::<PaymentFrequency>() {
            Ok(frequency) => frequency,
            Err(_) => {
                warn!(label, "unrecognized payment frequency, falling back to monthly");
                PaymentFrequency::Monthly
            }
        }
    }
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentFrequency {
    type Err = EmiError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(PaymentFrequency::Monthly),
            "quarterly" => Ok(PaymentFrequency::Quarterly),
            "semi-annual" => Ok(PaymentFrequency::SemiAnnual),
            "yearly" => Ok(PaymentFrequency::Yearly),
            other => Err(EmiError::invalid_spec(
                "frequency",
                &format!("'{other}' is not one of monthly, quarterly, semi-annual, yearly"),
            )),
        }
    }
}
