use serde::{Deserialize, Serialize};

use crate::errors::{EmiError, Result};
use crate::types::PaymentFrequency;

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// decimal places used when presenting amounts
    pub display_decimal_places: u32,
    pub rows_per_page: usize,
    pub rows_per_page_options: Vec<usize>,
    pub default_frequency: PaymentFrequency,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            display_decimal_places: 2,
            rows_per_page: 10,
            rows_per_page_options: vec![10, 50, 100, 200],
            default_frequency: PaymentFrequency::Monthly,
        }
    }
}

impl CalculatorConfig {
    /// configuration suited to long mortgage schedules
    pub fn mortgage() -> Self {
        Self {
            rows_per_page: 50,
            ..Self::default()
        }
    }

    /// configuration for short quarterly business loans
    pub fn business_loan() -> Self {
        Self {
            default_frequency: PaymentFrequency::Quarterly,
            ..Self::default()
        }
    }

    /// load from json; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows_per_page_options.is_empty() {
            return Err(EmiError::InvalidConfiguration {
                message: "rows_per_page_options must not be empty".to_string(),
            });
        }
        if self.rows_per_page_options.contains(&0) {
            return Err(EmiError::InvalidConfiguration {
                message: "rows_per_page_options must not contain zero".to_string(),
            });
        }
        if !self.rows_per_page_options.contains(&self.rows_per_page) {
            return Err(EmiError::InvalidConfiguration {
                message: format!(
                    "rows_per_page {} is not one of {:?}",
                    self.rows_per_page, self.rows_per_page_options
                ),
            });
        }
        if self.display_decimal_places > 8 {
            return Err(EmiError::InvalidConfiguration {
                message: format!(
                    "display_decimal_places {} exceeds 8",
                    self.display_decimal_places
                ),
            });
        }
        Ok(())
    }

    pub fn allows_rows_per_page(&self, rows_per_page: usize) -> bool {
        self.rows_per_page_options.contains(&rows_per_page)
    }
}
