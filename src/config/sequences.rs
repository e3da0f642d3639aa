//! Per-period revenue and operating cost sequences
//!
//! Sequences are either filled flat from the configuration scalars or loaded from a CSV
//! file with one row per period:
//!
//! ```text
//! period,revenue,operating_cost
//! 0,0,0
//! 3,110,30
//! ...
//! ```

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

use super::EconomicsConfig;
use crate::error::{EconomicsError, EconomicsResult};

/// Raw CSV row
#[derive(Debug, Deserialize)]
struct CsvRow {
    period: usize,
    #[serde(alias = "R")]
    revenue: f64,
    #[serde(alias = "COM")]
    operating_cost: f64,
}

/// Revenue and operating cost per period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSequences {
    pub revenue: Vec<f64>,
    pub operating_cost: Vec<f64>,
}

impl PeriodSequences {
    /// Build from explicit sequences of equal length
    pub fn new(revenue: Vec<f64>, operating_cost: Vec<f64>) -> EconomicsResult<Self> {
        if revenue.len() != operating_cost.len() {
            return Err(EconomicsError::ShapeMismatch {
                what: "operating_cost",
                expected: revenue.len(),
                actual: operating_cost.len(),
            });
        }
        Ok(Self { revenue, operating_cost })
    }

    /// Constant revenue and cost in every period
    pub fn flat(config: &EconomicsConfig) -> Self {
        Self {
            revenue: vec![config.revenue_per_period; config.periods],
            operating_cost: vec![config.operating_cost_per_period; config.periods],
        }
    }

    pub fn periods(&self) -> usize {
        self.revenue.len()
    }

    /// Load sequences from a CSV file; the file must list each of `periods` periods once
    pub fn from_csv_path<P: AsRef<Path>>(path: P, periods: usize) -> EconomicsResult<Self> {
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv(reader, periods)
    }

    /// Load sequences from any reader (string buffer, stdin, ...)
    pub fn from_csv_reader<R: Read>(reader: R, periods: usize) -> EconomicsResult<Self> {
        Self::from_csv(csv::Reader::from_reader(reader), periods)
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, periods: usize) -> EconomicsResult<Self> {
        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let row: CsvRow = result?;
            rows.push(row);
        }

        if rows.len() != periods {
            return Err(EconomicsError::ShapeMismatch {
                what: "sequence rows",
                expected: periods,
                actual: rows.len(),
            });
        }

        let mut revenue = vec![f64::NAN; periods];
        let mut operating_cost = vec![f64::NAN; periods];

        for row in rows {
            if row.period >= periods {
                return Err(EconomicsError::InvalidConfig(format!(
                    "period {} outside horizon of {} periods",
                    row.period, periods
                )));
            }
            if !revenue[row.period].is_nan() {
                return Err(EconomicsError::InvalidConfig(format!("period {} listed twice", row.period)));
            }
            if !(row.revenue.is_finite() && row.revenue >= 0.0)
                || !(row.operating_cost.is_finite() && row.operating_cost >= 0.0)
            {
                return Err(EconomicsError::InvalidConfig(format!(
                    "period {}: revenue and operating cost must be finite and non-negative",
                    row.period
                )));
            }
            revenue[row.period] = row.revenue;
            operating_cost[row.period] = row.operating_cost;
        }

        log::debug!("Loaded revenue/cost sequences for {} periods", periods);

        Ok(Self { revenue, operating_cost })
    }
}
