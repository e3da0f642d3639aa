//! Depreciation schedules for the fixed capital base
//!
//! Supports:
//! - Declining balance (configurable factor, double-declining by default) with a
//!   switch-to-straight-line cap
//! - Sum-of-years-digits
//!
//! Both strategies share one bookkeeping pass that produces the charge sequence and the
//! book-value sequence together, including the full write-off of any residual book value
//! in the period after the planned life.

mod schedule;
mod declining;
mod soyd;

pub use schedule::{
    build_schedule, DepreciationBasis, DepreciationSchedule, FIRST_CHARGE_PERIOD, IN_SERVICE_PERIOD,
};
pub use declining::{DecliningBalance, DEFAULT_DECLINING_FACTOR};
pub use soyd::SumOfYearsDigits;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EconomicsError, EconomicsResult};

/// Trait for depreciation strategies
///
/// Implementors only decide the planned charge for one year of the life; book-value
/// tracking, the tail write-off and horizon truncation live in [`build_schedule`].
pub trait DepreciationStrategy {
    /// Short label used in logs and reports
    fn name(&self) -> &'static str;

    /// Planned charge for `year` (0-indexed within the life), given the book value
    /// carried into that period
    fn planned_charge(&self, year: usize, opening_book_value: f64, basis: &DepreciationBasis) -> f64;

    /// Strategy-specific parameter checks
    fn validate(&self, _basis: &DepreciationBasis) -> EconomicsResult<()> {
        Ok(())
    }
}

/// Depreciation method selector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DepreciationMethod {
    SumOfYearsDigits,
    DecliningBalance { factor: f64 },
}

impl DepreciationMethod {
    pub fn double_declining() -> Self {
        DepreciationMethod::DecliningBalance {
            factor: DEFAULT_DECLINING_FACTOR,
        }
    }

    /// Replace the declining-balance factor; sum-of-years-digits is unaffected
    pub fn with_factor(self, factor: f64) -> Self {
        match self {
            DepreciationMethod::DecliningBalance { .. } => DepreciationMethod::DecliningBalance { factor },
            other => other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DepreciationMethod::SumOfYearsDigits => "SOYD",
            DepreciationMethod::DecliningBalance { .. } => "DDB",
        }
    }
}

impl Default for DepreciationMethod {
    fn default() -> Self {
        DepreciationMethod::SumOfYearsDigits
    }
}

impl fmt::Display for DepreciationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DepreciationMethod {
    type Err = EconomicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SOYD" | "SUM-OF-YEARS-DIGITS" | "SUM_OF_YEARS_DIGITS" => Ok(DepreciationMethod::SumOfYearsDigits),
            "DDB" | "DB" | "DECLINING-BALANCE" | "DECLINING_BALANCE" => Ok(DepreciationMethod::double_declining()),
            _ => Err(EconomicsError::UnknownMethod(s.to_string())),
        }
    }
}

/// Build the depreciation schedule for `method` over the horizon described by `basis`
pub fn depreciation_schedule(
    method: &DepreciationMethod,
    basis: &DepreciationBasis,
) -> EconomicsResult<DepreciationSchedule> {
    match *method {
        DepreciationMethod::SumOfYearsDigits => build_schedule(&SumOfYearsDigits, basis),
        DepreciationMethod::DecliningBalance { factor } => build_schedule(&DecliningBalance::new(factor), basis),
    }
}
